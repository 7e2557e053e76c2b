//! Guided tutorial: a fixed, linear sequence of steps.
//!
//! Each step validates the submitted command with a pure function of the
//! command name, its arguments and the working directory, so the same input
//! at the same step always produces the same transition.

use crate::core::VirtualFs;
use crate::core::filesystem::Node;
use crate::models::{Block, Rich};

/// A submitted command as seen by a step validator.
#[derive(Clone, Copy, Debug)]
pub struct Invocation<'a> {
    pub command: &'a str,
    pub args: &'a [String],
    pub cwd: &'a str,
    pub fs: &'a VirtualFs,
}

impl Invocation<'_> {
    fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

pub struct TutorialStep {
    pub prompt: &'static [&'static str],
    pub validator: fn(&Invocation<'_>) -> bool,
    pub success: &'static [&'static str],
    pub hint: &'static str,
}

/// Transition produced by [`advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// `exit` was typed
    Exit,
    /// Validator failed; the step does not change
    Rejected,
    /// Validator passed; `next` is `None` after the last step
    Accepted { next: Option<usize> },
}

pub static STEPS: [TutorialStep; 7] = [
    TutorialStep {
        prompt: &[
            "Welcome to the interactive terminal tutorial!",
            "Let's learn some basic commands. You can type `exit` at any time to leave the tutorial.",
            "First, let's find out where we are. Type `pwd` and press Enter.",
        ],
        validator: |inv| inv.command == "pwd",
        success: &["`pwd` stands for 'Print Working Directory'. It shows you your current location in the file system."],
        hint: "Type `pwd` to see your current directory.",
    },
    TutorialStep {
        prompt: &["Great! Now, let's see what's in this directory. Type `ls` to list the contents."],
        validator: |inv| inv.command == "ls",
        success: &["See? `ls` lists all files and directories. Directories are shown in blue."],
        hint: "Type `ls` to list files and directories.",
    },
    TutorialStep {
        prompt: &["Let's navigate into the `projects` directory. Use the `cd` command, which stands for 'Change Directory'. Type `cd projects`."],
        validator: |inv| inv.command == "cd" && inv.arg(0) == Some("projects"),
        success: &["You've moved into the `projects` directory! Your prompt has updated to show your new location."],
        hint: "Type `cd projects` to enter the projects directory.",
    },
    TutorialStep {
        prompt: &["Now that you're in a new directory, let's see what's here. Use `ls` again."],
        validator: |inv| inv.command == "ls",
        success: &["These are my project files. Let's inspect one."],
        hint: "Type `ls` to see the files in the current directory.",
    },
    TutorialStep {
        prompt: &["To view the contents of a file, use the `cat` command. Try it on one of the files, for example: `cat project-alpha.txt`"],
        validator: |inv| {
            inv.command == "cat"
                && inv
                    .arg(0)
                    .is_some_and(|path| matches!(inv.fs.get_node(path, inv.cwd), Some(Node::File(_))))
        },
        success: &["`cat` displays the content of a file. Pretty handy!"],
        hint: "Type `cat` followed by a file name, like `cat project-alpha.txt`.",
    },
    TutorialStep {
        prompt: &["Awesome. To go back to the home directory, you can type `cd ..`. The `..` means 'one level up'. Try it."],
        validator: |inv| inv.command == "cd" && matches!(inv.arg(0), Some("..") | Some("/home") | Some("/")),
        success: &["You're back in the home directory (`/`)."],
        hint: "Type `cd ..` to go up one directory level.",
    },
    TutorialStep {
        prompt: &["Let's learn a powerful command: `grep`. It's for searching text. I've added a `quotes.txt` file. Find the quote with the word 'love' by typing: `grep love quotes.txt`"],
        validator: |inv| inv.command == "grep" && inv.arg(0) == Some("love") && inv.arg(1) == Some("quotes.txt"),
        success: &[
            "Nice! `grep` found the line containing 'love' and highlighted it.",
            "In a real terminal, you could also \"pipe\" command outputs. For example: `cat quotes.txt | grep love`. This is a very powerful concept!",
        ],
        hint: "Type `grep love quotes.txt`",
    },
];

/// Decide the transition for `inv` at `step`.
///
/// `exit` with no arguments leaves the tutorial at any step. An
/// out-of-range step is treated as finished.
pub fn advance(step: usize, inv: &Invocation<'_>) -> Advance {
    if inv.command == "exit" && inv.args.is_empty() {
        return Advance::Exit;
    }
    let Some(current) = STEPS.get(step) else {
        return Advance::Accepted { next: None };
    };

    if (current.validator)(inv) {
        let next = step + 1;
        Advance::Accepted {
            next: (next < STEPS.len()).then_some(next),
        }
    } else {
        Advance::Rejected
    }
}

/// Instructions shown when entering `step`.
pub fn prompt(step: usize) -> Rich {
    let mut rich = Rich::new();
    if let Some(s) = STEPS.get(step) {
        for line in s.prompt {
            rich.push(Block::Text(line.to_string()));
        }
    }
    rich
}

/// Success text for `step`, followed by the next prompt or the closing lines.
pub fn accepted(step: usize, next: Option<usize>) -> Rich {
    let mut rich = Rich::new();
    if let Some(s) = STEPS.get(step) {
        for line in s.success {
            rich.push(Block::Success(line.to_string()));
        }
    }

    match next {
        Some(next) => rich.extend(prompt(next)),
        None => {
            rich.push(Block::Heading(
                "Congratulations! You've completed the tutorial.".to_string(),
            ));
            rich.push(Block::Text(
                "You can now explore on your own. Type `help` to see all commands.".to_string(),
            ));
        }
    }
    rich
}

/// Line shown when the validator rejects the input.
pub fn hint(step: usize) -> String {
    let hint = STEPS.get(step).map_or("", |s| s.hint);
    format!("That's not quite right. Hint: {}", hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Site;

    fn fs() -> VirtualFs {
        VirtualFs::from_site(&Site::embedded().unwrap())
    }

    fn run(step: usize, line: &str, cwd: &str, fs: &VirtualFs) -> Advance {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("");
        let args: Vec<String> = words.map(str::to_string).collect();
        advance(
            step,
            &Invocation {
                command,
                args: &args,
                cwd,
                fs,
            },
        )
    }

    #[test]
    fn test_first_step() {
        let fs = fs();
        assert_eq!(run(0, "pwd", "/", &fs), Advance::Accepted { next: Some(1) });
        assert_eq!(run(0, "ls", "/", &fs), Advance::Rejected);
    }

    #[test]
    fn test_exit_from_any_step() {
        let fs = fs();
        for step in 0..STEPS.len() {
            assert_eq!(run(step, "exit", "/", &fs), Advance::Exit);
        }
        assert_eq!(run(0, "exit now", "/", &fs), Advance::Rejected);
    }

    #[test]
    fn test_cat_step_requires_existing_file() {
        let fs = fs();
        assert_eq!(
            run(4, "cat project-alpha.txt", "/projects", &fs),
            Advance::Accepted { next: Some(5) }
        );
        assert_eq!(run(4, "cat missing.txt", "/projects", &fs), Advance::Rejected);
        assert_eq!(run(4, "cat ../mycode", "/projects", &fs), Advance::Rejected);
        assert_eq!(run(4, "cat", "/projects", &fs), Advance::Rejected);
    }

    #[test]
    fn test_cd_up_step_alternatives() {
        let fs = fs();
        for line in ["cd ..", "cd /", "cd /home"] {
            assert_eq!(run(5, line, "/projects", &fs), Advance::Accepted { next: Some(6) });
        }
        assert_eq!(run(5, "cd mycode", "/projects", &fs), Advance::Rejected);
    }

    #[test]
    fn test_last_step_finishes() {
        let fs = fs();
        assert_eq!(run(6, "grep love quotes.txt", "/", &fs), Advance::Accepted { next: None });
        assert_eq!(run(6, "grep hate quotes.txt", "/", &fs), Advance::Rejected);
    }

    #[test]
    fn test_deterministic() {
        let fs = fs();
        for _ in 0..3 {
            assert_eq!(run(2, "cd projects", "/", &fs), Advance::Accepted { next: Some(3) });
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(hint(0), "That's not quite right. Hint: Type `pwd` to see your current directory.");
        let text = accepted(0, Some(1)).to_string();
        assert!(text.starts_with("`pwd` stands for"));
        assert!(text.ends_with("Type `ls` to list the contents."));
        let done = accepted(6, None).to_string();
        assert!(done.contains("Congratulations! You've completed the tutorial."));
        assert!(prompt(0).to_string().starts_with("Welcome to the interactive terminal tutorial!"));
    }
}
