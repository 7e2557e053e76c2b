//! Input history with Up/Down browsing.

use std::collections::VecDeque;

use crate::config::MAX_COMMAND_HISTORY;

/// Submitted lines, most recent first, without duplicates.
///
/// The cursor is `None` while the user edits the live buffer. Moving away
/// from the live buffer stashes it; coming back restores it. Recalled
/// entries are copies, so editing them never changes the history.
#[derive(Clone, Debug)]
pub struct InputHistory {
    entries: VecDeque<String>,
    cursor: Option<usize>,
    stash: String,
    capacity: usize,
}

impl Default for InputHistory {
    fn default() -> Self {
        Self::with_capacity(MAX_COMMAND_HISTORY)
    }
}

impl InputHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: None,
            stash: String::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record a submitted line. Blank lines are ignored; an earlier
    /// identical entry moves to the front.
    pub fn push(&mut self, line: &str) {
        self.reset_cursor();
        if line.trim().is_empty() {
            return;
        }
        self.entries.retain(|e| e != line);
        self.entries.push_front(line.to_string());
        self.entries.truncate(self.capacity);
    }

    /// Step to an older entry (Up). `live` is the current buffer, stashed
    /// when browsing starts. Clamps at the oldest entry.
    pub fn older(&mut self, live: &str) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let index = match self.cursor {
            None => {
                self.stash = live.to_string();
                0
            }
            Some(i) => (i + 1).min(self.entries.len() - 1),
        };
        self.cursor = Some(index);
        self.entries.get(index).map(String::as_str)
    }

    /// Step to a newer entry (Down). Past the newest entry the stashed live
    /// buffer comes back. `None` when not browsing.
    pub fn newer(&mut self) -> Option<&str> {
        match self.cursor? {
            0 => {
                self.cursor = None;
                Some(&self.stash)
            }
            i => {
                self.cursor = Some(i - 1);
                self.entries.get(i - 1).map(String::as_str)
            }
        }
    }

    /// Stop browsing; the next Up starts from the newest entry.
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
        self.stash.clear();
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Most recent first.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(lines: &[&str]) -> InputHistory {
        let mut h = InputHistory::new();
        for line in lines {
            h.push(line);
        }
        h
    }

    #[test]
    fn test_duplicates_collapse_to_front() {
        let h = history(&["ls", "pwd", "ls"]);
        assert_eq!(h.entries().collect::<Vec<_>>(), vec!["ls", "pwd"]);
    }

    #[test]
    fn test_up_clamps_at_oldest() {
        let mut h = history(&["ls", "pwd", "ls"]);
        assert_eq!(h.older(""), Some("ls"));
        assert_eq!(h.older(""), Some("pwd"));
        assert_eq!(h.older(""), Some("pwd"));
        assert_eq!(h.cursor(), Some(1));
    }

    #[test]
    fn test_down_restores_live_buffer() {
        let mut h = history(&["ls", "pwd"]);
        assert_eq!(h.older("cat qu"), Some("pwd"));
        assert_eq!(h.older("ignored"), Some("ls"));
        assert_eq!(h.newer(), Some("pwd"));
        assert_eq!(h.newer(), Some("cat qu"));
        assert_eq!(h.newer(), None);
        assert_eq!(h.cursor(), None);
    }

    #[test]
    fn test_empty_history() {
        let mut h = InputHistory::new();
        assert_eq!(h.older("x"), None);
        assert_eq!(h.newer(), None);
    }

    #[test]
    fn test_blank_lines_ignored() {
        let h = history(&["  ", ""]);
        assert!(h.is_empty());
    }

    #[test]
    fn test_capacity() {
        let mut h = InputHistory::with_capacity(2);
        h.push("a");
        h.push("b");
        h.push("c");
        assert_eq!(h.entries().collect::<Vec<_>>(), vec!["c", "b"]);

        let full = InputHistory::new();
        assert_eq!(full.capacity, MAX_COMMAND_HISTORY);
    }

    #[test]
    fn test_push_resets_cursor() {
        let mut h = history(&["ls"]);
        h.older("");
        h.push("pwd");
        assert_eq!(h.cursor(), None);
        assert_eq!(h.older(""), Some("pwd"));
    }
}
