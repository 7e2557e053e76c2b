//! Input tokenizer.
//!
//! Lines are split on runs of whitespace. There is no quoting, escaping
//! or piping: `echo "a  b"` yields the arguments `"a` and `b"`.

/// A tokenized command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// Tokenize a submitted line. Blank input yields `None`.
pub fn parse_input(line: &str) -> Option<ParsedCommand> {
    let mut words = line.split_whitespace().map(str::to_string);
    let name = words.next()?;
    Some(ParsedCommand {
        name,
        args: words.collect(),
    })
}

/// Split a partial line for completion.
///
/// Leading whitespace is ignored. When the line ends in whitespace the
/// result carries a trailing empty word, the argument being started.
/// Empty input yields a single empty word.
pub fn split_partial(input: &str) -> Vec<&str> {
    let trimmed = input.trim_start();
    let mut words: Vec<&str> = trimmed.split_whitespace().collect();
    if words.is_empty() || trimmed.ends_with(char::is_whitespace) {
        words.push("");
    }
    words
}
