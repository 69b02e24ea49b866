//! Parsing of interactive `play` input and command-line values.

use spider_engine::deck::Difficulty;
use spider_engine::tableau::COLUMN_COUNT;

/// A request typed at the `play` prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCommand {
    /// Move from `from` onto `to`. Without `start` the whole movable run
    /// on top of `from` is moved.
    Move {
        from: usize,
        start: Option<usize>,
        to: usize,
    },
    Deal,
    Undo,
    Hint,
    Show,
    NewGame,
}

/// Outcome of parsing one input line.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Command(PlayCommand),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

pub const PLAY_HELP: &str =
    "Commands: m <from> [<start>] <to>, d (deal), u (undo), h (hint), s (show), n (new game), q (quit)";

/// Parse a line typed at the play prompt (case-insensitive).
///
/// # Example
///
/// ```rust
/// # use spider_cli::validation::{parse_play_command, ParseResult, PlayCommand};
///
/// assert_eq!(
///     parse_play_command("m 3 7"),
///     ParseResult::Command(PlayCommand::Move { from: 3, start: None, to: 7 })
/// );
/// assert_eq!(
///     parse_play_command("move 3 4 7"),
///     ParseResult::Command(PlayCommand::Move { from: 3, start: Some(4), to: 7 })
/// );
/// assert_eq!(parse_play_command("q"), ParseResult::Quit);
///
/// match parse_play_command("shuffle") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_play_command(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }

    match parts[0] {
        "q" | "quit" => ParseResult::Quit,
        "d" | "deal" => ParseResult::Command(PlayCommand::Deal),
        "u" | "undo" => ParseResult::Command(PlayCommand::Undo),
        "h" | "hint" => ParseResult::Command(PlayCommand::Hint),
        "s" | "show" => ParseResult::Command(PlayCommand::Show),
        "n" | "new" => ParseResult::Command(PlayCommand::NewGame),
        "m" | "move" => parse_move(&parts[1..]),
        _ => ParseResult::Invalid(format!("Unrecognized command '{}'. {}", parts[0], PLAY_HELP)),
    }
}

fn parse_move(args: &[&str]) -> ParseResult {
    let numbers: Result<Vec<usize>, _> = args.iter().map(|a| a.parse::<usize>()).collect();
    let Ok(numbers) = numbers else {
        return ParseResult::Invalid("Move arguments must be non-negative numbers".to_string());
    };
    let (from, start, to) = match numbers.as_slice() {
        [from, to] => (*from, None, *to),
        [from, start, to] => (*from, Some(*start), *to),
        _ => {
            return ParseResult::Invalid(
                "Move requires a source and a target (e.g., 'm 3 7' or 'm 3 4 7')".to_string(),
            );
        }
    };
    if let Some(bad) = [from, to].into_iter().find(|&c| c >= COLUMN_COUNT) {
        return ParseResult::Invalid(format!(
            "Column {} does not exist (0-{})",
            bad,
            COLUMN_COUNT - 1
        ));
    }
    ParseResult::Command(PlayCommand::Move { from, start, to })
}

/// Clap value parser for `--difficulty`.
pub fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    s.parse::<Difficulty>()
        .map_err(|_| format!("difficulty must be 1, 2 or 4 (got '{}')", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letter_commands() {
        assert_eq!(parse_play_command("d"), ParseResult::Command(PlayCommand::Deal));
        assert_eq!(parse_play_command("U"), ParseResult::Command(PlayCommand::Undo));
        assert_eq!(parse_play_command("hint"), ParseResult::Command(PlayCommand::Hint));
        assert_eq!(parse_play_command(" s "), ParseResult::Command(PlayCommand::Show));
        assert_eq!(parse_play_command("new"), ParseResult::Command(PlayCommand::NewGame));
        assert_eq!(parse_play_command("QUIT"), ParseResult::Quit);
    }

    #[test]
    fn test_move_arity() {
        assert!(matches!(parse_play_command("m 1"), ParseResult::Invalid(_)));
        assert!(matches!(parse_play_command("m 1 2 3 4"), ParseResult::Invalid(_)));
        assert!(matches!(parse_play_command("m a b"), ParseResult::Invalid(_)));
        assert!(matches!(parse_play_command("m -1 2"), ParseResult::Invalid(_)));
    }

    #[test]
    fn test_move_rejects_missing_columns() {
        match parse_play_command("m 0 10") {
            ParseResult::Invalid(msg) => assert!(msg.contains("Column 10")),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_play_command("   "), ParseResult::Invalid("Empty input".to_string()));
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!(parse_difficulty("4"), Ok(Difficulty::FourSuits));
        assert!(parse_difficulty("3").is_err());
        assert!(parse_difficulty("two").is_err());
    }
}
