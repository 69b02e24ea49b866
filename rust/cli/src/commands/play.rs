//! # Play Command
//!
//! Interactive Spider on stdin/stdout. The table is redrawn after every
//! accepted action; rejected actions are reported on stderr and the prompt
//! comes back. EOF ends the session like `q`.

use std::io::{BufRead, Write};

use spider_ai::create_ai;
use spider_engine::completion::CompletedSet;
use spider_engine::deck::Difficulty;
use spider_engine::rules::run_start;
use spider_engine::session::{GameSession, UndoKind};
use spider_engine::terminal::GameStatus;

use super::{resolve_config, write_table};
use crate::error::CliError;
use crate::formatters::{format_decision, format_suit};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{PLAY_HELP, ParseResult, PlayCommand, parse_play_command};

/// Handle the play command.
///
/// # Examples
///
/// ```ignore
/// use std::io::{stdin, stdout, stderr};
///
/// let mut input = stdin().lock();
/// handle_play_command(Some(42), None, &mut stdout(), &mut stderr(), &mut input).unwrap();
/// ```
pub fn handle_play_command(
    seed: Option<u64>,
    difficulty: Option<Difficulty>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = resolve_config(err)?;
    let difficulty = difficulty.unwrap_or(cfg.difficulty);
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let Some(hinter) = create_ai(&cfg.ai, seed) else {
        let msg = format!("unknown ai '{}'", cfg.ai);
        ui::write_error(err, &msg)?;
        return Err(CliError::Config(msg));
    };

    let mut game = GameSession::new(difficulty, Some(seed));
    writeln!(out, "play: difficulty={} seed={}", difficulty, seed)?;
    write_table(out, &game)?;
    writeln!(out, "{}", PLAY_HELP)?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(input) = read_stdin_line(stdin) else {
            break;
        };
        let command = match parse_play_command(&input) {
            ParseResult::Command(c) => c,
            ParseResult::Quit => break,
            ParseResult::Invalid(msg) => {
                ui::write_error(err, &msg)?;
                continue;
            }
        };

        let status = match command {
            PlayCommand::Move { from, start, to } => {
                let start = match start.or_else(|| run_start(&game.columns()[from])) {
                    Some(s) => s,
                    None => {
                        ui::write_error(err, &format!("Column {} has no face-up cards", from))?;
                        continue;
                    }
                };
                match game.apply_move(from, start, to) {
                    Ok(outcome) => {
                        writeln!(out, "Moved {} card(s) from {} to {}", outcome.moved, from, to)?;
                        if outcome.revealed {
                            writeln!(out, "Turned up a card in column {}", from)?;
                        }
                        write_sets(out, &outcome.completed)?;
                        outcome.status
                    }
                    Err(e) => {
                        ui::write_error(err, &e.to_string())?;
                        continue;
                    }
                }
            }
            PlayCommand::Deal => match game.deal_from_stock() {
                Ok(outcome) => {
                    writeln!(out, "Dealt {} card(s)", outcome.dealt)?;
                    write_sets(out, &outcome.completed)?;
                    outcome.status
                }
                Err(e) => {
                    ui::write_error(err, &e.to_string())?;
                    continue;
                }
            },
            PlayCommand::Undo => match game.undo() {
                Ok(outcome) => {
                    let what = match outcome.kind {
                        UndoKind::Move => "Undid move",
                        UndoKind::Deal => "Took back the deal",
                        UndoKind::Collection => "Put a completed set back",
                    };
                    writeln!(out, "{} ({} undo step(s) left)", what, outcome.remaining)?;
                    outcome.status
                }
                Err(e) => {
                    ui::write_error(err, &e.to_string())?;
                    continue;
                }
            },
            PlayCommand::Hint => {
                match hinter.choose(&game) {
                    Some(decision) => writeln!(out, "Hint: {}", format_decision(&decision))?,
                    None => writeln!(out, "Hint: nothing useful left")?,
                }
                continue;
            }
            PlayCommand::Show => game.status(),
            PlayCommand::NewGame => {
                game.init_game(difficulty, None);
                let seed = game.seed().unwrap_or_default();
                writeln!(out, "New game: difficulty={} seed={}", difficulty, seed)?;
                game.status()
            }
        };

        write_table(out, &game)?;
        match status {
            GameStatus::Won => {
                writeln!(out, "You won in {} moves!", game.move_count())?;
                break;
            }
            GameStatus::Deadlocked => {
                writeln!(out, "No moves left. Undo (u) or start a new game (n).")?;
            }
            GameStatus::InProgress => {}
        }
    }

    writeln!(
        out,
        "Game over: moves={} sets={}",
        game.move_count(),
        game.completed_sets()
    )?;
    Ok(())
}

fn write_sets(out: &mut dyn Write, sets: &[CompletedSet]) -> std::io::Result<()> {
    for set in sets {
        writeln!(
            out,
            "Completed a set of {} from column {}",
            format_suit(&set.suit),
            set.column
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Cursor;

    fn play(input: &str) -> (Result<(), CliError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(input.as_bytes());
        let result = handle_play_command(
            Some(42),
            Some(Difficulty::OneSuit),
            &mut out,
            &mut err,
            &mut stdin,
        );
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    #[serial]
    fn quit_ends_the_session() {
        let (result, out, err) = play("q\n");
        assert!(result.is_ok());
        assert!(out.starts_with("play: difficulty=1 seed=42"));
        assert!(out.contains("Game over: moves=0 sets=0"));
        assert!(err.is_empty());
    }

    #[test]
    #[serial]
    fn eof_is_a_graceful_exit() {
        let (result, out, _) = play("");
        assert!(result.is_ok());
        assert!(out.contains("Game over"));
    }

    #[test]
    #[serial]
    fn deal_then_undo() {
        let (result, out, err) = play("d\nu\nq\n");
        assert!(result.is_ok());
        assert!(out.contains("Dealt 10 card(s)"));
        assert!(out.contains("Stock: 40 (4 deals)"));
        assert!(out.contains("Took back the deal (0 undo step(s) left)"));
        assert!(out.contains("Game over: moves=0"));
        assert!(err.is_empty());
    }

    #[test]
    #[serial]
    fn bad_input_reprompts() {
        let (result, out, err) = play("jump\nm 0 0\nu\nq\n");
        assert!(result.is_ok());
        assert!(err.contains("Unrecognized command 'jump'"));
        assert!(err.contains("Source and target are the same column (0)"));
        assert!(err.contains("Error: Nothing to undo"));
        assert!(out.contains("Game over: moves=0"));
    }

    #[test]
    #[serial]
    fn hint_suggests_an_action_without_playing_it() {
        let (result, out, _) = play("h\nq\n");
        assert!(result.is_ok());
        assert!(out.contains("Hint: "));
        assert!(out.contains("Game over: moves=0"));
    }
}
