//! Simulation command: autoplay batches of seeded games.
//!
//! Game `i` is dealt from `seed + i`, so any game can be rebuilt from its
//! seed and action list. With `--records` each game is printed to stdout as
//! one JSON line and the summary moves to stderr.
//!
//! # Environment Variables
//!
//! - `SPIDER_SIM_BREAK_AFTER`: stop after N games and exit as interrupted
//!   (used by tests)
//!
//! # Examples
//!
//! ```no_run
//! use std::io;
//!
//! let args = ["spider", "sim", "--games", "100", "--seed", "42", "--records"];
//! let code = spider_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```

use std::io::Write;

use spider_ai::{AutoPlayer, create_ai};
use spider_engine::deck::Difficulty;
use spider_engine::logger::{ActionRecord, GameLogger, GameRecord};
use spider_engine::session::GameSession;
use spider_engine::terminal::GameStatus;

use super::resolve_config;
use crate::error::CliError;
use crate::ui;

const ENV_BREAK_AFTER: &str = "SPIDER_SIM_BREAK_AFTER";

#[allow(clippy::too_many_arguments)]
pub fn handle_sim_command(
    games: u64,
    seed: Option<u64>,
    difficulty: Option<Difficulty>,
    ai: Option<String>,
    max_moves: Option<u32>,
    records: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if games == 0 {
        ui::write_error(err, "games must be >= 1")?;
        return Err(CliError::InvalidInput("games must be >= 1".to_string()));
    }
    let cfg = resolve_config(err)?;
    let difficulty = difficulty.unwrap_or(cfg.difficulty);
    let ai_name = ai.unwrap_or(cfg.ai);
    let max_moves = max_moves.unwrap_or(cfg.max_moves);
    if max_moves == 0 {
        ui::write_error(err, "max-moves must be >= 1")?;
        return Err(CliError::InvalidInput("max-moves must be >= 1".to_string()));
    }
    if create_ai(&ai_name, 0).is_none() {
        let msg = format!("unknown ai '{}'", ai_name);
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    }
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);

    let break_after = std::env::var(ENV_BREAK_AFTER)
        .ok()
        .and_then(|v| v.parse::<u64>().ok());

    let mut logger = if records {
        Some(GameLogger::to_writer(&mut *out))
    } else {
        None
    };

    let mut completed = 0u64;
    let mut won = 0u64;
    let mut capped = 0u64;
    let mut total_moves = 0u64;
    let mut total_sets = 0u64;

    for i in 0..games {
        let game_seed = base_seed.wrapping_add(i);
        let (game, actions) = play_one(&ai_name, difficulty, game_seed, max_moves)?;

        match game.status() {
            GameStatus::Won => won += 1,
            GameStatus::InProgress if actions.len() == max_moves as usize => capped += 1,
            _ => {}
        }
        total_moves += u64::from(game.move_count());
        total_sets += game.completed_sets() as u64;
        tracing::debug!(
            seed = game_seed,
            status = ?game.status(),
            moves = game.move_count(),
            sets = game.completed_sets(),
            "game simulated"
        );

        if let Some(logger) = logger.as_mut() {
            let id = logger.next_id();
            let mut record = GameRecord::from_session(id, &game, actions);
            record.meta = Some(serde_json::json!({ "ai": ai_name, "max_moves": max_moves }));
            if let Err(e) = logger.write(&record) {
                ui::write_error(err, &format!("Failed to write game record: {}", e))?;
                return Err(CliError::Io(e));
            }
        }

        completed += 1;
        if let Some(b) = break_after
            && completed == b
            && completed < games
        {
            writeln!(err, "Interrupted: played {}/{}", completed, games)?;
            return Err(CliError::Interrupted(format!(
                "played {}/{}",
                completed, games
            )));
        }
    }

    if capped > 0 {
        ui::display_warning(
            err,
            &format!("{} game(s) stopped at the {}-move cap", capped, max_moves),
        )?;
    }
    let summary = Summary {
        completed,
        won,
        total_sets,
        total_moves,
    };
    if records {
        summary.write(err)?;
    } else {
        summary.write(out)?;
    }
    Ok(())
}

struct Summary {
    completed: u64,
    won: u64,
    total_sets: u64,
    total_moves: u64,
}

impl Summary {
    fn write(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Simulated: {} games", self.completed)?;
        writeln!(
            w,
            "Won: {}/{}  Sets: {}  Avg moves: {:.1}",
            self.won,
            self.completed,
            self.total_sets,
            self.total_moves as f64 / self.completed as f64
        )
    }
}

/// Plays one game until it ends, the player gives up, or `max_moves`
/// actions have been taken.
fn play_one(
    ai_name: &str,
    difficulty: Difficulty,
    seed: u64,
    max_moves: u32,
) -> Result<(GameSession, Vec<ActionRecord>), CliError> {
    let player: Box<dyn AutoPlayer> = create_ai(ai_name, seed)
        .ok_or_else(|| CliError::InvalidInput(format!("unknown ai '{}'", ai_name)))?;
    let mut game = GameSession::new(difficulty, Some(seed));
    let mut actions = Vec::new();

    while actions.len() < max_moves as usize && game.status() == GameStatus::InProgress {
        let Some(decision) = player.choose(&game) else {
            break;
        };
        decision.apply(&mut game)?;
        actions.push(decision.record());
    }
    Ok((game, actions))
}
