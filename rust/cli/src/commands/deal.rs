//! `deal`: prints the opening layout of a seeded game.

use std::io::Write;

use spider_engine::deck::Difficulty;
use spider_engine::session::GameSession;

use super::{resolve_config, write_table};
use crate::error::CliError;

pub fn handle_deal_command(
    seed: Option<u64>,
    difficulty: Option<Difficulty>,
    json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = resolve_config(err)?;
    let difficulty = difficulty.unwrap_or(cfg.difficulty);
    let seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let game = GameSession::new(difficulty, Some(seed));

    if json {
        let s = serde_json::to_string_pretty(&game.view()).map_err(std::io::Error::other)?;
        writeln!(out, "{}", s)?;
        return Ok(());
    }

    writeln!(out, "Seed: {}  Difficulty: {} suit(s)", seed, difficulty)?;
    write_table(out, &game)?;
    Ok(())
}
