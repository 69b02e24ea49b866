//! Command handlers, one module per subcommand.
//!
//! Every handler has the shape
//! `pub fn handle_COMMAND_command(...) -> Result<(), CliError>` and takes its
//! output streams as `&mut dyn Write` so tests can run it against buffers.

mod cfg;
mod deal;
mod play;
mod rng;
mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use play::handle_play_command;
pub use rng::handle_rng_command;
pub use sim::handle_sim_command;

use std::io::Write;

use crate::config::{self, Config};
use crate::error::CliError;
use crate::formatters::{format_status, format_tableau};
use crate::ui;
use spider_engine::session::GameSession;

/// Loads the layered configuration, reporting a bad one on `err`.
pub(crate) fn resolve_config(err: &mut dyn Write) -> Result<Config, CliError> {
    config::load().map_err(|e| {
        let msg = format!("Invalid configuration: {}", e);
        let _ = ui::write_error(err, &msg);
        CliError::Config(msg)
    })
}

/// Prints the table followed by the status line.
pub(crate) fn write_table(out: &mut dyn Write, game: &GameSession) -> std::io::Result<()> {
    for line in format_tableau(game.columns()) {
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "{}", format_status(&game.view()))
}
