use serde::{Deserialize, Serialize};

use crate::deck::Difficulty;
use crate::errors::GameError;
use crate::session::GameSession;
use crate::terminal::GameStatus;

/// One player action, as recorded for replay.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionRecord {
    /// Deal a row from the stock
    Deal,
    /// Move `column[from][start..]` onto `to`
    Move { from: usize, start: usize, to: usize },
    /// Revert the previous action
    Undo,
}

impl ActionRecord {
    /// Replays this action against `session`.
    pub fn apply(&self, session: &mut GameSession) -> Result<(), GameError> {
        match *self {
            ActionRecord::Deal => session.deal_from_stock().map(|_| ()),
            ActionRecord::Move { from, start, to } => {
                session.apply_move(from, start, to).map(|_| ())
            }
            ActionRecord::Undo => session.undo().map(|_| ()),
        }
    }
}

/// Summary of a finished (or abandoned) game.
/// Serialized one per line in JSONL files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Unique identifier for this game (format: YYYYMMDD-NNNNNN)
    pub game_id: String,
    /// Deck seed; with `difficulty` it reproduces the opening deal
    pub seed: Option<u64>,
    pub difficulty: Difficulty,
    /// Accepted actions in order
    pub actions: Vec<ActionRecord>,
    pub status: GameStatus,
    pub moves: u32,
    pub completed_sets: usize,
    /// Timestamp when the game was recorded (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    /// Additional metadata (extensible JSON object)
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

impl GameRecord {
    pub fn from_session(
        game_id: String,
        session: &GameSession,
        actions: Vec<ActionRecord>,
    ) -> Self {
        Self {
            game_id,
            seed: session.seed(),
            difficulty: session.difficulty(),
            actions,
            status: session.status(),
            moves: session.move_count(),
            completed_sets: session.completed_sets(),
            ts: None,
            meta: None,
        }
    }

    /// Re-deals from the recorded seed and plays every action again.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidLayout`] if the record has no seed, or the first
    /// rejection an action runs into.
    pub fn replay(&self) -> Result<GameSession, GameError> {
        let seed = self
            .seed
            .ok_or_else(|| GameError::InvalidLayout("record has no seed".to_string()))?;
        let mut session = GameSession::new(self.difficulty, Some(seed));
        for action in &self.actions {
            action.apply(&mut session)?;
        }
        Ok(session)
    }
}

pub fn format_game_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::io::Write;

/// Streams [`GameRecord`]s as JSON lines to a caller-supplied writer.
pub struct GameLogger<W: Write> {
    writer: W,
    date: String,
    seq: u32,
}

impl<W: Write> GameLogger<W> {
    /// Ids are dated today (UTC).
    pub fn to_writer(writer: W) -> Self {
        Self::with_date(writer, &Utc::now().format("%Y%m%d").to_string())
    }

    pub fn with_date(writer: W, yyyymmdd: &str) -> Self {
        Self {
            writer,
            date: yyyymmdd.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_game_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &GameRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
