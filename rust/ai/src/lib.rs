//! # spider-ai: Automatic Players for Spider Solitaire
//!
//! Players that look at a [`GameSession`] and pick the next action. Used by
//! the `sim` command to autoplay batches of seeded games and by `play` for
//! hints.
//!
//! ## Core Components
//!
//! - [`AutoPlayer`] - Trait every automatic player implements
//! - [`baseline`] - Greedy player: same-suit joins, reveals, empty columns
//! - [`random`] - Seeded player picking uniformly among legal actions
//! - [`create_ai`] - Factory by name
//!
//! ## Quick Start
//!
//! ```rust
//! use spider_ai::create_ai;
//! use spider_engine::deck::Difficulty;
//! use spider_engine::session::GameSession;
//!
//! let ai = create_ai("baseline", 0).expect("known player");
//! let mut game = GameSession::new(Difficulty::OneSuit, Some(42));
//!
//! for _ in 0..20 {
//!     match ai.choose(&game) {
//!         Some(decision) => decision.apply(&mut game).expect("chosen actions are legal"),
//!         None => break,
//!     }
//! }
//! assert_eq!(game.cards_accounted(), 104);
//! ```

use spider_engine::errors::GameError;
use spider_engine::logger::ActionRecord;
use spider_engine::rules::Move;
use spider_engine::session::GameSession;

pub mod baseline;
pub mod random;

/// Names accepted by [`create_ai`].
pub const AI_NAMES: &[&str] = &["baseline", "random"];

/// An action an automatic player wants to take.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Decision {
    Deal,
    Move(Move),
}

impl Decision {
    /// Performs the decision on `session`.
    pub fn apply(&self, session: &mut GameSession) -> Result<(), GameError> {
        match *self {
            Decision::Deal => session.deal_from_stock().map(|_| ()),
            Decision::Move(mv) => session.apply_move(mv.from, mv.start, mv.to).map(|_| ()),
        }
    }

    pub fn record(&self) -> ActionRecord {
        match *self {
            Decision::Deal => ActionRecord::Deal,
            Decision::Move(mv) => ActionRecord::Move {
                from: mv.from,
                start: mv.start,
                to: mv.to,
            },
        }
    }
}

/// Interface for automatic players.
///
/// # Example Implementation
///
/// ```rust
/// use spider_ai::{AutoPlayer, Decision};
/// use spider_engine::session::GameSession;
///
/// struct AlwaysDeal;
///
/// impl AutoPlayer for AlwaysDeal {
///     fn choose(&self, session: &GameSession) -> Option<Decision> {
///         (session.stock_len() > 0).then_some(Decision::Deal)
///     }
///
///     fn name(&self) -> &str {
///         "AlwaysDeal"
///     }
/// }
/// ```
pub trait AutoPlayer: Send + Sync {
    /// Next action for `session`, or `None` when the player gives up.
    /// A returned decision is always accepted by the session.
    fn choose(&self, session: &GameSession) -> Option<Decision>;

    fn name(&self) -> &str;
}

/// Creates a player by name. `seed` drives players that make random
/// choices and is ignored by the others.
///
/// # Example
///
/// ```rust
/// use spider_ai::create_ai;
///
/// assert_eq!(create_ai("baseline", 0).unwrap().name(), "BaselineAI");
/// assert!(create_ai("oracle", 0).is_none());
/// ```
pub fn create_ai(ai_type: &str, seed: u64) -> Option<Box<dyn AutoPlayer>> {
    match ai_type {
        "baseline" => Some(Box::new(baseline::BaselineAI::new())),
        "random" => Some(Box::new(random::RandomAI::new(seed))),
        _ => None,
    }
}

/// True when the session will accept a deal right now.
pub(crate) fn can_deal(session: &GameSession) -> bool {
    session.stock_len() > 0 && session.tableau().first_empty_column().is_none()
}
