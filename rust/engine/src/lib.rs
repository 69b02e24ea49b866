//! # spider-engine: Spider Solitaire Rules Core
//!
//! Game state and move legality for two-deck Spider Solitaire. Covers deck
//! construction by suit-count difficulty, the ten-column tableau and stock,
//! move validation, automatic removal of completed King-to-Ace runs, win and
//! deadlock detection, and bounded undo.
//!
//! Rendering, input and animation live elsewhere: every entry point returns
//! a plain outcome value describing what changed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Suit, Rank and Card
//! - [`deck`] - Difficulty, 104-card deck construction and seeded shuffling
//! - [`tableau`] - The ten columns and the stock
//! - [`rules`] - Movable-run and placement checks, legal move listing
//! - [`completion`] - Completed-set detection and the removal cascade
//! - [`terminal`] - Win and deadlock detection
//! - [`history`] - Snapshots and the bounded undo stack
//! - [`session`] - `GameSession`, the mutating entry points
//! - [`shared`] - Serialized access to a session shared across handlers
//! - [`logger`] - Game records and JSONL output
//! - [`errors`] - Rejection reasons
//!
//! ## Quick Start
//!
//! ```rust
//! use spider_engine::deck::Difficulty;
//! use spider_engine::session::GameSession;
//!
//! let mut game = GameSession::new(Difficulty::TwoSuits, Some(42));
//!
//! if let Some(mv) = game.legal_moves().first().copied() {
//!     let outcome = game.apply_move(mv.from, mv.start, mv.to).unwrap();
//!     println!("moved {} card(s), status {:?}", outcome.moved, outcome.status);
//! }
//! assert_eq!(game.cards_accounted(), 104);
//! ```
//!
//! ## Deterministic Deals
//!
//! ```rust
//! use spider_engine::deck::Difficulty;
//! use spider_engine::session::GameSession;
//!
//! let a = GameSession::new(Difficulty::FourSuits, Some(7));
//! let b = GameSession::new(Difficulty::FourSuits, Some(7));
//! assert_eq!(a.tableau(), b.tableau());
//! ```
//!
//! ## Rejections
//!
//! ```rust
//! use spider_engine::deck::Difficulty;
//! use spider_engine::errors::GameError;
//! use spider_engine::session::GameSession;
//!
//! let mut game = GameSession::new(Difficulty::OneSuit, Some(1));
//! assert_eq!(game.undo(), Err(GameError::NothingToUndo));
//! assert!(matches!(game.apply_move(0, 5, 0), Err(GameError::SameColumn { .. })));
//! ```

pub mod cards;
pub mod completion;
pub mod deck;
pub mod errors;
pub mod history;
pub mod logger;
pub mod rules;
pub mod session;
pub mod shared;
pub mod tableau;
pub mod terminal;
