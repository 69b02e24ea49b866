use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};
use crate::completion::{resolve_completions, CompletedSet, SET_LEN};
use crate::deck::{build_deck, shuffle, Deck, Difficulty};
use crate::errors::GameError;
use crate::history::{History, Snapshot};
use crate::rules::{legal_moves, validate_move, Move};
use crate::tableau::{Tableau, COLUMN_COUNT};
use crate::terminal::{self, GameStatus};

/// Result of an accepted [`GameSession::apply_move`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub mv: Move,
    /// Number of cards carried over
    pub moved: usize,
    /// A face-down card in the source column was turned up
    pub revealed: bool,
    /// Sets removed by the completion cascade that followed
    pub completed: Vec<CompletedSet>,
    pub status: GameStatus,
}

/// Result of an accepted [`GameSession::deal_from_stock`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealOutcome {
    pub dealt: usize,
    pub completed: Vec<CompletedSet>,
    pub status: GameStatus,
}

/// Which kind of action an undo reverted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndoKind {
    /// A plain move
    Move,
    /// A deal: the cards went back to the stock
    Deal,
    /// An action that had completed at least one set
    Collection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoOutcome {
    pub kind: UndoKind,
    /// Undo steps still available
    pub remaining: usize,
    pub status: GameStatus,
}

/// Read-only picture of a session for collaborators that poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub difficulty: Difficulty,
    pub seed: Option<u64>,
    pub columns: Vec<Vec<Card>>,
    pub stock_len: usize,
    pub deals_remaining: usize,
    pub move_count: u32,
    pub completed_sets: usize,
    pub completed: Vec<Suit>,
    pub undo_available: usize,
    pub won: bool,
    pub game_over: bool,
}

/// One game of Spider: the table, its counters and the undo history.
///
/// Every mutating entry point validates first and returns a [`GameError`]
/// without touching state when the action is refused. Accepted actions take
/// a history snapshot before changing anything.
///
/// # Examples
///
/// ```
/// use spider_engine::deck::Difficulty;
/// use spider_engine::session::GameSession;
///
/// let mut game = GameSession::new(Difficulty::OneSuit, Some(7));
/// assert_eq!(game.stock_len(), 50);
///
/// let outcome = game.deal_from_stock().expect("opening deal leaves no empty column");
/// assert_eq!(outcome.dealt, 10);
/// assert_eq!(game.move_count(), 1);
///
/// game.undo().expect("one step to undo");
/// assert_eq!(game.stock_len(), 50);
/// assert_eq!(game.move_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    difficulty: Difficulty,
    /// Seed the deck was shuffled with, when known
    seed: Option<u64>,
    tableau: Tableau,
    move_count: u32,
    /// Suits of removed sets, in removal order
    completed: Vec<Suit>,
    history: History,
}

impl GameSession {
    /// Starts a game from a ChaCha20-shuffled deck. A missing seed is drawn
    /// at random and recorded so the deal can be reproduced.
    pub fn new(difficulty: Difficulty, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        let mut deck = Deck::new_with_seed(seed, difficulty);
        deck.shuffle();
        let mut session = Self::from_tableau(difficulty, Tableau::deal(deck.into_cards()));
        session.seed = Some(seed);
        tracing::debug!(seed, difficulty = %difficulty, "new game dealt");
        session
    }

    /// Starts a game shuffled by the caller's RNG.
    pub fn with_rng<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Self {
        let mut cards = build_deck(difficulty);
        shuffle(&mut cards, rng);
        Self::from_tableau(difficulty, Tableau::deal(cards))
    }

    /// Wraps an arbitrary position. Counters start at zero.
    pub fn from_tableau(difficulty: Difficulty, tableau: Tableau) -> Self {
        Self {
            difficulty,
            seed: None,
            tableau,
            move_count: 0,
            completed: Vec::new(),
            history: History::new(),
        }
    }

    /// Throws the current game away and deals a fresh one.
    pub fn init_game(&mut self, difficulty: Difficulty, seed: Option<u64>) {
        *self = Self::new(difficulty, seed);
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    pub fn columns(&self) -> &[Vec<Card>] {
        self.tableau.columns()
    }

    pub fn stock_len(&self) -> usize {
        self.tableau.stock_len()
    }

    pub fn deals_remaining(&self) -> usize {
        self.tableau.deals_remaining()
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn completed_sets(&self) -> usize {
        self.completed.len()
    }

    pub fn completed_suits(&self) -> &[Suit] {
        &self.completed
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Cards on the table, in the stock, and inside completed sets.
    /// Always equal to the deck size.
    pub fn cards_accounted(&self) -> usize {
        self.tableau.card_count() + SET_LEN * self.completed.len()
    }

    pub fn check_win(&self) -> bool {
        terminal::check_win(&self.tableau)
    }

    pub fn is_game_over(&self) -> bool {
        terminal::is_game_over(&self.tableau)
    }

    pub fn status(&self) -> GameStatus {
        terminal::status(&self.tableau)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.tableau)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tableau: self.tableau.clone(),
            move_count: self.move_count,
            completed: self.completed.clone(),
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            difficulty: self.difficulty,
            seed: self.seed,
            columns: self.tableau.columns().to_vec(),
            stock_len: self.stock_len(),
            deals_remaining: self.deals_remaining(),
            move_count: self.move_count,
            completed_sets: self.completed_sets(),
            completed: self.completed.clone(),
            undo_available: self.history.len(),
            won: self.check_win(),
            game_over: self.is_game_over(),
        }
    }

    /// Pushes a snapshot of the current state onto the undo stack.
    pub fn save_state(&mut self) {
        let snapshot = self.snapshot();
        if self.history.push(snapshot).is_some() {
            tracing::debug!(capacity = self.history.capacity(), "oldest undo step dropped");
        }
    }

    /// Moves `column[from][start..]` onto column `to`.
    ///
    /// # Errors
    ///
    /// Any of the move rejections described on
    /// [`validate_move`](crate::rules::validate_move). State is unchanged and
    /// no history entry is recorded.
    pub fn apply_move(
        &mut self,
        from: usize,
        start: usize,
        to: usize,
    ) -> Result<MoveOutcome, GameError> {
        let mv = Move::new(from, start, to);
        if let Err(e) = validate_move(&self.tableau, mv) {
            tracing::debug!(from, start, to, error = %e, "move rejected");
            return Err(e);
        }

        self.save_state();
        let cards = self.tableau.split_off(from, start);
        let moved = cards.len();
        let revealed = self.tableau.reveal_top(from);
        self.tableau.append(to, cards);
        self.move_count += 1;
        tracing::debug!(from, start, to, moved, revealed, "move applied");

        let completed = self.collect_sets([to]);
        Ok(MoveOutcome {
            mv,
            moved,
            revealed,
            completed,
            status: self.status(),
        })
    }

    /// Deals one card face up onto every column.
    ///
    /// # Errors
    ///
    /// - [`GameError::EmptyColumnBlocksDeal`] - a column has no cards
    /// - [`GameError::StockEmpty`] - nothing left to deal
    pub fn deal_from_stock(&mut self) -> Result<DealOutcome, GameError> {
        if let Some(column) = self.tableau.first_empty_column() {
            tracing::debug!(column, "deal blocked by empty column");
            return Err(GameError::EmptyColumnBlocksDeal { column });
        }
        if self.tableau.stock_len() == 0 {
            return Err(GameError::StockEmpty);
        }

        self.save_state();
        let dealt = self.tableau.deal_row();
        self.move_count += 1;
        tracing::debug!(dealt, stock = self.tableau.stock_len(), "stock dealt");

        let completed = self.collect_sets(0..COLUMN_COUNT);
        Ok(DealOutcome {
            dealt,
            completed,
            status: self.status(),
        })
    }

    /// Restores the most recent snapshot. There is no redo.
    ///
    /// # Errors
    ///
    /// [`GameError::NothingToUndo`] when the history is empty.
    pub fn undo(&mut self) -> Result<UndoOutcome, GameError> {
        let snapshot = self.history.pop().ok_or(GameError::NothingToUndo)?;
        let kind = if snapshot.completed.len() < self.completed.len() {
            UndoKind::Collection
        } else if snapshot.tableau.stock_len() > self.tableau.stock_len() {
            UndoKind::Deal
        } else {
            UndoKind::Move
        };

        let Snapshot {
            tableau,
            move_count,
            completed,
        } = snapshot;
        self.tableau = tableau;
        self.move_count = move_count;
        self.completed = completed;
        tracing::debug!(?kind, remaining = self.history.len(), "undo applied");

        Ok(UndoOutcome {
            kind,
            remaining: self.history.len(),
            status: self.status(),
        })
    }

    /// Removes any completed set sitting on top of `column`, repeatedly.
    pub fn check_and_remove_set(&mut self, column: usize) -> Vec<CompletedSet> {
        self.collect_sets([column])
    }

    fn collect_sets<I>(&mut self, columns: I) -> Vec<CompletedSet>
    where
        I: IntoIterator<Item = usize>,
    {
        let sets = resolve_completions(&mut self.tableau, columns);
        self.completed.extend(sets.iter().map(|s| s.suit));
        if !sets.is_empty() && self.check_win() {
            tracing::info!(moves = self.move_count, "game won");
        }
        sets
    }
}
