//! Greedy baseline player.
//!
//! Scores every legal move by what it does to the table and plays the best
//! one that makes progress. Deals only when no such move exists.

use crate::{AutoPlayer, Decision, can_deal};
use spider_engine::cards::Card;
use spider_engine::rules::Move;
use spider_engine::session::GameSession;

const SAME_SUIT_JOIN: i32 = 10;
const REVEAL: i32 = 6;
const EMPTIES_COLUMN: i32 = 4;
const EXPOSES_FACE_UP: i32 = 1;
const USES_EMPTY_COLUMN: i32 = -3;

/// Rule-based player for benchmarking and hints.
///
/// # Strategy
///
/// - Join a run onto the next rank of the same suit
/// - Turn up face-down cards
/// - Empty columns, but never shuffle a whole column into another empty one
/// - Skip moves that split a same-suit run just to land somewhere equivalent
/// - Deal when nothing above applies, filling empty columns first if the
///   stock still has cards
///
/// # Example
///
/// ```rust
/// use spider_ai::baseline::BaselineAI;
/// use spider_ai::AutoPlayer;
/// use spider_engine::deck::Difficulty;
/// use spider_engine::session::GameSession;
///
/// let ai = BaselineAI::new();
/// let game = GameSession::new(Difficulty::OneSuit, Some(42));
/// assert!(ai.choose(&game).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaselineAI;

impl BaselineAI {
    pub fn new() -> Self {
        Self
    }

    /// Score for `mv`, or `None` if the move achieves nothing.
    fn score(columns: &[Vec<Card>], mv: Move) -> Option<i32> {
        let source = &columns[mv.from];
        let target = &columns[mv.to];
        let moving = source.get(mv.start)?;
        let mut score = 0;

        match target.last() {
            Some(top) if top.suit == moving.suit => score += SAME_SUIT_JOIN,
            Some(_) => {}
            None if mv.start == 0 => return None,
            None => score += USES_EMPTY_COLUMN,
        }

        match mv.start.checked_sub(1).map(|i| &source[i]) {
            None => score += EMPTIES_COLUMN,
            Some(under) if !under.face_up => score += REVEAL,
            Some(under) if moving.rank.is_one_below(under.rank) => {
                // already on its parent; only a same-suit landing improves it
                if under.suit == moving.suit || score < SAME_SUIT_JOIN {
                    return None;
                }
            }
            Some(_) => score += EXPOSES_FACE_UP,
        }
        Some(score)
    }

    fn best_move<F>(session: &GameSession, keep: F) -> Option<(i32, Move)>
    where
        F: Fn(i32, Move) -> bool,
    {
        let columns = session.columns();
        session
            .legal_moves()
            .into_iter()
            .filter_map(|mv| Self::score(columns, mv).map(|s| (s, mv)))
            .filter(|&(s, mv)| keep(s, mv))
            // higher score first, then the longer run
            .max_by_key(|&(s, mv)| (s, columns[mv.from].len() - mv.start))
    }
}

impl AutoPlayer for BaselineAI {
    fn choose(&self, session: &GameSession) -> Option<Decision> {
        if let Some((score, mv)) = Self::best_move(session, |s, _| s > 0) {
            tracing::debug!(
                score,
                from = mv.from,
                start = mv.start,
                to = mv.to,
                "baseline move"
            );
            return Some(Decision::Move(mv));
        }
        if can_deal(session) {
            return Some(Decision::Deal);
        }
        if session.stock_len() > 0 {
            let columns = session.columns();
            return Self::best_move(session, |_, mv| columns[mv.to].is_empty())
                .map(|(_, mv)| Decision::Move(mv));
        }
        None
    }

    fn name(&self) -> &str {
        "BaselineAI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spider_engine::cards::{Rank, Suit};
    use spider_engine::deck::Difficulty;
    use spider_engine::tableau::{Tableau, COLUMN_COUNT};

    fn session(columns: Vec<Vec<Card>>, stock: usize) -> GameSession {
        let stock = vec![Card::new(Suit::Clubs, Rank::Two); stock];
        GameSession::from_tableau(
            Difficulty::FourSuits,
            Tableau::from_parts(columns, stock).unwrap(),
        )
    }

    fn kings() -> Vec<Vec<Card>> {
        vec![vec![Card::up(Suit::Clubs, Rank::King)]; COLUMN_COUNT]
    }

    #[test]
    fn prefers_same_suit_join() {
        let mut columns = kings();
        columns[0] = vec![
            Card::new(Suit::Clubs, Rank::Ace),
            Card::up(Suit::Hearts, Rank::Seven),
        ];
        columns[1] = vec![Card::up(Suit::Spades, Rank::Eight)];
        columns[2] = vec![Card::up(Suit::Hearts, Rank::Eight)];
        let game = session(columns, 10);
        assert_eq!(
            BaselineAI::new().choose(&game),
            Some(Decision::Move(Move::new(0, 1, 2)))
        );
    }

    #[test]
    fn leaves_same_suit_runs_alone_and_deals() {
        let mut columns = kings();
        columns[0] = vec![
            Card::up(Suit::Hearts, Rank::Eight),
            Card::up(Suit::Hearts, Rank::Seven),
        ];
        columns[1] = vec![Card::up(Suit::Hearts, Rank::Eight)];
        let game = session(columns, 10);
        assert_eq!(BaselineAI::new().choose(&game), Some(Decision::Deal));
    }

    #[test]
    fn never_moves_a_whole_column_into_an_empty_one() {
        let mut columns = kings();
        columns[0] = vec![Card::up(Suit::Hearts, Rank::Five)];
        columns[1].clear();
        let game = session(columns, 0);
        assert_eq!(BaselineAI::new().choose(&game), None);
    }

    #[test]
    fn fills_empty_column_before_dealing() {
        let mut columns = kings();
        columns[0] = vec![
            Card::up(Suit::Hearts, Rank::Five),
            Card::up(Suit::Spades, Rank::Nine),
        ];
        columns[1].clear();
        let game = session(columns, 10);
        assert_eq!(
            BaselineAI::new().choose(&game),
            Some(Decision::Move(Move::new(0, 1, 1)))
        );
    }

    #[test]
    fn gives_up_when_stock_is_gone_and_nothing_helps() {
        let game = session(kings(), 0);
        assert_eq!(BaselineAI::new().choose(&game), None);
    }

    #[test]
    fn every_choice_is_accepted_over_a_seeded_game() {
        let ai = BaselineAI::new();
        let mut game = GameSession::new(Difficulty::OneSuit, Some(42));
        for _ in 0..300 {
            let Some(decision) = ai.choose(&game) else {
                break;
            };
            decision.apply(&mut game).expect("baseline picks legal actions");
        }
        assert_eq!(game.cards_accounted(), 104);
        assert!(game.move_count() > 0);
    }
}
