//! Detection and removal of completed King-to-Ace runs.
//!
//! A column is re-checked after every removal until it stops yielding sets.
//! The cascade is a work-list over column indices rather than recursion, so
//! it ends exactly when the queue drains.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::cards::{Card, Suit};
use crate::tableau::Tableau;

/// Cards in one completed set.
pub const SET_LEN: usize = 13;

/// A set that was lifted off the table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CompletedSet {
    /// Column the set was taken from
    pub column: usize,
    /// Suit of all thirteen cards
    pub suit: Suit,
    /// Whether removing it turned a face-down card up
    pub revealed: bool,
}

/// True iff `cards` is K, Q, ... , A of a single suit, all face up.
pub fn is_completed_set(cards: &[Card]) -> bool {
    let Some(first) = cards.first() else {
        return false;
    };
    cards.len() == SET_LEN
        && cards.iter().enumerate().all(|(i, c)| {
            c.face_up && c.suit == first.suit && usize::from(c.rank.value()) == SET_LEN - i
        })
}

/// Removes a completed set from the top of `column` if there is one.
///
/// Looks only at the last thirteen cards. On removal the new top card, if
/// any, is turned face up.
pub fn remove_completed_set(tableau: &mut Tableau, column: usize) -> Option<CompletedSet> {
    let cards = tableau.column(column).ok()?;
    let start = cards.len().checked_sub(SET_LEN)?;
    if !is_completed_set(&cards[start..]) {
        return None;
    }
    let suit = cards[start].suit;
    tableau.split_off(column, start);
    let revealed = tableau.reveal_top(column);
    Some(CompletedSet {
        column,
        suit,
        revealed,
    })
}

/// Runs the completion cascade over `columns`.
///
/// Each column that yields a set goes back on the queue; the loop stops once
/// a full pass over the queue removes nothing. Returns the sets in removal
/// order.
pub fn resolve_completions<I>(tableau: &mut Tableau, columns: I) -> Vec<CompletedSet>
where
    I: IntoIterator<Item = usize>,
{
    let mut queue: VecDeque<usize> = columns.into_iter().collect();
    let mut removed = Vec::new();
    while let Some(column) = queue.pop_front() {
        if let Some(set) = remove_completed_set(tableau, column) {
            tracing::info!(
                column,
                suit = %set.suit,
                revealed = set.revealed,
                "completed set removed"
            );
            removed.push(set);
            queue.push_back(column);
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{all_ranks, Rank};
    use crate::tableau::COLUMN_COUNT;

    fn king_to_ace(suit: Suit) -> Vec<Card> {
        all_ranks().iter().rev().map(|&r| Card::up(suit, r)).collect()
    }

    #[test]
    fn recognises_only_exact_sets() {
        assert!(is_completed_set(&king_to_ace(Suit::Clubs)));

        let mut mixed = king_to_ace(Suit::Clubs);
        mixed[5].suit = Suit::Spades;
        assert!(!is_completed_set(&mixed));

        let mut hidden = king_to_ace(Suit::Clubs);
        hidden[0].face_up = false;
        assert!(!is_completed_set(&hidden));

        let short = &king_to_ace(Suit::Clubs)[1..];
        assert!(!is_completed_set(short));
        assert!(!is_completed_set(&[]));
    }

    #[test]
    fn removal_reveals_card_underneath() {
        let mut col = vec![Card::new(Suit::Hearts, Rank::Four)];
        col.extend(king_to_ace(Suit::Spades));
        let mut columns = vec![Vec::new(); COLUMN_COUNT];
        columns[3] = col;
        let mut t = Tableau::from_parts(columns, Vec::new()).unwrap();

        let set = remove_completed_set(&mut t, 3).expect("set present");
        assert_eq!(
            set,
            CompletedSet {
                column: 3,
                suit: Suit::Spades,
                revealed: true
            }
        );
        assert_eq!(t.column(3).unwrap(), &[Card::up(Suit::Hearts, Rank::Four)]);
        assert!(remove_completed_set(&mut t, 3).is_none());
    }

    #[test]
    fn cascade_removes_stacked_sets() {
        let mut col = king_to_ace(Suit::Hearts);
        col.extend(king_to_ace(Suit::Hearts));
        let mut columns = vec![Vec::new(); COLUMN_COUNT];
        columns[0] = col;
        let mut t = Tableau::from_parts(columns, Vec::new()).unwrap();

        let removed = resolve_completions(&mut t, [0]);
        assert_eq!(removed.len(), 2);
        assert!(t.column(0).unwrap().is_empty());
    }

    #[test]
    fn cascade_on_quiet_columns_is_a_no_op() {
        let mut t = Tableau::empty();
        let before = t.clone();
        assert!(resolve_completions(&mut t, 0..COLUMN_COUNT).is_empty());
        assert_eq!(t, before);
    }
}
