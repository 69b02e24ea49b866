use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::tableau::Tableau;

/// A request to move `column[from][start..]` onto column `to`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: usize,
    pub start: usize,
    pub to: usize,
}

impl Move {
    pub fn new(from: usize, start: usize, to: usize) -> Self {
        Self { from, start, to }
    }
}

/// `over` lies directly on `under` inside a run.
fn continues_run(under: &Card, over: &Card) -> bool {
    under.face_up && over.face_up && under.suit == over.suit && over.rank.is_one_below(under.rank)
}

/// Checks whether `column[start..]` can be picked up as one unit.
///
/// Every adjacent pair in the suffix must be face up, of one suit, and step
/// down by exactly one rank. The last card on its own always qualifies.
/// An index past the end of the column yields `false`.
///
/// # Examples
///
/// ```
/// use spider_engine::cards::{Card, Rank, Suit};
/// use spider_engine::rules::is_movable_run;
///
/// let column = [
///     Card::new(Suit::Hearts, Rank::Two),
///     Card::up(Suit::Spades, Rank::Eight),
///     Card::up(Suit::Spades, Rank::Seven),
///     Card::up(Suit::Hearts, Rank::Six),
/// ];
/// assert!(is_movable_run(&column, 3));
/// assert!(!is_movable_run(&column, 2)); // suit breaks between 7♠ and 6♥
/// assert!(!is_movable_run(&column, 4));
/// ```
pub fn is_movable_run(column: &[Card], start: usize) -> bool {
    if start >= column.len() {
        return false;
    }
    column[start..]
        .windows(2)
        .all(|pair| continues_run(&pair[0], &pair[1]))
}

/// Checks whether `moving` may be dropped onto `target`.
///
/// Any run may go into an empty column. Otherwise the target's top card must
/// be exactly one rank above the first moving card. Suits are ignored here:
/// a 9♠ can land on a 10♥.
///
/// # Examples
///
/// ```
/// use spider_engine::cards::{Card, Rank, Suit};
/// use spider_engine::rules::can_place;
///
/// let run = [
///     Card::up(Suit::Spades, Rank::Jack),
///     Card::up(Suit::Spades, Rank::Ten),
///     Card::up(Suit::Spades, Rank::Nine),
/// ];
/// assert!(can_place(&run, &[Card::up(Suit::Hearts, Rank::Queen)]));
/// assert!(can_place(&run, &[]));
/// assert!(!can_place(&run, &[Card::up(Suit::Spades, Rank::King)]));
/// ```
pub fn can_place(moving: &[Card], target: &[Card]) -> bool {
    match (moving.first(), target.last()) {
        (_, None) => true,
        (Some(first), Some(top)) => first.rank.is_one_below(top.rank),
        (None, Some(_)) => false,
    }
}

/// Index of the deepest card of the run sitting on top of `column`, or
/// `None` if the column is empty or its top card is face down.
pub fn run_start(column: &[Card]) -> Option<usize> {
    let last = column.len().checked_sub(1)?;
    if !column[last].face_up {
        return None;
    }
    let mut start = last;
    while start > 0 && continues_run(&column[start - 1], &column[start]) {
        start -= 1;
    }
    Some(start)
}

/// Validates a move against the current tableau without changing it.
///
/// # Errors
///
/// - [`GameError::ColumnOutOfRange`] - `from` or `to` is not a column
/// - [`GameError::SameColumn`] - `from == to`
/// - [`GameError::EmptySource`] - nothing to pick up
/// - [`GameError::StartOutOfRange`] - `start` is past the source's end
/// - [`GameError::FaceDownCard`] - the first moving card is face down
/// - [`GameError::NotMovable`] - the suffix is not a run
/// - [`GameError::IllegalPlacement`] - target top is not one rank higher
pub fn validate_move(tableau: &Tableau, mv: Move) -> Result<(), GameError> {
    let source = tableau.column(mv.from)?;
    let target = tableau.column(mv.to)?;
    if mv.from == mv.to {
        return Err(GameError::SameColumn { column: mv.from });
    }
    if source.is_empty() {
        return Err(GameError::EmptySource { column: mv.from });
    }
    if mv.start >= source.len() {
        return Err(GameError::StartOutOfRange {
            column: mv.from,
            start: mv.start,
            len: source.len(),
        });
    }
    if !source[mv.start].face_up {
        return Err(GameError::FaceDownCard {
            column: mv.from,
            start: mv.start,
        });
    }
    if !is_movable_run(source, mv.start) {
        return Err(GameError::NotMovable {
            column: mv.from,
            start: mv.start,
        });
    }
    let moving = &source[mv.start..];
    if !can_place(moving, target) {
        if let Some(top) = target.last() {
            return Err(GameError::IllegalPlacement {
                moving: moving[0].rank,
                target: top.rank,
            });
        }
    }
    Ok(())
}

/// Every move [`validate_move`] would accept, in column order.
pub fn legal_moves(tableau: &Tableau) -> Vec<Move> {
    let columns = tableau.columns();
    let mut moves = Vec::new();
    for (from, source) in columns.iter().enumerate() {
        let Some(first) = run_start(source) else {
            continue;
        };
        for start in first..source.len() {
            for (to, target) in columns.iter().enumerate() {
                if to != from && can_place(&source[start..], target) {
                    moves.push(Move::new(from, start, to));
                }
            }
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};
    use crate::tableau::COLUMN_COUNT;

    fn layout(cols: &[(usize, Vec<Card>)]) -> Tableau {
        let mut columns = vec![Vec::new(); COLUMN_COUNT];
        for (i, col) in cols {
            columns[*i] = col.clone();
        }
        Tableau::from_parts(columns, Vec::new()).unwrap()
    }

    #[test]
    fn run_start_finds_deepest_linked_card() {
        let col = vec![
            Card::new(Suit::Spades, Rank::Nine),
            Card::up(Suit::Hearts, Rank::Six),
            Card::up(Suit::Spades, Rank::Five),
            Card::up(Suit::Spades, Rank::Four),
        ];
        assert_eq!(run_start(&col), Some(2));
        assert_eq!(run_start(&[]), None);
        assert_eq!(run_start(&[Card::new(Suit::Spades, Rank::Ace)]), None);
    }

    #[test]
    fn face_down_card_breaks_a_run() {
        let col = vec![
            Card::new(Suit::Spades, Rank::Six),
            Card::up(Suit::Spades, Rank::Five),
        ];
        assert!(!is_movable_run(&col, 0));
        assert!(is_movable_run(&col, 1));
    }

    #[test]
    fn validate_reports_specific_reasons() {
        let t = layout(&[
            (
                0,
                vec![
                    Card::new(Suit::Clubs, Rank::Two),
                    Card::up(Suit::Spades, Rank::Seven),
                    Card::up(Suit::Hearts, Rank::Six),
                ],
            ),
            (1, vec![Card::up(Suit::Clubs, Rank::King)]),
        ]);
        assert_eq!(
            validate_move(&t, Move::new(0, 2, 0)),
            Err(GameError::SameColumn { column: 0 })
        );
        assert_eq!(
            validate_move(&t, Move::new(2, 0, 1)),
            Err(GameError::EmptySource { column: 2 })
        );
        assert_eq!(
            validate_move(&t, Move::new(0, 0, 1)),
            Err(GameError::FaceDownCard { column: 0, start: 0 })
        );
        assert_eq!(
            validate_move(&t, Move::new(0, 1, 1)),
            Err(GameError::NotMovable { column: 0, start: 1 })
        );
        assert_eq!(
            validate_move(&t, Move::new(0, 5, 1)),
            Err(GameError::StartOutOfRange {
                column: 0,
                start: 5,
                len: 3
            })
        );
        assert_eq!(
            validate_move(&t, Move::new(0, 2, 1)),
            Err(GameError::IllegalPlacement {
                moving: Rank::Six,
                target: Rank::King
            })
        );
        assert_eq!(
            validate_move(&t, Move::new(0, 2, 11)),
            Err(GameError::ColumnOutOfRange { index: 11 })
        );
        assert!(validate_move(&t, Move::new(0, 2, 5)).is_ok());
    }

    #[test]
    fn legal_moves_cover_partial_runs_and_empty_columns() {
        let mut columns: Vec<Vec<Card>> = (0..COLUMN_COUNT)
            .map(|_| vec![Card::up(Suit::Clubs, Rank::Ace)])
            .collect();
        columns[0] = vec![
            Card::up(Suit::Spades, Rank::Eight),
            Card::up(Suit::Spades, Rank::Seven),
        ];
        columns[1] = vec![Card::up(Suit::Hearts, Rank::Eight)];
        columns[2] = Vec::new();
        let t = Tableau::from_parts(columns, Vec::new()).unwrap();
        let moves = legal_moves(&t);
        assert!(moves.contains(&Move::new(0, 1, 1)));
        assert!(moves.contains(&Move::new(0, 0, 2)));
        assert!(moves.contains(&Move::new(0, 1, 2)));
        assert!(!moves.contains(&Move::new(0, 0, 1)));
        for mv in &moves {
            assert!(validate_move(&t, *mv).is_ok(), "{:?}", mv);
        }
    }
}
