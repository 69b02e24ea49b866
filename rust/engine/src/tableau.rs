use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Number of columns on the table.
pub const COLUMN_COUNT: usize = 10;
/// Cards laid out by the opening deal; the rest go to the stock.
pub const INITIAL_DEAL: usize = 54;

/// The ten columns plus the face-down stock.
///
/// Within a column, the last element is the top (frontmost) card. The stock
/// is dealt from its end as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tableau {
    columns: Vec<Vec<Card>>,
    stock: Vec<Card>,
}

impl Tableau {
    /// Lays out a shuffled deck: card `i` of the first 54 drawn goes to
    /// column `i % 10`, so columns 0-3 end up with six cards and 4-9 with
    /// five. Only the top of each column is turned up.
    pub fn deal(mut deck: Vec<Card>) -> Self {
        let mut columns = vec![Vec::new(); COLUMN_COUNT];
        for i in 0..INITIAL_DEAL {
            let Some(mut card) = deck.pop() else {
                break;
            };
            card.face_up = false;
            columns[i % COLUMN_COUNT].push(card);
        }
        for col in &mut columns {
            if let Some(top) = col.last_mut() {
                top.face_up = true;
            }
        }
        for card in &mut deck {
            card.face_up = false;
        }
        Self {
            columns,
            stock: deck,
        }
    }

    /// Builds a position directly, for tests and puzzle setups.
    pub fn from_parts(columns: Vec<Vec<Card>>, stock: Vec<Card>) -> Result<Self, GameError> {
        if columns.len() != COLUMN_COUNT {
            return Err(GameError::InvalidLayout(format!(
                "expected {} columns, got {}",
                COLUMN_COUNT,
                columns.len()
            )));
        }
        Ok(Self { columns, stock })
    }

    pub fn empty() -> Self {
        Self {
            columns: vec![Vec::new(); COLUMN_COUNT],
            stock: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[Vec<Card>] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Result<&[Card], GameError> {
        self.columns
            .get(index)
            .map(Vec::as_slice)
            .ok_or(GameError::ColumnOutOfRange { index })
    }

    pub fn top(&self, index: usize) -> Option<&Card> {
        self.columns.get(index).and_then(|c| c.last())
    }

    pub fn stock(&self) -> &[Card] {
        &self.stock
    }

    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    /// How many more times the stock can be dealt.
    pub fn deals_remaining(&self) -> usize {
        self.stock.len().div_ceil(COLUMN_COUNT)
    }

    /// Cards still on the table or in the stock.
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum::<usize>() + self.stock.len()
    }

    pub fn first_empty_column(&self) -> Option<usize> {
        self.columns.iter().position(Vec::is_empty)
    }

    pub fn has_face_up_card(&self) -> bool {
        self.columns.iter().flatten().any(|c| c.face_up)
    }

    /// Turns the top card of a column face up. Returns true if it was down.
    pub(crate) fn reveal_top(&mut self, index: usize) -> bool {
        match self.columns.get_mut(index).and_then(|c| c.last_mut()) {
            Some(top) if !top.face_up => {
                top.face_up = true;
                true
            }
            _ => false,
        }
    }

    /// Cuts `column[start..]` off and returns it in order.
    pub(crate) fn split_off(&mut self, index: usize, start: usize) -> Vec<Card> {
        match self.columns.get_mut(index) {
            Some(col) if start <= col.len() => col.split_off(start),
            _ => Vec::new(),
        }
    }

    pub(crate) fn append(&mut self, index: usize, mut cards: Vec<Card>) {
        if let Some(col) = self.columns.get_mut(index) {
            col.append(&mut cards);
        }
    }

    /// Deals one stock card face up onto each column in order, stopping
    /// early if the stock runs out. Returns the number of cards dealt.
    pub(crate) fn deal_row(&mut self) -> usize {
        let mut dealt = 0;
        for col in &mut self.columns {
            let Some(mut card) = self.stock.pop() else {
                break;
            };
            card.face_up = true;
            col.push(card);
            dealt += 1;
        }
        dealt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};
    use crate::deck::{build_deck, Difficulty};

    #[test]
    fn opening_deal_shape() {
        let t = Tableau::deal(build_deck(Difficulty::OneSuit));
        for (i, col) in t.columns().iter().enumerate() {
            let expected = if i < 4 { 6 } else { 5 };
            assert_eq!(col.len(), expected, "column {}", i);
            let (top, rest) = col.split_last().unwrap();
            assert!(top.face_up);
            assert!(rest.iter().all(|c| !c.face_up));
        }
        assert_eq!(t.stock_len(), 50);
        assert_eq!(t.deals_remaining(), 5);
        assert_eq!(t.card_count(), 104);
    }

    #[test]
    fn deal_row_stops_when_stock_runs_out() {
        let stock = vec![
            Card::new(Suit::Spades, Rank::Ace),
            Card::new(Suit::Spades, Rank::Two),
            Card::new(Suit::Spades, Rank::Three),
        ];
        let mut t = Tableau::from_parts(vec![Vec::new(); COLUMN_COUNT], stock).unwrap();
        assert_eq!(t.deals_remaining(), 1);
        assert_eq!(t.deal_row(), 3);
        assert_eq!(t.top(0), Some(&Card::up(Suit::Spades, Rank::Three)));
        assert_eq!(t.top(2), Some(&Card::up(Suit::Spades, Rank::Ace)));
        assert!(t.top(3).is_none());
        assert_eq!(t.stock_len(), 0);
    }

    #[test]
    fn from_parts_rejects_wrong_column_count() {
        let err = Tableau::from_parts(vec![Vec::new(); 3], Vec::new()).unwrap_err();
        assert!(matches!(err, GameError::InvalidLayout(_)));
    }

    #[test]
    fn column_lookup_reports_bad_index() {
        let t = Tableau::empty();
        assert_eq!(
            t.column(10).unwrap_err(),
            GameError::ColumnOutOfRange { index: 10 }
        );
    }
}
