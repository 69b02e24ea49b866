use serde::{Deserialize, Serialize};

use crate::rules::is_movable_run;
use crate::tableau::Tableau;

/// Where a game stands after the latest action.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    /// Every card has gone into a completed set
    Won,
    /// Stock empty and no legal move left
    Deadlocked,
}

/// True iff the table and the stock are both empty.
pub fn check_win(tableau: &Tableau) -> bool {
    tableau.columns().iter().all(Vec::is_empty) && tableau.stock_len() == 0
}

/// Deadlock detection.
///
/// A game is not over while it is won, while the stock can still be dealt,
/// or while an empty column can take any face-up card. Failing those, every
/// movable run start in every column is tried against the top card of every
/// other non-empty column; one rank match is enough to keep playing.
pub fn is_game_over(tableau: &Tableau) -> bool {
    if check_win(tableau) {
        return false;
    }
    if tableau.stock_len() > 0 {
        return false;
    }
    if tableau.first_empty_column().is_some() && tableau.has_face_up_card() {
        return false;
    }

    let columns = tableau.columns();
    for (i, source) in columns.iter().enumerate() {
        for (k, card) in source.iter().enumerate() {
            if !card.face_up || !is_movable_run(source, k) {
                continue;
            }
            let fits = columns
                .iter()
                .enumerate()
                .filter(|(j, target)| *j != i && !target.is_empty())
                .filter_map(|(_, target)| target.last())
                .any(|top| card.rank.is_one_below(top.rank));
            if fits {
                return false;
            }
        }
    }
    true
}

pub fn status(tableau: &Tableau) -> GameStatus {
    if check_win(tableau) {
        GameStatus::Won
    } else if is_game_over(tableau) {
        GameStatus::Deadlocked
    } else {
        GameStatus::InProgress
    }
}
