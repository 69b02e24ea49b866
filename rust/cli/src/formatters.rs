//! Card and table formatters for terminal display.
//!
//! Unicode suit symbols with an ASCII fallback for terminals that cannot
//! render them. Face-down cards print as `##`.
//!
//! ## Example
//!
//! ```rust
//! use spider_engine::cards::{Card, Rank, Suit};
//! use spider_cli::formatters::format_card;
//!
//! let ten = Card::up(Suit::Spades, Rank::Ten);
//! assert!(format_card(&ten) == "10♠" || format_card(&ten) == "10s");
//! assert_eq!(format_card(&Card::new(Suit::Spades, Rank::Ten)), "##");
//! ```

use spider_ai::Decision;
use spider_engine::cards::{Card, Suit};
use spider_engine::deck::SUIT_SLOTS;
use spider_engine::session::SessionView;

const CELL: usize = 5;

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

/// `♠ ♥ ♣ ♦`, or `s h c d` without Unicode support.
pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        }
        .to_string()
    }
}

/// Rank label and suit for a face-up card, `##` for a face-down one.
pub fn format_card(card: &Card) -> String {
    if card.face_up {
        format!("{}{}", card.rank.label(), format_suit(&card.suit))
    } else {
        "##".to_string()
    }
}

/// Renders the ten columns side by side under a header of column indexes.
/// Empty columns show `--` on the first row.
pub fn format_tableau(columns: &[Vec<Card>]) -> Vec<String> {
    let mut lines = Vec::new();
    let header: String = (0..columns.len())
        .map(|i| format!("{:>width$}", i, width = CELL))
        .collect();
    lines.push(header);

    let depth = columns.iter().map(Vec::len).max().unwrap_or(0).max(1);
    for row in 0..depth {
        let line: String = columns
            .iter()
            .map(|col| {
                let cell = match col.get(row) {
                    Some(card) => format_card(card),
                    None if row == 0 => "--".to_string(),
                    None => String::new(),
                };
                format!("{:>width$}", cell, width = CELL)
            })
            .collect();
        lines.push(line.trim_end().to_string());
    }
    lines
}

/// One-line summary of counters under the table.
pub fn format_status(view: &SessionView) -> String {
    let mut line = format!(
        "Stock: {} ({} deals)  Sets: {}/{}  Moves: {}",
        view.stock_len, view.deals_remaining, view.completed_sets, SUIT_SLOTS, view.move_count
    );
    if !view.completed.is_empty() {
        let suits: Vec<String> = view.completed.iter().map(format_suit).collect();
        line.push_str(&format!("  [{}]", suits.join(" ")));
    }
    line
}

/// The play-command spelling of an automatic player's decision.
pub fn format_decision(decision: &Decision) -> String {
    match decision {
        Decision::Deal => "d".to_string(),
        Decision::Move(mv) => format!("m {} {} {}", mv.from, mv.start, mv.to),
    }
}
