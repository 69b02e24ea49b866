use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::cards::{suit_run, Card, Suit};
use crate::errors::GameError;

/// Two standard decks.
pub const DECK_SIZE: usize = 104;
/// Number of Ace..King runs in a deck, and so the number of sets to win.
pub const SUIT_SLOTS: usize = 8;

/// How many distinct suits are in play.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    /// Spades only
    #[default]
    OneSuit,
    /// Spades and Hearts
    TwoSuits,
    /// All four suits
    FourSuits,
}

impl Difficulty {
    pub fn suit_count(self) -> u8 {
        match self {
            Difficulty::OneSuit => 1,
            Difficulty::TwoSuits => 2,
            Difficulty::FourSuits => 4,
        }
    }

    pub fn suits(self) -> &'static [Suit] {
        match self {
            Difficulty::OneSuit => &[Suit::Spades],
            Difficulty::TwoSuits => &[Suit::Spades, Suit::Hearts],
            Difficulty::FourSuits => &[Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds],
        }
    }

    /// How many full runs of each suit the deck holds.
    pub fn runs_per_suit(self) -> usize {
        SUIT_SLOTS / self.suit_count() as usize
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = GameError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(Difficulty::OneSuit),
            2 => Ok(Difficulty::TwoSuits),
            4 => Ok(Difficulty::FourSuits),
            other => Err(GameError::InvalidDifficulty(other.to_string())),
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(d: Difficulty) -> u8 {
        d.suit_count()
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.parse::<u8>() {
            Ok(v) => Difficulty::try_from(v),
            Err(_) => Err(GameError::InvalidDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suit_count())
    }
}

/// Builds the 104-card deck for `difficulty`, unshuffled and face down.
///
/// Each suit in play contributes `8 / suit_count` complete Ace..King runs.
///
/// ```
/// use spider_engine::deck::{build_deck, Difficulty, DECK_SIZE};
///
/// let deck = build_deck(Difficulty::TwoSuits);
/// assert_eq!(deck.len(), DECK_SIZE);
/// assert!(deck.iter().all(|c| !c.face_up));
/// ```
pub fn build_deck(difficulty: Difficulty) -> Vec<Card> {
    let mut v = Vec::with_capacity(DECK_SIZE);
    for &suit in difficulty.suits() {
        for _ in 0..difficulty.runs_per_suit() {
            v.extend(suit_run(suit));
        }
    }
    v
}

/// Uniform in-place permutation (Fisher-Yates) driven by the caller's RNG.
pub fn shuffle<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    cards.shuffle(rng);
}

/// A seeded deck. Cards are dealt from the end of the shuffled sequence.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    difficulty: Difficulty,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64, difficulty: Difficulty) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep build order until shuffle is called explicitly
        Self {
            cards: build_deck(difficulty),
            difficulty,
            rng,
        }
    }

    pub fn shuffle(&mut self) {
        self.cards = build_deck(self.difficulty);
        shuffle(&mut self.cards, &mut self.rng);
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}
