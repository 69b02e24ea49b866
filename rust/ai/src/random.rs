//! Seeded player choosing uniformly among legal actions.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{AutoPlayer, Decision, can_deal};
use spider_engine::session::GameSession;

#[derive(Debug)]
pub struct RandomAI {
    rng: Mutex<StdRng>,
}

impl RandomAI {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl AutoPlayer for RandomAI {
    fn choose(&self, session: &GameSession) -> Option<Decision> {
        let mut options: Vec<Decision> = session
            .legal_moves()
            .into_iter()
            .map(Decision::Move)
            .collect();
        if can_deal(session) {
            options.push(Decision::Deal);
        }
        if options.is_empty() {
            return None;
        }
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let pick = rng.random_range(0..options.len());
        Some(options[pick])
    }

    fn name(&self) -> &str {
        "RandomAI"
    }
}
