//! `rng`: prints a short ChaCha20 sample so seeded runs can be compared
//! across machines.

use crate::error::CliError;
use rand::{RngCore, SeedableRng};
use std::io::Write;

pub fn handle_rng_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let s = seed.unwrap_or_else(rand::random);
    let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(s);
    let vals: Vec<u64> = (0..5).map(|_| rng.next_u64()).collect();
    writeln!(out, "RNG sample: {:?}", vals)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_command_with_explicit_seed() {
        let mut out = Vec::new();
        handle_rng_command(Some(12345), &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with("RNG sample: ["));
        assert_eq!(output.matches(',').count(), 4);
    }

    #[test]
    fn test_rng_command_produces_deterministic_output() {
        let mut out1 = Vec::new();
        let mut out2 = Vec::new();
        handle_rng_command(Some(42), &mut out1).unwrap();
        handle_rng_command(Some(42), &mut out2).unwrap();
        assert_eq!(out1, out2, "Same seed should produce same output");
    }

    #[test]
    fn test_rng_command_without_seed() {
        let mut out = Vec::new();
        assert!(handle_rng_command(None, &mut out).is_ok());
    }
}
