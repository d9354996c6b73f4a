// alphabet.rs - RNA alphabet encoding and pseudocount policy

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Symbols in index order; frequency tables are indexed by this position.
pub const ALPHABET: [u8; 7] = *b"ACGUT-N";

/// Number of symbols |A|.
pub const ALPHABET_SIZE: usize = ALPHABET.len();

/// Encoded gap symbol.
pub const GAP: u8 = 5;

/// Encoded unknown/ambiguous symbol.
pub const UNKNOWN: u8 = 6;

/// Encode one alignment byte. Anything outside the alphabet becomes `N`.
#[inline]
pub fn encode(byte: u8) -> u8 {
    match byte.to_ascii_uppercase() {
        b'A' => 0,
        b'C' => 1,
        b'G' => 2,
        b'U' => 3,
        b'T' => 4,
        b'-' | b'.' => GAP,
        _ => UNKNOWN,
    }
}

/// Decode a symbol index back to its character.
#[inline]
pub fn decode(code: u8) -> char {
    ALPHABET
        .get(code as usize)
        .map(|&b| b as char)
        .unwrap_or('N')
}

/// Encode a whole sequence.
pub fn encode_sequence(sequence: &[u8]) -> Vec<u8> {
    sequence.iter().map(|&b| encode(b)).collect()
}

/// Pseudocount selection: a fixed value, or adaptive on the effective
/// sequence count. Resolved to a concrete α before frequency estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Pseudocount {
    #[default]
    Adaptive,
    Fixed(f64),
}

impl Pseudocount {
    /// Concrete α for an alignment with the given effective sequence count.
    pub fn resolve(&self, effective_count: f64) -> f64 {
        match self {
            Pseudocount::Adaptive => adaptive_pseudocount(effective_count),
            Pseudocount::Fixed(alpha) => *alpha,
        }
    }
}

impl FromStr for Pseudocount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("adaptive") || trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Pseudocount::Adaptive);
        }
        let alpha: f64 = trimmed
            .parse()
            .map_err(|_| format!("Invalid pseudocount '{}'. Use: adaptive or a non-negative number", s))?;
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(format!("Pseudocount must be a non-negative finite number, got {}", alpha));
        }
        Ok(Pseudocount::Fixed(alpha))
    }
}

impl Display for Pseudocount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pseudocount::Adaptive => write!(f, "adaptive"),
            Pseudocount::Fixed(alpha) => write!(f, "{}", alpha),
        }
    }
}

/// Smoothing strength by MSA depth: small alignments get more.
///
/// `count <= 25` → 0.5, `count <= 100` → 0.2, otherwise 0.0 (no pseudocount).
pub fn adaptive_pseudocount(effective_count: f64) -> f64 {
    if effective_count <= 25.0 {
        0.5
    } else if effective_count <= 100.0 {
        0.2
    } else {
        0.0
    }
}
