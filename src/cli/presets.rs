// presets.rs - Named parameter presets for sequence length and MSA quality

use crate::core::alphabet::Pseudocount;

/// Windowing parameters for an RNA length class
#[derive(Debug, Clone, PartialEq)]
pub struct LengthProfile {
    pub max_length: usize,
    pub chunk_size: usize,
    pub overlap: usize,
    pub description: Option<String>,
}

impl LengthProfile {
    pub fn from_name(name: &str) -> Result<Self, String> {
        match name {
            "default" => Ok(Self {
                max_length: 750,
                chunk_size: 600,
                overlap: 200,
                description: Some("Standard windowing".to_string()),
            }),
            "short" => Ok(Self {
                max_length: 300,
                chunk_size: 300,
                overlap: 100,
                description: Some("Short RNAs (<300 nt), windowing rarely needed".to_string()),
            }),
            "medium" => Ok(Self {
                max_length: 750,
                chunk_size: 600,
                overlap: 150,
                description: Some("Medium RNAs (300-750 nt)".to_string()),
            }),
            "long" => Ok(Self {
                max_length: 750,
                chunk_size: 600,
                overlap: 200,
                description: Some("Long RNAs (750-1500 nt)".to_string()),
            }),
            "very-long" | "very_long" => Ok(Self {
                max_length: 750,
                chunk_size: 500,
                overlap: 250,
                description: Some("Very long RNAs (>1500 nt), wider overlap".to_string()),
            }),
            _ => Err(format!(
                "Unknown length profile: {}. Use: default, short, medium, long, very-long",
                name
            )),
        }
    }
}

/// Filtering and smoothing parameters for an MSA quality class
#[derive(Debug, Clone, PartialEq)]
pub struct QualityProfile {
    pub gap_threshold: f64,
    pub identity_threshold: f64,
    pub conservation_range: (f64, f64),
    pub pseudocount: Pseudocount,
    /// Keep at most this many sequences
    pub max_sequences: Option<usize>,
    pub description: Option<String>,
}

impl QualityProfile {
    pub fn from_name(name: &str) -> Result<Self, String> {
        match name {
            "high" => Ok(Self {
                gap_threshold: 0.4,
                identity_threshold: 0.85,
                conservation_range: (0.3, 0.9),
                pseudocount: Pseudocount::Fixed(0.2),
                max_sequences: Some(10000),
                description: Some("Many diverse sequences".to_string()),
            }),
            "medium" => Ok(Self {
                gap_threshold: 0.5,
                identity_threshold: 0.8,
                conservation_range: (0.2, 0.95),
                pseudocount: Pseudocount::Fixed(0.5),
                max_sequences: Some(5000),
                description: Some("Standard MSAs".to_string()),
            }),
            "low" => Ok(Self {
                gap_threshold: 0.6,
                identity_threshold: 0.7,
                conservation_range: (0.1, 0.99),
                pseudocount: Pseudocount::Fixed(0.8),
                max_sequences: Some(1000),
                description: Some("Few or highly similar sequences".to_string()),
            }),
            _ => Err(format!("Unknown MSA quality: {}. Use: high, medium, low", name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_profiles() {
        let very_long = LengthProfile::from_name("very-long").unwrap();
        assert_eq!((very_long.chunk_size, very_long.overlap), (500, 250));
        assert_eq!(LengthProfile::from_name("very_long").unwrap(), very_long);
        assert!(LengthProfile::from_name("huge").is_err());
        for name in ["default", "short", "medium", "long"] {
            let p = LengthProfile::from_name(name).unwrap();
            assert!(p.overlap < p.chunk_size);
        }
    }

    #[test]
    fn test_quality_profiles() {
        let low = QualityProfile::from_name("low").unwrap();
        assert_eq!(low.conservation_range, (0.1, 0.99));
        assert_eq!(low.pseudocount, Pseudocount::Fixed(0.8));
        assert_eq!(low.max_sequences, Some(1000));
        assert_eq!(QualityProfile::from_name("high").unwrap().max_sequences, Some(10000));
        assert!(QualityProfile::from_name("excellent").is_err());
    }
}
