// uniform.rs - Unit weight for every sequence

use super::SequenceWeighter;
use crate::core::executor::Execution;

#[derive(Debug, Clone, Copy, Default)]
pub struct UniformWeighter;

impl SequenceWeighter for UniformWeighter {
    fn weigh(&self, rows: &[&[u8]], _exec: &Execution) -> Vec<f64> {
        vec![1.0; rows.len()]
    }

    fn name(&self) -> &'static str {
        "uniform"
    }

    fn description(&self) -> String {
        "Uniform weights (no redundancy correction)".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_ones() {
        let rows: Vec<&[u8]> = vec![&[0, 1], &[0, 1], &[2, 3]];
        assert_eq!(UniformWeighter.weigh(&rows, &Execution::Sequential), vec![1.0; 3]);
    }
}
