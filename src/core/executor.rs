// executor.rs - Pluggable execution strategies for independent work units

use crate::core::config::CouplingConfig;
use rayon::prelude::*;

/// Runs `len` independent, pure work units and returns their outputs in
/// index order. Completion order never leaks into the result.
pub trait Executor: Send + Sync {
    /// Strategy name for logs
    fn name(&self) -> &'static str;

    /// Evaluate `f(0..len)` and collect the results by index
    fn map_indexed<T, F>(&self, len: usize, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> T + Send + Sync;
}

/// Direct in-thread execution
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

/// Work-stealing execution on the rayon pool
#[derive(Debug, Clone, Copy, Default)]
pub struct Parallel;

impl Executor for Sequential {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn map_indexed<T, F>(&self, len: usize, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> T + Send + Sync,
    {
        (0..len).map(f).collect()
    }
}

impl Executor for Parallel {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn map_indexed<T, F>(&self, len: usize, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> T + Send + Sync,
    {
        (0..len).into_par_iter().map(f).collect()
    }
}

/// Strategy selected by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    Sequential,
    #[default]
    Parallel,
}

impl Execution {
    pub fn from_config(config: &CouplingConfig) -> Self {
        if config.parallel {
            Execution::Parallel
        } else {
            Execution::Sequential
        }
    }
}

impl Executor for Execution {
    fn name(&self) -> &'static str {
        match self {
            Execution::Sequential => Sequential.name(),
            Execution::Parallel => Parallel.name(),
        }
    }

    fn map_indexed<T, F>(&self, len: usize, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> T + Send + Sync,
    {
        match self {
            Execution::Sequential => Sequential.map_indexed(len, f),
            Execution::Parallel => Parallel.map_indexed(len, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategies_agree_on_order() {
        let square = |i: usize| i * i;
        let serial = Execution::Sequential.map_indexed(1000, square);
        let parallel = Execution::Parallel.map_indexed(1000, square);
        assert_eq!(serial, parallel);
        assert_eq!(serial[31], 961);
    }

    #[test]
    fn test_from_config() {
        let config = CouplingConfig {
            parallel: false,
            ..CouplingConfig::default()
        };
        assert_eq!(Execution::from_config(&config), Execution::Sequential);
        assert_eq!(Execution::from_config(&CouplingConfig::default()).name(), "parallel");
    }

    #[test]
    fn test_empty_work() {
        let out: Vec<usize> = Sequential.map_indexed(0, |i| i);
        assert!(out.is_empty());
    }
}
