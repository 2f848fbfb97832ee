//! Configuration for distributing blocks across worker threads

/// Options for [`distribute_with_config`](super::distribute_with_config)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceConfig {
    /// Number of worker threads the blocks are distributed over
    pub n_threads: usize,

    /// Whether to run pairwise rebalancing after the greedy assignment
    pub rebalance: bool,

    /// Upper bound on accepted rebalancing passes
    /// If None, passes continue until one fails to lower the imbalance
    pub max_passes: Option<usize>,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            n_threads: num_cpus::get(), // Use all available cores
            rebalance: true,
            max_passes: None,
        }
    }
}

impl BalanceConfig {
    /// Default options for a fixed thread count
    pub fn with_threads(n_threads: usize) -> Self {
        Self {
            n_threads,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_available_cores() {
        let config = BalanceConfig::default();
        assert_eq!(config.n_threads, num_cpus::get());
        assert!(config.n_threads >= 1);
        assert!(config.rebalance);
        assert_eq!(config.max_passes, None);
    }

    #[test]
    fn test_with_threads() {
        let config = BalanceConfig::with_threads(3);
        assert_eq!(config.n_threads, 3);
        assert!(config.rebalance);
    }
}
