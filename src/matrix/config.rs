//! Configuration and system parameters for ring matrix jobs

/// System parameters for performance tuning
#[derive(Debug, Clone)]
pub struct SystemParameters {
    /// Number of threads to use
    pub n_threads: usize,
}

impl Default for SystemParameters {
    fn default() -> Self {
        Self {
            n_threads: num_cpus::get(), // Use all available cores
        }
    }
}

/// Configuration for running jobs against ring matrices
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// System parameters for performance tuning
    pub system_params: SystemParameters,

    /// Minimum number of populated rows in the left operand before
    /// multiplication is spread over the thread pool
    pub parallel_threshold: usize,

    /// Field delimiter of the job format
    pub delimiter: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            system_params: SystemParameters::default(),
            parallel_threshold: 64,
            delimiter: b',',
        }
    }
}

impl EngineConfig {
    /// Overrides the number of worker threads (at least one)
    pub fn with_threads(mut self, n_threads: usize) -> Self {
        self.system_params.n_threads = n_threads.max(1);
        self
    }

    /// Overrides the populated-row count that enables parallel multiplication
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Overrides the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}
