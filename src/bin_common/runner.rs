//! Binary runner utilities
//!
//! Provides a standardized way to run long-lived binaries with
//! start and stop banners.

use std::time::Duration;
use tracing::info;

/// Configuration for running a binary application
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Name of the binary (for logging)
    pub name: String,
    /// Interval between remote sync cycles
    pub sync_interval: Duration,
}

impl RunConfig {
    /// Create a new run configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sync_interval: Duration::from_secs(30),
        }
    }

    /// Set sync interval
    pub fn with_sync_interval(mut self, interval: Duration) -> Self {
        self.sync_interval = interval;
        self
    }
}

/// Trait for long-running binary applications
pub trait BinaryRunner {
    /// Run the application main loop
    async fn run(&mut self) -> anyhow::Result<()>;

    /// Get the run configuration
    fn config(&self) -> &RunConfig;

    /// Closing line for the shutdown banner
    fn summary(&self) -> Option<String> {
        None
    }

    /// Print startup banner
    fn print_banner(&self) {
        let config = self.config();
        info!("========================================");
        info!("Starting {}", config.name);
        info!("Sync interval: {:?}", config.sync_interval);
        info!("Press Ctrl+C to stop");
        info!("========================================");
    }

    /// Print shutdown banner
    fn print_shutdown(&self, stats: Option<&str>) {
        let config = self.config();
        info!("========================================");
        info!("{} stopped gracefully", config.name);
        if let Some(stats) = stats {
            info!("{}", stats);
        }
        info!("========================================");
    }

    /// Execute the binary with banners around the main loop
    async fn execute(&mut self) -> anyhow::Result<()> {
        self.print_banner();
        let result = self.run().await;
        self.print_shutdown(self.summary().as_deref());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_config_builder() {
        let config = RunConfig::new("test-binary")
            .with_sync_interval(Duration::from_secs(10));

        assert_eq!(config.name, "test-binary");
        assert_eq!(config.sync_interval, Duration::from_secs(10));
    }

    #[test]
    fn test_default_config() {
        let config = RunConfig::new("default");
        assert_eq!(config.sync_interval, Duration::from_secs(30));
    }

    struct CountingRunner {
        config: RunConfig,
        runs: usize,
    }

    impl BinaryRunner for CountingRunner {
        async fn run(&mut self) -> anyhow::Result<()> {
            self.runs += 1;
            Ok(())
        }

        fn config(&self) -> &RunConfig {
            &self.config
        }

        fn summary(&self) -> Option<String> {
            Some(format!("{} runs", self.runs))
        }
    }

    #[tokio::test]
    async fn test_execute_runs_once_and_summarizes() {
        let mut runner = CountingRunner {
            config: RunConfig::new("counting"),
            runs: 0,
        };

        runner.execute().await.unwrap();

        assert_eq!(runner.runs, 1);
        assert_eq!(runner.summary().as_deref(), Some("1 runs"));
    }
}
