//! Quote Generator - Main Library
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for the binary (config path, runner)
//! - **quote_store**: Quote collection, storage and remote sync (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust
//! use quote_generator::bin_common::{load_config_from_env, ConfigType};
//! use quote_generator::quote_store::QuoteStore;
//! ```

// Re-export workspace libraries for convenience
pub use quote_store;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;
    pub mod runner;

    pub use cli::{load_config_from_env, parse_args, Command, ConfigType};
    pub use runner::{BinaryRunner, RunConfig};
}
