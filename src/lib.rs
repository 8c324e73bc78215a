pub mod config;
pub mod git;
pub mod initializer;
pub mod layout;
pub mod naming;
pub mod prompt;
pub mod report;
pub mod variant;

// Re-export commonly used types
pub use config::InitConfig;
pub use initializer::{InitArgs, InitOptions, RunSummary};
pub use variant::Variant;
