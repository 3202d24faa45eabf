pub mod commands;
pub mod config;

pub use commands::{ContentSummary, SummaryRenderer};
pub use config::{CliConfig, EncodeConfig, CONFIG_ENV};
