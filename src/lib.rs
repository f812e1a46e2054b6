pub mod config;
pub mod core;
pub mod domain;
pub mod shell;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::RosterConfig;

pub use crate::core::{QueryEngine, RosterCounts, RosterStore, SearchField, SortKey};
pub use domain::model::{Address, ScoreUpdate, ScoreWarning, StudentKind, StudentRecord, Variant};
pub use domain::ports::ConfigProvider;
pub use shell::InteractionShell;
pub use utils::error::{Rejection, Result, RosterError};
