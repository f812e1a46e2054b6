pub mod query;
pub mod store;

pub use crate::core::query::{QueryEngine, SearchField, SortKey};
pub use crate::core::store::{RosterCounts, RosterStore};
pub use crate::domain::model::{Address, StudentKind, StudentRecord, Variant};
pub use crate::domain::ports::ConfigProvider;
pub use crate::utils::error::{Rejection, Result};
