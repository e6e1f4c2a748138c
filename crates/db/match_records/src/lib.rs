pub mod core;

pub use crate::core::error::StoreError;
pub use crate::core::model::*;
pub use crate::core::repository::MatchRecordsRepository;
