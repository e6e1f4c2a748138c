pub mod anonymize;
pub mod attribution;
pub mod error;
pub mod pipeline;
pub mod results;
pub mod schema;
pub mod turns;

pub use error::NormalizeError;
pub use pipeline::{normalize_match, MatchOutcome, MatchTables, RawResultTable};
pub use schema::{LogRecord, PlayerOrder, SummaryRecord};
