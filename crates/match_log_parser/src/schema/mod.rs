pub mod log_record;
pub mod player_order;
pub mod summary_record;

pub use log_record::*;
pub use player_order::*;
pub use summary_record::*;
