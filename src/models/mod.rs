pub mod correction;
pub mod daily_record;
pub mod day_summary;
pub mod employee;
pub mod inconsistency;
pub mod location;
pub mod punch;
