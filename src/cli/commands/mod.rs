pub mod config;
pub mod correct;
pub mod init;
pub mod list;
pub mod lock;
pub mod log;
pub mod punch;
pub mod review;
pub mod roster;
pub mod summary;
pub mod validate;
