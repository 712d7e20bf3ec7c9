// Library interface for testing

pub mod config;
pub mod constants;
pub mod scheduler;
pub mod serve;
pub mod store;

pub use config::Config;
pub use store::{Table, TableNotFound, TableStore};
