pub mod config;
pub mod decimal;
pub mod store;

pub use config::StoreConfig;
pub use store::SqliteLeadStore;
