pub mod calculations;
pub mod db;
pub mod format;
pub mod models;
pub mod wizard;

pub use db::repository::{LeadSubmitter, SubmitterError};
pub use models::*;
