pub mod repository;

pub use repository::{LeadSubmitter, SubmitterError};
