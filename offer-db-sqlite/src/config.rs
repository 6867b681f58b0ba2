/// Where finished comparisons are recorded.
///
/// | `database_url` example | Meaning |
/// |------------------------|---------|
/// | `offers.db`            | file path, created if missing |
/// | `sqlite:offers.db`     | sqlx URL |
/// | `:memory:`             | throwaway in-memory store |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_url: String,
    /// Apply the embedded migrations when the store is opened.
    pub migrate: bool,
}

impl StoreConfig {
    /// A store at `database_url` that is migrated on open.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            migrate: true,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:")
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(":memory:")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_migrated_memory_store() {
        let config = StoreConfig::default();

        assert!(config.is_in_memory());
        assert!(config.migrate);
    }

    #[test]
    fn file_path_is_not_in_memory() {
        assert!(!StoreConfig::new("offers.db").is_in_memory());
        assert!(StoreConfig::new("sqlite::memory:").is_in_memory());
    }
}
