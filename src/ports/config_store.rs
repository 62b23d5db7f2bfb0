use crate::domain::{AppError, StoredConfig};

/// Port for the durable record of prior deployment decisions.
pub trait ConfigStore {
    /// Load the stored configuration; an absent store yields an empty record.
    fn load(&self) -> Result<StoredConfig, AppError>;

    /// Replace the stored configuration in a single write.
    fn save(&self, config: &StoredConfig) -> Result<(), AppError>;
}
