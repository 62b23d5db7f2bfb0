use crate::domain::{AppError, StoredConfig};
use crate::ports::ConfigStore;

/// Load the stored configuration, `None` when nothing has been stored yet.
pub fn execute<S: ConfigStore + ?Sized>(store: &S) -> Result<Option<StoredConfig>, AppError> {
    let stored = store.load()?;
    Ok((stored != StoredConfig::default()).then_some(stored))
}
