use std::path::Path;
use std::sync::Arc;

use kiosk_core::{CacheStore, Error, Result};

pub mod backends;

pub use backends::*;

/// Resolve a cache store backend by its CLI name.
pub fn create_store(kind: &str, path: Option<&Path>) -> Result<Arc<dyn CacheStore>> {
    match kind {
        "memory" => Ok(Arc::new(MemoryCacheStore::new())),
        "file" => {
            let path = path
                .ok_or_else(|| Error::Storage("file store requires a path".to_string()))?;
            Ok(Arc::new(FileCacheStore::new(path)?))
        }
        other => Err(Error::Storage(format!("Unknown store backend: {}", other))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use kiosk_core::{CacheEntry, CacheStore};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_store_by_name() {
        assert!(create_store("memory", None).is_ok());
        assert!(create_store("file", None).is_err());
        assert!(create_store("redis", None).is_err());
    }
}
