//! Process-wide load-once catalog cache.
//!
//! The catalog is expensive to load and strictly read-only afterwards, so it
//! follows a load-once/read-many lifecycle: the first caller pays for the
//! load, everyone afterwards gets the same `Arc`. Per-request state (rating
//! matrix, latent model) is never cached here.

use crate::error::Result;
use crate::types::Catalog;
use std::path::Path;
use std::sync::{Arc, OnceLock};

static CATALOG: OnceLock<Arc<Catalog>> = OnceLock::new();

/// Get the process-wide catalog, loading it from `path` on first use.
///
/// Later calls ignore `path` and return the already-loaded catalog. A failed
/// load leaves the cache empty so the next caller can retry.
pub fn get_or_load(path: &Path) -> Result<Arc<Catalog>> {
    if let Some(catalog) = CATALOG.get() {
        return Ok(catalog.clone());
    }
    // Two threads racing here both load; one result wins the cache slot.
    let loaded = Arc::new(Catalog::load_from_csv(path)?);
    Ok(CATALOG.get_or_init(|| loaded).clone())
}
