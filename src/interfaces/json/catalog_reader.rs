use crate::domain::catalog::CatalogFixture;
use crate::error::Result;
use std::io::Read;

/// Loads the reference data orders are resolved against.
pub struct CatalogReader<R: Read> {
    source: R,
}

impl<R: Read> CatalogReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn catalog(self) -> Result<CatalogFixture> {
        let catalog: CatalogFixture = serde_json::from_reader(self.source)?;
        tracing::debug!(
            channels = catalog.channels.len(),
            variants = catalog.variants.len(),
            users = catalog.users.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}
