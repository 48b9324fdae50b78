use log::{debug, info, warn};
use std::sync::Arc;

use crate::providers::UpstreamProvider;

use super::catalog_errors::Result;
use super::catalog_model::{NewSymbol, Symbol};
use super::catalog_repository::SymbolRepository;

/// Outcome of a bootstrap attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Catalog was populated by this call
    Bootstrapped(usize),
    /// A previous call already populated the catalog
    AlreadyBootstrapped,
    /// Upstream was unavailable or returned nothing usable; will retry on next startup
    Skipped,
}

/// Service for reading and bootstrapping the symbol catalog
pub struct CatalogService {
    repository: SymbolRepository,
    provider: Arc<dyn UpstreamProvider>,
    target_category: String,
}

impl CatalogService {
    pub fn new(
        repository: SymbolRepository,
        provider: Arc<dyn UpstreamProvider>,
        target_category: String,
    ) -> Self {
        Self {
            repository,
            provider,
            target_category,
        }
    }

    /// Lists all catalog symbols
    pub fn get_symbols(&self) -> Result<Vec<Symbol>> {
        self.repository.list()
    }

    /// Retrieves a symbol by its identifier
    pub fn get_symbol(&self, symbol: &str) -> Result<Symbol> {
        self.repository.get_by_symbol(symbol)
    }

    /// Populates the catalog from upstream, at most once per store lifetime.
    ///
    /// Upstream failure is not fatal: the marker stays unwritten, the catalog
    /// stays empty, and a later startup retries.
    pub async fn bootstrap(&self) -> Result<BootstrapOutcome> {
        if self.repository.is_bootstrapped()? {
            debug!("Symbol catalog already bootstrapped, skipping");
            return Ok(BootstrapOutcome::AlreadyBootstrapped);
        }

        let upstream_rows = match self.provider.fetch_symbols().await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Catalog bootstrap skipped, upstream unavailable: {}", e);
                return Ok(BootstrapOutcome::Skipped);
            }
        };

        if upstream_rows.is_empty() {
            warn!("Catalog bootstrap skipped, upstream returned no symbols");
            return Ok(BootstrapOutcome::Skipped);
        }

        // Malformed rows are dropped one by one, never the whole batch
        let candidates: Vec<NewSymbol> = upstream_rows
            .into_iter()
            .map(NewSymbol::from)
            .filter(|s| s.category == self.target_category)
            .filter(|s| match s.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!("Rejecting malformed upstream symbol row: {}", e);
                    false
                }
            })
            .collect();

        if candidates.is_empty() {
            warn!(
                "Catalog bootstrap skipped, no valid '{}' symbols in upstream payload",
                self.target_category
            );
            return Ok(BootstrapOutcome::Skipped);
        }

        match self.repository.claim_and_insert(&candidates)? {
            Some(inserted) => {
                info!(
                    "Bootstrapped symbol catalog with {} '{}' symbols",
                    inserted, self.target_category
                );
                Ok(BootstrapOutcome::Bootstrapped(inserted))
            }
            None => {
                debug!("Another worker bootstrapped the catalog first");
                Ok(BootstrapOutcome::AlreadyBootstrapped)
            }
        }
    }
}
