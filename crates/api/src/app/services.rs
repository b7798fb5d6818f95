//! Infrastructure wiring for the HTTP app.

use std::sync::Arc;

use teller_infra::{InMemoryCardDirectory, InMemoryLedgerStore, LedgerConfig, LedgerService};

/// Everything the handlers need, behind `Arc` so tests can keep handles to
/// the store and card directory for seeding.
pub struct AppServices {
    pub ledger: LedgerService<Arc<InMemoryLedgerStore>, Arc<InMemoryCardDirectory>>,
    pub store: Arc<InMemoryLedgerStore>,
    pub cards: Arc<InMemoryCardDirectory>,
}

/// In-memory wiring (dev/test). A persistent backend slots in by swapping the
/// store/directory implementations; the service is generic over both.
pub fn build_services() -> AppServices {
    build_services_with_config(LedgerConfig::default())
}

pub fn build_services_with_config(config: LedgerConfig) -> AppServices {
    let store = Arc::new(InMemoryLedgerStore::new());
    let cards = Arc::new(InMemoryCardDirectory::new());
    let ledger = LedgerService::with_config(Arc::clone(&store), Arc::clone(&cards), config);

    AppServices {
        ledger,
        store,
        cards,
    }
}
