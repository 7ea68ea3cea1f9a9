// Application state module
// Everything handlers need, built once before the listener starts

use super::types::Config;
use crate::render::TemplateRegistry;
use crate::storage::PageStore;

/// Shared application state
///
/// Constructed once at startup and handed to handlers behind an `Arc`.
/// Nothing here is mutated after construction, so concurrent reads from
/// request tasks need no locking.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub store: PageStore,
    pub templates: TemplateRegistry,
}

impl AppState {
    pub fn new(config: Config, templates: TemplateRegistry) -> Self {
        let store = PageStore::new(&config.wiki.data_dir);
        Self {
            config,
            store,
            templates,
        }
    }
}
