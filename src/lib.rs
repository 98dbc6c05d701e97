pub mod config;
pub mod model;
pub mod seed;
pub mod slug;
pub mod store;

// Export all model types
pub use model::*;

// Export seed module
pub use seed::*;

// Export store types
pub use store::{Fixtures, MemoryStore, Store, StoreError};

/// Build a fresh store from the configured fixtures and seed it unless
/// seeding is disabled.
pub fn build_store(config: &config::AppConfig) -> anyhow::Result<MemoryStore> {
    use anyhow::Context;

    let fixtures = Fixtures::load(config.fixtures.dir.as_deref())?;
    let store = MemoryStore::new();
    store
        .load_fixtures(&fixtures)
        .context("Failed to load fixtures")?;
    log::info!(
        "Loaded {} workspaces, {} users, {} databases from fixtures",
        fixtures.workspaces.len(),
        fixtures.users.len(),
        fixtures.databases.len()
    );

    if config.seed.enabled {
        seed::load_seed_data_with(&store, &config.seed, &mut rand::thread_rng())?;
    }

    Ok(store)
}

/// Serialize the store contents the way the frontend dev server reads them
pub fn render_snapshot(store: &MemoryStore, pretty: bool) -> anyhow::Result<String> {
    let snapshot = store.snapshot();
    let rendered = if pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    Ok(rendered)
}
