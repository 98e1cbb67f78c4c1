use std::sync::Arc;

use anyhow::Context;
use config::Config;
use model_metadata::ObjectMetadata;
use relate_entrypoint::RelateEntrypoint;

use crate::api::context::ApiContext;
use crate::service::google_client::GoogleAuthClient;
use crate::store::InMemoryFilterStore;

mod api;
mod config;
mod service;
mod store;

fn load_objects(config: &Config) -> anyhow::Result<Vec<ObjectMetadata>> {
    match &config.metadata_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("unable to read metadata file {path}"))?;
            serde_json::from_str(&raw)
                .context("metadata file should hold an array of object metadata items")
        }
        None => Ok(model_metadata::standard::standard_objects()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    RelateEntrypoint::default().init();

    // Parse our configuration from the environment.
    let config = Config::from_env().context("expected to be able to generate config")?;

    tracing::trace!("initialized config");

    let objects = load_objects(&config)?;
    tracing::trace!(count = objects.len(), "loaded object metadata");

    let store = InMemoryFilterStore::default();
    // one default view per object so the filter endpoints have trees to grow
    for object in &objects {
        store.seed_view(&format!("All {}", object.name_plural), object.id)?;
    }

    let google_client = GoogleAuthClient::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
        config.google_callback_url.clone(),
    );
    tracing::trace!("initialized google client");

    api::setup_and_serve(
        ApiContext {
            objects: Arc::new(objects),
            store: Arc::new(store),
            google_client: Arc::new(google_client),
            base_url: config.base_url.clone(),
            environment: config.environment,
        },
        config.port,
    )
    .await?;
    Ok(())
}
