use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};

use dossier::api;
use dossier::config;
use dossier::db::mongo::MongoStore;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dossier=info".parse()?),
        )
        .init();

    let cfg = config::load()?;

    let store = Arc::new(MongoStore::new(&cfg.mongo_uri));

    // Connect in the background. The listener comes up either way; requests
    // fail individually until the database is reachable.
    let connector = store.clone();
    tokio::spawn(async move {
        match connector.init().await {
            Ok(()) => info!("MongoDB connected"),
            Err(err) => error!("DB error: {err}"),
        }
    });

    api::serve(cfg, store).await
}
