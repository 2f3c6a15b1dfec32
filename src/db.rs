use anyhow::Context;
use mongodb::{bson::doc, Client, Database};

use crate::config::MongoConfig;

/// Connect to the document store and make sure it answers before serving traffic.
pub async fn connect(cfg: &MongoConfig) -> anyhow::Result<Database> {
    let client = Client::with_uri_str(&cfg.uri)
        .await
        .context("connect to mongodb")?;
    let db = client.database(&cfg.database);

    db.run_command(doc! { "ping": 1 })
        .await
        .context("ping mongodb")?;
    tracing::info!(database = %cfg.database, "connected to mongodb");

    Ok(db)
}
