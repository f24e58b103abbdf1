//! String demo against the configured key-value store.
//!
//! Sets `name`, expires it in ten seconds and prints the value read back.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_aside::{demo::run_string_demo, store, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_aside=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let (store, cleanup_handle) = store::open(&config)
        .await
        .context("failed to open key-value store")?;

    let name = run_string_demo(store.as_ref()).await?;
    match name {
        Some(name) => println!("{}", name),
        None => println!("(nil)"),
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
    }
    Ok(())
}
