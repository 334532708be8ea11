//! Server: reads settings from env, picks the store, mounts common and post routes.

use posts_api::{build_app, ensure_database_exists, AppState, MemoryPostStore, PgPostStore, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("posts_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;

    let state = match &settings.database_url {
        Some(database_url) => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(database_url)
                .await?;
            let store = PgPostStore::with_table(pool, &settings.posts_table);
            store.ensure_table().await?;
            tracing::info!(table = %settings.posts_table, "using postgres store");
            AppState::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; posts are kept in memory only");
            AppState::new(MemoryPostStore::new())
        }
    };

    let app = build_app(state, &settings.api_prefix, settings.body_limit_bytes);

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
