//! Backend entry-point: loads settings, picks storage and serves the API.

mod server;

use std::path::Path;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use tripboard::inbound::http::health::HealthState;
use tripboard::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use tripboard::settings::AppSettings;

/// `Key::derive_from` panics below this length.
const MIN_SESSION_KEY_BYTES: usize = 32;

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let key = load_session_key(&settings.session_key_file(), settings.session_allow_ephemeral)?;
    let bind_addr = settings.bind_addr()?;

    let mut config = ServerConfig::new(key, settings.cookie_secure(), SameSite::Lax, bind_addr)
        .with_page_limits(settings.page_limits()?);
    if let Some(database_url) = settings.database_url.as_deref() {
        run_migrations(database_url)
            .await
            .wrap_err("failed to apply database migrations")?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
        )
        .await
        .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "tripboard listening");
    server.await?;
    Ok(())
}

fn load_session_key(path: &Path, allow_ephemeral: bool) -> Result<Key> {
    match std::fs::read(path) {
        Ok(bytes) if bytes.len() >= MIN_SESSION_KEY_BYTES => Ok(Key::derive_from(&bytes)),
        Ok(bytes) => Err(eyre!(
            "session key at {} holds {} bytes; at least {MIN_SESSION_KEY_BYTES} are required",
            path.display(),
            bytes.len()
        )),
        Err(e) if cfg!(debug_assertions) || allow_ephemeral => {
            warn!(path = %path.display(), error = %e, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(e) => Err(eyre!(
            "failed to read session key at {}: {e}",
            path.display()
        )),
    }
}
