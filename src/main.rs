#![forbid(unsafe_code)]

mod config;
mod router;

use std::{net::SocketAddr, sync::Arc};

use db::{clock::SystemClock, feed_cache::RedisFeedCache, pg::PgStore};
use diesel_async::pooled_connection::{deadpool::Pool, AsyncDieselConnectionManager};
use dotenvy::dotenv;
use listenfd::ListenFd;
use redis::aio::ConnectionManager;
use web::AppState;

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Could not listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let mut listenfd = ListenFd::from_env();

    let tcp_socket: Option<std::net::TcpListener> = match listenfd.take_tcp_listener(0) {
        Ok(socket) => socket,
        Err(_) => None,
    };

    let config = config::process_config()?;

    let manager = AsyncDieselConnectionManager::<diesel_async::AsyncPgConnection>::new(
        config.database.uri.clone(),
    );
    let db_pool = Pool::builder(manager).build()?;
    db::migrations::run_migrations(&db_pool).await?;
    log::info!("Connected to database");

    let redis_client = redis::Client::open(config.redis.uri.as_str())?;
    let redis = ConnectionManager::new(redis_client).await?;
    log::info!("Connected to redis");

    let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
    let state = Arc::new(AppState {
        store: Arc::new(PgStore::new(db_pool.clone())),
        feed_cache: Arc::new(RedisFeedCache::new(redis)),
        clock: Arc::new(SystemClock),
        config,
    });

    let app = router::app(state);

    let server = match tcp_socket {
        // cargo-watch thing
        Some(listener) => axum::Server::from_tcp(listener)?,
        None => axum::Server::try_bind(&addr)?,
    };
    log::info!("Listening on {}", addr);

    server
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close();
    log::info!("Disconnected from database");

    Ok(())
}
