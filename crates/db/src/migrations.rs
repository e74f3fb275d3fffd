use diesel_async::{pooled_connection::deadpool::Pool, AsyncPgConnection};
use lazy_static::lazy_static;

lazy_static! {
    static ref MIGRATIONS: diesel_async_migrations::EmbeddedMigrations =
        diesel_async_migrations::embed_migrations!();
}

/// Brings the schema (users, posts, follows, likes, comments) up to date.
pub async fn run_migrations(db_pool: &Pool<AsyncPgConnection>) -> anyhow::Result<()> {
    let mut conn = db_pool.get().await?;
    MIGRATIONS.run_pending_migrations(&mut conn).await?;
    log::info!("Database schema is up to date");
    Ok(())
}
