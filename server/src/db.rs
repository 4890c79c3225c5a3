use anyhow::Context;
use bb8_postgres::PostgresConnectionManager;
use tokio_postgres::NoTls;

pub type Pool = bb8::Pool<PostgresConnectionManager<NoTls>>;
pub type Client<'a> = bb8::PooledConnection<'a, PostgresConnectionManager<NoTls>>;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

pub async fn pool(database_url: &str) -> anyhow::Result<Pool> {
    let config: tokio_postgres::Config = database_url
        .parse()
        .context("Invalid database URL")?;
    let mgr = PostgresConnectionManager::new(config, NoTls);
    let pool = bb8::Pool::builder().build(mgr).await?;
    Ok(pool)
}

pub async fn migrate(database_url: &str) -> anyhow::Result<()> {
    let mut conn = pool(database_url).await?.dedicated_connection().await?;

    log::info!("Running migrations");
    let report = embedded::migrations::runner()
        .run_async(&mut conn)
        .await?;
    for migration in report.applied_migrations() {
        log::info!("Applied {}", migration);
    }
    Ok(())
}

pub async fn reset(database_url: &str) -> anyhow::Result<()> {
    {
        let pool = pool(database_url).await?;
        let client = pool.get().await?;
        log::warn!("Dropping weather_records");
        client
            .batch_execute(
                "DROP TABLE IF EXISTS weather_records; \
                 DROP TABLE IF EXISTS refinery_schema_history;",
            )
            .await?;
    }
    migrate(database_url).await
}

pub async fn health(pool: &Pool) -> Result<(), bb8::RunError<tokio_postgres::Error>> {
    let client = pool.get().await?;
    client.simple_query("SELECT 1").await?;
    Ok(())
}
