use crate::models::{DbClient, DbProfessional, DbService};
use eyre::Result;
use sqlx::{Pool, Postgres};

// Registries are maintained elsewhere; this workspace only reads them.

pub async fn get_clients(pool: &Pool<Postgres>) -> Result<Vec<DbClient>> {
    let clients = sqlx::query_as::<_, DbClient>(
        r#"
        SELECT id, name, created_at
        FROM clients
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(clients)
}

pub async fn get_services(pool: &Pool<Postgres>) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, duration_minutes, created_at
        FROM services
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn get_professionals(pool: &Pool<Postgres>) -> Result<Vec<DbProfessional>> {
    let professionals = sqlx::query_as::<_, DbProfessional>(
        r#"
        SELECT id, name, active, created_at
        FROM professionals
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(professionals)
}
