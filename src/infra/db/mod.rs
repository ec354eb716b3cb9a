//! Postgres-backed repository implementations.

mod products;
mod util;

pub use util::map_sqlx_error;

use std::sync::Arc;

use sqlx::{
    Postgres, QueryBuilder,
    postgres::{PgPool, PgPoolOptions},
    query,
};

use crate::application::query::ProductFilter;
use crate::application::repos::RepoError;

#[derive(Clone)]
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
    }

    pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        query("SELECT 1").execute(self.pool()).await.map(|_| ())
    }

    /// Category constraint shared by the page fetch and the count query.
    fn push_filter<'q>(qb: &mut QueryBuilder<'q, Postgres>, filter: &'q ProductFilter) {
        if let Some(category) = filter.category() {
            qb.push(" AND p.category = ");
            qb.push_bind(category);
        }
    }

    fn push_window<'q>(
        qb: &mut QueryBuilder<'q, Postgres>,
        limit: u64,
        offset: u64,
    ) -> Result<(), RepoError> {
        qb.push(" LIMIT ");
        qb.push_bind(Self::convert_bound(limit, "limit")?);
        qb.push(" OFFSET ");
        qb.push_bind(Self::convert_bound(offset, "offset")?);
        Ok(())
    }

    fn convert_bound(value: u64, name: &str) -> Result<i64, RepoError> {
        value.try_into().map_err(|_| RepoError::InvalidInput {
            message: format!("{name} exceeds supported range"),
        })
    }

    fn convert_count(value: i64) -> Result<u64, RepoError> {
        value
            .try_into()
            .map_err(|_| RepoError::from_persistence("count exceeds supported range"))
    }
}
