use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::pagination::PageRequest,
    application::query::{ProductFilter, ProductQuery},
    application::repos::{
        CreateProductParams, ProductsRepo, ProductsWriteRepo, RepoError, StoreHealth,
        UpdateProductParams,
    },
    domain::entities::ProductRecord,
};

use super::{PostgresRepositories, map_sqlx_error, util::escape_like};

const PRODUCT_COLUMNS: &str =
    "p.id, p.name, p.description, p.price, p.category, p.created_at, p.updated_at";

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: String,
    price: f64,
    category: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<ProductRow> for ProductRecord {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            category: row.category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl PostgresRepositories {
    fn select_products<'q>() -> QueryBuilder<'q, Postgres> {
        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(PRODUCT_COLUMNS);
        qb.push(" FROM products p WHERE TRUE");
        qb
    }

    fn push_search<'q>(qb: &mut QueryBuilder<'q, Postgres>, keyword: &str) {
        qb.push(" AND p.name ILIKE ");
        qb.push_bind(format!("%{}%", escape_like(keyword)));
    }
}

#[async_trait]
impl ProductsRepo for PostgresRepositories {
    async fn find_products(&self, query: &ProductQuery) -> Result<Vec<ProductRecord>, RepoError> {
        let mut qb = Self::select_products();
        Self::push_filter(&mut qb, query.filter());

        match query.sort() {
            Some(sort) => {
                qb.push(" ORDER BY p.");
                qb.push(sort.field.attribute());
                qb.push(" ");
                qb.push(sort.direction.as_sql());
                qb.push(", p.id ");
                qb.push(sort.direction.as_sql());
            }
            None => {
                qb.push(" ORDER BY p.created_at, p.id");
            }
        }

        Self::push_window(&mut qb, query.limit(), query.skip())?;

        let rows = qb
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ProductRecord::from).collect())
    }

    async fn count_products(&self, filter: &ProductFilter) -> Result<u64, RepoError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM products p WHERE TRUE");
        Self::push_filter(&mut qb, filter);

        let count: i64 = qb
            .build_query_scalar::<i64>()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Self::convert_count(count)
    }

    async fn search_products(
        &self,
        keyword: &str,
        page: PageRequest,
    ) -> Result<Vec<ProductRecord>, RepoError> {
        let mut qb = Self::select_products();
        Self::push_search(&mut qb, keyword);
        qb.push(" ORDER BY p.created_at, p.id");
        Self::push_window(&mut qb, page.limit(), page.offset())?;

        let rows = qb
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ProductRecord::from).collect())
    }

    async fn count_search(&self, keyword: &str) -> Result<u64, RepoError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM products p WHERE TRUE");
        Self::push_search(&mut qb, keyword);

        let count: i64 = qb
            .build_query_scalar::<i64>()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Self::convert_count(count)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProductRecord>, RepoError> {
        let mut qb = Self::select_products();
        qb.push(" AND p.id = ");
        qb.push_bind(id);

        let row = qb
            .build_query_as::<ProductRow>()
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(ProductRecord::from))
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepoError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM products WHERE name = $1)")
            .bind(name)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl ProductsWriteRepo for PostgresRepositories {
    async fn create_product(
        &self,
        params: CreateProductParams,
    ) -> Result<ProductRecord, RepoError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products AS p (id, name, description, price, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING p.id, p.name, p.description, p.price, p.category, p.created_at, p.updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&params.name)
        .bind(&params.description)
        .bind(params.price)
        .bind(params.category.as_str())
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update_product(
        &self,
        params: UpdateProductParams,
    ) -> Result<ProductRecord, RepoError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products AS p
            SET name = $2, description = $3, price = $4, category = $5, updated_at = now()
            WHERE p.id = $1
            RETURNING p.id, p.name, p.description, p.price, p.category, p.created_at, p.updated_at
            "#,
        )
        .bind(params.id)
        .bind(&params.name)
        .bind(&params.description)
        .bind(params.price)
        .bind(params.category.as_str())
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        row.map(ProductRecord::from).ok_or(RepoError::NotFound)
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl StoreHealth for PostgresRepositories {
    async fn ping(&self) -> Result<(), RepoError> {
        self.health_check().await.map_err(map_sqlx_error)
    }
}
