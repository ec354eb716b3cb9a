use sqlx::PgPool;
use uuid::Uuid;

use catalog::application::pagination::PageRequest;
use catalog::application::query::{ProductFilter, ProductQuery};
use catalog::application::repos::{
    CreateProductParams, ProductsRepo, ProductsWriteRepo, RepoError, StoreHealth,
    UpdateProductParams,
};
use catalog::domain::types::{ProductCategory, SortDirection, SortField};
use catalog::infra::db::PostgresRepositories;

fn params(name: &str, price: f64, category: ProductCategory) -> CreateProductParams {
    CreateProductParams {
        name: name.to_string(),
        description: format!("{name} description"),
        price,
        category,
    }
}

async fn seed(repos: &PostgresRepositories) {
    for (name, price, category) in [
        ("Rust in Action", 10.0, ProductCategory::Books),
        ("Programming Rust", 15.0, ProductCategory::Books),
        ("Zero To Production", 20.0, ProductCategory::Books),
        ("Apple", 5.0, ProductCategory::Food),
    ] {
        repos
            .create_product(params(name, price, category))
            .await
            .expect("seed product");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn filtered_sorted_page_and_count(pool: PgPool) {
    let repos = PostgresRepositories::new(pool);
    seed(&repos).await;

    let query = ProductQuery::builder()
        .category(Some("BOOKS"))
        .sort_field(Some(SortField::Price))
        .sort_direction(Some(SortDirection::Desc))
        .page(PageRequest::new(0, 2).expect("page"))
        .build();

    let records = repos.find_products(&query).await.expect("find");
    let prices: Vec<f64> = records.iter().map(|record| record.price).collect();
    assert_eq!(prices, vec![20.0, 15.0]);

    let total = repos.count_products(query.filter()).await.expect("count");
    assert_eq!(total, 3);

    let everything = repos
        .count_products(&ProductFilter::all())
        .await
        .expect("count all");
    assert_eq!(everything, 4);

    let second = ProductQuery::builder()
        .category(Some("BOOKS"))
        .sort_field(Some(SortField::Price))
        .sort_direction(Some(SortDirection::Desc))
        .page(PageRequest::new(1, 2).expect("page"))
        .build();
    let tail = repos.find_products(&second).await.expect("tail");
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].price, 10.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn unknown_category_matches_nothing(pool: PgPool) {
    let repos = PostgresRepositories::new(pool);
    seed(&repos).await;

    let filter = ProductFilter::by_category(Some("INVALID_CATEGORY"));
    assert_eq!(repos.count_products(&filter).await.expect("count"), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn search_is_case_insensitive_and_escapes_wildcards(pool: PgPool) {
    let repos = PostgresRepositories::new(pool);
    seed(&repos).await;
    repos
        .create_product(params("100% Cotton Shirt", 25.0, ProductCategory::Clothing))
        .await
        .expect("create");

    let page = PageRequest::new(0, 10).expect("page");
    let found = repos.search_products("RUST", page).await.expect("search");
    assert_eq!(found.len(), 2);
    assert_eq!(repos.count_search("rust").await.expect("count"), 2);

    assert_eq!(repos.count_search("%").await.expect("percent"), 1);
    assert_eq!(repos.count_search("_").await.expect("underscore"), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn writes_enforce_unique_names_and_report_missing_rows(pool: PgPool) {
    let repos = PostgresRepositories::new(pool);
    seed(&repos).await;

    assert!(repos.exists_by_name("Apple").await.expect("exists"));
    let duplicate = repos
        .create_product(params("Apple", 3.0, ProductCategory::Food))
        .await
        .expect_err("duplicate name");
    assert!(matches!(duplicate, RepoError::Duplicate { .. }));

    let missing = repos
        .update_product(UpdateProductParams {
            id: Uuid::new_v4(),
            name: "Ghost".into(),
            description: "missing".into(),
            price: 1.0,
            category: ProductCategory::Home,
        })
        .await
        .expect_err("missing row");
    assert!(matches!(missing, RepoError::NotFound));

    assert!(matches!(
        repos.delete_product(Uuid::new_v4()).await,
        Err(RepoError::NotFound)
    ));
}

#[sqlx::test(migrations = "./migrations")]
async fn update_replaces_fields_and_delete_removes_row(pool: PgPool) {
    let repos = PostgresRepositories::new(pool);
    let created = repos
        .create_product(params("Desk Lamp", 30.0, ProductCategory::Home))
        .await
        .expect("create");

    let updated = repos
        .update_product(UpdateProductParams {
            id: created.id,
            name: "Desk Lamp Pro".into(),
            description: "Brighter".into(),
            price: 45.0,
            category: ProductCategory::Premium,
        })
        .await
        .expect("update");
    assert_eq!(updated.name, "Desk Lamp Pro");
    assert_eq!(updated.category, "PREMIUM");
    assert!(updated.updated_at >= created.updated_at);

    repos.delete_product(created.id).await.expect("delete");
    assert!(repos.find_by_id(created.id).await.expect("find").is_none());
    repos.ping().await.expect("store reachable");
}
