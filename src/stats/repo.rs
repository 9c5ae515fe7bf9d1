use sqlx::PgPool;

/// Row counts for the dashboard. Two independent queries, no caching; the
/// numbers always reflect current persisted state.
pub async fn count_users(db: &PgPool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM users"#)
        .fetch_one(db)
        .await
}

pub async fn count_products(db: &PgPool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM products"#)
        .fetch_one(db)
        .await
}
