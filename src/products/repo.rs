use sqlx::PgPool;
use uuid::Uuid;

use crate::products::repo_types::{NewProduct, Product, ProductPatch};

impl Product {
    /// Full catalog in insertion order.
    pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, user_id, name, description, price, category, rating, image, created_at
            FROM products
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(db)
        .await
    }

    /// Products owned by one user, insertion order.
    pub async fn list_by_owner(db: &PgPool, user_id: Uuid) -> sqlx::Result<Vec<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, user_id, name, description, price, category, rating, image, created_at
            FROM products
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT id, user_id, name, description, price, category, rating, image, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn insert(db: &PgPool, owner_id: Uuid, new: &NewProduct) -> sqlx::Result<Product> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (user_id, name, description, price, category, rating, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, name, description, price, category, rating, image, created_at
            "#,
        )
        .bind(owner_id)
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price)
        .bind(&new.category)
        .bind(new.rating)
        .bind(&new.image)
        .fetch_one(db)
        .await
    }

    /// Partial merge: unsupplied fields keep their stored values. Returns
    /// `None` when the row no longer exists.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        patch: &ProductPatch,
    ) -> sqlx::Result<Option<Product>> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                category = COALESCE($5, category),
                rating = COALESCE($6, rating),
                image = COALESCE($7, image)
            WHERE id = $1
            RETURNING id, user_id, name, description, price, category, rating, image, created_at
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(patch.price)
        .bind(&patch.category)
        .bind(patch.rating)
        .bind(&patch.image)
        .fetch_optional(db)
        .await
    }

    /// Permanent delete; no soft-delete.
    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<()> {
        sqlx::query(r#"DELETE FROM products WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
