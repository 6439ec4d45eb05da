//! Recipe repository for database operations

use super::scope::Owner;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Recipe record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecipeRecord {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub link: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a recipe
#[derive(Debug, Clone)]
pub struct CreateRecipe {
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub link: String,
    pub description: String,
}

/// Input for updating a recipe, `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateRecipe {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub link: Option<String>,
    pub description: Option<String>,
}

/// Recipe list filters; an empty list means "no filter"
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub tag_ids: Vec<i64>,
    pub ingredient_ids: Vec<i64>,
}

const RECIPE_COLUMNS: &str =
    "id, user_id, title, time_minutes, price, link, description, created_at, updated_at";

/// Recipe repository
pub struct RecipeRepository;

impl RecipeRepository {
    /// List the owner's recipes, newest first
    ///
    /// Each filter keeps recipes linked to at least one of the given ids.
    pub async fn list(pool: &PgPool, owner: Owner, filter: &RecipeFilter) -> Result<Vec<RecipeRecord>> {
        let sql = format!(
            r#"
            SELECT {RECIPE_COLUMNS}
            FROM recipes r
            WHERE r.user_id = $1
              AND (
                cardinality($2::bigint[]) = 0
                OR EXISTS (
                    SELECT 1 FROM recipe_tags rt
                    WHERE rt.recipe_id = r.id AND rt.tag_id = ANY($2)
                )
              )
              AND (
                cardinality($3::bigint[]) = 0
                OR EXISTS (
                    SELECT 1 FROM recipe_ingredients ri
                    WHERE ri.recipe_id = r.id AND ri.ingredient_id = ANY($3)
                )
              )
            ORDER BY r.id DESC
            "#
        );

        let recipes = sqlx::query_as::<_, RecipeRecord>(&sql)
            .bind(owner.id())
            .bind(&filter.tag_ids)
            .bind(&filter.ingredient_ids)
            .fetch_all(pool)
            .await?;

        Ok(recipes)
    }

    /// Find one of the owner's recipes
    pub async fn find(pool: &PgPool, owner: Owner, id: i64) -> Result<Option<RecipeRecord>> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1 AND user_id = $2");

        let recipe = sqlx::query_as::<_, RecipeRecord>(&sql)
            .bind(id)
            .bind(owner.id())
            .fetch_optional(pool)
            .await?;

        Ok(recipe)
    }

    /// Insert a recipe for the owner
    pub async fn create(conn: &mut PgConnection, owner: Owner, input: CreateRecipe) -> Result<RecipeRecord> {
        let sql = format!(
            r#"
            INSERT INTO recipes (user_id, title, time_minutes, price, link, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {RECIPE_COLUMNS}
            "#
        );

        let recipe = sqlx::query_as::<_, RecipeRecord>(&sql)
            .bind(owner.id())
            .bind(&input.title)
            .bind(input.time_minutes)
            .bind(input.price)
            .bind(&input.link)
            .bind(&input.description)
            .fetch_one(&mut *conn)
            .await?;

        Ok(recipe)
    }

    /// Update one of the owner's recipes
    pub async fn update(
        conn: &mut PgConnection,
        owner: Owner,
        id: i64,
        changes: UpdateRecipe,
    ) -> Result<Option<RecipeRecord>> {
        let sql = format!(
            r#"
            UPDATE recipes SET
                title = COALESCE($3, title),
                time_minutes = COALESCE($4, time_minutes),
                price = COALESCE($5, price),
                link = COALESCE($6, link),
                description = COALESCE($7, description),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {RECIPE_COLUMNS}
            "#
        );

        let recipe = sqlx::query_as::<_, RecipeRecord>(&sql)
            .bind(id)
            .bind(owner.id())
            .bind(changes.title)
            .bind(changes.time_minutes)
            .bind(changes.price)
            .bind(changes.link)
            .bind(changes.description)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(recipe)
    }

    /// Delete one of the owner's recipes
    pub async fn delete(pool: &PgPool, owner: Owner, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner.id())
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
