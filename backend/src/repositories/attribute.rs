//! Ingredient and tag repository
//!
//! Ingredients and tags are stored in identically shaped tables, each with a
//! join table linking it to recipes. One generic repository serves both,
//! parameterised by a [`RecipeAttribute`] marker type.

use super::scope::Owner;
use anyhow::Result;
use sqlx::{PgConnection, PgPool};
use std::marker::PhantomData;
use uuid::Uuid;

/// Table layout of a recipe attribute
pub trait RecipeAttribute: Send + Sync + 'static {
    /// Attribute table, e.g. `ingredients`
    const TABLE: &'static str;
    /// Join table linking recipes to this attribute
    const LINK_TABLE: &'static str;
    /// Column in the join table referencing this attribute
    const LINK_COLUMN: &'static str;
    /// Human readable name used in error messages and logs
    const LABEL: &'static str;
}

/// Marker for the `ingredients` table
pub struct Ingredients;

impl RecipeAttribute for Ingredients {
    const TABLE: &'static str = "ingredients";
    const LINK_TABLE: &'static str = "recipe_ingredients";
    const LINK_COLUMN: &'static str = "ingredient_id";
    const LABEL: &'static str = "Ingredient";
}

/// Marker for the `tags` table
pub struct Tags;

impl RecipeAttribute for Tags {
    const TABLE: &'static str = "tags";
    const LINK_TABLE: &'static str = "recipe_tags";
    const LINK_COLUMN: &'static str = "tag_id";
    const LABEL: &'static str = "Tag";
}

/// Ingredient or tag record from database
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AttributeRecord {
    pub id: i64,
    pub user_id: Uuid,
    pub name: String,
}

/// Attribute together with the recipe it is attached to
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LinkedAttributeRecord {
    pub recipe_id: i64,
    pub id: i64,
    pub name: String,
}

/// Repository for one kind of recipe attribute
pub struct AttributeRepository<A>(PhantomData<A>);

pub type IngredientRepository = AttributeRepository<Ingredients>;
pub type TagRepository = AttributeRepository<Tags>;

impl<A: RecipeAttribute> AttributeRepository<A> {
    /// List the owner's attributes, name descending
    ///
    /// With `assigned_only` the list is restricted to attributes linked to at
    /// least one of the owner's recipes. The restriction is an `EXISTS`
    /// semi-join so an attribute on several recipes still appears once.
    pub async fn list(pool: &PgPool, owner: Owner, assigned_only: bool) -> Result<Vec<AttributeRecord>> {
        let sql = format!(
            r#"
            SELECT a.id, a.user_id, a.name
            FROM {table} a
            WHERE a.user_id = $1
              AND (
                NOT $2
                OR EXISTS (
                    SELECT 1
                    FROM {link} l
                    JOIN recipes r ON r.id = l.recipe_id
                    WHERE l.{column} = a.id AND r.user_id = $1
                )
              )
            ORDER BY a.name DESC, a.id DESC
            "#,
            table = A::TABLE,
            link = A::LINK_TABLE,
            column = A::LINK_COLUMN,
        );

        let records = sqlx::query_as::<_, AttributeRecord>(&sql)
            .bind(owner.id())
            .bind(assigned_only)
            .fetch_all(pool)
            .await?;

        Ok(records)
    }

    /// Find one of the owner's attributes by id
    pub async fn find(pool: &PgPool, owner: Owner, id: i64) -> Result<Option<AttributeRecord>> {
        let sql = format!(
            "SELECT id, user_id, name FROM {} WHERE id = $1 AND user_id = $2",
            A::TABLE
        );

        let record = sqlx::query_as::<_, AttributeRecord>(&sql)
            .bind(id)
            .bind(owner.id())
            .fetch_optional(pool)
            .await?;

        Ok(record)
    }

    /// Insert a new attribute for the owner
    pub async fn create(pool: &PgPool, owner: Owner, name: &str) -> Result<AttributeRecord> {
        let sql = format!(
            "INSERT INTO {} (user_id, name) VALUES ($1, $2) RETURNING id, user_id, name",
            A::TABLE
        );

        let record = sqlx::query_as::<_, AttributeRecord>(&sql)
            .bind(owner.id())
            .bind(name)
            .fetch_one(pool)
            .await?;

        Ok(record)
    }

    /// Rename one of the owner's attributes
    ///
    /// Returns `None` when the id does not exist or belongs to someone else.
    pub async fn update_name(
        pool: &PgPool,
        owner: Owner,
        id: i64,
        name: &str,
    ) -> Result<Option<AttributeRecord>> {
        let sql = format!(
            r#"
            UPDATE {} SET name = $3
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name
            "#,
            A::TABLE
        );

        let record = sqlx::query_as::<_, AttributeRecord>(&sql)
            .bind(id)
            .bind(owner.id())
            .bind(name)
            .fetch_optional(pool)
            .await?;

        Ok(record)
    }

    /// Delete one of the owner's attributes, detaching it from any recipe
    pub async fn delete(pool: &PgPool, owner: Owner, id: i64) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1 AND user_id = $2", A::TABLE);

        let result = sqlx::query(&sql)
            .bind(id)
            .bind(owner.id())
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Return the owner's attribute with this exact name, creating it if missing
    pub async fn get_or_create(conn: &mut PgConnection, owner: Owner, name: &str) -> Result<AttributeRecord> {
        let sql = format!(
            r#"
            WITH existing AS (
                SELECT id, user_id, name FROM {table}
                WHERE user_id = $1 AND name = $2
                ORDER BY id
                LIMIT 1
            ),
            inserted AS (
                INSERT INTO {table} (user_id, name)
                SELECT $1, $2
                WHERE NOT EXISTS (SELECT 1 FROM existing)
                RETURNING id, user_id, name
            )
            SELECT id, user_id, name FROM existing
            UNION ALL
            SELECT id, user_id, name FROM inserted
            "#,
            table = A::TABLE,
        );

        let record = sqlx::query_as::<_, AttributeRecord>(&sql)
            .bind(owner.id())
            .bind(name)
            .fetch_one(&mut *conn)
            .await?;

        Ok(record)
    }

    /// Replace the set of attributes linked to a recipe
    ///
    /// The caller must have checked that the recipe and the attributes belong
    /// to the same owner.
    pub async fn set_for_recipe(conn: &mut PgConnection, recipe_id: i64, ids: &[i64]) -> Result<()> {
        let clear = format!("DELETE FROM {} WHERE recipe_id = $1", A::LINK_TABLE);
        sqlx::query(&clear)
            .bind(recipe_id)
            .execute(&mut *conn)
            .await?;

        if ids.is_empty() {
            return Ok(());
        }

        let insert = format!(
            r#"
            INSERT INTO {link} (recipe_id, {column})
            SELECT $1, UNNEST($2::bigint[])
            ON CONFLICT DO NOTHING
            "#,
            link = A::LINK_TABLE,
            column = A::LINK_COLUMN,
        );
        sqlx::query(&insert)
            .bind(recipe_id)
            .bind(ids)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    /// Load the owner's attributes linked to any of the given recipes
    pub async fn for_recipes(
        pool: &PgPool,
        owner: Owner,
        recipe_ids: &[i64],
    ) -> Result<Vec<LinkedAttributeRecord>> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            r#"
            SELECT l.recipe_id, a.id, a.name
            FROM {link} l
            JOIN {table} a ON a.id = l.{column}
            WHERE l.recipe_id = ANY($1) AND a.user_id = $2
            ORDER BY l.recipe_id, a.id
            "#,
            table = A::TABLE,
            link = A::LINK_TABLE,
            column = A::LINK_COLUMN,
        );

        let records = sqlx::query_as::<_, LinkedAttributeRecord>(&sql)
            .bind(recipe_ids)
            .bind(owner.id())
            .fetch_all(pool)
            .await?;

        Ok(records)
    }
}
