//! Recipe service
//!
//! Handles recipe validation, nested tag/ingredient assignment and
//! assembling the wire representation from the recipe and join tables.

use crate::error::ApiError;
use crate::repositories::{
    AttributeRepository, CreateRecipe, Ingredients, LinkedAttributeRecord, Owner,
    RecipeAttribute, RecipeFilter, RecipeRecord, RecipeRepository, Tags, UpdateRecipe,
};
use recipe_shared::types::{
    AttributeInput, AttributeResponse, CreateRecipeRequest, RecipeDetailResponse,
    RecipeListQuery, RecipeResponse, UpdateRecipeRequest,
};
use recipe_shared::validation;
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;
use tracing::{debug, info};

/// Recipe service for business logic
pub struct RecipeService;

impl RecipeService {
    /// List the owner's recipes, applying tag/ingredient id filters
    pub async fn list(
        pool: &PgPool,
        owner: Owner,
        query: RecipeListQuery,
    ) -> Result<Vec<RecipeResponse>, ApiError> {
        let filter = Self::parse_filter(&query)?;

        let records = RecipeRepository::list(pool, owner, &filter)
            .await
            .map_err(ApiError::Internal)?;

        debug!(user_id = %owner, count = records.len(), "Listed recipes");

        let details = Self::assemble(pool, owner, records).await?;
        Ok(details.into_iter().map(|d| d.recipe).collect())
    }

    /// Get one of the owner's recipes with its description
    pub async fn get(pool: &PgPool, owner: Owner, id: i64) -> Result<RecipeDetailResponse, ApiError> {
        let record = RecipeRepository::find(pool, owner, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(Self::not_found)?;

        Self::assemble_one(pool, owner, record).await
    }

    /// Create a recipe, get-or-creating its tags and ingredients by name
    pub async fn create(
        pool: &PgPool,
        owner: Owner,
        req: CreateRecipeRequest,
    ) -> Result<RecipeDetailResponse, ApiError> {
        let title = req.title.trim().to_string();
        validation::validate_title(&title).map_err(ApiError::Validation)?;
        validation::validate_time_minutes(req.time_minutes).map_err(ApiError::Validation)?;
        validation::validate_price(req.price).map_err(ApiError::Validation)?;
        validation::validate_link(&req.link).map_err(ApiError::Validation)?;
        Self::validate_names(&req.tags)?;
        Self::validate_names(&req.ingredients)?;

        let mut tx = pool.begin().await?;

        let record = RecipeRepository::create(
            &mut *tx,
            owner,
            CreateRecipe {
                title,
                time_minutes: req.time_minutes,
                price: req.price,
                link: req.link,
                description: req.description,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        Self::assign::<Tags>(&mut *tx, owner, record.id, &req.tags).await?;
        Self::assign::<Ingredients>(&mut *tx, owner, record.id, &req.ingredients).await?;

        tx.commit().await?;

        info!(user_id = %owner, recipe_id = record.id, "Recipe created");

        Self::assemble_one(pool, owner, record).await
    }

    /// Update one of the owner's recipes
    ///
    /// With `full` set (PUT) the title, time and price must be present.
    /// A present `tags`/`ingredients` list replaces the current set.
    pub async fn update(
        pool: &PgPool,
        owner: Owner,
        id: i64,
        req: UpdateRecipeRequest,
        full: bool,
    ) -> Result<RecipeDetailResponse, ApiError> {
        if full {
            for (field, present) in [
                ("title", req.title.is_some()),
                ("time_minutes", req.time_minutes.is_some()),
                ("price", req.price.is_some()),
            ] {
                if !present {
                    return Err(ApiError::Validation(format!("Field '{}' is required", field)));
                }
            }
        }

        let title = req.title.map(|t| t.trim().to_string());
        if let Some(title) = &title {
            validation::validate_title(title).map_err(ApiError::Validation)?;
        }
        if let Some(minutes) = req.time_minutes {
            validation::validate_time_minutes(minutes).map_err(ApiError::Validation)?;
        }
        if let Some(price) = req.price {
            validation::validate_price(price).map_err(ApiError::Validation)?;
        }
        if let Some(link) = &req.link {
            validation::validate_link(link).map_err(ApiError::Validation)?;
        }
        if let Some(tags) = &req.tags {
            Self::validate_names(tags)?;
        }
        if let Some(ingredients) = &req.ingredients {
            Self::validate_names(ingredients)?;
        }

        let mut tx = pool.begin().await?;

        let record = RecipeRepository::update(
            &mut *tx,
            owner,
            id,
            UpdateRecipe {
                title,
                time_minutes: req.time_minutes,
                price: req.price,
                link: req.link,
                description: req.description,
            },
        )
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(Self::not_found)?;

        if let Some(tags) = &req.tags {
            Self::assign::<Tags>(&mut *tx, owner, record.id, tags).await?;
        }
        if let Some(ingredients) = &req.ingredients {
            Self::assign::<Ingredients>(&mut *tx, owner, record.id, ingredients).await?;
        }

        tx.commit().await?;

        info!(user_id = %owner, recipe_id = record.id, "Recipe updated");

        Self::assemble_one(pool, owner, record).await
    }

    /// Delete one of the owner's recipes
    pub async fn delete(pool: &PgPool, owner: Owner, id: i64) -> Result<(), ApiError> {
        let deleted = RecipeRepository::delete(pool, owner, id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(Self::not_found());
        }

        info!(user_id = %owner, recipe_id = id, "Recipe deleted");
        Ok(())
    }

    fn not_found() -> ApiError {
        ApiError::NotFound("Recipe not found".to_string())
    }

    /// Turn the comma separated query parameters into id lists
    pub fn parse_filter(query: &RecipeListQuery) -> Result<RecipeFilter, ApiError> {
        let parse = |raw: &Option<String>| -> Result<Vec<i64>, ApiError> {
            match raw {
                Some(raw) => validation::parse_id_list(raw).map_err(ApiError::BadRequest),
                None => Ok(Vec::new()),
            }
        };

        Ok(RecipeFilter {
            tag_ids: parse(&query.tags)?,
            ingredient_ids: parse(&query.ingredients)?,
        })
    }

    fn validate_names(inputs: &[AttributeInput]) -> Result<(), ApiError> {
        for input in inputs {
            validation::validate_attribute_name(input.name.trim()).map_err(ApiError::Validation)?;
        }
        Ok(())
    }

    /// Replace a recipe's attributes of one kind with the named ones
    async fn assign<A: RecipeAttribute>(
        conn: &mut PgConnection,
        owner: Owner,
        recipe_id: i64,
        inputs: &[AttributeInput],
    ) -> Result<(), ApiError> {
        let mut ids = Vec::with_capacity(inputs.len());
        for input in inputs {
            let record = AttributeRepository::<A>::get_or_create(&mut *conn, owner, input.name.trim())
                .await
                .map_err(ApiError::Internal)?;
            ids.push(record.id);
        }

        AttributeRepository::<A>::set_for_recipe(&mut *conn, recipe_id, &ids)
            .await
            .map_err(ApiError::Internal)
    }

    async fn assemble_one(
        pool: &PgPool,
        owner: Owner,
        record: RecipeRecord,
    ) -> Result<RecipeDetailResponse, ApiError> {
        Self::assemble(pool, owner, vec![record])
            .await?
            .pop()
            .ok_or_else(Self::not_found)
    }

    /// Attach tags and ingredients to each recipe, preserving input order
    async fn assemble(
        pool: &PgPool,
        owner: Owner,
        records: Vec<RecipeRecord>,
    ) -> Result<Vec<RecipeDetailResponse>, ApiError> {
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();

        let mut tags = group_by_recipe(
            AttributeRepository::<Tags>::for_recipes(pool, owner, &ids)
                .await
                .map_err(ApiError::Internal)?,
        );
        let mut ingredients = group_by_recipe(
            AttributeRepository::<Ingredients>::for_recipes(pool, owner, &ids)
                .await
                .map_err(ApiError::Internal)?,
        );

        Ok(records
            .into_iter()
            .map(|r| RecipeDetailResponse {
                recipe: RecipeResponse {
                    id: r.id,
                    title: r.title,
                    time_minutes: r.time_minutes,
                    price: r.price,
                    link: r.link,
                    tags: tags.remove(&r.id).unwrap_or_default(),
                    ingredients: ingredients.remove(&r.id).unwrap_or_default(),
                },
                description: r.description,
            })
            .collect())
    }
}

fn group_by_recipe(records: Vec<LinkedAttributeRecord>) -> HashMap<i64, Vec<AttributeResponse>> {
    let mut grouped: HashMap<i64, Vec<AttributeResponse>> = HashMap::new();
    for record in records {
        grouped
            .entry(record.recipe_id)
            .or_default()
            .push(AttributeResponse {
                id: record.id,
                name: record.name,
            });
    }
    grouped
}
