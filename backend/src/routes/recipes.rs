//! Recipe API routes

use super::extract::{ApiJson, ApiPath, ApiQuery};
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::services::RecipeService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use recipe_shared::types::{
    CreateRecipeRequest, RecipeDetailResponse, RecipeListQuery, RecipeResponse,
    UpdateRecipeRequest,
};

/// Create recipe routes
pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_recipes).post(create_recipe))
        .route(
            "/:id",
            get(get_recipe)
                .patch(patch_recipe)
                .put(put_recipe)
                .delete(delete_recipe),
        )
}

/// GET /api/v1/recipes?tags=1,2&ingredients=3
async fn list_recipes(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<RecipeListQuery>,
) -> ApiResult<Json<Vec<RecipeResponse>>> {
    let recipes = RecipeService::list(state.db(), auth.owner(), query).await?;
    Ok(Json(recipes))
}

/// POST /api/v1/recipes
async fn create_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeDetailResponse>), ApiError> {
    let recipe = RecipeService::create(state.db(), auth.owner(), req).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// GET /api/v1/recipes/:id
async fn get_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<RecipeDetailResponse>> {
    let recipe = RecipeService::get(state.db(), auth.owner(), id).await?;
    Ok(Json(recipe))
}

/// PATCH /api/v1/recipes/:id
async fn patch_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateRecipeRequest>,
) -> ApiResult<Json<RecipeDetailResponse>> {
    let recipe = RecipeService::update(state.db(), auth.owner(), id, req, false).await?;
    Ok(Json(recipe))
}

/// PUT /api/v1/recipes/:id
async fn put_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateRecipeRequest>,
) -> ApiResult<Json<RecipeDetailResponse>> {
    let recipe = RecipeService::update(state.db(), auth.owner(), id, req, true).await?;
    Ok(Json(recipe))
}

/// DELETE /api/v1/recipes/:id
async fn delete_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    RecipeService::delete(state.db(), auth.owner(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
