//! Ingredient and tag API routes
//!
//! Both resources share one set of handlers, instantiated per attribute
//! kind in [`super::api_routes`].

use super::extract::{ApiJson, ApiPath, ApiQuery};
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::repositories::RecipeAttribute;
use crate::services::AttributeService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use recipe_shared::types::{AttributeListQuery, AttributeResponse, UpdateAttributeRequest};

/// Create collection and detail routes for one attribute kind
pub fn attribute_routes<A: RecipeAttribute>() -> Router<AppState> {
    Router::new()
        .route("/", get(list_attributes::<A>))
        .route(
            "/:id",
            get(get_attribute::<A>)
                .patch(patch_attribute::<A>)
                .put(put_attribute::<A>)
                .delete(delete_attribute::<A>),
        )
}

/// GET /api/v1/{ingredients,tags}?assigned_only=1
async fn list_attributes<A: RecipeAttribute>(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<AttributeListQuery>,
) -> ApiResult<Json<Vec<AttributeResponse>>> {
    let items = AttributeService::<A>::list(state.db(), auth.owner(), query.assigned_only).await?;
    Ok(Json(items))
}

/// GET /api/v1/{ingredients,tags}/:id
async fn get_attribute<A: RecipeAttribute>(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<AttributeResponse>> {
    let item = AttributeService::<A>::get(state.db(), auth.owner(), id).await?;
    Ok(Json(item))
}

/// PATCH /api/v1/{ingredients,tags}/:id - partial update
async fn patch_attribute<A: RecipeAttribute>(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateAttributeRequest>,
) -> ApiResult<Json<AttributeResponse>> {
    let item = AttributeService::<A>::update(state.db(), auth.owner(), id, req.name).await?;
    Ok(Json(item))
}

/// PUT /api/v1/{ingredients,tags}/:id - full update, `name` required
async fn put_attribute<A: RecipeAttribute>(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateAttributeRequest>,
) -> ApiResult<Json<AttributeResponse>> {
    if req.name.is_none() {
        return Err(ApiError::Validation("Field 'name' is required".to_string()));
    }
    let item = AttributeService::<A>::update(state.db(), auth.owner(), id, req.name).await?;
    Ok(Json(item))
}

/// DELETE /api/v1/{ingredients,tags}/:id
async fn delete_attribute<A: RecipeAttribute>(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    AttributeService::<A>::delete(state.db(), auth.owner(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
