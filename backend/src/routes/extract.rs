//! Request extractors whose rejections render as [`ApiError`]
//!
//! axum's own `Json`, `Path` and `Query` reject with a plain-text body.
//! These wrappers keep the extraction logic and swap the rejection so a bad
//! id or malformed body gets the same `{"error": {...}}` envelope as every
//! other failure.

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
