//! API request and response types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================================================
// Auth and User Types
// ============================================================================

/// Authentication tokens response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

/// User profile response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Partial update of the current user's profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

// ============================================================================
// Recipe Attribute Types (ingredients and tags)
// ============================================================================

/// Wire form of an ingredient or a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeResponse {
    pub id: i64,
    pub name: String,
}

pub type IngredientResponse = AttributeResponse;
pub type TagResponse = AttributeResponse;

/// Update payload for an ingredient or a tag
///
/// Every field is optional so the same body serves PATCH; PUT additionally
/// requires `name` to be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAttributeRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Query parameters for listing ingredients or tags
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeListQuery {
    /// Only return attributes used by at least one of the caller's recipes
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub assigned_only: bool,
}

/// Nested attribute reference inside a recipe payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeInput {
    pub name: String,
}

// ============================================================================
// Recipe Types
// ============================================================================

/// Recipe list item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub link: String,
    pub tags: Vec<TagResponse>,
    pub ingredients: Vec<IngredientResponse>,
}

/// Recipe detail, the list item plus the long-form description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetailResponse {
    #[serde(flatten)]
    pub recipe: RecipeResponse,
    pub description: String,
}

/// Create recipe request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<AttributeInput>,
    #[serde(default)]
    pub ingredients: Vec<AttributeInput>,
}

/// Update recipe request
///
/// Absent fields are left untouched. A present `tags` or `ingredients`
/// list replaces the whole set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRecipeRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub time_minutes: Option<i32>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<AttributeInput>>,
    #[serde(default)]
    pub ingredients: Option<Vec<AttributeInput>>,
}

/// Recipe list filters, comma separated ids (e.g. `tags=1,2`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeListQuery {
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
}

// ============================================================================
// Helpers
// ============================================================================

/// Deserialize a boolean flag given as `0`/`1`, any integer, or `true`/`false`
///
/// Query strings always carry strings, JSON bodies may carry real numbers or
/// booleans; both are accepted. Any non-zero integer is truthy.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl<'de> de::Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an integer or a boolean")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            let v = v.trim();
            if v.eq_ignore_ascii_case("true") {
                return Ok(true);
            }
            if v.eq_ignore_ascii_case("false") || v.is_empty() {
                return Ok(false);
            }
            v.parse::<i64>()
                .map(|n| n != 0)
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}
