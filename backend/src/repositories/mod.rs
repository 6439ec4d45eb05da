//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod attribute;
pub mod recipe;
pub mod scope;
pub mod user;

pub use attribute::{
    AttributeRecord, AttributeRepository, IngredientRepository, Ingredients,
    LinkedAttributeRecord, RecipeAttribute, TagRepository, Tags,
};
pub use recipe::{CreateRecipe, RecipeFilter, RecipeRecord, RecipeRepository, UpdateRecipe};
pub use scope::Owner;
pub use user::{UpdateUser, UserRecord, UserRepository};
