//! Business logic services

pub mod attribute;
pub mod recipe;
pub mod user;

pub use attribute::AttributeService;
pub use recipe::RecipeService;
pub use user::UserService;
