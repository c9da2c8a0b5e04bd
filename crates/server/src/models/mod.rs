//! Domain types.
//!
//! These types represent validated domain objects separate from database
//! row types. They serialize straight into the API's camelCase JSON shapes.

pub mod order;
pub mod product;
pub mod search;
pub mod sign;
pub mod user;

pub use order::{Customization, Order};
pub use product::Product;
pub use search::SearchEntry;
pub use sign::Sign;
pub use user::User;
