//! SeaORM entities and their conversions to/from the domain objects.

pub mod category;
pub mod comment;
pub mod location;
pub mod post;
pub mod user;
