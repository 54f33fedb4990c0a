pub mod metadata;
pub mod schema;
