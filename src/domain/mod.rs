pub mod errors;
pub mod query;
pub mod value_objects;
