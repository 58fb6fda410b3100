pub mod schema;
pub mod sort;
