pub mod model;
pub mod sqlite;
