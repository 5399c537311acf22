pub mod loader;
pub mod models;

pub use loader::{load_rows, parse_rows};
pub use models::CompositionRow;
