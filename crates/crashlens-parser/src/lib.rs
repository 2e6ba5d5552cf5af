pub mod errors;
mod cells;
mod loader;
pub mod model;

pub use errors::ParserError;
pub use loader::{load_accident_file, parse_accident_csv};
pub use model::{AccidentTable, ColumnKind, TEXT_COLUMNS};
