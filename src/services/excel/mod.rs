pub mod inference;
pub mod ingest;
pub mod reader;
pub mod utils;

pub use inference::infer_column_type;
pub use ingest::{column_values, ingest, IngestedSheet};
pub use reader::{read_first_sheet, RawSheet};
