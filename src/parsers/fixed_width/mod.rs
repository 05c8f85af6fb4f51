mod dto;
mod parser;
mod types;

pub use dto::Record;
pub use parser::{FixedWidthParser, decode_row, flatten_rows, is_data_row};
pub use types::{FieldSpec, INDEX_FIELD, Layout};
