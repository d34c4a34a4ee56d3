//! Dataset model and CSV/TSV loading.

mod column;
mod dataset;
mod infer;
mod parser;
mod source;

pub use column::{Column, ColumnData, ColumnType};
pub use dataset::{Dataset, NumericColumn};
pub use infer::parse_timestamp;
pub use parser::{Parser, ParserConfig};
pub use source::{DataTable, MISSING_TOKENS, SourceMetadata, is_missing_token};
