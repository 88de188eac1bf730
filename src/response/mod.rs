mod model;
mod parser;

pub(crate) use model::pretty_json;
pub use model::{ExecutionOutcome, Response};
pub use parser::{parse_output, ParsedOutput, SENTINEL_MARKER};
