//! Finding events parsed from Nuclei JSONL output.

mod finding;
mod parser;
mod severity;

pub use finding::Finding;
pub use parser::parse_line;
pub use severity::Severity;
