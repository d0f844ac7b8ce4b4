//! Mutable scan-session state and severity tallies.

mod state;
mod tally;

pub use state::{ScanState, ScanStatus};
pub use tally::Tally;
