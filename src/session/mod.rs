//! Live session orchestration: process lifecycle and the ingest loop.

mod controller;
mod process;

pub use controller::{ScanSession, SessionError, StreamEnd, FINAL_FRAME_HOLD};
pub use process::{ScannerCommand, ScannerProcess, SpawnError, SCANNER_BINARY};
