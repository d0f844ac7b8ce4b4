//! The scan session controller.
//!
//! One control flow drives everything: it pumps scanner output line by
//! line into the state owner and redraws the panels after each accepted
//! finding, so the display always shows a consistent prefix of the event
//! sequence.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::scan::{ScanState, ScanStatus};
use crate::session::{ScannerCommand, ScannerProcess, SpawnError};
use crate::ui::Surface;

/// How long the final frame stays visible after a scan completes.
pub const FINAL_FRAME_HOLD: Duration = Duration::from_secs(2);

/// Timeout for graceful scanner termination on interrupt.
const TERMINATE_TIMEOUT: Duration = Duration::from_secs(5);

/// Sample records seeded in demo mode, one per fixed severity. They go
/// through the normal ingestion path.
const DEMO_RECORDS: [&str; 5] = [
    r#"{"template-id":"cve-2024-1234","matched-at":"https://example.com/admin","info":{"severity":"critical"}}"#,
    r#"{"template-id":"exposed-panel","matched-at":"https://example.com/panel","info":{"severity":"high"}}"#,
    r#"{"template-id":"ssl-tls-weak","matched-at":"https://example.com","info":{"severity":"medium"}}"#,
    r#"{"template-id":"robots-txt","matched-at":"https://example.com/robots.txt","info":{"severity":"low"}}"#,
    r#"{"template-id":"tech-detect","matched-at":"https://example.com","info":{"severity":"info"}}"#,
];

/// Error type for session operations.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    /// The scanner could not be started.
    #[error(transparent)]
    Spawn(#[from] SpawnError),
    /// Process stdout was not available.
    #[error("scanner stdout not available")]
    NoStdout,
    /// I/O failure while reading output or drawing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why the ingest loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEnd {
    /// The output stream closed; the scanner is done.
    Eof,
    /// The user interrupted the session.
    Interrupted,
}

/// Orchestrates one scan session from start to terminal status.
pub struct ScanSession<S> {
    state: ScanState,
    surface: S,
}

impl<S: Surface> ScanSession<S> {
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self {
            state: ScanState::new(),
            surface,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Run a live scan, forwarding `args` to the scanner verbatim.
    ///
    /// Returns the terminal status: `Completed` after the scanner exits
    /// (with any exit status), or `Interrupted` when the user cancels
    /// mid-loop. Interruption is an expected outcome, not an error, and
    /// the child is terminated rather than orphaned.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Spawn`] before any rendering begins when
    /// the scanner cannot be started, or [`SessionError::Io`] on a read
    /// or draw failure mid-loop.
    pub async fn run_scan<A: AsRef<str>>(
        &mut self,
        args: &[A],
    ) -> Result<ScanStatus, SessionError> {
        let command = ScannerCommand::new(args);
        self.state.set_status(ScanStatus::Running);
        self.state.set_target(command.target_label());

        let mut process = ScannerProcess::spawn(&command)?;
        let stdout = process.take_stdout().ok_or(SessionError::NoStdout)?;

        let end = match self.ingest_stream(stdout).await {
            Ok(end) => end,
            Err(e) => {
                // Do not leave the scanner running behind a dead loop.
                let _ = process.kill().await;
                return Err(e);
            }
        };

        match end {
            StreamEnd::Interrupted => {
                tracing::info!("Scan interrupted by user");
                process.graceful_terminate(TERMINATE_TIMEOUT).await?;
                self.state.set_status(ScanStatus::Interrupted);
                Ok(ScanStatus::Interrupted)
            }
            StreamEnd::Eof => {
                let exit = process.wait().await?;
                tracing::info!(
                    success = exit.success(),
                    findings = self.state.tally().total(),
                    "Scan completed"
                );
                self.state.set_status(ScanStatus::Completed);
                self.surface.redraw_final(&self.state)?;
                tokio::time::sleep(FINAL_FRAME_HOLD).await;
                Ok(ScanStatus::Completed)
            }
        }
    }

    /// Pump a line-oriented output stream into the aggregator.
    ///
    /// Trailing whitespace is stripped and genuinely empty lines skipped;
    /// a redraw is triggered only when a line actually became a finding.
    /// Public and generic over the reader so the loop can be driven from
    /// an in-memory source in tests.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] when reading or drawing fails.
    pub async fn ingest_stream<R: AsyncRead + Unpin>(
        &mut self,
        reader: R,
    ) -> Result<StreamEnd, SessionError> {
        let mut lines = BufReader::new(reader).lines();
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        self.surface.redraw(&self.state)?;

        loop {
            tokio::select! {
                biased;

                _ = &mut ctrl_c => {
                    return Ok(StreamEnd::Interrupted);
                }
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        return Ok(StreamEnd::Eof);
                    };
                    let line = line.trim_end();
                    if line.is_empty() {
                        continue;
                    }
                    if self.state.ingest(line) {
                        self.surface.redraw(&self.state)?;
                    }
                }
            }
        }
    }

    /// Render one static frame from fixed sample data, without a scanner.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] when drawing fails.
    pub fn run_demo(&mut self) -> Result<(), SessionError> {
        self.state.set_status(ScanStatus::DemoMode);
        self.state.set_target("example.com");
        for record in DEMO_RECORDS {
            self.state.ingest(record);
        }
        self.surface.redraw_final(&self.state)?;
        Ok(())
    }
}
