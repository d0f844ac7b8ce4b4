//! Nuclei process spawning and control.
//!
//! The scanner runs as an independent child process; the core only reads
//! its stdout line stream and waits for its exit status. Stderr is
//! discarded: nothing ever inspects it, and an unread pipe would fill up
//! and block the child mid-scan.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::{Child, ChildStdout, Command};

/// Name of the scanner binary looked up on `PATH`.
pub const SCANNER_BINARY: &str = "nuclei";

/// Output-format flag that makes the scanner emit one JSON record per line.
const OUTPUT_FORMAT_FLAG: &str = "-json";

/// Error type for process spawning operations.
#[derive(thiserror::Error, Debug)]
pub enum SpawnError {
    /// The scanner binary was not found on `PATH`.
    #[error("nuclei binary not found")]
    NotFound,
    /// Permission denied when spawning.
    #[error("permission denied spawning nuclei")]
    PermissionDenied,
    /// Other I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpawnError {
    fn from_io(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound,
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::Io(err),
        }
    }
}

/// Command line for one scanner invocation.
///
/// User-supplied arguments are forwarded verbatim and unvalidated after the
/// fixed output-format flag.
#[derive(Debug, Clone, Default)]
pub struct ScannerCommand {
    args: Vec<String>,
}

impl ScannerCommand {
    #[must_use]
    pub fn new<S: AsRef<str>>(args: &[S]) -> Self {
        Self {
            args: args.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// The target label shown in the results panel.
    #[must_use]
    pub fn target_label(&self) -> String {
        self.args.join(" ")
    }

    /// Build the full argument list passed to the scanner.
    #[must_use]
    pub fn build_args(&self) -> Vec<String> {
        let mut args = vec![OUTPUT_FORMAT_FLAG.to_string()];
        args.extend(self.args.iter().cloned());
        args
    }
}

/// A running scanner process.
#[derive(Debug)]
pub struct ScannerProcess {
    child: Child,
}

impl ScannerProcess {
    /// Spawn the scanner with the given command.
    ///
    /// # Errors
    ///
    /// Returns [`SpawnError::NotFound`] when the binary is not installed,
    /// or another [`SpawnError`] if the process fails to start.
    pub fn spawn(command: &ScannerCommand) -> Result<Self, SpawnError> {
        Self::spawn_with_binary(SCANNER_BINARY, command)
    }

    /// Spawn using a custom binary name (testing seam).
    ///
    /// # Errors
    ///
    /// Returns `SpawnError` if the process fails to spawn.
    pub fn spawn_with_binary(binary: &str, command: &ScannerCommand) -> Result<Self, SpawnError> {
        let child = Command::new(binary)
            .args(command.build_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(SpawnError::from_io)?;

        tracing::debug!(binary, args = ?command.build_args(), "Scanner spawned");
        Ok(Self { child })
    }

    /// Take ownership of the stdout handle.
    ///
    /// This can only be called once; subsequent calls return `None`.
    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    /// Get the process ID, if still running.
    #[must_use]
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Wait for the process to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if waiting fails.
    pub async fn wait(&mut self) -> std::io::Result<ExitStatus> {
        self.child.wait().await
    }

    /// Forcefully kill the process.
    ///
    /// # Errors
    ///
    /// Returns an error if the kill signal cannot be sent.
    pub async fn kill(&mut self) -> std::io::Result<()> {
        self.child.kill().await
    }

    /// Attempt graceful termination with a timeout.
    ///
    /// On Unix, sends SIGTERM first, then SIGKILL after the timeout.
    /// On other platforms, falls back to immediate kill.
    ///
    /// # Errors
    ///
    /// Returns an error if termination fails.
    pub async fn graceful_terminate(&mut self, timeout: Duration) -> std::io::Result<()> {
        #[cfg(unix)]
        {
            self.graceful_terminate_unix(timeout).await
        }

        #[cfg(not(unix))]
        {
            let _ = timeout;
            self.kill().await
        }
    }

    #[cfg(unix)]
    async fn graceful_terminate_unix(&mut self, timeout: Duration) -> std::io::Result<()> {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        if let Some(pid) = self.id() {
            let nix_pid = Pid::from_raw(i32::try_from(pid).unwrap_or(i32::MAX));
            let _ = kill(nix_pid, Signal::SIGTERM);

            match tokio::time::timeout(timeout, self.child.wait()).await {
                Ok(Ok(_)) => Ok(()),
                Ok(Err(e)) => Err(e),
                Err(_) => {
                    // Timeout elapsed, force kill
                    self.child.kill().await
                }
            }
        } else {
            // Process already exited
            Ok(())
        }
    }
}
