//! Help text acquisition.
//!
//! [`HelpSource`] is the seam the schema builder pulls help text through.
//! [`ProcessScraper`] runs `<binary> <path...> --help` as a child process;
//! tests plug in sources backed by captured fixtures instead.

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;

use helpwrap_core::DEFAULT_TIMEOUT_MS;
use tracing::debug;
use wait_timeout::ChildExt;

use crate::error::ScrapeError;

/// Longest stderr excerpt carried by [`ScrapeError::Exited`].
const STDERR_EXCERPT_CHARS: usize = 400;

/// Produces the help text for a command path.
///
/// An empty path asks for the root tool's help.
pub trait HelpSource: Sync {
    fn help(&self, path: &[String]) -> Result<String, ScrapeError>;

    /// Program name used to label command paths in errors and warnings.
    fn program(&self) -> &str;
}

/// Runs the wrapped tool with `--help` and captures stdout.
#[derive(Debug, Clone)]
pub struct ProcessScraper {
    binary: String,
    base_args: Vec<String>,
    timeout: Duration,
}

impl ProcessScraper {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            base_args: Vec::new(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Arguments placed between the binary and the command path.
    pub fn with_base_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn label(&self, path: &[String]) -> String {
        let mut parts = vec![self.binary.as_str()];
        parts.extend(path.iter().map(String::as_str));
        parts.push("--help");
        parts.join(" ")
    }
}

impl HelpSource for ProcessScraper {
    fn help(&self, path: &[String]) -> Result<String, ScrapeError> {
        let label = self.label(path);
        let mut command = Command::new(&self.binary);
        command
            .args(&self.base_args)
            .args(path)
            .arg("--help")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(command = %label, timeout_ms = self.timeout.as_millis() as u64, "Scraping help");
        let mut child = command.spawn().map_err(|source| ScrapeError::Launch {
            command: label.clone(),
            source,
        })?;

        // Drain both pipes so a full pipe buffer cannot stall the child.
        let stdout_thread = child.stdout.take().map(drain);
        let stderr_thread = child.stderr.take().map(drain);

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                debug!(command = %label, "Help command timed out, killing process");
                let _ = child.kill();
                let _ = child.wait();
                return Err(ScrapeError::TimedOut {
                    command: label,
                    timeout_ms: self.timeout.as_millis() as u64,
                });
            }
            Err(source) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ScrapeError::Wait {
                    command: label,
                    source,
                });
            }
        };

        let stdout = collect(stdout_thread, &label, "stdout");
        let stderr = collect(stderr_thread, &label, "stderr");
        if !status.success() {
            return Err(ScrapeError::Exited {
                command: label,
                status,
                stderr: excerpt(&stderr),
            });
        }

        debug!(command = %label, bytes = stdout.len(), "Captured help text");
        Ok(stdout)
    }

    fn program(&self) -> &str {
        &self.binary
    }
}

type Drained = (Vec<u8>, std::io::Result<usize>);

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Drained> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        let result = pipe.read_to_end(&mut buf);
        (buf, result)
    })
}

fn collect(thread: Option<JoinHandle<Drained>>, label: &str, stream: &str) -> String {
    let buf = thread
        .and_then(|t| t.join().ok())
        .map(|(buf, res)| {
            if let Err(e) = res {
                debug!(command = %label, stream, error = %e, "Failed to read pipe");
            }
            buf
        })
        .unwrap_or_default();
    String::from_utf8_lossy(&buf).into_owned()
}

fn excerpt(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.chars().count() <= STDERR_EXCERPT_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(STDERR_EXCERPT_CHARS).collect();
    format!("{cut}...")
}
