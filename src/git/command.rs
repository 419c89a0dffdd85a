use crate::error::{PulseError, Result};
use std::io::{BufReader, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs `git` subcommands inside a working directory and hands back stdout.
///
/// stdout and stderr are drained on their own threads while the child runs,
/// so a chatty command cannot deadlock on a full pipe. With a timeout set the
/// child is polled and killed once the deadline passes.
#[derive(Debug, Clone)]
pub struct GitRunner {
    program: String,
    timeout: Option<Duration>,
}

impl Default for GitRunner {
    fn default() -> Self {
        GitRunner {
            program: "git".to_string(),
            timeout: None,
        }
    }
}

impl GitRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the executable, mostly useful for tests.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Executes `<program> <args...>` in `cwd`.
    ///
    /// # Errors
    /// * [`PulseError::Spawn`] if the process cannot be started.
    /// * [`PulseError::CommandFailure`] on a non-zero exit, carrying stderr.
    /// * [`PulseError::Timeout`] if the deadline passes first.
    pub fn run<S: AsRef<str>>(&self, cwd: &Path, args: &[S]) -> Result<String> {
        let command = self.describe(args);
        debug!(cwd = %cwd.display(), %command, "running git command");

        let mut child = Command::new(&self.program)
            .args(args.iter().map(|a| a.as_ref()))
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(PulseError::Spawn)?;

        let stdout_reader = drain(child.stdout.take());
        let stderr_reader = drain(child.stderr.take());

        let status = match self.timeout {
            Some(limit) => match wait_with_deadline(&mut child, limit)? {
                Some(status) => status,
                None => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(PulseError::Timeout {
                        command,
                        timeout: limit,
                    });
                }
            },
            None => child.wait()?,
        };

        let stdout = collect(stdout_reader);
        let stderr = collect(stderr_reader);

        if !status.success() {
            debug!(%command, %status, "git command failed");
            return Err(PulseError::CommandFailure {
                command,
                status: status.to_string(),
                stderr: stderr.trim_end().to_string(),
            });
        }

        Ok(stdout)
    }

    fn describe<S: AsRef<str>>(&self, args: &[S]) -> String {
        let mut out = self.program.clone();
        for arg in args {
            out.push(' ');
            out.push_str(arg.as_ref());
        }
        out
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(pipe) = pipe {
            let _ = BufReader::new(pipe).read_to_end(&mut buf);
        }
        buf
    })
}

fn collect(reader: JoinHandle<Vec<u8>>) -> String {
    reader
        .join()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

fn wait_with_deadline(child: &mut Child, limit: Duration) -> Result<Option<ExitStatus>> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() >= limit {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}
