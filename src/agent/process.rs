//! Out-of-process agents.
//!
//! `ProcessAgent` runs an external program once per decision: the request is
//! written to its stdin, one JSON response is read from its stdout. Every
//! invocation is bounded by a timeout, and the child is always reaped before
//! `decide` returns, whether it answered, failed or hung.

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use super::protocol::{AgentRequest, AgentResponse};
use super::traits::{AgentError, DecisionAgent};

/// How often to poll a child that closed its output but has not exited.
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Agent backed by an external program.
#[derive(Clone, Debug)]
pub struct ProcessAgent {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessAgent {
    /// Create an agent that runs `program` with no arguments.
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout,
        }
    }

    /// Build from a whitespace-separated command line, e.g. `python3 random_ai.py`.
    ///
    /// No shell quoting is interpreted.
    pub fn from_command_line(command: &str, timeout: Duration) -> Result<Self, AgentError> {
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| AgentError::Malformed("empty agent command".to_string()))?;

        Ok(Self::new(program, timeout).with_args(parts))
    }

    /// Append arguments passed to the program on every invocation.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn spawn(&self) -> Result<Child, AgentError> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| AgentError::Spawn {
                program: self.program.display().to_string(),
                source,
            })
    }

    fn exchange(&self, child: &mut Child, payload: &[u8], deadline: Instant) -> Result<AgentResponse, AgentError> {
        // Readers start before the write so a chatty child cannot fill a pipe and stall us.
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(payload) {
                Ok(()) => {}
                // The child may answer without reading its input.
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
                Err(e) => return Err(e.into()),
            }
        }

        let output = recv_before(&stdout, deadline, self.timeout)?;
        let status = wait_before(child, deadline, self.timeout)?;

        if !status.success() {
            let stderr = recv_before(&stderr, deadline, self.timeout).unwrap_or_default();
            return Err(AgentError::Exit {
                status: status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        AgentResponse::parse(&output)
    }
}

impl DecisionAgent for ProcessAgent {
    fn decide(&mut self, request: &AgentRequest) -> Result<AgentResponse, AgentError> {
        let payload = serde_json::to_vec(request)?;
        let deadline = Instant::now() + self.timeout;

        let mut child = self.spawn()?;
        let result = self.exchange(&mut child, &payload, deadline);

        if result.is_err() {
            // Already-exited children make kill fail; reaping still succeeds.
            let _ = child.kill();
            let _ = child.wait();
        }
        result
    }

    fn label(&self) -> String {
        self.program.display().to_string()
    }
}

/// Drain a pipe on a helper thread.
fn spawn_reader<R>(source: Option<R>) -> Receiver<io::Result<String>>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = match source {
            Some(mut pipe) => {
                let mut text = String::new();
                pipe.read_to_string(&mut text).map(|_| text)
            }
            None => Ok(String::new()),
        };
        let _ = tx.send(result);
    });
    rx
}

fn recv_before(rx: &Receiver<io::Result<String>>, deadline: Instant, timeout: Duration) -> Result<String, AgentError> {
    let remaining = deadline.saturating_duration_since(Instant::now());
    match rx.recv_timeout(remaining) {
        Ok(result) => Ok(result?),
        Err(RecvTimeoutError::Timeout) => Err(AgentError::Timeout(timeout)),
        Err(RecvTimeoutError::Disconnected) => Err(AgentError::Io(io::Error::other("agent output reader stopped"))),
    }
}

fn wait_before(child: &mut Child, deadline: Instant, timeout: Duration) -> Result<ExitStatus, AgentError> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            return Err(AgentError::Timeout(timeout));
        }
        thread::sleep(EXIT_POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_command_line() {
        let agent = ProcessAgent::from_command_line("python3  agents/random_ai.py --fast", Duration::from_secs(1)).unwrap();

        assert_eq!(agent.program, PathBuf::from("python3"));
        assert_eq!(agent.args, vec!["agents/random_ai.py", "--fast"]);
        assert_eq!(agent.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_from_empty_command_line() {
        let err = ProcessAgent::from_command_line("   ", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, AgentError::Malformed(_)));
    }
}
