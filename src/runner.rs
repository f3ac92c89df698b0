use crate::error::{ProbeError, ProbeResult};
use crate::utils::debug_with_context;
use futures::future::{BoxFuture, FutureExt};
use std::collections::HashMap;
use std::fmt;
use std::process::Stdio;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::process::Command;

/// Per-command deadline used when the configuration does not set one.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_millis(1000);

/// Program plus ordered arguments for one read-only probe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arg_list(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Executes external probes.
///
/// A runner is the containment boundary for missing or misbehaving tools: it
/// hands back the trimmed stdout on success and a [`ProbeError`] otherwise,
/// and must never wait on a child forever.
pub trait CommandRunner: Send + Sync {
    fn run<'a>(&'a self, spec: &'a CommandSpec) -> BoxFuture<'a, ProbeResult<String>>;
}

/// Spawns real child processes on the tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND_TIMEOUT)
    }
}

impl CommandRunner for TokioCommandRunner {
    fn run<'a>(&'a self, spec: &'a CommandSpec) -> BoxFuture<'a, ProbeResult<String>> {
        async move {
            debug_with_context("runner", &format!("running `{}`", spec));

            let child = Command::new(&spec.program)
                .args(&spec.args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::null())
                .kill_on_drop(true)
                .spawn()
                .map_err(|source| ProbeError::ToolUnavailable {
                    program: spec.program.clone(),
                    source,
                })?;

            // Dropping the wait future on timeout drops the child, which kills it.
            let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
                Ok(result) => result.map_err(|source| ProbeError::Io {
                    program: spec.program.clone(),
                    source,
                })?,
                Err(_) => {
                    return Err(ProbeError::TimedOut {
                        program: spec.program.clone(),
                        timeout: self.timeout,
                    });
                }
            };

            if !output.status.success() {
                return Err(ProbeError::NonZeroExit {
                    program: spec.program.clone(),
                    status: output.status.to_string(),
                });
            }

            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }
        .boxed()
    }
}

/// Canned outcome for one command line in a [`ScriptedRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedResponse {
    Output(String),
    Missing,
    Fails(i32),
    Hangs,
}

/// In-process runner answering from a table keyed by the rendered command line.
///
/// Unknown commands behave like a missing binary. Every call is recorded so
/// tests can assert which probes were (or were not) issued.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, ScriptedResponse>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, command_line: &str, response: ScriptedResponse) -> Self {
        self.responses.insert(command_line.to_string(), response);
        self
    }

    pub fn with_output(self, command_line: &str, output: &str) -> Self {
        self.respond(command_line, ScriptedResponse::Output(output.to_string()))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run<'a>(&'a self, spec: &'a CommandSpec) -> BoxFuture<'a, ProbeResult<String>> {
        let command_line = spec.to_string();
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command_line.clone());
        let response = self
            .responses
            .get(&command_line)
            .cloned()
            .unwrap_or(ScriptedResponse::Missing);

        async move {
            match response {
                ScriptedResponse::Output(text) => Ok(text.trim().to_string()),
                ScriptedResponse::Missing => Err(ProbeError::ToolUnavailable {
                    program: spec.program.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such command"),
                }),
                ScriptedResponse::Fails(code) => Err(ProbeError::NonZeroExit {
                    program: spec.program.clone(),
                    status: format!("exit status: {}", code),
                }),
                ScriptedResponse::Hangs => std::future::pending().await,
            }
        }
        .boxed()
    }
}
