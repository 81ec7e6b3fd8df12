//! Test utilities and mocks for cxxenv unit tests.
//!
//! The central piece is [`MockExecutor`], a [`CommandRunner`] that answers
//! from canned expectations and records every command line it sees, so tests
//! can assert how often the compiler or `pkg-config` was consulted.
//!
//! # Example
//!
//! ```rust,ignore
//! use cxxenv::test_support::{MockExecutor, MockProcessOutput};
//!
//! let exec = MockExecutor::new();
//! exec.expect("c++ -print-search-dirs", MockProcessOutput::success("libraries: =/usr/lib/"));
//! ```

pub mod fixtures;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Result};

use crate::util::process::{CapturedOutput, CommandRunner, ProcessBuilder};

pub use fixtures::*;

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

impl Default for MockProcessOutput {
    fn default() -> Self {
        MockProcessOutput::success("")
    }
}

impl From<MockProcessOutput> for CapturedOutput {
    fn from(output: MockProcessOutput) -> Self {
        CapturedOutput {
            code: Some(output.status),
            stdout: output.stdout.into_bytes(),
            stderr: output.stderr.into_bytes(),
        }
    }
}

/// Pattern for matching commands in MockExecutor.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match any command.
    Any,
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Any => true,
        }
    }
}

#[derive(Debug, Clone)]
struct CommandExpectation {
    pattern: CommandPattern,
    output: MockProcessOutput,
}

#[derive(Debug, Default)]
struct MockState {
    expectations: Vec<CommandExpectation>,
    calls: Vec<String>,
}

/// Mock process executor for testing command execution.
///
/// Clones share state: hand one clone to the environment and keep another
/// to inspect the recorded calls.
#[derive(Debug, Clone, Default)]
pub struct MockExecutor {
    state: Rc<RefCell<MockState>>,
}

impl MockExecutor {
    /// Create a new mock executor.
    pub fn new() -> Self {
        MockExecutor::default()
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&self, cmd: &str, output: MockProcessOutput) -> &Self {
        self.push(CommandPattern::Exact(cmd.to_string()), output)
    }

    /// Add an expectation for a command starting with a prefix.
    pub fn expect_prefix(&self, prefix: &str, output: MockProcessOutput) -> &Self {
        self.push(CommandPattern::StartsWith(prefix.to_string()), output)
    }

    /// Answer every otherwise unmatched command with `output`.
    pub fn set_default(&self, output: MockProcessOutput) -> &Self {
        self.push(CommandPattern::Any, output)
    }

    fn push(&self, pattern: CommandPattern, output: MockProcessOutput) -> &Self {
        self.state
            .borrow_mut()
            .expectations
            .push(CommandExpectation { pattern, output });
        self
    }

    /// Get all commands that were called.
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    /// Number of recorded calls starting with `prefix`.
    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

impl CommandRunner for MockExecutor {
    fn run(&self, cmd: &ProcessBuilder) -> Result<CapturedOutput> {
        let full_cmd = cmd.display_command();
        let mut state = self.state.borrow_mut();
        state.calls.push(full_cmd.clone());

        // Specific patterns first, `Any` last
        let matched = state
            .expectations
            .iter()
            .filter(|e| !matches!(e.pattern, CommandPattern::Any))
            .chain(
                state
                    .expectations
                    .iter()
                    .filter(|e| matches!(e.pattern, CommandPattern::Any)),
            )
            .find(|e| e.pattern.matches(&full_cmd))
            .map(|e| e.output.clone());

        match matched {
            Some(output) => Ok(output.into()),
            None => bail!("unexpected command: {}", full_cmd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_executor_records_calls() {
        let exec = MockExecutor::new();
        exec.expect("pkg-config --exists zlib", MockProcessOutput::success(""));

        let out = exec
            .run(&ProcessBuilder::new("pkg-config").args(["--exists", "zlib"]))
            .unwrap();
        assert!(out.success());
        assert_eq!(exec.calls(), vec!["pkg-config --exists zlib"]);
    }

    #[test]
    fn test_mock_executor_rejects_unexpected() {
        let exec = MockExecutor::new();
        assert!(exec.run(&ProcessBuilder::new("make")).is_err());
        assert_eq!(exec.count_prefix("make"), 1);
    }

    #[test]
    fn test_specific_expectation_beats_default() {
        let exec = MockExecutor::new();
        exec.set_default(MockProcessOutput::failure(1, ""));
        exec.expect_prefix("c++ --version", MockProcessOutput::success("g++ (GCC) 13"));

        let out = exec
            .run(&ProcessBuilder::new("c++").arg("--version"))
            .unwrap();
        assert!(out.success());

        let shared = exec.clone();
        assert_eq!(shared.calls(), vec!["c++ --version".to_string()]);
    }
}
