//! External command execution

use super::{BackendError, BackendResult};
use async_trait::async_trait;

/// Runs a program to completion and hands back its stdout
///
/// A non-zero exit becomes [`BackendError::Command`] carrying stderr, which
/// is the text a user needs to see when helm refuses an operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, program: &str, args: &[String]) -> BackendResult<String>;
}

/// Executor backed by `tokio::process`
#[derive(Debug, Default, Clone)]
pub struct ProcessExecutor;

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    async fn execute(&self, program: &str, args: &[String]) -> BackendResult<String> {
        tracing::debug!("Executing command: {} {}", program, args.join(" "));

        let output = tokio::process::Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| BackendError::Io(format!("failed to run {}: {}", program, e)))?;

        let to_text = |bytes: Vec<u8>| String::from_utf8_lossy(&bytes).into_owned();

        if output.status.success() {
            Ok(to_text(output.stdout))
        } else {
            let stderr = to_text(output.stderr);
            tracing::debug!(
                "Command {} exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            );
            Err(BackendError::Command(stderr.trim().to_string()))
        }
    }
}
