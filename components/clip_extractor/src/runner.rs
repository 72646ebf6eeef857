use crate::error::{IngestError, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::process::Stdio;
use tokio::process::Command;

/// Runs external programs for the pipeline
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` to completion
    ///
    /// A non-zero exit is an error carrying whatever the program wrote to
    /// stderr.
    async fn run(&self, program: &str, args: &[OsString]) -> Result<()>;
}

/// Runs commands as child processes of this one
///
/// Child stdout goes straight to our stdout so the operator can follow
/// download progress; stderr is captured for error reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[OsString]) -> Result<()> {
        let command = describe_command(program, args);
        tracing::debug!("Running: {}", command);

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| IngestError::spawn(command.clone(), e))?;

        if !output.status.success() {
            return Err(IngestError::CommandFailed {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

/// Human-readable command line for logs and errors
pub fn describe_command(program: &str, args: &[OsString]) -> String {
    std::iter::once(program.to_string())
        .chain(args.iter().map(|arg| arg.to_string_lossy().into_owned()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
pub mod stub {
    use super::*;
    use parking_lot::Mutex;
    use std::path::PathBuf;

    /// Records every invocation and writes the file the real tool would have
    /// produced: the argument after `-o`, or else the last argument.
    #[derive(Debug, Default)]
    pub struct RecordingRunner {
        calls: Mutex<Vec<Vec<String>>>,
        fail_program: Option<(String, String)>,
    }

    impl RecordingRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make every call to `program` fail with `stderr`
        pub fn failing(program: &str, stderr: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_program: Some((program.to_string(), stderr.to_string())),
            }
        }

        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().clone()
        }

        fn output_path(args: &[String]) -> Option<PathBuf> {
            args.iter()
                .position(|arg| arg == "-o")
                .and_then(|i| args.get(i + 1))
                .or_else(|| args.last())
                .map(PathBuf::from)
        }
    }

    #[async_trait]
    impl CommandRunner for RecordingRunner {
        async fn run(&self, program: &str, args: &[OsString]) -> Result<()> {
            let args: Vec<String> = args
                .iter()
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect();

            let mut call = vec![program.to_string()];
            call.extend(args.iter().cloned());
            self.calls.lock().push(call);

            if let Some((failing, stderr)) = &self.fail_program {
                if failing == program {
                    return Err(IngestError::CommandFailed {
                        command: describe_command(program, &[]),
                        stderr: stderr.clone(),
                    });
                }
            }

            if let Some(path) = Self::output_path(&args) {
                tokio::fs::write(&path, format!("{} output", program))
                    .await
                    .map_err(|e| IngestError::io("writing stub output", e))?;
            }

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn describes_command_line() {
        let args = vec![OsString::from("-i"), OsString::from("in.mp4")];
        assert_eq!(describe_command("ffmpeg", &args), "ffmpeg -i in.mp4");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stderr_on_failure() {
        let args = vec![
            OsString::from("-c"),
            OsString::from("echo 'no such video' >&2; exit 3"),
        ];

        let err = SystemRunner.run("sh", &args).await.unwrap_err();
        assert_matches!(err, IngestError::CommandFailed { command, stderr } => {
            assert!(command.starts_with("sh -c"));
            assert_eq!(stderr, "no such video");
        });
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn succeeds_on_zero_exit() {
        let args = vec![OsString::from("-c"), OsString::from("exit 0")];
        SystemRunner.run("sh", &args).await.unwrap();
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let err = SystemRunner
            .run("final-scenes-no-such-program", &[])
            .await
            .unwrap_err();
        assert_matches!(err, IngestError::Spawn { .. });
    }
}
