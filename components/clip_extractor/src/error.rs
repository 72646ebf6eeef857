use crate::step::StepId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("required tool not found: {0}")]
    ToolNotFound(&'static str),

    #[error("invalid clip request: {0}")]
    InvalidRequest(String),

    #[error("command execution failed: {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command returned non-zero exit code: {command}\nStderr: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("expected output {path} was not produced")]
    MissingOutput { path: PathBuf },

    #[error("io error during {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Catalog(#[from] film_catalog::CatalogError),

    #[error("step '{step}' failed")]
    Step {
        step: StepId,
        #[source]
        source: Box<IngestError>,
    },
}

impl IngestError {
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        IngestError::Io {
            operation: operation.into(),
            source,
        }
    }

    pub fn spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        IngestError::Spawn {
            command: command.into(),
            source,
        }
    }

    /// Step that failed, if the error came out of the pipeline
    pub fn failed_step(&self) -> Option<StepId> {
        match self {
            IngestError::Step { step, .. } => Some(*step),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
