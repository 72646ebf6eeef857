//! Named pipeline steps
//!
//! Each step turns a typed input into a typed output. The pipeline chains
//! them by value, so a step cannot run before the step that produces its
//! input.

use crate::error::{IngestError, Result};
use std::fmt;
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepId {
    Download,
    Trim,
    ExtractAudio,
    ExtractFrame,
    Publish,
}

impl StepId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Download => "download",
            StepId::Trim => "trim",
            StepId::ExtractAudio => "extract-audio",
            StepId::ExtractFrame => "extract-frame",
            StepId::Publish => "publish",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub trait Step<Input, Output> {
    fn id(&self) -> StepId;
    fn description(&self) -> String;

    fn run(&self, input: Input) -> impl Future<Output = Result<Output>> + Send;
}

/// Run one step, logging progress and tagging any failure with the step
pub async fn execute_step<I, O, S>(step: &S, input: I) -> Result<O>
where
    S: Step<I, O>,
{
    tracing::info!("🔍 [{}] {}", step.id(), step.description());

    match step.run(input).await {
        Ok(output) => {
            tracing::info!("   ✅ [{}] complete", step.id());
            Ok(output)
        }
        Err(source) => {
            tracing::error!("   ❌ [{}] failed: {}", step.id(), source);
            Err(IngestError::Step {
                step: step.id(),
                source: Box::new(source),
            })
        }
    }
}
