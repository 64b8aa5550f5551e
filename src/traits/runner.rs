use async_trait::async_trait;

use crate::chain::Step;

/// A step execution failure, carried as the user-readable message that is
/// recorded on the step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerError(pub String);

impl std::fmt::Display for RunnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for RunnerError {}

/// The seam between the chain executor and whatever actually produces the
/// edited image. The production implementation calls an external
/// image-generation provider; tests substitute stubs. The executor treats
/// the outcome as authoritative - there is no other success/failure source.
#[async_trait]
pub trait StepRunner: Send + Sync {
    /// Run one step against the image entering it, returning the produced
    /// image as a base64 data URL.
    async fn run(&self, step: &Step, source_image: Option<&str>) -> Result<String, RunnerError>;
}
