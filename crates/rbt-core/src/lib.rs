pub mod error;
pub use error::CoreError;
pub mod control;
pub use control::{InstanceControl, InstanceDirectory};
pub mod directory;
pub use directory::Directory;
pub mod verifier;
pub use verifier::{RestartVerifier, RetryPolicy};
pub mod source;
pub use source::{BatchSource, JsonDirSource};
pub mod report;
pub use report::Reporter;
pub mod orchestrator;
pub use orchestrator::BatchOrchestrator;

#[cfg(test)]
pub(crate) mod testing;
