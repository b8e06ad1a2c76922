//! Per-server restart-and-verify.
//!
//! [`machine`] holds the I/O-free state machine; [`RestartVerifier`] drives it against an
//! [`InstanceControl`](crate::InstanceControl) and the tokio timer.

pub mod machine;
pub use machine::{Action, Event, Verifier, VerifierState};

mod policy;
pub use policy::{DEFAULT_RECHECK_STATUSES, FIRST_CHECK_DELAY, RetryPolicy, SECOND_CHECK_DELAY};

mod driver;
pub use driver::RestartVerifier;
