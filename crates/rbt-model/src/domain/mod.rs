mod instance;
pub use instance::{Instance, InstanceId};

mod batch;
pub use batch::{Batch, BatchReport};

mod outcome_status;
pub use outcome_status::OutcomeStatus;

mod outcome;
pub use outcome::Outcome;

/// Human-assigned instance label, used as the key in batch definitions.
pub type Label = String;

mod clock;
pub use clock::Clock;
