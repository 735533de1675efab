//! Storage scenario: create a bucket, upload a file, read it back every way
//! the API offers, update it and delete it.

pub mod assertions;
pub mod report;
pub mod runner;
pub mod scenario;

pub use report::{StepStatus, SuiteReport};
pub use runner::SuiteRunner;
pub use scenario::{Scenario, StepId};
