#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod policy;
pub mod time;

pub use error::Error;
pub use policy::{AssessmentPolicy, PolicyError, ProgressionPolicy};
pub use time::Clock;
