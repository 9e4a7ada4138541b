pub mod aggregate;
pub mod chart;
pub mod config;
pub mod error;
pub mod grammar;
pub mod input;
pub mod report;
pub mod sample;
pub mod series;

pub use error::{DecodeError, InputError};
pub use grammar::{CaseKey, DecodedCase, Grammar, ProblemSize, Workload};
