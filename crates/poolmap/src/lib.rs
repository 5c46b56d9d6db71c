#![doc = include_str!("../README.md")]

mod collect;
mod config;
mod dispatch;
mod error;
mod job;
mod map;
mod mapped;
mod operation;
pub mod report;
mod worker;


pub use crate::config::*;
pub use crate::error::*;
pub use crate::map::*;
pub use crate::mapped::*;
pub use crate::operation::*;
pub use crate::report::{NoopReporter, Reporter, Summary, default_reporter};
#[cfg(feature = "tracing")]
pub use crate::report::LogReporter;
#[cfg(feature = "progress")]
pub use crate::report::{ProgressReporter, WithProgress};
