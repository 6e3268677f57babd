// src/lib.rs
//! Host diagnostics: a registry of collectors and the dispatcher that picks
//! which of them an invocation runs.

pub mod collector;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod presenter;
pub mod registry;

pub use dispatcher::{Dispatch, Dispatcher, FailurePolicy, Plan};
pub use error::{CollectorFailure, DiagError};
pub use registry::{Collector, Registry};
