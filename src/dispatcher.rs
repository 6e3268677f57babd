// src/dispatcher.rs
//! Turns an invocation into zero or more collector calls.
//!
//! Resolution happens in two steps. [`Plan::resolve`] looks at the raw tokens
//! and picks help, run-all or run-selected; [`Dispatcher::run`] then writes the
//! header and drives the registry.

use std::io::Write;

use tracing::{debug, info};

use crate::error::{CollectorFailure, DiagError};
use crate::presenter;
use crate::registry::{Collector, Registry};

const HELP_FLAGS: [&str; 2] = ["-h", "-help"];
const ALL_FLAGS: [&str; 2] = ["-a", "-all"];

/// What an invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan<'a> {
    Help,
    All,
    Selected(&'a [String]),
}

impl<'a> Plan<'a> {
    /// The first utility token in left-to-right order decides; `-a -h` runs
    /// everything while `-h -a` only prints help.
    pub fn resolve(tokens: &'a [String]) -> Self {
        if tokens.is_empty() {
            return Plan::All;
        }

        for token in tokens {
            if HELP_FLAGS.contains(&token.as_str()) {
                return Plan::Help;
            }
            if ALL_FLAGS.contains(&token.as_str()) {
                return Plan::All;
            }
        }

        Plan::Selected(tokens)
    }
}

/// How collector failures are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failure.
    #[default]
    Abort,
    /// Run everything selected and report all failures at the end.
    Continue,
}

/// Outcome of a successful run; `invoked` counts collectors that completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Help,
    All { invoked: usize },
    Selected { invoked: usize },
}

pub struct Dispatcher<'r> {
    registry: &'r Registry,
    policy: FailurePolicy,
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            policy: FailurePolicy::Abort,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolves `tokens` and runs the matching collectors, writing to `out`.
    pub fn run(&self, tokens: &[String], out: &mut dyn Write) -> Result<Dispatch, DiagError> {
        let plan = Plan::resolve(tokens);
        debug!(?plan, "resolved invocation");

        match plan {
            Plan::Help => {
                out.write_all(presenter::help_text().as_bytes())?;
                Ok(Dispatch::Help)
            }
            Plan::All => {
                presenter::header(out)?;
                let mut failures = Vec::new();
                let mut invoked = 0;
                for (selector, collector) in self.registry.entries() {
                    if self.invoke(selector, collector, out, &mut failures)? {
                        invoked += 1;
                    }
                }
                self.finish(failures, Dispatch::All { invoked })
            }
            Plan::Selected(tokens) => {
                presenter::header(out)?;
                let mut failures = Vec::new();
                let mut invoked = 0;
                for token in tokens {
                    match self.registry.lookup(token) {
                        Some(collector) => {
                            if self.invoke(token, collector, out, &mut failures)? {
                                invoked += 1;
                            }
                        }
                        None => debug!(selector = %token, "ignoring unknown selector"),
                    }
                }
                self.finish(failures, Dispatch::Selected { invoked })
            }
        }
    }

    /// Runs one collector; `Ok(false)` means it failed and was recorded.
    /// Output errors abort under either policy.
    fn invoke(
        &self,
        selector: &str,
        collector: &dyn Collector,
        out: &mut dyn Write,
        failures: &mut Vec<CollectorFailure>,
    ) -> Result<bool, DiagError> {
        debug!(selector, "running collector");
        match collector.collect(out) {
            Ok(()) => Ok(true),
            Err(error)
                if self.policy == FailurePolicy::Continue
                    && !matches!(error, DiagError::Output(_)) =>
            {
                info!(selector, %error, "collector failed, continuing");
                failures.push(CollectorFailure {
                    selector: selector.to_string(),
                    error,
                });
                Ok(false)
            }
            Err(error) => Err(error),
        }
    }

    fn finish(
        &self,
        failures: Vec<CollectorFailure>,
        dispatch: Dispatch,
    ) -> Result<Dispatch, DiagError> {
        if failures.is_empty() {
            Ok(dispatch)
        } else {
            Err(DiagError::Collectors(failures))
        }
    }
}
