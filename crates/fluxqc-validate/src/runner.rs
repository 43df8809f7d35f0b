//! Harness that runs a set of checks over one dataset.

use std::time::Instant;

use tracing::{info, info_span, warn};

use fluxqc_model::{Severity, Status};

use crate::builder::MessageArgs;
use crate::check::{Check, CheckContext};
use crate::checks::default_checks;
use crate::error::{CheckError, StatusError};

/// Ordered collection of checks.
pub struct CheckRunner {
    checks: Vec<Box<dyn Check>>,
}

impl Default for CheckRunner {
    fn default() -> Self {
        Self::with_default_checks()
    }
}

impl CheckRunner {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Runner with every built-in check in report order.
    pub fn with_default_checks() -> Self {
        Self {
            checks: default_checks(),
        }
    }

    pub fn register(&mut self, check: Box<dyn Check>) {
        self.checks.push(check);
    }

    #[must_use]
    pub fn with(mut self, check: impl Check + 'static) -> Self {
        self.register(Box::new(check));
        self
    }

    pub fn check_ids(&self) -> Vec<&'static str> {
        self.checks.iter().map(|check| check.id()).collect()
    }

    /// Run every check in registration order.
    ///
    /// A data-shape failure becomes a FATAL status for that check and the
    /// run continues. A status error aborts the run.
    pub fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Status>, StatusError> {
        let mut statuses = Vec::new();
        for check in &self.checks {
            let span = info_span!("check", id = check.id());
            let _guard = span.enter();
            let start = Instant::now();
            match check.run(ctx) {
                Ok(mut produced) => {
                    let worst = Severity::aggregate(produced.iter().map(|status| status.severity));
                    info!(
                        statuses = produced.len(),
                        severity = %worst,
                        duration_ms = start.elapsed().as_millis(),
                        "check finished"
                    );
                    statuses.append(&mut produced);
                }
                Err(CheckError::DataShape { reason }) => {
                    warn!(%reason, "check could not run");
                    let args = MessageArgs::new().with("reason", &reason);
                    statuses.push(ctx.builder.single_msg(check.id(), Severity::Fatal, &args)?);
                }
                Err(CheckError::Status(error)) => return Err(error),
            }
        }
        Ok(statuses)
    }
}
