//! Step model for the provisioning sequence
//!
//! A step is one guarded install action: a presence check against the host,
//! and a single action that takes the target from absent to present. The check
//! observes the host through [`HostProbe`](crate::probe::HostProbe) only, so
//! skip detection can be tested without touching a real machine.
//!
//! Per-step lifecycle: absent -> installing -> installed, or absent ->
//! already-present. Nothing is ever updated in place or removed.

use crate::config::Config;
use crate::probe::HostProbe;
use anyhow::Result;
use std::path::PathBuf;

/// Result of a step's presence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence {
    /// The target already exists; the reason is shown in the skip message.
    Present(String),
    /// The target is missing and the step's action should run.
    Absent,
}

/// What happened to one step during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The action ran to completion.
    Installed,
    /// The check found the target already present; the action did not run.
    AlreadyPresent(String),
    /// The check or the action failed; the sequence stopped here.
    Failed(String),
}

/// One `(step, outcome)` pair in a run report.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub step: String,
    pub outcome: Outcome,
}

/// Structured record of a full run: every step up to and including a failure.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<StepReport>,
}

impl RunReport {
    /// The failing step, if the run stopped early.
    pub fn failure(&self) -> Option<&StepReport> {
        self.outcomes
            .iter()
            .find(|r| matches!(r.outcome, Outcome::Failed(_)))
    }

    pub fn succeeded(&self) -> bool {
        self.failure().is_none()
    }

    /// Number of steps whose action actually ran.
    pub fn installed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|r| r.outcome == Outcome::Installed)
            .count()
    }

    /// Number of steps skipped as already present.
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::AlreadyPresent(_)))
            .count()
    }
}

/// Everything a step action may touch besides the host itself.
pub struct StepContext<'a> {
    pub config: &'a Config,
    /// The user's home directory (overridable for tests).
    pub home: PathBuf,
    /// Scratch directory for downloads. Removed on success, kept on failure.
    pub staging: PathBuf,
    /// Host observation layer, for actions that need a mid-apply re-check.
    pub probe: &'a dyn HostProbe,
}

/// One guarded install action in the provisioning sequence.
pub trait Step {
    /// Short identifier used in reports and messages, e.g. "neovim".
    fn name(&self) -> &str;

    /// One-line description of the action, e.g. "Installing Neovim 0.10.3".
    fn summary(&self) -> String;

    /// Observe the host and decide whether the action is needed.
    ///
    /// Must not mutate the host.
    fn check(&self, probe: &dyn HostProbe) -> Result<Presence>;

    /// Perform the single install action. Only called when `check` returned
    /// [`Presence::Absent`].
    fn apply(&self, ctx: &StepContext) -> Result<()>;
}
