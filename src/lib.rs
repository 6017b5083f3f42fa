//! Idempotent developer workstation provisioner for Ubuntu.
//!
//! `devinit` applies a fixed, ordered sequence of installation steps: system
//! package update, developer tools from pinned release archives or installer
//! scripts, personal configuration repositories, and desktop applications via
//! snap. Every guarded step checks the host before acting, so re-running the
//! sequence is always safe; steps whose target is already present are skipped.
//!
//! The sequence is fail-fast: the first step that errors aborts the run and
//! the host is left in whatever state the last successful step produced.
//! Re-running after the cause is fixed is the recovery mechanism.
//!
//! # Structure
//!
//! - [`step`] - the `Step` trait: a presence check plus one install action
//! - [`probe`] - the host observation layer (`HostProbe`), mockable in tests
//! - [`executor`] - runs the sequence and produces a structured run report
//! - [`steps`] - the fixed step list, in provisioning order
//! - [`config`] - pinned versions, URLs, and the snap list, with TOML override

pub mod config;
pub mod executor;
pub mod lock;
pub mod output;
pub mod probe;
pub mod step;
pub mod steps;
pub mod util;

pub use config::Config;
pub use executor::{plan, run};
pub use probe::{HostProbe, LiveProbe};
pub use step::{Outcome, Presence, RunReport, Step, StepContext, StepReport};
