//! Provisioning sequence executor
//!
//! Runs the fixed step list top to bottom under a fail-fast policy: the first
//! check or apply error stops the run, and later steps don't execute at all.
//! The return value is a structured list of `(step, outcome)` pairs rather
//! than a bare exit code, so callers (and tests) can see exactly how far the
//! run got.

use crate::output;
use crate::probe::HostProbe;
use crate::step::{Outcome, Presence, RunReport, Step, StepContext, StepReport};
use anyhow::Result;

/// Apply the sequence. Stops at the first failure; the report records every
/// step up to and including it.
pub fn run(steps: &[Box<dyn Step>], ctx: &StepContext) -> RunReport {
    let mut report = RunReport::default();
    let total = steps.len();

    for (i, step) in steps.iter().enumerate() {
        match step.check(ctx.probe) {
            Ok(Presence::Present(reason)) => {
                output::skip(&format!("{}: {}, skipping", step.name(), reason));
                report.outcomes.push(StepReport {
                    step: step.name().to_string(),
                    outcome: Outcome::AlreadyPresent(reason),
                });
            }
            Ok(Presence::Absent) => {
                output::action_numbered(i + 1, total, &step.summary());
                match step.apply(ctx) {
                    Ok(()) => report.outcomes.push(StepReport {
                        step: step.name().to_string(),
                        outcome: Outcome::Installed,
                    }),
                    Err(e) => {
                        let msg = format!("{:#}", e);
                        output::error(&format!("{} failed: {}", step.name(), msg));
                        report.outcomes.push(StepReport {
                            step: step.name().to_string(),
                            outcome: Outcome::Failed(msg),
                        });
                        break;
                    }
                }
            }
            Err(e) => {
                let msg = format!("{:#}", e);
                output::error(&format!("{} check failed: {}", step.name(), msg));
                report.outcomes.push(StepReport {
                    step: step.name().to_string(),
                    outcome: Outcome::Failed(msg),
                });
                break;
            }
        }
    }

    report
}

/// Run only the checks, applying nothing. Returns what each step would do.
pub fn plan(steps: &[Box<dyn Step>], probe: &dyn HostProbe) -> Result<Vec<(String, Presence)>> {
    let mut entries = Vec::with_capacity(steps.len());
    for step in steps {
        let presence = step.check(probe)?;
        entries.push((step.name().to_string(), presence));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use anyhow::{Result, bail};
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    struct NullProbe;

    impl HostProbe for NullProbe {
        fn command_on_path(&self, _name: &str) -> bool {
            false
        }
        fn path_exists(&self, _path: &Path) -> bool {
            false
        }
        fn snap_installed(&self, _name: &str) -> Result<bool> {
            Ok(false)
        }
        fn login_shell_registered(&self, _shell_path: &str) -> Result<bool> {
            Ok(false)
        }
    }

    /// Scripted step that records check/apply calls in a shared log.
    struct ScriptedStep {
        name: &'static str,
        presence: Presence,
        fail_apply: bool,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Step for ScriptedStep {
        fn name(&self) -> &str {
            self.name
        }
        fn summary(&self) -> String {
            format!("step {}", self.name)
        }
        fn check(&self, _probe: &dyn HostProbe) -> Result<Presence> {
            self.log.borrow_mut().push(format!("check:{}", self.name));
            Ok(self.presence.clone())
        }
        fn apply(&self, _ctx: &StepContext) -> Result<()> {
            self.log.borrow_mut().push(format!("apply:{}", self.name));
            if self.fail_apply {
                bail!("scripted failure");
            }
            Ok(())
        }
    }

    fn scripted(
        log: &Rc<RefCell<Vec<String>>>,
        name: &'static str,
        presence: Presence,
        fail_apply: bool,
    ) -> Box<dyn Step> {
        Box::new(ScriptedStep {
            name,
            presence,
            fail_apply,
            log: Rc::clone(log),
        })
    }

    fn test_ctx<'a>(config: &'a Config, probe: &'a dyn HostProbe) -> StepContext<'a> {
        StepContext {
            config,
            home: PathBuf::from("/home/test"),
            staging: std::env::temp_dir(),
            probe,
        }
    }

    #[test]
    fn test_all_absent_steps_apply_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let steps = vec![
            scripted(&log, "a", Presence::Absent, false),
            scripted(&log, "b", Presence::Absent, false),
        ];
        let config = Config::default();
        let probe = NullProbe;
        let report = run(&steps, &test_ctx(&config, &probe));

        assert!(report.succeeded());
        assert_eq!(report.installed_count(), 2);
        assert_eq!(
            *log.borrow(),
            vec!["check:a", "apply:a", "check:b", "apply:b"]
        );
    }

    #[test]
    fn test_present_steps_skip_apply() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let steps = vec![
            scripted(&log, "a", Presence::Present("there".to_string()), false),
            scripted(&log, "b", Presence::Absent, false),
        ];
        let config = Config::default();
        let probe = NullProbe;
        let report = run(&steps, &test_ctx(&config, &probe));

        assert!(report.succeeded());
        assert_eq!(report.installed_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(*log.borrow(), vec!["check:a", "check:b", "apply:b"]);
    }

    #[test]
    fn test_fail_fast_stops_sequence() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let steps = vec![
            scripted(&log, "a", Presence::Absent, false),
            scripted(&log, "b", Presence::Absent, true),
            scripted(&log, "c", Presence::Absent, false),
        ];
        let config = Config::default();
        let probe = NullProbe;
        let report = run(&steps, &test_ctx(&config, &probe));

        assert!(!report.succeeded());
        let failure = report.failure().unwrap();
        assert_eq!(failure.step, "b");
        assert!(matches!(failure.outcome, Outcome::Failed(_)));
        // Step c never ran - not even its check.
        assert_eq!(
            *log.borrow(),
            vec!["check:a", "apply:a", "check:b", "apply:b"]
        );
        assert_eq!(report.outcomes.len(), 2);
    }

    #[test]
    fn test_plan_checks_everything_applies_nothing() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let steps = vec![
            scripted(&log, "a", Presence::Present("there".to_string()), false),
            scripted(&log, "b", Presence::Absent, false),
        ];
        let probe = NullProbe;
        let entries = plan(&steps, &probe).unwrap();

        assert_eq!(entries.len(), 2);
        assert!(matches!(entries[0].1, Presence::Present(_)));
        assert_eq!(entries[1].1, Presence::Absent);
        assert_eq!(*log.borrow(), vec!["check:a", "check:b"]);
    }
}
