use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use sysdiag::presenter::{self, divider, header};
use sysdiag::{Collector, DiagError, Dispatch, Dispatcher, FailurePolicy, Registry};

type CallLog = Rc<RefCell<Vec<String>>>;

/// Collector that records each call and prints a one-line block.
struct Probe {
    name: &'static str,
    log: CallLog,
    fail: bool,
}

impl Collector for Probe {
    fn collect(&self, out: &mut dyn Write) -> Result<(), DiagError> {
        self.log.borrow_mut().push(self.name.to_string());
        if self.fail {
            return Err(DiagError::unavailable(self.name, "simulated outage"));
        }
        writeln!(out, "{} block", self.name)?;
        divider(out)?;
        Ok(())
    }
}

/// Builds -vm, -cp, -pp, -ni, -c probes; names listed in `failing` fail.
fn probe_registry(failing: &[&str]) -> (Registry, CallLog) {
    let log = CallLog::default();
    let mut registry = Registry::new();
    for name in ["-vm", "-cp", "-pp", "-ni", "-c"] {
        registry
            .register(
                name,
                Probe {
                    name,
                    log: Rc::clone(&log),
                    fail: failing.contains(&name),
                },
            )
            .unwrap();
    }
    (registry, log)
}

fn tokens(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn run(registry: &Registry, raw: &[&str]) -> (Result<Dispatch, DiagError>, String) {
    let mut out = Vec::new();
    let result = Dispatcher::new(registry).run(&tokens(raw), &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn header_text() -> String {
    let mut buf = Vec::new();
    header(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

fn calls(log: &CallLog) -> Vec<String> {
    log.borrow().clone()
}

#[test]
fn test_help_prints_only_help() {
    let cases: [&[&str]; 4] = [&["-h"], &["-help"], &["-cp", "-h", "-vm"], &["-h", "-a"]];
    for raw in cases {
        let (registry, log) = probe_registry(&[]);
        let (result, output) = run(&registry, raw);

        assert_eq!(result.unwrap(), Dispatch::Help);
        assert_eq!(output, presenter::help_text());
        assert!(calls(&log).is_empty(), "no collector may run for {raw:?}");
    }
}

#[test]
fn test_all_before_help_runs_everything() {
    let (registry, log) = probe_registry(&[]);
    let (result, output) = run(&registry, &["-a", "-h"]);

    assert_eq!(result.unwrap(), Dispatch::All { invoked: 5 });
    assert_eq!(calls(&log), ["-vm", "-cp", "-pp", "-ni", "-c"]);
    assert!(output.starts_with(&header_text()));
    assert!(!output.contains("-h/-help"));
}

#[test]
fn test_all_ignores_remaining_tokens() {
    let (registry, log) = probe_registry(&[]);
    let (result, _) = run(&registry, &["-cp", "-all", "-cp", "-c"]);

    assert_eq!(result.unwrap(), Dispatch::All { invoked: 5 });
    assert_eq!(calls(&log), ["-vm", "-cp", "-pp", "-ni", "-c"]);
}

#[test]
fn test_empty_invocation_matches_all_flag() {
    let (registry, log) = probe_registry(&[]);
    let (empty_result, empty_output) = run(&registry, &[]);
    let (all_result, all_output) = run(&registry, &["-a"]);

    assert_eq!(empty_result.unwrap(), all_result.unwrap());
    assert_eq!(empty_output, all_output);
    assert_eq!(calls(&log).len(), 10);
}

#[test]
fn test_unknown_selectors_print_only_header() {
    let (registry, log) = probe_registry(&[]);
    let (result, output) = run(&registry, &["-zz", "--help", "cp", "-A"]);

    assert_eq!(result.unwrap(), Dispatch::Selected { invoked: 0 });
    assert_eq!(output, header_text());
    assert!(calls(&log).is_empty());
}

#[test]
fn test_selected_run_in_given_order() {
    let (registry, log) = probe_registry(&[]);
    let (result, output) = run(&registry, &["-c", "-nope", "-vm"]);

    assert_eq!(result.unwrap(), Dispatch::Selected { invoked: 2 });
    assert_eq!(calls(&log), ["-c", "-vm"]);

    let c_at = output.find("-c block").unwrap();
    let vm_at = output.find("-vm block").unwrap();
    assert!(c_at < vm_at);
    assert_eq!(output.matches("SYSTEM DIAGNOSTICS").count(), 1);
}

#[test]
fn test_duplicate_selector_runs_twice() {
    let (registry, log) = probe_registry(&[]);
    let (result, output) = run(&registry, &["-cp", "-cp"]);

    assert_eq!(result.unwrap(), Dispatch::Selected { invoked: 2 });
    assert_eq!(calls(&log), ["-cp", "-cp"]);
    assert_eq!(output.matches("-cp block").count(), 2);
}

#[test]
fn test_failure_aborts_remaining_collectors() {
    let (registry, log) = probe_registry(&["-pp"]);
    let (result, output) = run(&registry, &[]);

    let err = result.unwrap_err();
    assert!(matches!(err, DiagError::Unavailable { ref operation, .. } if operation == "-pp"));
    assert_eq!(calls(&log), ["-vm", "-cp", "-pp"]);
    assert!(output.contains("-cp block"));
    assert!(!output.contains("-ni block"));
    assert!(!output.contains("-c block"));
}

#[test]
fn test_failure_in_selected_run() {
    let (registry, log) = probe_registry(&["-vm"]);
    let (result, output) = run(&registry, &["-vm", "-cp"]);

    assert!(result.is_err());
    assert_eq!(calls(&log), ["-vm"]);
    assert_eq!(output, header_text());
}

#[test]
fn test_keep_going_reports_every_failure() {
    let (registry, log) = probe_registry(&["-cp", "-c"]);
    let mut out = Vec::new();
    let result = Dispatcher::new(&registry)
        .with_policy(FailurePolicy::Continue)
        .run(&[], &mut out);

    assert_eq!(calls(&log).len(), 5);
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("-ni block"));

    match result {
        Err(DiagError::Collectors(failures)) => {
            let failed: Vec<&str> = failures.iter().map(|f| f.selector.as_str()).collect();
            assert_eq!(failed, ["-cp", "-c"]);
            assert!(failures[0].to_string().contains("simulated outage"));
        }
        other => panic!("expected collected failures, got {other:?}"),
    }
}

#[test]
fn test_keep_going_without_failures_succeeds() {
    let (registry, _) = probe_registry(&[]);
    let mut out = Vec::new();
    let result = Dispatcher::new(&registry)
        .with_policy(FailurePolicy::Continue)
        .run(&tokens(&["-ni"]), &mut out);

    assert_eq!(result.unwrap(), Dispatch::Selected { invoked: 1 });
}

/// Writer whose reader has gone away.
struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_closed_output_stops_keep_going_run() {
    let (registry, log) = probe_registry(&[]);
    let result = Dispatcher::new(&registry)
        .with_policy(FailurePolicy::Continue)
        .run(&tokens(&["-vm", "-cp"]), &mut ClosedPipe);

    let err = result.unwrap_err();
    assert!(err.is_broken_pipe());
    // the header write fails before any collector runs
    assert!(calls(&log).is_empty());
}

#[test]
fn test_keep_going_counts_only_completed() {
    let (registry, _) = probe_registry(&["-cp"]);
    let mut out = Vec::new();
    let result = Dispatcher::new(&registry)
        .with_policy(FailurePolicy::Continue)
        .run(&tokens(&["-vm", "-ni"]), &mut out);

    assert_eq!(result.unwrap(), Dispatch::Selected { invoked: 2 });
}
