use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use rpdk_cli::{frontend, run, CliError};
use rpdk_core::{ParseError, RegistryError};
use serde_json::{json, Value};

// ── Captured stdout ─────────────────────────────────────────────────

#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> Vec<u8> {
        self.0.borrow().clone()
    }

    fn json(&self) -> Value {
        serde_json::from_slice(&self.contents()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn cfn(args: &[&str]) -> (Result<(), CliError>, SharedBuffer) {
    let out = SharedBuffer::default();
    let argv = std::iter::once("cfn").chain(args.iter().copied());
    let result = run(argv, out.clone());
    (result, out)
}

// ── Captured logs ───────────────────────────────────────────────────

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ── Front-end wiring ────────────────────────────────────────────────

#[test]
fn bundled_plugins_register_cleanly() {
    let frontend = frontend().unwrap();
    assert_eq!(frontend.languages(), &["typescript"]);
    let names: Vec<_> = frontend.parents().iter().map(|g| g.name).collect();
    assert_eq!(names, vec!["logging", "project"]);
}

#[test]
fn command_tree_is_consistent() {
    frontend().unwrap().command().debug_assert();
}

#[test]
fn registration_is_logged_at_debug() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, || frontend().unwrap());
    let text = logs.text();
    assert!(text.contains("Registered subcommand"));
    assert!(text.contains("Language plugin registered"));
}

#[test]
fn duplicate_parent_flag_is_rejected() {
    let err = rpdk_core::Frontend::builder("cfn", "")
        .parent(rpdk_cli::parents::parent_groups().remove(0))
        .unwrap()
        .parent(
            rpdk_core::ParentOptionGroup::new("extra")
                .option(rpdk_core::OptionSpec::count("noise", "verbose")),
        )
        .unwrap_err();
    assert!(matches!(err, RegistryError::ParentCollision { ref owner, .. } if owner == "logging"));
    assert_eq!(CliError::from(err).exit_code(), 1);
}

#[test]
fn plugin_cannot_be_registered_twice() {
    let mut builder = rpdk_core::Frontend::builder("cfn", "");
    builder.register(&rpdk_typescript::TypeScriptPlugin).unwrap();
    let err = builder.register(&rpdk_typescript::TypeScriptPlugin).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateSubcommand(_)));
    assert_eq!(CliError::from(err).exit_code(), 1);
}

// ── Hand-off document ───────────────────────────────────────────────

#[test]
fn bare_typescript_hands_off_defaults() {
    let (result, out) = cfn(&["typescript"]);
    result.unwrap();
    assert_eq!(
        out.json(),
        json!({
            "config": {
                "language": "typescript",
                "use_docker": false,
                "skip_npm_install": false,
                "verbose": 0,
                "type_name": null,
                "force": false
            },
            "settings": {"use_docker": false, "skip_npm_install": false}
        })
    );
}

#[test]
fn verbose_run_still_hands_off() {
    let (result, out) = cfn(&["typescript", "-vv"]);
    result.unwrap();
    assert_eq!(out.json()["config"]["verbose"], 2);
}

#[test]
fn flags_and_parent_options_hand_off() {
    let (result, out) = cfn(&[
        "typescript",
        "--use-docker",
        "--skip-npm-install",
        "--type-name",
        "Org::Service::Thing",
        "--force",
    ]);
    result.unwrap();
    let doc = out.json();
    assert_eq!(doc["config"]["language"], "typescript");
    assert_eq!(doc["config"]["use_docker"], true);
    assert_eq!(doc["config"]["skip_npm_install"], true);
    assert_eq!(doc["config"]["type_name"], "Org::Service::Thing");
    assert_eq!(doc["config"]["force"], true);
    assert_eq!(doc["settings"], json!({"use_docker": true, "skip_npm_install": true}));
}

// ── Failures ────────────────────────────────────────────────────────

#[test]
fn conflicting_docker_flags_exit_nonzero_without_output() {
    let (result, out) = cfn(&["typescript", "--use-docker", "--no-docker"]);
    let err = result.unwrap_err();
    assert!(matches!(err, CliError::Parse(ParseError::ConflictingFlags { .. })));
    assert_eq!(err.exit_code(), 2);
    let message = err.to_string();
    assert!(message.contains("--use-docker"));
    assert!(message.contains("--no-docker"));
    assert!(out.contents().is_empty());
}

#[test]
fn unknown_language_is_usage_error() {
    let (result, out) = cfn(&["cobol"]);
    let err = result.unwrap_err();
    assert!(matches!(err, CliError::Parse(ParseError::Usage(_))));
    assert_ne!(err.exit_code(), 0);
    assert!(out.contents().is_empty());
}

#[test]
fn help_request_exits_zero() {
    let (result, out) = cfn(&["--help"]);
    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 0);
    assert!(err.to_string().contains("Supported languages: typescript"));
    assert!(out.contents().is_empty());
}
