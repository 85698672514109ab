//! Helpers to run the `trip-sat` binary in integration tests.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::io::Read;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use serde_json::Value;
use wait_timeout::ChildExt;

pub(crate) const MUNICH: &str = r#"{
    "destination": "Munich",
    "budget": 800,
    "duration": 3,
    "preferences": ["culture"],
    "hotels": [{"price_per_night": 90}],
    "attractions": [{"name": "Marienplatz"}]
}"#;

pub(crate) const ZURICH: &str = r#"{
    "destination": "Zurich",
    "budget": 200,
    "duration": 5,
    "preferences": ["luxury"],
    "hotels": [{"price_per_night": 300}],
    "attractions": [{"name": "Lake Zurich"}]
}"#;

pub(crate) const BERLIN: &str = r#"{
    "destination": "Berlin",
    "budget": 300,
    "duration": 2,
    "preferences": ["budget"],
    "hotels": [{"price_per_night": 60}],
    "attractions": [{"name": "Brandenburg Gate"}]
}"#;

pub(crate) const VIENNA: &str = r#"{
    "destination": "Vienna",
    "budget": 1200,
    "duration": 4,
    "preferences": ["culture", "dining"],
    "hotels": [
        {"price_per_night": 120},
        {"price_per_night": 180},
        {"price_per_night": 250}
    ],
    "attractions": [
        {"name": "Schönbrunn Palace"},
        {"name": "Belvedere Palace"},
        {"name": "St. Stephen's Cathedral"}
    ]
}"#;

#[derive(Debug)]
pub(crate) struct Run {
    pub(crate) exit_code: Option<i32>,
    pub(crate) stdout: String,
    pub(crate) stderr: String,
}

impl Run {
    /// The stdout of the run, parsed as a single JSON document.
    pub(crate) fn document(&self) -> Value {
        serde_json::from_str(self.stdout.trim()).expect("stdout is a single JSON document")
    }
}

pub(crate) fn run_trip_sat<'a>(args: impl IntoIterator<Item = &'a str>) -> Run {
    run(args, true)
}

/// Runs trip-sat with the read end of its stdout closed straight after spawning.
pub(crate) fn run_trip_sat_with_closed_stdout<'a>(
    args: impl IntoIterator<Item = &'a str>,
) -> Run {
    run(args, false)
}

fn run<'a>(args: impl IntoIterator<Item = &'a str>, read_stdout: bool) -> Run {
    const TEST_TIMEOUT: Duration = Duration::from_secs(60);

    let binary = PathBuf::from(env!("CARGO_BIN_EXE_trip-sat"));

    let mut child = Command::new(binary)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run trip-sat.");

    // The pipes are drained while waiting, so a chatty run cannot fill them and stall.
    let stdout = child.stdout.take().expect("stdout is piped");
    let stdout = if read_stdout {
        Some(drain(stdout))
    } else {
        drop(stdout);
        None
    };
    let stderr = drain(child.stderr.take().expect("stderr is piped"));

    let status = match child.wait_timeout(TEST_TIMEOUT) {
        Ok(None) => {
            let _ = child.kill();
            panic!("trip-sat took more than {} seconds", TEST_TIMEOUT.as_secs())
        }
        Ok(Some(status)) => status,
        Err(e) => panic!("error waiting for trip-sat: {e}"),
    };

    Run {
        exit_code: status.code(),
        stdout: stdout
            .map(|reader| reader.join().expect("stdout reader finished"))
            .unwrap_or_default(),
        stderr: stderr.join().expect("stderr reader finished"),
    }
}

fn drain(mut pipe: impl Read + Send + 'static) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut output = String::new();
        let _ = pipe.read_to_string(&mut output).expect("output is UTF-8");
        output
    })
}
