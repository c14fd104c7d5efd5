#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` is the command-line front-end of `lpc-bb-test`. It parses the
//! arguments, configures logging, resolves the probe selection, runs the
//! probes against the two device nodes, and prints a report.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for standard
//! output and error and returns the process exit status, so the binary stays a
//! thin wrapper and tests can drive the whole front-end in memory. Parsing uses
//! a [`clap`](https://docs.rs/clap/) command definition with the built-in help
//! and version flags disabled; both are rendered from static text instead.
//!
//! # Invariants
//!
//! - `run` never panics; configuration problems are reported on standard
//!   error with exit status `1`.
//! - Fewer than two device paths prints the usage line on standard error and
//!   returns `1`.
//! - After a run the status is `0` when no probe failed and `1` otherwise.
//!   Inconclusive probes count as failures only with `--strict`.
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run(["lpc-bb-test", "--list"], &mut stdout, &mut stderr);
//!
//! assert_eq!(status, 0);
//! assert!(String::from_utf8_lossy(&stdout).contains("loopback"));
//! assert!(stderr.is_empty());
//! ```

mod arguments;
mod help;
mod report;
mod size;

use std::ffi::OsString;
use std::io::{self, BufReader, Write};

use device::StreamPair;
use logging::{VerbosityConfig, trace_summary};
use probes::{
    InteractivePacer, NoPacing, Pacer, ProbeContext, ProbeRunner, ProbeSettings, Selection,
    default_probes,
};

use crate::arguments::{ParsedArgs, parse_args};
use crate::help::{HELP_TEXT, USAGE, VERSION_TEXT};
use crate::report::{render_probe_list, render_summary};
use crate::size::{parse_buffer_size_argument, parse_size_argument};

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Runs the harness front-end and returns the process exit status.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdout, stderr),
        Err(error) => {
            let rendered = error.render().to_string();
            let _ = write!(stderr, "lpc-bb-test: {}", rendered.trim_start_matches("error: "));
            if !rendered.ends_with('\n') {
                let _ = writeln!(stderr);
            }
            1
        }
    }
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    if parsed.show_help {
        return i32::from(stdout.write_all(HELP_TEXT.as_bytes()).is_err());
    }
    if parsed.show_version {
        return i32::from(stdout.write_all(VERSION_TEXT.as_bytes()).is_err());
    }
    if parsed.list {
        return i32::from(render_probe_list(stdout, default_probes()).is_err());
    }

    let mut verbosity = VerbosityConfig::from_verbose_level(parsed.verbosity);
    for flags in &parsed.debug {
        if let Err(message) = verbosity.apply_flags(flags) {
            return fail(stderr, &message);
        }
    }

    let [input, output] = match <[OsString; 2]>::try_from(parsed.devices) {
        Ok(devices) => devices,
        Err(devices) => {
            if devices.len() > 2 {
                let _ = writeln!(stderr, "lpc-bb-test: expected exactly two device paths");
            }
            let _ = stderr.write_all(USAGE.as_bytes());
            return 1;
        }
    };

    let runner = match ProbeRunner::from_selection(
        &Selection::default()
            .with_only(parsed.only)
            .with_skip(parsed.skip),
    ) {
        Ok(runner) => runner,
        Err(error) => return fail(stderr, &error.to_string()),
    };

    let mut settings = ProbeSettings::default();
    if let Some(value) = parsed.large_write_size {
        match parse_buffer_size_argument(&value, "--large-write-size") {
            Ok(size) => settings.large_write_size = size,
            Err(error) => return fail(stderr, &error.to_string()),
        }
    }
    if let Some(value) = parsed.write_ceiling {
        match parse_size_argument(&value, "--write-ceiling") {
            Ok(ceiling) => settings.write_ceiling = ceiling,
            Err(error) => return fail(stderr, &error.to_string()),
        }
    }

    // A subscriber may already be installed when embedded or under test.
    let _ = logging::init_tracing_from_env(verbosity);

    let streams = StreamPair::new(input, output);
    trace_summary!(
        "testing input {} and output {}",
        streams.input().display(),
        streams.output().display()
    );

    let pacer: Box<dyn Pacer> = if parsed.interactive {
        Box::new(InteractivePacer::new(BufReader::new(io::stdin()), io::stderr()))
    } else {
        Box::new(NoPacing)
    };

    let summary = runner.run(&ProbeContext::new(&streams, &settings, pacer.as_ref()));
    if render_summary(stdout, &summary, parsed.strict).is_err() {
        return 1;
    }
    i32::from(!summary.is_success(parsed.strict))
}

fn fail<Err: Write>(stderr: &mut Err, message: &str) -> i32 {
    let _ = writeln!(stderr, "lpc-bb-test: {message}");
    1
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::{DEV_NULL, file_in, scratch_dir};

    fn run_with_args<I, S>(args: I) -> (i32, String, String)
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = run(args, &mut stdout, &mut stderr);
        (
            code,
            String::from_utf8(stdout).expect("utf8 stdout"),
            String::from_utf8(stderr).expect("utf8 stderr"),
        )
    }

    #[test]
    fn help_flag_renders_static_help() {
        let (code, stdout, stderr) = run_with_args(["lpc-bb-test", "--help"]);
        assert_eq!(code, 0);
        assert_eq!(stdout, HELP_TEXT);
        assert!(stderr.is_empty());
    }

    #[test]
    fn version_flag_renders_banner() {
        let (code, stdout, _) = run_with_args(["lpc-bb-test", "-V"]);
        assert_eq!(code, 0);
        assert_eq!(stdout, VERSION_TEXT);
    }

    #[test]
    fn missing_devices_prints_usage() {
        let (code, stdout, stderr) = run_with_args(["lpc-bb-test", "/dev/lpc_in"]);
        assert_eq!(code, 1);
        assert!(stdout.is_empty());
        assert_eq!(stderr, USAGE);
    }

    #[test]
    fn extra_devices_are_rejected() {
        let (code, _, stderr) = run_with_args(["lpc-bb-test", "a", "b", "c"]);
        assert_eq!(code, 1);
        assert!(stderr.contains("exactly two device paths"));
        assert!(stderr.ends_with(USAGE));
    }

    #[test]
    fn list_needs_no_devices() {
        let (code, stdout, _) = run_with_args(["lpc-bb-test", "--list"]);
        assert_eq!(code, 0);
        assert_eq!(stdout.lines().count(), default_probes().len());
    }

    #[test]
    fn unknown_probe_is_a_configuration_error() {
        let (code, stdout, stderr) =
            run_with_args(["lpc-bb-test", "--probe=loopbak", DEV_NULL, DEV_NULL]);
        assert_eq!(code, 1);
        assert!(stdout.is_empty());
        assert!(stderr.contains("unknown probe 'loopbak'"), "{stderr}");
    }

    #[test]
    fn bad_debug_flag_is_a_configuration_error() {
        let (code, _, stderr) =
            run_with_args(["lpc-bb-test", "--debug=bogus", DEV_NULL, DEV_NULL]);
        assert_eq!(code, 1);
        assert!(stderr.starts_with("lpc-bb-test: "), "{stderr}");
    }

    #[test]
    fn bad_size_is_a_configuration_error() {
        let (code, _, stderr) =
            run_with_args(["lpc-bb-test", "--write-ceiling=lots", DEV_NULL, DEV_NULL]);
        assert_eq!(code, 1);
        assert!(stderr.contains("--write-ceiling"), "{stderr}");
    }

    #[test]
    fn unknown_option_reports_clap_error() {
        let (code, _, stderr) = run_with_args(["lpc-bb-test", "--frobnicate"]);
        assert_eq!(code, 1);
        assert!(stderr.starts_with("lpc-bb-test: "), "{stderr}");
        assert!(stderr.contains("--frobnicate"), "{stderr}");
    }

    #[test]
    fn inconclusive_run_fails_only_when_strict() {
        let args = |strict: bool| {
            let mut args = vec![
                "lpc-bb-test",
                "--probe=large-writes-block",
                "--large-write-size=4K",
                "--write-ceiling=64K",
            ];
            if strict {
                args.push("--strict");
            }
            args.extend([DEV_NULL, DEV_NULL]);
            args
        };

        let (code, stdout, _) = run_with_args(args(false));
        assert_eq!(code, 0, "{stdout}");
        assert!(stdout.contains("1 probes: 0 passed, 0 failed, 1 inconclusive"));

        let (code, _, _) = run_with_args(args(true));
        assert_eq!(code, 1);
    }

    #[test]
    fn failing_probe_sets_exit_status() {
        let dir = scratch_dir();
        let shared = file_in(&dir, "shared", b"");
        let shared = shared.to_str().expect("utf8 path");

        let (code, stdout, _) =
            run_with_args(["lpc-bb-test", "--probe=isolation", shared, shared]);
        assert_eq!(code, 1);
        assert!(stdout.contains("FAIL"), "{stdout}");
        assert!(stdout.contains("1 failed"), "{stdout}");
    }
}
