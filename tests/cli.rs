use std::process::{Command, Output};

fn run(args: &[&str], envs: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bench_http"))
        .args(args)
        .envs(envs.iter().copied())
        .env("BENCH_SERVER__HOST", "127.0.0.1")
        .output()
        .expect("failed to launch bench_http")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_zero_length_exits_with_status_1() {
    let output = run(&["-l", "0"], &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Bad content length"));
    assert!(!stderr(&output).contains("Serving"));
}

#[test]
fn test_unparsable_length_exits_with_status_1() {
    let output = run(&["-l", "abc"], &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Bad content length"));
}

#[test]
fn test_missing_length_exits_with_status_1() {
    let output = run(&["-p", "0"], &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Bad content length"));
}

#[test]
fn test_unknown_flag_exits_before_building_content() {
    let output = run(&["-x", "-l", "10"], &[]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Illegal argument"), "stderr: {err}");
    assert!(!err.contains("/ind"));
}

#[test]
fn test_help_exits_successfully() {
    let output = run(&["-h"], &[]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("-l <LENGTH>"));
}

#[test]
fn test_accelerated_run_is_bounded() {
    // Pinned workers select the multi-thread backend even on a single CPU
    let output = run(
        &["-p", "0", "-l", "10", "-i"],
        &[
            ("BENCH_SERVER__EXIT_AFTER_SECS", "1"),
            ("BENCH_SERVER__WORKERS", "2"),
        ],
    );
    let err = stderr(&output);
    assert_eq!(output.status.code(), Some(0), "stderr: {err}");
    assert!(err.contains("/ind - basic content (memory copy)"));
    assert!(err.contains("/ref - basic content (reference)"));
    assert!(err.contains("Serving 10 bytes on port 0 using multi_thread"));
    assert!(err.contains("Shutting down: bounded run elapsed"));
}
