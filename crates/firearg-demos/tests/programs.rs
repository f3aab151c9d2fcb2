use std::process::{Command, Output};

fn run(bin: &str, args: &str) -> Output {
    Command::new(bin)
        .args(args.split_whitespace())
        .env_remove("FIREARG_LOG")
        .output()
        .unwrap_or_else(|err| panic!("failed to run {bin}: {err}"))
}

fn describe(out: &Output) -> String {
    format!(
        "status: {}\nstdout:\n{}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr),
    )
}

/// Exit 0, exact (trimmed) stdout, empty stderr.
fn assert_output(bin: &str, args: &str, expected: &str) {
    let out = run(bin, args);
    assert!(out.status.success(), "{bin} {args:?} failed:\n{}", describe(&out));
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim(),
        expected.trim(),
        "{bin} {args:?}:\n{}",
        describe(&out)
    );
    assert!(out.stderr.is_empty(), "{bin} {args:?}:\n{}", describe(&out));
}

/// Exit 0, exact untrimmed stdout.
fn assert_raw_output(bin: &str, args: &str, expected: &str) {
    let out = run(bin, args);
    assert!(out.status.success(), "{bin} {args:?} failed:\n{}", describe(&out));
    assert_eq!(String::from_utf8_lossy(&out.stdout), expected);
    assert!(out.stderr.is_empty(), "{bin} {args:?}:\n{}", describe(&out));
}

/// Exit 1, empty stdout, non-empty stderr.
fn assert_handled_failure(bin: &str, args: &str) {
    let out = run(bin, args);
    assert_eq!(out.status.code(), Some(1), "{bin} {args:?}:\n{}", describe(&out));
    assert!(out.stdout.is_empty(), "{bin} {args:?}:\n{}", describe(&out));
    assert!(!out.stderr.is_empty(), "{bin} {args:?}:\n{}", describe(&out));
}

/// Exit 0 with help on stdout and nothing on stderr.
fn assert_help(bin: &str, args: &str) {
    let out = run(bin, args);
    assert!(out.status.success(), "{bin} {args:?} failed:\n{}", describe(&out));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Usage:"), "unexpected help output:\n{stdout}");
    assert!(out.stderr.is_empty(), "{bin} {args:?}:\n{}", describe(&out));
}

#[test]
fn all_combinations() {
    let bin = env!("CARGO_BIN_EXE_all_combinations");
    assert_help(bin, "-h");
    assert_output(bin, "-i=3 7", "i=3\ndef-r=1\nn=7");
    assert_output(
        bin,
        "-i=-2 --def-r=2.5 --opt-s=hi 7 -4",
        "i=-2\ndef-r=2.5\nopt-s=hi\nn=7\nm=-4",
    );
    assert_handled_failure(bin, "-i 3 7");
    assert_handled_failure(bin, "-i=3 -7");
}

#[test]
fn basic() {
    let bin = env!("CARGO_BIN_EXE_basic");
    assert_output(bin, "-x 3 -y 4", "3 + 4 = 7");
    assert_output(bin, "-x -3 -y 3", "-3 + 3 = 0");
    assert_output(bin, "-x=-3 -y=3", "-3 + 3 = 0");
    assert_output(bin, "--x 1 --y=2", "1 + 2 = 3");
    assert_handled_failure(bin, "");
    assert_handled_failure(bin, "-x 3");
    assert_handled_failure(bin, "-y 4");
    assert_handled_failure(bin, "-x test");
    assert_handled_failure(bin, "-x");
    assert_handled_failure(bin, "--undefined 0");
    assert_handled_failure(bin, "-x 9223372036854775807 -y 1");
    assert_output(
        bin,
        "-x 9223372036854775807 -y -1",
        "9223372036854775807 + -1 = 9223372036854775806",
    );
    assert_help(bin, "-h");
    assert_help(bin, "--help");
    assert_help(bin, "-x 0 -h");
    assert_help(bin, "-h --undefined");
}

#[test]
fn flag() {
    let bin = env!("CARGO_BIN_EXE_flag");
    assert_help(bin, "-h");
    assert_output(bin, "", "0 0");
    assert_output(bin, "-a -b", "1 1");
    assert_output(bin, "-ba", "1 1");
    assert_output(bin, "-b", "0 1");
    assert_handled_failure(bin, "-a 1");
    assert_handled_failure(bin, "-a=1");
}

#[test]
fn optional_and_default() {
    let bin = env!("CARGO_BIN_EXE_optional_and_default");
    assert_help(bin, "-h");
    assert_output(bin, "", "false false");
    assert_output(bin, "--default 1", "false true");
    assert_output(bin, "--optional 1", "true false");
    assert_output(bin, "--optional 1 --default 1", "true true");
}

#[test]
fn positional() {
    let bin = env!("CARGO_BIN_EXE_positional");
    assert_help(bin, "-h");
    assert_handled_failure(bin, "");
    assert_handled_failure(bin, "test");
    assert_output(bin, "2", "2 0");
    assert_output(bin, "2 3", "2 3");
    assert_handled_failure(bin, "2 3 4");
    assert_output(bin, "-1 -3", "-1 -3");
}

#[test]
fn vector_positional() {
    let bin = env!("CARGO_BIN_EXE_vector_positional");
    assert_help(bin, "-h");
    assert_raw_output(bin, "", "\n");
    assert_raw_output(bin, "b a", "b a\n");
    assert_raw_output(bin, "b a -o", "b\na\n");
    assert_raw_output(bin, "b a -s", "a b\n");
    assert_raw_output(bin, "b a -os", "a\nb\n");
    assert_raw_output(bin, "b a -o -s", "a\nb\n");
}

#[cfg(unix)]
#[test]
fn non_utf8_argument_is_rejected() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let bin = env!("CARGO_BIN_EXE_vector_positional");
    let out = Command::new(bin)
        .arg(OsString::from_vec(vec![0xff]))
        .arg("a")
        .env_remove("FIREARG_LOG")
        .output()
        .unwrap_or_else(|err| panic!("failed to run {bin}: {err}"));
    assert_eq!(out.status.code(), Some(1), "{}", describe(&out));
    assert!(out.stdout.is_empty(), "{}", describe(&out));
    assert!(
        String::from_utf8_lossy(&out.stderr).contains("malformed argument"),
        "{}",
        describe(&out)
    );
}
