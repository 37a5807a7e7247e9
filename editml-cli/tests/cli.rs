use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn document(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write document");
    file
}

#[test]
fn renders_clean_view_from_file() {
    let doc = document("Hello {+World+}! This is {-not seen-}.");
    let mut cmd = cargo_bin_cmd!("editml");
    cmd.arg(doc.path());

    cmd.assert()
        .success()
        .stdout("Hello World! This is .")
        .stderr("");
}

#[test]
fn reads_stdin_when_path_is_dash() {
    let mut cmd = cargo_bin_cmd!("editml");
    cmd.arg("-").write_stdin("{copy~X~T}-{copy:T}");

    cmd.assert().success().stdout("X-X");
}

#[test]
fn warnings_go_to_stderr_without_failing() {
    let mut cmd = cargo_bin_cmd!("editml");
    cmd.write_stdin("see {move:ZZZ}");

    cmd.assert()
        .success()
        .stdout("see {move:ZZZ}")
        .stderr(predicate::str::contains("warning[unresolved-target] 1:5"));
}

#[test]
fn conflict_fails_without_output() {
    let doc = document("{move~a~dup}\n{move~b~dup}");
    let mut cmd = cargo_bin_cmd!("editml");
    cmd.arg(doc.path());

    cmd.assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("error[duplicate-source-tag] 2:1"));
}

#[test]
fn markup_format_reproduces_input() {
    let doc = document("a {mv~b~T} {m:T} {>c<ed}");
    let mut cmd = cargo_bin_cmd!("editml");
    cmd.arg(doc.path()).arg("--format").arg("markup");

    cmd.assert().success().stdout("a {mv~b~T} {m:T} {>c<ed}");
}

#[test]
fn json_format_dumps_nodes() {
    let mut cmd = cargo_bin_cmd!("editml");
    cmd.args(["-f", "ast-json"]).write_stdin("{+x+}");

    cmd.assert().success().stdout(
        predicate::str::contains("\"type\": \"inline_edit\"")
            .and(predicate::str::contains("\"kind\": \"addition\"")),
    );
}

#[test]
fn rejects_unknown_format() {
    let mut cmd = cargo_bin_cmd!("editml");
    cmd.args(["--format", "html"]).write_stdin("x");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'html'"));
}

#[test]
fn keep_comments_flag() {
    let input = "%% note\nbody";

    let mut stripped = cargo_bin_cmd!("editml");
    stripped.write_stdin(input);
    stripped.assert().success().stdout("body");

    let mut kept = cargo_bin_cmd!("editml");
    kept.arg("--keep-comments").write_stdin(input);
    kept.assert().success().stdout("%% note\nbody");
}

#[test]
fn config_file_is_layered() {
    let mut config = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp config");
    writeln!(config, "[rendering]\nformat = \"markup\"").expect("write config");

    let mut cmd = cargo_bin_cmd!("editml");
    cmd.arg("--config").arg(config.path()).write_stdin("{+x+}");

    cmd.assert().success().stdout("{+x+}");
}

#[test]
fn max_depth_flag_limits_blocks() {
    let mut cmd = cargo_bin_cmd!("editml");
    cmd.args(["--max-depth", "0"]).write_stdin("{copy~x~C}{copy:C}");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("(ERROR_NESTING_TOO_DEEP)"))
        .stderr(predicate::str::contains("error[nesting-too-deep]"));
}

#[test]
fn debug_dump_goes_to_stderr() {
    let mut cmd = cargo_bin_cmd!("editml");
    cmd.arg("--debug").write_stdin("a {+b+}");

    cmd.assert()
        .success()
        .stdout("a b")
        .stderr(predicate::str::contains("=== nodes ===").and(predicate::str::contains("⊕ b")));
}

#[test]
fn lists_formats() {
    let mut cmd = cargo_bin_cmd!("editml");
    cmd.arg("--list-formats");

    cmd.assert().success().stdout(
        predicate::str::contains("clean")
            .and(predicate::str::contains("markup"))
            .and(predicate::str::contains("ast-treeviz"))
            .and(predicate::str::contains("ast-json")),
    );
}

#[test]
fn missing_file_is_an_error() {
    let mut cmd = cargo_bin_cmd!("editml");
    cmd.arg("/nonexistent/doc.editml");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read /nonexistent/doc.editml"));
}

#[test]
fn issue_lines_count_stripped_comments() {
    let mut cmd = cargo_bin_cmd!("editml");
    cmd.write_stdin("%% a\n{move~a~dup}\n%% b\n{move~b~dup}\n");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("error[duplicate-source-tag] 4:1"));
}

#[test]
fn project_file_in_working_directory_is_layered() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join(".editml.toml"), "[rendering]\nformat = \"markup\"\n")
        .expect("write project config");

    let mut cmd = cargo_bin_cmd!("editml");
    cmd.current_dir(dir.path()).write_stdin("{+x+}");

    cmd.assert().success().stdout("{+x+}");
}

#[test]
fn environment_overrides_config_file() {
    let mut config = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp config");
    writeln!(config, "[rendering]\nformat = \"markup\"").expect("write config");

    let mut cmd = cargo_bin_cmd!("editml");
    cmd.arg("--config")
        .arg(config.path())
        .env("EDITML_RENDERING__FORMAT", "clean")
        .write_stdin("{+x+}{-y-}");

    cmd.assert().success().stdout("x");
}

#[test]
fn lists_formatter_descriptions() {
    let mut cmd = cargo_bin_cmd!("editml");
    cmd.arg("--list-formats");

    cmd.assert().success().stdout(
        predicate::str::contains("Node list as pretty-printed JSON")
            .and(predicate::str::contains("One line per node with Unicode icons")),
    );
}
