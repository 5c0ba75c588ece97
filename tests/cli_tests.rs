use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn workspace_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

fn fixture_path(name: &str) -> PathBuf {
    workspace_root()
        .join("tests")
        .join("testdata")
        .join("cli")
        .join(name)
}

fn fixture(name: &str) -> String {
    fixture_path(name).to_string_lossy().into_owned()
}

fn run_yammm(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_yammm"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("YAMMM_LOG")
        .output()
        .unwrap_or_else(|e| panic!("failed to run yammm with args {:?}: {e}", args))
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn valid_files_print_a_summary() {
    let catalog = fixture("catalog.yammm");
    let units = fixture("units.yammm");
    let output = run_yammm(&[&catalog, &units]);

    assert!(output.status.success(), "stderr:\n{}", stderr(&output));
    let text = stdout(&output);
    assert!(
        text.contains(
            "schema \"Catalog\", 1 imports, 2 types, 1 datatypes, 4 type references, 3 expression nodes"
        ),
        "{}",
        text
    );
    assert!(
        text.contains(
            "schema \"Units\", 0 imports, 0 types, 2 datatypes, 0 type references, 0 expression nodes"
        ),
        "{}",
        text
    );
    for line in text.lines() {
        let digest = line
            .rsplit_once("(sha256 ")
            .and_then(|(_, rest)| rest.strip_suffix(')'))
            .unwrap_or_else(|| panic!("no digest in {:?}", line));
        assert_eq!(digest.len(), 64, "{}", line);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()), "{}", line);
    }
    let catalog_line = text.find("Catalog").unwrap();
    let units_line = text.find("Units").unwrap();
    assert!(catalog_line < units_line);
}

#[test]
fn errors_are_rendered_and_fail_the_run() {
    let broken = fixture("broken.yammm");
    let output = run_yammm(&[&broken]);

    assert_eq!(output.status.code(), Some(1));
    let text = stderr(&output);
    assert!(text.starts_with("Found 3 errors."), "{}", text);
    for code in ["[E217]", "[E209]", "[E203]"] {
        assert!(text.contains(code), "missing {} in:\n{}", code, text);
    }
    assert!(text.contains(&format!("--> {}:5:11", broken)), "{}", text);
}

#[test]
fn max_errors_caps_rendered_errors() {
    let broken = fixture("broken.yammm");
    let output = run_yammm(&["--max-errors", "1", &broken]);

    assert_eq!(output.status.code(), Some(1));
    let text = stderr(&output);
    assert!(text.contains("[E217]"), "{}", text);
    assert!(!text.contains("[E209]"), "{}", text);
    assert!(
        text.contains("... and 2 more errors not shown (use --max-errors to increase)."),
        "{}",
        text
    );
}

#[test]
fn json_output_lists_units_in_argument_order() {
    let catalog = fixture("catalog.yammm");
    let broken = fixture("broken.yammm");
    let output = run_yammm(&["--json", &broken, &catalog]);

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let units = json.as_array().unwrap();
    assert_eq!(units.len(), 2);
    assert_eq!(units[0]["unit"]["name"], "Broken");
    assert_eq!(units[0]["diagnostics"].as_array().unwrap().len(), 3);
    assert_eq!(units[1]["unit"]["name"], "Catalog");
    assert_eq!(units[1]["unit"]["doc"], "Product catalog.");
    assert!(units[1]["diagnostics"].as_array().unwrap().is_empty());
}

#[test]
fn tokens_flag_dumps_the_token_stream() {
    let units = fixture("units.yammm");
    let output = run_yammm(&["--tokens", &units]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains(&format!("Tokens from {}:", units)), "{}", text);
    assert!(text.contains("  1:0   Schema"), "{}", text);
    assert!(text.contains("\"Weight\""), "{}", text);
}

#[test]
fn usage_errors_exit_with_two() {
    let units = fixture("units.yammm");
    assert_eq!(run_yammm(&["--max-errors", "lots", &units]).status.code(), Some(2));
    assert_eq!(run_yammm(&["--frobnicate", &units]).status.code(), Some(2));
    assert_eq!(
        run_yammm(&[&fixture("does_not_exist.yammm")]).status.code(),
        Some(2)
    );
}

#[test]
fn help_lists_flags() {
    let output = run_yammm(&["--help"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("--max-errors <n>"));
    assert!(text.contains("YAMMM_LOG"));
}
