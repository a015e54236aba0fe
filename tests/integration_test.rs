use pretty_assertions::assert_eq;
use std::io::Write;
use std::process::{Command, Stdio};

use calcbrain::{Engine, FixedRandom, Variables};

fn binary_path() -> &'static str {
    env!("CARGO_BIN_EXE_calcbrain")
}

fn run_eval(args: &[&str]) -> std::process::Output {
    Command::new(binary_path())
        .arg("eval")
        .args(args)
        .output()
        .expect("Failed to run eval")
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_eval_square_root() {
    let output = run_eval(&["7", "√"]);
    assert!(output.status.success(), "eval command failed");

    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("2.64575"));
    assert_eq!(lines[1], "√(7)=");
}

#[test]
fn test_eval_pending_json() {
    let output = run_eval(&["--json", "4", "+", "3"]);
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_str(&stdout_of(&output)).expect("Invalid JSON");
    assert_eq!(report["is_pending"], true);
    assert!(report["result"].is_null());
    assert_eq!(report["operand"], 3.0);
    assert_eq!(report["description"], "4+3");
    assert_eq!(report["display"], 3.0);
}

#[test]
fn test_eval_aliases_and_equals() {
    let output = run_eval(&["6", "*", "7", "-", "2", "="]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "40\n6×7-2=\n");
}

#[test]
fn test_eval_variables_from_flags_and_file() {
    let output = run_eval(&["--set", "M=5", "@M", "x!"]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "120\n(M)!=\n");

    let dir = tempfile::tempdir().unwrap();
    let vars = dir.path().join("vars.toml");
    std::fs::write(&vars, "[variables]\nM = 2\nN = 10\n").unwrap();

    let output = run_eval(&["--vars", vars.to_str().unwrap(), "@N", "^", "@M", "="]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "100\nN^M=\n");
}

#[test]
fn test_eval_unbound_variable_is_zero() {
    let output = run_eval(&["@M", "+", "1", "="]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "1\nM+1=\n");
}

#[test]
fn test_eval_rejects_bad_assignment() {
    let output = run_eval(&["--set", "M", "1"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load variables"));
}

#[test]
fn test_eval_seeded_rand_is_reproducible() {
    let first = run_eval(&["--seed", "11", "rand"]);
    let second = run_eval(&["--seed", "11", "rand"]);
    assert!(first.status.success());
    assert_eq!(stdout_of(&first), stdout_of(&second));
    assert!(stdout_of(&first).ends_with("Rand()=\n"));
}

#[test]
fn test_repl_session() {
    let mut child = Command::new(binary_path())
        .arg("repl")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to run repl");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"4 +\n3\n=\n->M\nclear\n@M\nquit\n9\n")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "4\n4+…\n3\n4+3…\n7\n4+3=\n7\n4+3=\n0\n \n0\nM=\n"
    );
}

#[test]
fn test_symbols_listed() {
    let output = Command::new(binary_path())
        .arg("symbols")
        .output()
        .expect("Failed to run symbols");
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    for symbol in ["π", "Rand", "√", "x!", "÷", "="] {
        assert!(stdout.lines().any(|line| line == symbol), "{} missing", symbol);
    }
}

#[test]
fn test_library_scenarios() {
    let mut engine = Engine::with_random(Box::new(FixedRandom(0.5)));
    engine.append_operand(4.0);
    engine.append_operator("+");
    engine.append_operand(3.0);

    let pending = engine.evaluate(&Variables::new());
    assert!(pending.is_pending);
    assert_eq!(pending.result, None);
    assert_eq!(pending.description, "4+3");

    engine.append_operator("=");
    let done = engine.evaluate(&Variables::new());
    assert_eq!(done.result, Some(7.0));
    assert!(!done.is_pending);
    assert_eq!(done.description, "4+3");

    engine.undo();
    assert_eq!(engine.evaluate(&Variables::new()), pending);
}
