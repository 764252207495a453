use std::fs;
use std::path::PathBuf;
use std::process::Command;

use clac::runtime::interpreter::clac_interpreter::ClacInterpreter;
use clac::runtime::interpreter::{Interpreter, InterpreterStack, WordManagement};


// Write a word file under the system temp directory, unique to this process and test.
fn word_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("clac-{}-{}.words", std::process::id(), name));

    fs::write(&path, contents).expect("Failed to write word file");
    path
}

// Run the calculator binary with the given arguments and word file, returning stdout, stderr and
// whether it succeeded.
fn run_clac(args: &[&str], words: Option<&PathBuf>) -> (String, String, bool) {
    let mut command = Command::new(env!("CARGO_BIN_EXE_clac"));

    command.args(args).env_remove("CLAC_LOG");

    match words {
        Some(path) => command.env("CLAC_WORDS", path),
        None => command.env("CLAC_WORDS", "/nonexistent/clac/words"),
    };

    let output = command.output().expect("Failed to run calculator");

    (String::from_utf8_lossy(&output.stdout).to_string(),
     String::from_utf8_lossy(&output.stderr).to_string(),
     output.status.success())
}


#[test]
fn loads_words_from_file() {
    let path = word_file("loads",
                         "\n  double \"2 *\"\nsquare 'dup *'\n\nhyp \"square . square , + 0.5 ^\"\n");

    let mut interpreter = ClacInterpreter::with_builtins();
    interpreter.process_words_file(path.to_str().unwrap()).unwrap();

    assert_eq!(interpreter.dictionary().len(), 3);

    let double = interpreter.find_word("double").unwrap();
    assert_eq!(double.meaning, "2 *");
    assert_eq!(double.location.line(), 2);
    assert_eq!(double.location.column(), 3);

    interpreter.commit("3 4 hyp").unwrap();
    assert_eq!(interpreter.stack().as_slice(), &[5.0]);

    fs::remove_file(path).unwrap();
}


#[test]
fn missing_file_defines_nothing() {
    let mut interpreter = ClacInterpreter::with_builtins();

    interpreter.process_words_file("/nonexistent/clac/words").unwrap();
    assert!(interpreter.dictionary().is_empty());
}


#[test]
fn malformed_file_is_an_error() {
    let path = word_file("malformed", "ok 1\nbroken\n");

    let mut interpreter = ClacInterpreter::with_builtins();
    let error = interpreter.process_words_file(path.to_str().unwrap()).unwrap_err();

    assert_eq!(error.location().as_ref().unwrap().line(), 2);

    fs::remove_file(path).unwrap();
}


#[test]
fn reload_replaces_words() {
    let path = word_file("reload", "a 1\nb 2\n");

    let mut interpreter = ClacInterpreter::with_builtins();
    interpreter.process_words_file(path.to_str().unwrap()).unwrap();

    fs::write(&path, "c 3\n").unwrap();
    interpreter.reload_words(path.to_str().unwrap()).unwrap();

    assert!(interpreter.find_word("a").is_none());
    assert_eq!(interpreter.find_word("C").unwrap().meaning, "3");

    fs::write(&path, "bad 'quote\n").unwrap();
    assert!(interpreter.reload_words(path.to_str().unwrap()).is_err());
    assert!(interpreter.find_word("c").is_some());

    fs::remove_file(path).unwrap();
}


#[test]
fn one_shot_prints_the_stack() {
    let (stdout, _, success) = run_clac(&["1 2 + 0.5"], None);

    assert!(success);
    assert_eq!(stdout, "3\n0.5\n");
}


#[test]
fn one_shot_uses_word_file() {
    let path = word_file("one_shot", "double \"2 *\"\n");
    let (stdout, _, success) = run_clac(&["21 double"], Some(&path));

    assert!(success);
    assert_eq!(stdout, "42\n");

    fs::remove_file(path).unwrap();
}


#[test]
fn one_shot_reports_recursion() {
    let path = word_file("recursion", "forever forever\n");
    let (stdout, stderr, success) = run_clac(&["forever"], Some(&path));

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Recursion limit of 256 exceeded"));

    fs::remove_file(path).unwrap();
}


#[test]
fn too_many_arguments_is_a_usage_error() {
    let (_, stderr, success) = run_clac(&["1", "2"], None);

    assert!(!success);
    assert!(stderr.contains("Usage"));
}


#[test]
fn piped_lines_are_committed_in_order() {
    use std::io::Write;
    use std::process::Stdio;

    let mut child = Command::new(env!("CARGO_BIN_EXE_clac"))
        .env("CLAC_WORDS", "/nonexistent/clac/words")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to run calculator");

    child.stdin
         .take()
         .unwrap()
         .write_all(b"6 7 *\n_ 2 /\n")
         .unwrap();

    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "42\n21\n");
}
