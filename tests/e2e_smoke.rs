use std::fs;
use std::path::Path;
use std::process::Command;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn run_codemod(root: &Path, args: &[&str]) -> String {
    let bin = env!("CARGO_BIN_EXE_console-to-logger");
    let output = Command::new(bin)
        .current_dir(root)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run console-to-logger");
    assert!(
        output.status.success(),
        "exit {:?}: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn e2e_two_file_tree() {
    let tdir = tempfile::tempdir().unwrap();
    let root = tdir.path();
    let a = root.join("src").join("a.js");
    let b = root.join("src").join("deep").join("b.js");
    write(&a, "const fs = require('fs');\nconsole.warn('careful');\n");
    write(&b, "console.log('ok');\n");

    let stdout = run_codemod(root, &["run"]);
    assert!(stdout.contains("Files processed: 2"), "{}", stdout);
    assert!(stdout.contains("Logger imports added: 1"), "{}", stdout);
    assert!(stdout.contains("Total replacements: 2"), "{}", stdout);
    assert!(stdout.contains("All console statements replaced!"), "{}", stdout);

    let a_text = fs::read_to_string(&a).unwrap();
    assert!(
        a_text.contains("const logger = require('../utils/logger');"),
        "import not inserted: {}",
        a_text
    );
    assert!(a_text.contains("logger.warn('careful');"));

    let b_text = fs::read_to_string(&b).unwrap();
    assert_eq!(b_text, "logger.info('ok');\n");
}

#[test]
fn e2e_config_file_and_check() {
    let tdir = tempfile::tempdir().unwrap();
    let root = tdir.path();
    write(
        &root.join("console-to-logger.toml"),
        r#"[console_to_logger]
root = "lib"
extension = "mjs"
tree_root = "lib"
logger_module = "log"
exclude = ["vendor/**"]
"#,
    );
    let app = root.join("lib").join("app.mjs");
    let vendor = root.join("lib").join("vendor").join("v.mjs");
    write(
        &app,
        "const http = require('http');\nconsole.error('failed', error);\nconsole.log('a', b);\n",
    );
    write(&vendor, "console.log('vendored');\n");

    let stdout = run_codemod(root, &["check"]);
    assert!(
        stdout.contains("Console statements: 2 in 1 files (of 1 scanned)"),
        "{}",
        stdout
    );

    let stdout = run_codemod(root, &["run"]);
    assert!(stdout.contains("Total replacements: 1"), "{}", stdout);
    assert!(stdout.contains("Remaining console statements"), "{}", stdout);
    assert!(stdout.contains("Total: 1"), "{}", stdout);

    let app_text = fs::read_to_string(&app).unwrap();
    assert_eq!(
        app_text,
        "const http = require('http');\nconst logger = require('./log');\nlogger.error('failed', { error: error.message, stack: error.stack });\nconsole.log('a', b);\n"
    );
    assert_eq!(
        fs::read_to_string(&vendor).unwrap(),
        "console.log('vendored');\n"
    );
}

#[test]
fn e2e_dry_run_leaves_files() {
    let tdir = tempfile::tempdir().unwrap();
    let root = tdir.path();
    let a = root.join("src").join("a.js");
    let text = "const x = require('x');\nconsole.log(\"hello world\");\n";
    write(&a, text);

    let stdout = run_codemod(root, &["run", "--dry-run"]);
    assert!(stdout.contains("Dry run complete"), "{}", stdout);
    assert!(stdout.contains("Total replacements: 1"), "{}", stdout);
    assert_eq!(fs::read_to_string(&a).unwrap(), text);
}
