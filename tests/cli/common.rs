//! Common test utilities for binary tests.

use std::path::Path;
use std::process::Command;

/// Runs soccer-sql with the given arguments.
///
/// `--config` points into `config_dir` so a developer's own config file
/// cannot leak into the test. Returns (exit code, stdout, stderr).
pub fn run_binary(config_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let config = config_dir.join("config.toml");
    let output = Command::new(env!("CARGO_BIN_EXE_soccer-sql"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute soccer-sql");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}
