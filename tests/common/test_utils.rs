use std::path::PathBuf;
use std::process::{Command, Output};

/// Command for the demo binary with logging pinned to `info` so tests can
/// match on log lines.
pub fn demo() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_rt3d-demo"));
    command
        .env("RUST_LOG", "info")
        .env_remove("RT3D_VERTEX_SHADER")
        .env_remove("RT3D_FRAGMENT_SHADER")
        .env_remove("RT3D_STRICT_SHADERS")
        .env_remove("RT3D_EXIT_AFTER_FRAMES");
    command
}

pub fn run(command: &mut Command) -> (Output, String) {
    let output = command.output().expect("demo binary should start");
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    (output, stdout)
}

/// Writes `contents` to a per-process scratch file and returns its path.
#[allow(dead_code)]
pub fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("rt3d-demo-it-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).expect("scratch file should be writable");
    path
}
