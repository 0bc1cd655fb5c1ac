use std::{env, process::Command};

fn main() {
    // Values already present in the environment (release pipelines) win.
    emit("LASTRUN_RUSTC_VERSION", || {
        let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".into());
        // "rustc 1.85.0 (4d91de4e4 2025-02-17)" -> "1.85.0"
        run(&rustc, &["--version"]).and_then(|out| out.split_whitespace().nth(1).map(str::to_string))
    });
    emit("LASTRUN_GIT_REVISION", || {
        run("git", &["rev-parse", "--short", "HEAD"])
    });
    emit("LASTRUN_GIT_BRANCH", || {
        run("git", &["rev-parse", "--abbrev-ref", "HEAD"])
    });

    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/");
}

fn emit(name: &str, detect: impl FnOnce() -> Option<String>) {
    println!("cargo:rerun-if-env-changed={name}");
    if env::var_os(name).is_some() {
        return;
    }
    if let Some(value) = detect().filter(|v| !v.is_empty()) {
        println!("cargo:rustc-env={name}={value}");
    }
}

fn run(program: &str, args: &[&str]) -> Option<String> {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
}
