//! Build script for hbadmin
//!
//! Captures the git revision and build date reported by `hbadmin version`.
//! Values already present in the environment take precedence.

use std::process::Command;

const REVISION_ENV: &str = "HBADMIN_GIT_REVISION";
const BUILD_DATE_ENV: &str = "HBADMIN_BUILD_DATE";

fn main() {
    let revision = std::env::var(REVISION_ENV).ok().unwrap_or_else(|| {
        Command::new("git")
            .args(["rev-parse", "--short", "HEAD"])
            .output()
            .ok()
            .and_then(|output| {
                if output.status.success() {
                    String::from_utf8(output.stdout).ok()
                } else {
                    None
                }
            })
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    });
    println!("cargo:rustc-env={}={}", REVISION_ENV, revision);

    let build_date = std::env::var(BUILD_DATE_ENV)
        .unwrap_or_else(|_| chrono::Utc::now().format("%a %b %e %Y").to_string());
    println!("cargo:rustc-env={}={}", BUILD_DATE_ENV, build_date);

    println!("cargo:rerun-if-env-changed={}", REVISION_ENV);
    println!("cargo:rerun-if-env-changed={}", BUILD_DATE_ENV);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");
}
