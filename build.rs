//! Build script for FitPlan
//!
//! Bumps the local build counter and embeds build metadata for the status tool.

use std::fs;
use std::path::Path;

const BUILD_NUMBER_FILE: &str = "build_number.txt";

fn read_build_number(path: &Path) -> u64 {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn main() {
    println!("cargo:rerun-if-changed=src");

    let path = Path::new(BUILD_NUMBER_FILE);
    let build_number = read_build_number(path) + 1;

    // A read-only checkout still builds; the counter just stops advancing
    if let Err(e) = fs::write(path, build_number.to_string()) {
        println!("cargo:warning=Could not persist build number: {}", e);
    }

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=FITPLAN_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=FITPLAN_BUILD_TIMESTAMP={}", timestamp);
}
