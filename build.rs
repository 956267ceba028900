/// Build script for sortrace
/// Captures build metadata for trace provenance

fn main() {
    println!("cargo:rerun-if-changed=Cargo.toml");

    if let Ok(version) = std::env::var("CARGO_PKG_VERSION") {
        println!("cargo:rustc-env=SORTRACE_VERSION={version}");
    }

    // Optional: builds outside a git checkout simply omit the hash.
    if let Ok(output) = std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
    {
        if output.status.success() {
            if let Ok(hash) = String::from_utf8(output.stdout) {
                println!("cargo:rustc-env=SORTRACE_GIT_HASH={}", hash.trim());
            }
        }
    }
}
