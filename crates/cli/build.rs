use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Accept `1.2.3`-style values only, so a stray file cannot leak into `--version`
fn looks_like_version(value: &str) -> bool {
    value.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn version_from_file(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    let version = content.trim();
    looks_like_version(version).then(|| version.to_string())
}

fn main() {
    let cargo_version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());

    // VERSION at the repository root is written by the release job
    let version_path = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap())
        .ancestors()
        .nth(2)
        .map(|root| root.join("VERSION"));

    let mut version = cargo_version.clone();
    if let Some(path) = version_path {
        println!("cargo:rerun-if-changed={}", path.display());
        if let Some(file_version) = version_from_file(&path) {
            version = file_version;
        }
    }

    println!("cargo:rustc-env=SVCDIFF_VERSION={version}");

    if version != cargo_version {
        println!(
            "cargo:warning=Using version {version} from VERSION file (Cargo.toml has {cargo_version})"
        );
    }
}
