//! Build script for the storefront crate.
//!
//! Fingerprints the stylesheet and the dashboard script so they can be served
//! with long cache lifetimes. Each asset is copied to
//! `static/<kind>/derived/<name>.<hash>.<ext>` and the hash is exported as a
//! compile-time environment variable.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

/// (relative path, env var, derived file stem)
const ASSETS: &[(&str, &str, &str)] = &[
    ("static/css/main.css", "CSS_HASH", "main"),
    ("static/js/app.js", "JS_HASH", "app"),
];

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let root = Path::new(&manifest_dir);

    for (relative, env_var, stem) in ASSETS {
        fingerprint(root, relative, env_var, stem);
    }
}

fn fingerprint(root: &Path, relative: &str, env_var: &str, stem: &str) {
    let path = root.join(relative);
    println!("cargo:rerun-if-changed={}", path.display());

    let content = match fs::read(&path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read {relative}: {e}");
            println!("cargo:rustc-env={env_var}=");
            return;
        }
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash = &digest[..8];
    println!("cargo:rustc-env={env_var}={short_hash}");

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .expect("asset has an extension");
    let derived_dir = path
        .parent()
        .expect("asset has a parent directory")
        .join("derived");
    fs::create_dir_all(&derived_dir).expect("Failed to create derived asset directory");
    fs::copy(
        &path,
        derived_dir.join(format!("{stem}.{short_hash}.{extension}")),
    )
    .expect("Failed to copy asset to derived directory");
}
