use std::env;
use std::fs;
use std::path::Path;

// Place config.toml next to the compiled binary so the runtime lookup in
// shared::config finds it during development as well as in production.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let out_dir = env::var("OUT_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap();

    // OUT_DIR is target/<profile>/build/backend-xxx/out; walk up to the
    // profile directory itself
    let out_path = Path::new(&out_dir);
    let Some(target_dir) = out_path.ancestors().find(|p| p.ends_with(&profile)) else {
        println!("cargo:warning=Could not locate target profile directory, skipping config copy");
        return;
    };

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent());
    let Some(workspace_root) = workspace_root else {
        return;
    };

    let source = workspace_root.join("config.toml");
    if source.exists() {
        let dest = target_dir.join("config.toml");
        if let Err(e) = fs::copy(&source, &dest) {
            println!("cargo:warning=Failed to copy config.toml: {}", e);
        }
    }
}
