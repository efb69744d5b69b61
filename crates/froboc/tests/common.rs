use std::path::Path;

/// Reads a source file from the `frobo_files` directory of this crate
pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("frobo_files")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("could not read {path:?}: {e}"))
}
