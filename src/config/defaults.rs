pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_RUST_LOG: &str = "info";
