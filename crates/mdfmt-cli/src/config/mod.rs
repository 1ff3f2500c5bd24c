mod builder;
mod file;

pub use builder::{build_convert_options, resolve_header_scan_limit};
