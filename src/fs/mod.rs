//! Filesystem module.
//!
//! Provides:
//! - Download folder layout
//! - Filename sanitization

pub mod naming;
pub mod paths;

pub use naming::{indexed_file_name, sanitize_filename, sanitize_path_component};
pub use paths::{count_files, get_post_folder, get_profile_folder, get_site_folder};
