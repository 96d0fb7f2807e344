//! Profile listing module.
//!
//! This module provides:
//! - Range expression resolution
//! - Page-by-page profile fetching
//! - Listing files and the profile registry

pub mod artifact;
pub mod profile;
pub mod range;

pub use artifact::{
    listing_file_name, read_listing, save_profile_listing, update_profile_registry, write_listing,
    PostListing, ProfileEntry,
};
pub use profile::{fetch_profile, fetch_target, ProfileListing};
pub use range::{all_offsets, resolve, FetchRange, IdFilter};
