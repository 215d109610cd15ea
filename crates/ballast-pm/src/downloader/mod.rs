//! Fetching and unpacking of extra downloads.
//!
//! This module provides the mechanics the installer delegates to: streamed
//! URL fetches (or local copies), zip extraction filtered through an ignore
//! set, and checksum verification.

mod archive;
mod checksum;
mod file;
mod ignore;

pub use archive::ZipExtractor;
pub use checksum::{verify_checksum, ChecksumType};
pub use file::FileDownloader;
pub use ignore::IgnoreSet;
