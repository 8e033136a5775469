//! Archive formats and extraction.
//!
//! Runtime artifacts ship either as gzip-compressed tarballs or as zip
//! archives. [`ArchiveFormat`] names the container and [`extract`] unpacks
//! one into a destination directory.

pub mod extract;
pub mod format;

pub use extract::extract;
pub use format::ArchiveFormat;
