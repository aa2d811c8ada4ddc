//! Common crate, containing names and types shared between
//! [webapp-pack-packer](../webapp_pack_packer/index.html) and anything that
//! reads webapp packages back (installers, tests).
//!
//! A webapp package is a zip container holding exactly two entries, in this
//! order:
//! - [METADATA_ENTRY_NAME], the serialized [descriptor::Descriptor],
//! - [APPLICATION_ENTRY_NAME], a zip of the application directory.
//!
//! The application directory is expected to contain a [MANIFEST_FILE_NAME]
//! at its root.

#![warn(missing_docs)]

pub mod descriptor;

/// Name of the descriptor entry inside a package. Always the first entry.
pub const METADATA_ENTRY_NAME: &str = "metadata.json";
/// Name of the archived application entry inside a package. Always the
/// second entry.
pub const APPLICATION_ENTRY_NAME: &str = "application.zip";

/// Application manifest, expected at the root of the application directory.
pub const MANIFEST_FILE_NAME: &str = "manifest.webapp";

/// Descriptor format version, written to [descriptor::Descriptor::version].
pub const DESCRIPTOR_VERSION: u32 = 1;

/// Scheme used for manifest urls of applications without an `origin`.
pub const APPLICATION_URL_SCHEME: &str = "app";

/// Version control metadata directory, never included in the application
/// archive.
pub const EXCLUDED_DIRECTORY_NAME: &str = ".git";
