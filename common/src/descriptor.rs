//! Descriptor contains the package metadata type, stored as
//! [crate::METADATA_ENTRY_NAME].

use crate::DESCRIPTOR_VERSION;
use serde::{Deserialize, Serialize};

/// Package metadata. Tells the installer where the application manifest
/// lives.
///
/// Serialized as json object with exactly two keys, `version` and
/// `manifestURL`, in that order.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct Descriptor {
    /// Descriptor format version, see [DESCRIPTOR_VERSION].
    pub version: u32,

    /// Absolute url of the application manifest.
    #[serde(rename = "manifestURL")]
    pub manifest_url: String,
}
impl Descriptor {
    /// Creates descriptor in current [DESCRIPTOR_VERSION] pointing at
    /// `manifest_url`.
    pub fn new(manifest_url: String) -> Self {
        Self {
            version: DESCRIPTOR_VERSION,
            manifest_url,
        }
    }
}
