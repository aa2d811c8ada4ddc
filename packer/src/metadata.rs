//! Metadata helpers. Contains [build] function, that creates serialized
//! [Descriptor] from application manifest.

use crate::common::{APPLICATION_URL_SCHEME, MANIFEST_FILE_NAME, descriptor::Descriptor};
use anyhow::{Context, Error};
use serde_json::Value;
use std::{fs, path::Path};
use uuid::Uuid;

/// Reads manifest of application directory `path` and creates serialized
/// [Descriptor] for it.
///
/// See [build_descriptor] for details.
pub fn build(path: &Path) -> Result<Vec<u8>, Error> {
    let descriptor = build_descriptor(path)?;
    let descriptor = to_bytes(&descriptor)?;

    Ok(descriptor)
}

/// Reads manifest of application directory `path` and creates [Descriptor]
/// for it.
///
/// Fails if manifest is missing or is not a valid json. Manifest url is
/// resolved with [manifest_url_from_manifest].
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use std::path::PathBuf;
/// # use webapp_pack_packer::metadata::build_descriptor;
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// let descriptor = build_descriptor(
///     &PathBuf::from(env!("CARGO_MANIFEST_DIR"))
///         .parent()
///         .unwrap()
///         .join("tests")
///         .join("data")
///         .join("sample-app"),
/// )?;
/// assert_eq!(descriptor.version, 1);
/// assert_eq!(
///     descriptor.manifest_url,
///     "https://sample-app.example.com/manifest.webapp"
/// );
/// #
/// # Ok(())
/// # }
/// ```
pub fn build_descriptor(path: &Path) -> Result<Descriptor, Error> {
    let manifest_path = path.join(MANIFEST_FILE_NAME);

    let manifest = fs::read(&manifest_path)
        .with_context(|| format!("read manifest {}", manifest_path.display()))?;
    let manifest = serde_json::from_slice::<Value>(&manifest)
        .with_context(|| format!("parse manifest {}", manifest_path.display()))?;

    let descriptor = Descriptor::new(manifest_url_from_manifest(&manifest));

    Ok(descriptor)
}

/// Serializes [Descriptor] as compact json.
pub fn to_bytes(descriptor: &Descriptor) -> Result<Vec<u8>, Error> {
    let bytes = serde_json::to_vec(descriptor)?;
    Ok(bytes)
}

/// Resolves manifest url from parsed manifest.
///
/// If manifest has string `origin`, [manifest_url_from_origin] is used.
/// Otherwise url with [APPLICATION_URL_SCHEME] and a freshly generated
/// random id is created, eg.
/// `app://0f1c8e3a-9d5b-4c1e-8a7f-2b6d4e9c1a35/manifest.webapp`.
pub fn manifest_url_from_manifest(manifest: &Value) -> String {
    match manifest.get("origin").and_then(Value::as_str) {
        Some(origin) => manifest_url_from_origin(origin),
        None => format!(
            "{}://{}/{}",
            APPLICATION_URL_SCHEME,
            Uuid::new_v4(),
            MANIFEST_FILE_NAME
        ),
    }
}

/// Appends manifest file name to `origin`, keeping exactly one `/` between
/// them.
pub fn manifest_url_from_origin(origin: &str) -> String {
    let origin = origin.strip_suffix('/').unwrap_or(origin);

    format!("{}/{}", origin, MANIFEST_FILE_NAME)
}
