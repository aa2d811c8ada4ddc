//! Entry name helpers. Contains [from_node_path] that creates archive entry
//! names from fs paths.

use anyhow::{Context, Error, anyhow, ensure};
use std::path::{Component, Path};

/// Creates archive entry name (eg. "dir1/dir2/file.html" or "dir1/dir2/")
/// from a path of a node found inside `root_path`.
///
/// Entry names are relative to `root_path`, use `/` as separator regardless
/// of the host, never start with `/` and end with `/` only for directories.
/// Returns [None] for `root_path` itself, which has no entry in the archive.
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use std::path::PathBuf;
/// # use webapp_pack_packer::entry_name::from_node_path;
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// let root = PathBuf::from("/home/user/app");
///
/// assert_eq!(
///     from_node_path(&root, &root.join("js").join("app.js"), false)?.as_deref(),
///     Some("js/app.js"),
/// );
/// assert_eq!(
///     from_node_path(&root, &root.join("js"), true)?.as_deref(),
///     Some("js/"),
/// );
/// assert_eq!(from_node_path(&root, &root, true)?, None);
/// #
/// # Ok(())
/// # }
/// ```
pub fn from_node_path(
    root_path: &Path,
    node_path: &Path,
    is_directory: bool,
) -> Result<Option<String>, Error> {
    // strip prefix, so the name is relative to the archive root
    let node_root_relative_path = node_path
        .strip_prefix(root_path)
        .context("resolve node_root_relative_path")?;

    // the root directory itself
    if node_root_relative_path.as_os_str().is_empty() {
        return Ok(None);
    }

    // list of path components, eg. ["dir1", "dir2", "file.bin"]
    let node_root_relative_path_components = node_root_relative_path
        .components()
        .map(|component| {
            // things like '/' or '..' would escape the archive root
            ensure!(
                matches!(component, Component::Normal(_)),
                "relative path must contain only standard path items, got {:?}",
                component
            );

            component
                .as_os_str()
                .to_str()
                .ok_or_else(|| anyhow!("cannot convert path component to string"))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let mut entry_name = itertools::join(node_root_relative_path_components, "/");
    if is_directory {
        entry_name.push('/');
    }

    Ok(Some(entry_name))
}
