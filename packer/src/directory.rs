//! Directory helpers. Contains [archive] function, used to pack application
//! directory recursively into an in-memory zip.

use crate::{common::EXCLUDED_DIRECTORY_NAME, entry_name};
use anyhow::{Context, Error, ensure};
use std::{
    fs,
    io::{self, Cursor, Seek, Write},
    path::Path,
};
use walkdir::{DirEntry, WalkDir};
use zip::{CompressionMethod, DateTime, ZipWriter, write::FileOptions};

/// Settings for [archive] function.
///
/// If not sure what to set here, use [Default].
#[derive(Debug)]
pub struct ArchiveOptions {
    /// Directories with this name are skipped together with everything below
    /// them.
    pub excluded_directory_name: String,
    /// Whether to follow links while traversing directories. If not set,
    /// links are skipped.
    pub follow_links: bool,
    /// Deflate level for file entries. [None] uses zip library default.
    pub compression_level: Option<i32>,
}
impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            excluded_directory_name: EXCLUDED_DIRECTORY_NAME.to_owned(),
            follow_links: false,
            compression_level: None,
        }
    }
}

/// Kind of [ArchivedEntry].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EntryKind {
    /// Regular file, stored deflated.
    File,
    /// Directory, stored as empty entry with name ending with `/`.
    Directory,
}

/// Reported by [archive] for each entry written.
#[derive(Debug)]
pub struct ArchivedEntry {
    /// Name inside the archive, see [entry_name::from_node_path].
    pub name: String,
    /// Whether this is a file or directory.
    pub kind: EntryKind,
    /// Number of uncompressed bytes written, `0` for directories.
    pub size: u64,
}

// outcome of visiting a single node, errors abort the walk
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Visit {
    Continue,
    SkipSubtree,
}

/// Recursively packs directory specified by `path` into zip, returning
/// finished archive bytes.
///
/// `path` is made absolute first and must point to a directory. Nodes are
/// visited depth first, sorted by name, so the same tree always produces the
/// same archive. Directories named [ArchiveOptions::excluded_directory_name]
/// are skipped with all their content. Links are followed only with
/// [ArchiveOptions::follow_links], other special files are skipped.
///
/// `on_entry` is called after each entry is written.
///
/// Any io, traversal or zip error aborts the whole operation.
///
/// # Examples
///
/// ```
/// # use anyhow::Error;
/// # use std::{io::Cursor, path::PathBuf};
/// # use webapp_pack_packer::directory::{archive, ArchiveOptions};
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// // archive the test application
/// let mut names = Vec::new();
/// let archive_bytes = archive(
///     &PathBuf::from(env!("CARGO_MANIFEST_DIR"))
///         .parent()
///         .unwrap()
///         .join("tests")
///         .join("data")
///         .join("sample-app"),
///     &ArchiveOptions::default(),
///     |entry| names.push(entry.name.clone()),
/// )?;
///
/// // verify necessary entries were added
/// assert!(names.iter().any(|name| name == "manifest.webapp"));
/// assert!(names.iter().any(|name| name == "js/"));
/// assert!(names.iter().any(|name| name == "js/app.js"));
///
/// // result is a complete zip
/// let zip = zip::ZipArchive::new(Cursor::new(archive_bytes))?;
/// assert_eq!(zip.len(), names.len());
/// #
/// # Ok(())
/// # }
/// ```
pub fn archive(
    path: &Path,
    options: &ArchiveOptions,
    mut on_entry: impl FnMut(&ArchivedEntry),
) -> Result<Vec<u8>, Error> {
    let root_path = std::path::absolute(path).context("resolve absolute source path")?;

    let root_metadata = fs::metadata(&root_path)
        .with_context(|| format!("read source {}", root_path.display()))?;
    ensure!(
        root_metadata.is_dir(),
        "source is not a directory: {}",
        root_path.display()
    );

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    let mut walker = WalkDir::new(&root_path)
        .follow_links(options.follow_links)
        .sort_by_file_name()
        .into_iter();
    while let Some(node) = walker.next() {
        // detect search errors
        let node = node.map_err(traverse_error)?;

        let outcome = visit(&mut writer, &root_path, &node, options, &mut on_entry)
            .with_context(|| format!("archive {}", node.path().display()))?;

        match outcome {
            Visit::Continue => {}
            Visit::SkipSubtree => walker.skip_current_dir(),
        }
    }

    // writes central directory, archive is not readable without it
    let archive_bytes = writer.finish()?.into_inner();

    Ok(archive_bytes)
}

// walkdir error display already embeds the io error, keep it once in the chain
fn traverse_error(error: walkdir::Error) -> Error {
    let context = match error.path() {
        Some(path) => format!("traverse {}", path.display()),
        None => "traverse source directory".to_owned(),
    };

    let has_io_error = error.io_error().is_some();
    let error = if has_io_error {
        Error::new(io::Error::from(error))
    } else {
        // link loops, message names both paths
        Error::new(error)
    };

    error.context(context)
}

fn visit<W: Write + Seek>(
    writer: &mut ZipWriter<W>,
    root_path: &Path,
    node: &DirEntry,
    options: &ArchiveOptions,
    on_entry: &mut impl FnMut(&ArchivedEntry),
) -> Result<Visit, Error> {
    // if follow_links is true, this will be resolved as link target
    let file_type = node.file_type();

    if file_type.is_dir()
        && node.depth() > 0
        && node.file_name() == options.excluded_directory_name.as_str()
    {
        log::debug!("skipping excluded directory {}", node.path().display());
        return Ok(Visit::SkipSubtree);
    }
    if file_type.is_symlink() {
        log::debug!("skipping link {}", node.path().display());
        return Ok(Visit::Continue);
    }
    if !file_type.is_dir() && !file_type.is_file() {
        log::debug!("skipping special file {}", node.path().display());
        return Ok(Visit::Continue);
    }

    let kind = if file_type.is_dir() {
        EntryKind::Directory
    } else {
        EntryKind::File
    };

    let name =
        match entry_name::from_node_path(root_path, node.path(), kind == EntryKind::Directory)? {
            Some(name) => name,
            None => return Ok(Visit::Continue),
        };

    let file_options = entry_file_options(node)?;

    let size = match kind {
        EntryKind::Directory => {
            // stored, no payload
            writer.add_directory(name.as_str(), file_options)?;
            0
        }
        EntryKind::File => {
            writer.start_file(
                name.as_str(),
                file_options
                    .compression_method(CompressionMethod::Deflated)
                    .compression_level(options.compression_level),
            )?;

            let mut file = fs::File::open(node.path())?;
            io::copy(&mut file, writer)?
        }
    };

    on_entry(&ArchivedEntry { name, kind, size });

    Ok(Visit::Continue)
}

// timestamps are pinned to zip epoch, so output depends on content only
#[cfg(unix)]
fn entry_file_options(node: &DirEntry) -> Result<FileOptions, Error> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = node.metadata()?;
    let file_options = FileOptions::default()
        .last_modified_time(DateTime::default())
        .unix_permissions(metadata.permissions().mode());

    Ok(file_options)
}
#[cfg(not(unix))]
fn entry_file_options(_node: &DirEntry) -> Result<FileOptions, Error> {
    Ok(FileOptions::default().last_modified_time(DateTime::default()))
}
