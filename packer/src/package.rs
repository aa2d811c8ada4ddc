//! Package helpers. Contains [assemble], writing the final package, and
//! [build], running the whole packaging for given [PackageOptions].

use crate::{
    common::{APPLICATION_ENTRY_NAME, METADATA_ENTRY_NAME, descriptor::Descriptor},
    directory::{self, ArchiveOptions, ArchivedEntry},
    metadata,
};
use anyhow::{Context, Error};
use std::{
    fs,
    io::{Seek, Write},
    path::{Path, PathBuf},
};
use zip::{CompressionMethod, ZipWriter, write::FileOptions};

/// Settings for [build] function.
///
/// If not sure what to set here, use [Default].
#[derive(Debug)]
pub struct PackageOptions {
    /// Application directory, containing `manifest.webapp`.
    pub source_path: PathBuf,
    /// Where to write the package. Existing file is overwritten.
    pub output_path: PathBuf,
    /// Options for archiving `source_path`.
    pub archive_options: ArchiveOptions,
}
impl Default for PackageOptions {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from("app"),
            output_path: PathBuf::from("app.zip"),
            archive_options: ArchiveOptions::default(),
        }
    }
}

/// Returned by [build], describes written package.
#[derive(Debug)]
pub struct PackageSummary {
    /// Size of the archived application, as stored in the package.
    pub application_size: usize,
    /// Descriptor stored in the package.
    pub descriptor: Descriptor,
}

/// Creates package from `options`.
///
/// Application directory is archived with [directory::archive] (reporting
/// entries to `on_entry`), descriptor is created with
/// [metadata::build_descriptor] and both are written with [assemble]. Output
/// file is created only after both previous steps succeed.
///
/// # Examples
///
/// ```no_run
/// # use anyhow::Error;
/// # use std::path::PathBuf;
/// # use webapp_pack_packer::package::{build, PackageOptions};
/// #
/// # fn main() -> Result<(), Error> {
/// #
/// let summary = build(
///     &PackageOptions {
///         source_path: PathBuf::from("calculator"),
///         output_path: PathBuf::from("calculator.zip"),
///         ..PackageOptions::default()
///     },
///     |entry| println!("{}", entry.name),
/// )?;
/// println!("manifest at {}", summary.descriptor.manifest_url);
/// #
/// # Ok(())
/// # }
/// ```
pub fn build(
    options: &PackageOptions,
    on_entry: impl FnMut(&ArchivedEntry),
) -> Result<PackageSummary, Error> {
    log::info!("packing {} in zip", options.source_path.display());
    let application = directory::archive(
        &options.source_path,
        &options.archive_options,
        on_entry,
    )?;
    log::info!("zip packed, {} bytes", application.len());

    let descriptor = metadata::build_descriptor(&options.source_path)?;
    let metadata = metadata::to_bytes(&descriptor)?;
    log::info!(
        "metadata generated: {}",
        String::from_utf8_lossy(&metadata)
    );

    assemble(&options.output_path, &metadata, &application)?;

    Ok(PackageSummary {
        application_size: application.len(),
        descriptor,
    })
}

fn store(
    writer: impl Write + Seek,
    metadata: &[u8],
    application: &[u8],
) -> Result<(), Error> {
    let mut writer = ZipWriter::new(writer);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    writer
        .start_file(METADATA_ENTRY_NAME, options)
        .context("metadata entry")?;
    writer.write_all(metadata).context("metadata entry")?;

    writer
        .start_file(APPLICATION_ENTRY_NAME, options)
        .context("application entry")?;
    writer
        .write_all(application)
        .context("application entry")?;

    writer.finish()?;

    Ok(())
}

/// Writes package to given file path: `metadata.json` containing `metadata`
/// followed by `application.zip` containing `application`.
///
/// File is created or truncated. Any error is returned as is, with output path
/// as context.
pub fn assemble(
    path: &Path,
    metadata: &[u8],
    application: &[u8],
) -> Result<(), Error> {
    let output_error_context = || format!("write package {}", path.display());

    let mut file = fs::File::create(path).with_context(output_error_context)?;

    store(&mut file, metadata, application).with_context(output_error_context)?;

    file.sync_all().with_context(output_error_context)?;
    drop(file);

    Ok(())
}
