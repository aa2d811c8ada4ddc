//! Main packer executable, to be used as cli tool. For help run this command
//! with `-h`.

#![warn(missing_docs)]

use anyhow::Error;
use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::{path::PathBuf, process::ExitCode};
use webapp_pack_packer::{
    directory::{self, EntryKind},
    package,
};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Arguments {
    /// The application directory to be packaged. Must contain
    /// `manifest.webapp`.
    #[arg(short, long, default_value = "app")]
    pub path: PathBuf,

    /// Output package path.
    #[arg(short, long, default_value = "app.zip")]
    pub output: PathBuf,

    /// Print packed entries and progress.
    #[arg(short, long)]
    pub verbose: bool,

    /// Follow links while traversing the application directory. Links are
    /// skipped otherwise.
    #[arg(long)]
    pub follow_links: bool,

    /// Deflate level (0-9) for application files. If not set, uses sane
    /// defaults.
    #[arg(long)]
    pub compression_level: Option<i32>,
}
impl Arguments {
    pub fn into_package_options(self) -> package::PackageOptions {
        let mut archive_options = directory::ArchiveOptions::default();
        archive_options.follow_links = self.follow_links;
        archive_options.compression_level = self.compression_level;

        package::PackageOptions {
            source_path: self.path,
            output_path: self.output,
            archive_options,
        }
    }
}

fn run(arguments: Arguments) -> Result<(), Error> {
    SimpleLogger::new()
        .without_timestamps()
        .with_level(if arguments.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        })
        .init()?;

    let package_options = arguments.into_package_options();

    package::build(&package_options, |entry| match entry.kind {
        EntryKind::Directory => log::info!("{}", entry.name),
        EntryKind::File => log::info!("{} ({} bytes)", entry.name, entry.size),
    })?;

    println!("package written to {}", package_options.output_path.display());

    Ok(())
}

fn main() -> ExitCode {
    let arguments = Arguments::parse();

    match run(arguments) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            println!("{error:#}");
            ExitCode::FAILURE
        }
    }
}
