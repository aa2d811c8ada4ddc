//! webapp-pack-packer turns a web application directory (a packaged app with
//! `manifest.webapp` at its root, as used by KaiOS / Firefox OS) into a
//! single installable package file.
//!
//! A package is a zip container with exactly two entries:
//! - `metadata.json` - a small descriptor (see
//!   [common::descriptor::Descriptor]) pointing at the application manifest,
//! - `application.zip` - the application directory, archived recursively.
//!
//! This crate can be used in two ways:
//! - As a standalone application (`webapp-pack` binary), this is the
//!   preferred way if you are using build scripts, CI pipeline etc.
//! - As a library, imported to your project, if you want to package from
//!   build.rs or other tooling.
//!
//! # Using as a standalone application
//!
//! `webapp-pack` provides up to date documentation with `$ webapp-pack
//! --help`. With no arguments it packs `./app` into `./app.zip`:
//! ```text
//! $ webapp-pack --path ./calculator --output ./calculator.zip --verbose
//! ```
//!
//! Given a `calculator` directory:
//! ```text
//! calculator
//! |   manifest.webapp
//! |   index.html
//! +---.git
//! |       <version control data>
//! +---js
//! |       app.js
//! \---style
//!         app.css
//! ```
//! the package will contain `application.zip` with entries `index.html`,
//! `js/`, `js/app.js`, `manifest.webapp`, `style/`, `style/app.css`. The
//! `.git` directory is never packed.
//!
//! If `manifest.webapp` contains `"origin": "app://calculator.example.org"`,
//! `metadata.json` will be
//! `{"version":1,"manifestURL":"app://calculator.example.org/manifest.webapp"}`.
//! Without `origin`, a random application id is generated for each run.
//!
//! # Using as a library
//!
//! The whole process is available as [package::build], taking
//! [package::PackageOptions]. Parts can be used separately:
//! - [directory::archive] packs a directory into in-memory zip,
//! - [metadata::build] creates serialized descriptor from manifest,
//! - [package::assemble] writes both into the package file,
//! - [entry_name::from_node_path] builds archive entry names from fs paths.
//!
//! ### Examples
//! ```no_run
//! # use anyhow::Error;
//! # use std::path::PathBuf;
//! # use webapp_pack_packer::package::{build, PackageOptions};
//!
//! # fn main() -> Result<(), Error> {
//! build(
//!     &PackageOptions {
//!         source_path: PathBuf::from("calculator"),
//!         output_path: PathBuf::from("calculator.zip"),
//!         ..PackageOptions::default()
//!     },
//!     |_entry| {},
//! )?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub use webapp_pack_common as common;

pub mod directory;
pub mod entry_name;
pub mod metadata;
pub mod package;
