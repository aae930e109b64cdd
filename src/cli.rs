// src/cli.rs
//! CLI definitions for bci-build
//!
//! The command implementation lives in the `commands` module.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bci-build")]
#[command(author = "SUSE LLC")]
#[command(version)]
#[command(about = "Write the build files of a BCI container image to a directory", long_about = None)]
pub struct Cli {
    /// The container image whose package contents should be written
    /// (for example python-3.6-sp3)
    pub image: String,

    /// Destination folder to which the files should be written
    pub destination: PathBuf,
}
