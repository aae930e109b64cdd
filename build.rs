// build.rs

//! Renders the man page of bci-build from the same clap definitions the
//! binary parses.

use clap::CommandFactory;
use clap_mangen::Man;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[allow(dead_code)]
#[path = "src/cli.rs"]
mod cli;

fn write_man_page(man_dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(man_dir)?;

    let mut buffer = Vec::new();
    Man::new(cli::Cli::command()).render(&mut buffer)?;

    let man_path = man_dir.join("bci-build.1");
    fs::write(&man_path, buffer)?;
    Ok(man_path)
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/cli.rs");

    let Some(manifest_dir) = env::var_os("CARGO_MANIFEST_DIR") else {
        println!("cargo:warning=CARGO_MANIFEST_DIR not set, skipping man page");
        return;
    };

    if let Err(e) = write_man_page(&PathBuf::from(manifest_dir).join("man")) {
        println!("cargo:warning=Failed to generate man page: {}", e);
    }
}
