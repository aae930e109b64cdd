// src/commands.rs
//! Command handlers for the bci-build CLI

use anyhow::{Context, Result};
use bci_build::{Catalog, Renderer, write_files_to_folder};
use std::path::Path;
use tracing::info;

/// Write the build files of a catalog image to `destination`
///
/// The destination directory is created if it does not exist. An existing
/// changelog in it is left untouched.
pub async fn cmd_write(image: &str, destination: &Path) -> Result<()> {
    let catalog = Catalog::load().context("Failed to load the image catalog")?;
    let image = catalog.get(image)?;

    info!(
        "Writing {} ({}) to {}",
        image.catalog_key(),
        image.recipe_file_name(),
        destination.display()
    );

    tokio::fs::create_dir_all(destination)
        .await
        .with_context(|| format!("Failed to create directory: {}", destination.display()))?;

    let renderer = Renderer::new().context("Failed to load templates")?;
    let files = write_files_to_folder(image, &renderer, destination)
        .await
        .with_context(|| format!("Failed to write files to {}", destination.display()))?;

    for file in &files {
        println!("{}", file);
    }

    Ok(())
}
