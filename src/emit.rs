// src/emit.rs

//! Writing the build service files of an image to a package directory
//!
//! All files of one image are written concurrently. The changelog is only
//! created when the package does not have one yet, so existing history is
//! never lost.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use tokio::fs::OpenOptions;
use tracing::{debug, info};

use crate::error::Result;
use crate::image::{BuildType, CONFIG_SH, ContainerImage, SERVICE_FILE};
use crate::render::Renderer;

async fn write_file(path: PathBuf, contents: Vec<u8>) -> Result<()> {
    debug!("Writing {}", path.display());
    tokio::fs::write(&path, contents).await?;
    Ok(())
}

/// Create an empty changelog unless one exists
///
/// Returns `false` if the file was already there. The existence check and
/// the creation are a single operation, so history is never truncated.
async fn create_changelog(path: PathBuf) -> Result<bool> {
    match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await
    {
        Ok(_) => {
            debug!("Created {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!("Keeping existing {}", path.display());
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Render every file of `image` into the existing directory `dest`
///
/// Returns the names of the written files: `_service`, the recipe,
/// `config.sh` for kiwi builds with a script, the changelog if it was
/// created, then the image's extra files in the order they were added.
/// The first failing write aborts the whole batch.
pub async fn write_files_to_folder(
    image: &ContainerImage,
    renderer: &Renderer,
    dest: &Path,
) -> Result<Vec<String>> {
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();

    files.push((
        SERVICE_FILE.to_string(),
        renderer.render_service(image)?.into_bytes(),
    ));
    files.push((
        image.recipe_file_name(),
        renderer.render_recipe(image)?.into_bytes(),
    ));

    if image.build_type() == BuildType::Kiwi
        && let Some(script) = image.config_sh()?
    {
        files.push((CONFIG_SH.to_string(), script.into_bytes()));
    }

    let generated = files.len();
    for (name, contents) in image.extra_files() {
        files.push((name.clone(), contents.as_bytes().to_vec()));
    }

    let mut names: Vec<String> = files.iter().map(|(name, _)| name.clone()).collect();
    let changes = image.changes_file_name();

    let (_, created) = futures::try_join!(
        try_join_all(
            files
                .into_iter()
                .map(|(name, contents)| write_file(dest.join(name), contents)),
        ),
        create_changelog(dest.join(&changes)),
    )?;
    if created {
        names.insert(generated, changes);
    }

    info!(
        "Wrote {} files for {} to {}",
        names.len(),
        image.catalog_key(),
        dest.display()
    );
    Ok(names)
}
