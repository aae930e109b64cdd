// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use bci_build::{Catalog, ContainerImage, Renderer};
use tempfile::TempDir;

/// Load the catalog and the renderer used by most tests.
pub fn setup() -> (Catalog, Renderer) {
    let catalog = Catalog::load().unwrap();
    let renderer = Renderer::new().unwrap();
    (catalog, renderer)
}

/// Create an empty package directory.
///
/// Keep the TempDir alive to prevent cleanup.
pub fn package_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Number of build tags an image must have:
/// version, optional latest, release and one per alias for every name.
pub fn expected_tag_count(image: &ContainerImage) -> usize {
    let names = 1 + image.additional_names().len();
    let latest = usize::from(image.is_latest());
    let aliases = if image.kind().is_stack() {
        image.additional_versions().len()
    } else {
        0
    };
    names * (2 + latest + aliases)
}
