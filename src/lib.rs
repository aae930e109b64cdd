// src/lib.rs

//! BCI build recipe generator
//!
//! Turns declarative descriptions of SLE Base Container Images into the files
//! the build service needs to build them.
//!
//! # Architecture
//!
//! - Descriptors: validated, read-only image descriptions (`image`)
//! - Catalog: every published image, keyed by `<nvr>-sp<service pack>`
//! - Rendering: tera templates for `Dockerfile`, kiwi and `_service` files
//! - Emission: concurrent writes of all files of one image

pub mod catalog;
pub mod emit;
mod error;
pub mod image;
pub mod render;

pub use catalog::Catalog;
pub use emit::write_files_to_folder;
pub use error::{Error, Result};
pub use image::{
    BuildType, ContainerImage, FileContents, FromImage, ImageBuilder, ImageKind, ImageType,
    Package, PackageType, ParseVersion, ReleaseStage, Replacement,
};
pub use render::Renderer;
