// src/error.rs

//! Error types for image descriptors, rendering and file emission

use thiserror::Error;

use crate::image::PackageType;

/// Errors that can occur while building, rendering or writing an image
#[derive(Debug, Error)]
pub enum Error {
    /// An image was declared without any packages
    #[error("No packages were added to {0}.")]
    EmptyPackageList(String),

    /// Both a custom Dockerfile tail and a config.sh script were set
    #[error("Cannot specify both a custom_end and a config.sh script for {0}! Use just config_sh_script.")]
    ConflictingTail(String),

    /// A language or application stack image has no version
    #[error("A language stack container requires a version ({0})")]
    MissingVersion(String),

    /// A required descriptor field was never set
    #[error("Image {image} is missing the required field '{field}'")]
    MissingField { image: String, field: &'static str },

    /// The service pack is not one we build images for
    #[error("Unsupported SLE service pack {sp_version} for {image}")]
    UnsupportedServicePack { image: String, sp_version: u8 },

    /// A kiwi-only package phase was used in a Dockerfile build
    #[error("Cannot add a package of type {pkg_type} into a Dockerfile based build ({package}).")]
    PackageTypeNotSupported {
        package: String,
        pkg_type: PackageType,
    },

    /// A kiwi build was requested for an image with a raw Dockerfile tail
    #[error("{0} cannot be built as a kiwi image, it has a `custom_end` set.")]
    KiwiCustomEnd(String),

    /// An extra file would escape the package directory or clash with another file
    #[error("Invalid extra file '{file}' for {image}: {reason}")]
    InvalidExtraFile {
        image: String,
        file: String,
        reason: &'static str,
    },

    /// An exec-form entrypoint could not be parsed
    #[error("Invalid entrypoint '{entrypoint}': {reason}")]
    InvalidEntrypoint { entrypoint: String, reason: String },

    /// The requested image is not part of the catalog
    #[error("Unknown image '{name}'. Available images: {available}")]
    UnknownImage { name: String, available: String },

    /// Two catalog entries share the same key
    #[error("Duplicate image in catalog: {0}")]
    DuplicateImage(String),

    /// Template parsing or rendering failed
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// Writing a file failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for image operations
pub type Result<T> = std::result::Result<T, Error>;
