// src/image/mod.rs

//! Container image descriptors
//!
//! A [`ContainerImage`] describes one SLE Base Container Image: what it is
//! called, which packages it installs, which environment it sets and how it
//! is built (from a `Dockerfile` or from a kiwi build description).
//!
//! Descriptors are created once through [`ImageBuilder`], which enforces the
//! invariants every image must satisfy, and are read-only afterwards. All the
//! strings that end up in the generated files (build tags, labels, package
//! blocks, environment lines) are derived from the descriptor on demand.
//!
//! # Image Kinds
//!
//! - **Os**: general purpose images (`bci/bci-init`, `bci/bci-micro`, ...)
//!   versioned with the OS itself
//! - **LanguageStack**: development stacks published below `bci/`
//! - **ApplicationStack**: applications published below `suse/`

mod builder;
mod package;
mod recipe;
mod replacement;
mod tags;

pub use builder::ImageBuilder;
pub use package::{Package, PackageType};
pub use recipe::KiwiEntrypoint;
pub use replacement::{ParseVersion, Replacement};
pub use tags::REGISTRY;

use strum_macros::{Display, EnumString};

/// Maintainer used when an image does not set its own
pub const DEFAULT_MAINTAINER: &str = "SUSE LLC (https://www.suse.com/)";

/// Value of the `org.opencontainers.image.url` label
pub const URL: &str = "https://www.suse.com/products/server/";

/// Value of the `org.opencontainers.image.vendor` label
pub const VENDOR: &str = "SUSE LLC";

/// SLE 15 service packs for which images are built
pub const SUPPORTED_SERVICE_PACKS: &[u8] = &[3, 4];

/// Recipe of Dockerfile based builds
pub const DOCKERFILE: &str = "Dockerfile";

/// Name of kiwi's image configuration script
pub const CONFIG_SH: &str = "config.sh";

/// Name of the build service's source service file
pub const SERVICE_FILE: &str = "_service";

/// Value of the `com.suse.release-stage` label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ReleaseStage {
    Beta,
    Released,
}

/// Value of the `com.suse.image-type` label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum ImageType {
    #[strum(serialize = "sle-bci")]
    SleBci,
    #[strum(serialize = "application")]
    Application,
}

/// How the image is built
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum BuildType {
    /// Built from a `Dockerfile`
    #[default]
    Docker,
    /// Built from a kiwi build description
    Kiwi,
}

/// Which family an image belongs to
///
/// The kind decides the registry prefix, the version label and the shape of
/// the build tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    /// An OS image, versioned together with the distribution
    Os,
    /// A language or development stack (`bci/<name>:<version>`)
    LanguageStack,
    /// An application (`suse/<name>:<version>`)
    ApplicationStack,
}

impl ImageKind {
    /// Check if images of this kind carry their own version
    pub fn is_stack(&self) -> bool {
        !matches!(self, ImageKind::Os)
    }
}

/// The image an image is derived from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FromImage {
    /// The SLE 15 base image of the image's service pack
    #[default]
    Default,
    /// Another image, referenced as `<path>:<tag>` in the build repositories
    Image(String),
    /// Built from scratch: no `FROM` line, no `derived_from`
    Scratch,
}

/// Contents of an additional file shipped with an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContents {
    Text(String),
    Binary(Vec<u8>),
}

impl FileContents {
    /// Raw bytes to write to disk
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FileContents::Text(text) => text.as_bytes(),
            FileContents::Binary(data) => data,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl From<&str> for FileContents {
    fn from(text: &str) -> Self {
        FileContents::Text(text.to_string())
    }
}

impl From<String> for FileContents {
    fn from(text: String) -> Self {
        FileContents::Text(text)
    }
}

impl From<Vec<u8>> for FileContents {
    fn from(data: Vec<u8>) -> Self {
        FileContents::Binary(data)
    }
}

impl From<&[u8]> for FileContents {
    fn from(data: &[u8]) -> Self {
        FileContents::Binary(data.to_vec())
    }
}

/// A fully validated container image descriptor
///
/// Obtain one through [`ImageBuilder`].
#[derive(Debug, Clone)]
pub struct ContainerImage {
    kind: ImageKind,
    name: String,
    pretty_name: String,
    ibs_package: String,
    sp_version: u8,
    release_stage: ReleaseStage,
    from_image: FromImage,
    is_latest: bool,
    version: String,
    additional_versions: Vec<String>,
    entrypoint: Option<String>,
    entrypoint_user: Option<String>,
    cmd: Vec<String>,
    exposes_tcp: Vec<u16>,
    env: Vec<(String, String)>,
    replacements_via_service: Vec<Replacement>,
    tech_preview: bool,
    extra_labels: Vec<(String, String)>,
    package_list: Vec<Package>,
    custom_end: String,
    config_sh_script: String,
    maintainer: String,
    extra_files: Vec<(String, FileContents)>,
    additional_names: Vec<String>,
    custom_labelprefix_end: String,
    custom_description: String,
    build_type: BuildType,
}

impl ContainerImage {
    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    /// Name under which the image is published
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human readable name used in the title and description
    pub fn pretty_name(&self) -> &str {
        &self.pretty_name
    }

    /// Package name in the build service project
    pub fn ibs_package(&self) -> &str {
        &self.ibs_package
    }

    pub fn sp_version(&self) -> u8 {
        self.sp_version
    }

    pub fn release_stage(&self) -> ReleaseStage {
        self.release_stage
    }

    pub fn is_latest(&self) -> bool {
        self.is_latest
    }

    /// Primary version of a stack image (empty for OS images)
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Version aliases that are added as tags
    pub fn additional_versions(&self) -> &[String] {
        &self.additional_versions
    }

    /// Names published alongside [`ContainerImage::name`]
    pub fn additional_names(&self) -> &[String] {
        &self.additional_names
    }

    pub fn entrypoint(&self) -> Option<&str> {
        self.entrypoint.as_deref()
    }

    pub fn entrypoint_user(&self) -> Option<&str> {
        self.entrypoint_user.as_deref()
    }

    pub fn cmd(&self) -> &[String] {
        &self.cmd
    }

    pub fn exposes_tcp(&self) -> &[u16] {
        &self.exposes_tcp
    }

    /// Environment variables in declaration order
    pub fn env(&self) -> &[(String, String)] {
        &self.env
    }

    pub fn replacements_via_service(&self) -> &[Replacement] {
        &self.replacements_via_service
    }

    pub fn tech_preview(&self) -> bool {
        self.tech_preview
    }

    /// Additional labels placed in the prefixed label section
    pub fn extra_labels(&self) -> &[(String, String)] {
        &self.extra_labels
    }

    pub fn package_list(&self) -> &[Package] {
        &self.package_list
    }

    pub fn custom_end(&self) -> &str {
        &self.custom_end
    }

    pub fn config_sh_script(&self) -> &str {
        &self.config_sh_script
    }

    pub fn maintainer(&self) -> &str {
        &self.maintainer
    }

    /// Additional files shipped with the image, in declaration order
    pub fn extra_files(&self) -> &[(String, FileContents)] {
        &self.extra_files
    }

    pub fn build_type(&self) -> BuildType {
        self.build_type
    }

    pub fn from_image(&self) -> &FromImage {
        &self.from_image
    }

    /// Resolve the base image reference, `None` for scratch images
    pub fn base_image(&self) -> Option<String> {
        match &self.from_image {
            FromImage::Default => Some(format!("suse/sle15:15.{}", self.sp_version)),
            FromImage::Image(reference) => Some(reference.clone()),
            FromImage::Scratch => None,
        }
    }

    /// The project in the build service where this image is maintained
    pub fn ibs_project(&self) -> String {
        format!("SUSE:SLE-15-SP{}:Update:BCI", self.sp_version)
    }

    /// File name of the primary build recipe
    pub fn recipe_file_name(&self) -> String {
        match self.build_type {
            BuildType::Docker => DOCKERFILE.to_string(),
            BuildType::Kiwi => format!("{}.kiwi", self.ibs_package),
        }
    }

    /// File name of the package changelog
    pub fn changes_file_name(&self) -> String {
        format!("{}.changes", self.ibs_package)
    }

    /// Key under which the image is registered in the catalog
    pub fn catalog_key(&self) -> String {
        format!("{}-sp{}", self.nvr(), self.sp_version)
    }
}

/// Escape a value for use inside an XML attribute
pub(crate) fn xml_escape(raw: &str) -> String {
    quick_xml::escape::escape(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample(build_type: BuildType, from_image: FromImage) -> ContainerImage {
        ImageBuilder::language_stack("python", "Python 3.6", "3.6")
            .with_ibs_package("python-3.6")
            .with_sp_version(3)
            .with_release_stage(ReleaseStage::Released)
            .with_build_type(build_type)
            .with_from_image(from_image)
            .with_packages(["python3", "python3-pip"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_base_image_resolution() {
        let image = sample(BuildType::Docker, FromImage::Default);
        assert_eq!(image.base_image().as_deref(), Some("suse/sle15:15.3"));

        let image = sample(BuildType::Docker, FromImage::Image("bci/openjdk:11".into()));
        assert_eq!(image.base_image().as_deref(), Some("bci/openjdk:11"));

        let image = sample(BuildType::Kiwi, FromImage::Scratch);
        assert!(image.base_image().is_none());
    }

    #[test]
    fn test_recipe_file_names() {
        let image = sample(BuildType::Docker, FromImage::Default);
        assert_eq!(image.recipe_file_name(), "Dockerfile");
        assert_eq!(image.changes_file_name(), "python-3.6.changes");

        let image = sample(BuildType::Kiwi, FromImage::Default);
        assert_eq!(image.recipe_file_name(), "python-3.6.kiwi");
    }

    #[test]
    fn test_ibs_project_and_key() {
        let image = sample(BuildType::Docker, FromImage::Default);
        assert_eq!(image.ibs_project(), "SUSE:SLE-15-SP3:Update:BCI");
        assert_eq!(image.catalog_key(), "python-3.6-sp3");
    }

    #[test]
    fn test_enum_strings() {
        assert_eq!(ReleaseStage::Beta.to_string(), "beta");
        assert_eq!(ReleaseStage::from_str("released").unwrap(), ReleaseStage::Released);
        assert_eq!(ImageType::SleBci.to_string(), "sle-bci");
        assert_eq!(ImageType::Application.to_string(), "application");
        assert_eq!(BuildType::Kiwi.to_string(), "kiwi");
        assert_eq!(BuildType::default(), BuildType::Docker);
    }

    #[test]
    fn test_file_contents() {
        let text = FileContents::from("#!/bin/sh\n");
        assert_eq!(text.as_bytes(), b"#!/bin/sh\n");
        assert!(!text.is_empty());

        let binary = FileContents::from(vec![0u8, 159, 146, 150]);
        assert_eq!(binary.as_bytes(), &[0u8, 159, 146, 150]);
        assert!(FileContents::from("").is_empty());
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
        assert_eq!(xml_escape("plain"), "plain");
    }
}
