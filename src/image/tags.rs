// src/image/tags.rs

//! Build tags, version labels and descriptive labels
//!
//! Build tags are full repository paths on the registry, not just tags:
//! `bci/python:3.6` rather than `3.6`. Placeholders such as `%RELEASE%` and
//! `%OS_VERSION_ID_SP%` are expanded by the build service.

use super::{ContainerImage, ImageKind, ImageType};

/// Registry from which the images are pulled
pub const REGISTRY: &str = "registry.suse.com";

impl ContainerImage {
    /// Repository prefix of stack images
    fn registry_prefix(&self) -> &'static str {
        match self.kind {
            ImageKind::ApplicationStack => "suse",
            ImageKind::LanguageStack | ImageKind::Os => "bci",
        }
    }

    /// Name-version identifier used to uniquely identify this image
    pub fn nvr(&self) -> String {
        match self.kind {
            ImageKind::Os => self.name.clone(),
            ImageKind::LanguageStack | ImageKind::ApplicationStack => {
                format!("{}-{}", self.name, self.version)
            }
        }
    }

    /// The main version label, also used as a build tag
    pub fn version_label(&self) -> String {
        match self.kind {
            ImageKind::Os => "%OS_VERSION_ID_SP%.%RELEASE%".to_string(),
            ImageKind::LanguageStack | ImageKind::ApplicationStack => self.version.clone(),
        }
    }

    /// Value of the `com.suse.image-type` label
    pub fn image_type(&self) -> ImageType {
        match self.kind {
            ImageKind::ApplicationStack => ImageType::Application,
            ImageKind::LanguageStack | ImageKind::Os => ImageType::SleBci,
        }
    }

    /// All build tags of this image, primary tag first
    ///
    /// Every name (the image name followed by the additional names) gets the
    /// same set of tags.
    pub fn build_tags(&self) -> Vec<String> {
        let version_label = self.version_label();
        let mut tags = Vec::new();

        for name in std::iter::once(&self.name).chain(self.additional_names.iter()) {
            match self.kind {
                ImageKind::Os => {
                    tags.push(format!("bci/bci-{}:%OS_VERSION_ID_SP%", name));
                    tags.push(format!("bci/bci-{}:{}", name, version_label));
                    if self.is_latest {
                        tags.push(format!("bci/bci-{}:latest", name));
                    }
                }
                ImageKind::LanguageStack | ImageKind::ApplicationStack => {
                    let prefix = self.registry_prefix();
                    tags.push(format!("{}/{}:{}", prefix, name, version_label));
                    if self.is_latest {
                        tags.push(format!("{}/{}:latest", prefix, name));
                    }
                    tags.push(format!("{}/{}:{}-%RELEASE%", prefix, name, version_label));
                    for ver in &self.additional_versions {
                        tags.push(format!("{}/{}:{}", prefix, name, ver));
                    }
                }
            }
        }

        tags
    }

    /// The primary pull URL, used for the `org.opensuse.reference` label
    pub fn reference(&self) -> String {
        let tags = self.build_tags();
        format!("{}/{}", REGISTRY, tags.first().map(String::as_str).unwrap_or_default())
    }

    /// Value of the `org.opencontainers.image.title` label
    pub fn title(&self) -> String {
        format!("SLE BCI {} Container Image", self.pretty_name)
    }

    /// Value of the `org.opencontainers.image.description` label
    pub fn description(&self) -> String {
        if self.custom_description.is_empty() {
            format!(
                "Image containing {} based on the SLE Base Container Image.",
                self.pretty_name
            )
        } else {
            self.custom_description.clone()
        }
    }

    /// Prefix under which all labels are duplicated
    pub fn labelprefix(&self) -> String {
        let end = if self.custom_labelprefix_end.is_empty() {
            &self.name
        } else {
            &self.custom_labelprefix_end
        };
        format!("com.suse.bci.{}", end)
    }

    /// Value of kiwi's `additionaltags` attribute
    ///
    /// Comma separated tags of every build tag except the primary one whose
    /// repository path ends with the image name. `None` when there are none.
    pub fn kiwi_additional_tags(&self) -> Option<String> {
        let tags = self.build_tags();
        let extra_tags: Vec<&str> = tags
            .iter()
            .skip(1)
            .filter_map(|tag| {
                let (path, tag) = tag.split_once(':')?;
                path.ends_with(self.name.as_str()).then_some(tag)
            })
            .collect();

        if extra_tags.is_empty() {
            None
        } else {
            Some(extra_tags.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{ContainerImage, ImageBuilder, ImageType, ReleaseStage};

    fn node(is_latest: bool) -> ContainerImage {
        ImageBuilder::language_stack("nodejs", "Node.js 14", 14)
            .with_ibs_package("nodejs-14")
            .with_sp_version(3)
            .with_release_stage(ReleaseStage::Released)
            .with_latest(is_latest)
            .with_additional_names(["node"])
            .with_packages(["nodejs14", "npm14"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_language_stack_tags() {
        assert_eq!(
            node(true).build_tags(),
            vec![
                "bci/nodejs:14",
                "bci/nodejs:latest",
                "bci/nodejs:14-%RELEASE%",
                "bci/node:14",
                "bci/node:latest",
                "bci/node:14-%RELEASE%",
            ]
        );
        assert_eq!(node(false).build_tags().len(), 4);
        assert_eq!(node(true).nvr(), "nodejs-14");
        assert_eq!(node(true).version_label(), "14");
    }

    #[test]
    fn test_application_stack_tags_with_aliases() {
        let image = ImageBuilder::application_stack("apache-tomcat", "Apache Tomcat 10", 10)
            .with_ibs_package("apache-tomcat-10-image")
            .with_sp_version(4)
            .with_release_stage(ReleaseStage::Beta)
            .with_additional_versions(["%%tomcat_version%%", "%%tomcat_minor%%"])
            .with_packages(["tomcat10"])
            .build()
            .unwrap();

        assert_eq!(
            image.build_tags(),
            vec![
                "suse/apache-tomcat:10",
                "suse/apache-tomcat:10-%RELEASE%",
                "suse/apache-tomcat:%%tomcat_version%%",
                "suse/apache-tomcat:%%tomcat_minor%%",
            ]
        );
        assert_eq!(image.image_type(), ImageType::Application);
        assert_eq!(image.reference(), "registry.suse.com/suse/apache-tomcat:10");
    }

    #[test]
    fn test_os_tags() {
        let image = ImageBuilder::os("init", "Init")
            .with_ibs_package("init")
            .with_sp_version(3)
            .with_release_stage(ReleaseStage::Released)
            .with_latest(true)
            .with_packages(["systemd", "gzip"])
            .build()
            .unwrap();

        assert_eq!(
            image.build_tags(),
            vec![
                "bci/bci-init:%OS_VERSION_ID_SP%",
                "bci/bci-init:%OS_VERSION_ID_SP%.%RELEASE%",
                "bci/bci-init:latest",
            ]
        );
        assert_eq!(image.nvr(), "init");
        assert_eq!(image.version_label(), "%OS_VERSION_ID_SP%.%RELEASE%");
        assert_eq!(image.image_type(), ImageType::SleBci);
        assert_eq!(
            image.kiwi_additional_tags().as_deref(),
            Some("%OS_VERSION_ID_SP%.%RELEASE%,latest")
        );
    }

    #[test]
    fn test_title_and_description() {
        let image = node(false);
        assert_eq!(image.title(), "SLE BCI Node.js 14 Container Image");
        assert_eq!(
            image.description(),
            "Image containing Node.js 14 based on the SLE Base Container Image."
        );

        let image = ImageBuilder::language_stack("golang", "Golang 1.17", "1.17")
            .with_ibs_package("golang-1.17")
            .with_sp_version(3)
            .with_release_stage(ReleaseStage::Released)
            .with_custom_description("Image containing the Golang 1.17 development environment.")
            .with_packages(["go1.17"])
            .build()
            .unwrap();
        assert_eq!(
            image.description(),
            "Image containing the Golang 1.17 development environment."
        );
    }

    #[test]
    fn test_labelprefix() {
        assert_eq!(node(false).labelprefix(), "com.suse.bci.nodejs");

        let image = ImageBuilder::language_stack("openjdk-devel", "OpenJDK 11 Development", 11)
            .with_ibs_package("openjdk-11-devel")
            .with_sp_version(3)
            .with_release_stage(ReleaseStage::Released)
            .with_custom_labelprefix_end("openjdk.devel")
            .with_packages(["java-11-openjdk-devel"])
            .build()
            .unwrap();
        assert_eq!(image.labelprefix(), "com.suse.bci.openjdk.devel");
    }

    #[test]
    fn test_kiwi_additional_tags_only_primary_name() {
        // Tags of the additional name `node` do not end with `nodejs`
        assert_eq!(
            node(true).kiwi_additional_tags().as_deref(),
            Some("latest,14-%RELEASE%")
        );
        assert_eq!(
            node(false).kiwi_additional_tags().as_deref(),
            Some("14-%RELEASE%")
        );
    }
}
