// src/catalog/os.rs

//! OS images published as `bci/bci-<name>`
//!
//! Micro has no script of its own but still ships a `config.sh`, so kiwi
//! runs the product setup and imports the build keys.

use crate::error::Result;
use crate::image::{BuildType, ContainerImage, FromImage, ImageBuilder, Package, ReleaseStage};

/// Script of images that only need the `config.sh` prologue
const EMPTY_SCRIPT: &str = "\n";

/// Service pack, release stage and package name of images built on both service packs
const SP3_AND_SP4: [(u8, ReleaseStage, &str); 2] = [
    (3, ReleaseStage::Released, ""),
    (4, ReleaseStage::Beta, "-image"),
];

pub(super) fn images() -> Result<Vec<ContainerImage>> {
    let mut images = init()?;
    images.extend(micro()?);
    images.extend(minimal()?);
    images.push(busybox()?);
    Ok(images)
}

fn init() -> Result<Vec<ContainerImage>> {
    SP3_AND_SP4
        .into_iter()
        .map(|(sp_version, release_stage, suffix)| {
            ImageBuilder::os("init", "Init")
                .with_ibs_package(format!("init{}", suffix))
                .with_sp_version(sp_version)
                .with_release_stage(release_stage)
                .with_build_type(if sp_version == 3 {
                    BuildType::Kiwi
                } else {
                    BuildType::Docker
                })
                .with_latest(sp_version == 3)
                .with_custom_description(
                    "Image containing a systemd environment for containers based on the SLE Base Container Image.",
                )
                .with_packages(["systemd", "gzip"])
                .with_entrypoint("/usr/lib/systemd/systemd")
                .with_label(
                    "usage",
                    "This container should only be used to build containers for daemons. Add your packages and enable services using systemctl.",
                )
                .build()
        })
        .collect()
}

fn micro() -> Result<Vec<ContainerImage>> {
    SP3_AND_SP4
        .into_iter()
        .map(|(sp_version, release_stage, suffix)| {
            ImageBuilder::os("micro", "%OS_VERSION% Micro")
                .with_ibs_package(format!("micro{}", suffix))
                .with_sp_version(sp_version)
                .with_release_stage(release_stage)
                .with_build_type(BuildType::Kiwi)
                .with_from_image(FromImage::Scratch)
                .with_latest(sp_version == 3)
                .with_custom_description(
                    "Image containing a micro environment for containers based on the SLE Base Container Image.",
                )
                .with_packages(
                    ["bash", "ca-certificates-mozilla-prebuilt", "distribution-release"]
                        .map(Package::bootstrap),
                )
                .with_config_sh_script(EMPTY_SCRIPT)
                .build()
        })
        .collect()
}

fn minimal() -> Result<Vec<ContainerImage>> {
    SP3_AND_SP4
        .into_iter()
        .map(|(sp_version, release_stage, suffix)| {
            ImageBuilder::os("minimal", "%OS_VERSION% Minimal")
                .with_ibs_package(format!("minimal{}", suffix))
                .with_sp_version(sp_version)
                .with_release_stage(release_stage)
                .with_build_type(BuildType::Kiwi)
                .with_from_image(FromImage::Image("bci/bci-micro".to_string()))
                .with_latest(sp_version == 3)
                .with_custom_description(
                    "Image containing a minimal environment for containers based on the SLE Base Container Image.",
                )
                .with_packages(["rpm-ndb", "perl-base", "distribution-release"].map(Package::bootstrap))
                .with_packages(
                    ["grep", "diffutils", "info", "fillup", "libzio1"].map(Package::delete),
                )
                .build()
        })
        .collect()
}

fn busybox() -> Result<ContainerImage> {
    ImageBuilder::os("busybox", "Busybox")
        .with_ibs_package("busybox-image")
        .with_sp_version(4)
        .with_release_stage(ReleaseStage::Beta)
        .with_build_type(BuildType::Kiwi)
        .with_from_image(FromImage::Scratch)
        .with_latest(true)
        .with_custom_description("Image containing Busybox based on the SLE Base Container Image.")
        .with_entrypoint("/bin/sh")
        .with_packages(
            [
                "busybox",
                "busybox-links",
                "distribution-release",
                "ca-certificates-mozilla-prebuilt",
            ]
            .map(Package::bootstrap),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::PackageType;

    #[test]
    fn test_init_package_names() {
        let images = init().unwrap();
        assert_eq!(images[0].ibs_package(), "init");
        assert_eq!(images[0].recipe_file_name(), "init.kiwi");
        assert_eq!(images[1].ibs_package(), "init-image");
        assert_eq!(images[1].recipe_file_name(), "Dockerfile");
    }

    #[test]
    fn test_micro_ships_config_sh() {
        for image in micro().unwrap() {
            let script = image.config_sh().unwrap().unwrap();
            assert!(script.contains("suseImportBuildKey\n"));
            assert!(script.ends_with("exit 0\n"));
        }
    }

    #[test]
    fn test_minimal_package_blocks() {
        let images = minimal().unwrap();
        let blocks = images[0].kiwi_packages();

        assert!(blocks.contains("<packages type=\"bootstrap\">"));
        assert!(blocks.contains("<packages type=\"delete\">"));
        assert!(!blocks.contains("<packages type=\"image\">"));
        assert!(!blocks.contains("<packages type=\"uninstall\">"));
        assert_eq!(
            images[0].packages_of_type(PackageType::Delete).len(),
            5
        );
    }

    #[test]
    fn test_busybox_has_no_base() {
        let image = busybox().unwrap();
        assert_eq!(image.base_image(), None);
        assert_eq!(image.build_tags()[0], "bci/bci-busybox:%OS_VERSION_ID_SP%");
    }
}
