// src/render/context.rs

//! Template contexts
//!
//! Each template gets its own context so that a template only forces the
//! derivations it needs: a kiwi build may contain bootstrap packages which
//! the flat `Dockerfile` package list rejects.

use serde::Serialize;

use crate::error::Result;
use crate::image::{BuildType, ContainerImage, KiwiEntrypoint, Replacement, URL, VENDOR};

/// Values shared by all templates
#[derive(Debug, Serialize)]
pub struct CommonContext {
    pub name: String,
    pub ibs_package: String,
    pub sp_version: u8,
    pub title: String,
    pub description: String,
    pub version_label: String,
    pub reference: String,
    pub labelprefix: String,
    pub image_type: String,
    pub release_stage: String,
    pub tech_preview: bool,
    pub maintainer: String,
    pub url: &'static str,
    pub vendor: &'static str,
    pub build_tags: Vec<String>,
    pub from_image: Option<String>,
}

impl CommonContext {
    pub fn new(image: &ContainerImage) -> Self {
        Self {
            name: image.name().to_string(),
            ibs_package: image.ibs_package().to_string(),
            sp_version: image.sp_version(),
            title: image.title(),
            description: image.description(),
            version_label: image.version_label(),
            reference: image.reference(),
            labelprefix: image.labelprefix(),
            image_type: image.image_type().to_string(),
            release_stage: image.release_stage().to_string(),
            tech_preview: image.tech_preview(),
            maintainer: image.maintainer().to_string(),
            url: URL,
            vendor: VENDOR,
            build_tags: image.build_tags(),
            from_image: image.base_image(),
        }
    }
}

/// Context of the `Dockerfile` template
#[derive(Debug, Serialize)]
pub struct DockerfileContext {
    #[serde(flatten)]
    pub common: CommonContext,
    pub year: i32,
    pub packages: String,
    pub entrypoint: Option<String>,
    pub cmd: Option<String>,
    pub expose: Option<String>,
    pub user: Option<String>,
    pub env_lines: String,
    pub extra_label_lines: String,
    pub custom_end: String,
}

impl DockerfileContext {
    pub fn new(image: &ContainerImage, year: i32) -> Result<Self> {
        let expose = if image.exposes_tcp().is_empty() {
            None
        } else {
            let ports: Vec<String> = image
                .exposes_tcp()
                .iter()
                .map(|port| format!("{}/tcp", port))
                .collect();
            Some(ports.join(" "))
        };

        Ok(Self {
            common: CommonContext::new(image),
            year,
            packages: image.packages()?,
            entrypoint: image.dockerfile_entrypoint()?,
            cmd: image.dockerfile_cmd(),
            expose,
            user: image.entrypoint_user().map(str::to_string),
            env_lines: image.env_lines(),
            extra_label_lines: image.extra_label_lines(),
            custom_end: image.dockerfile_custom_end(),
        })
    }
}

/// Context of the kiwi build description template
#[derive(Debug, Serialize)]
pub struct KiwiContext {
    #[serde(flatten)]
    pub common: CommonContext,
    pub container_name: String,
    pub container_tag: String,
    pub additional_tags: Option<String>,
    pub entrypoint: Option<KiwiEntrypoint>,
    pub cmd: Vec<String>,
    pub exposes_tcp: Vec<u16>,
    pub user: Option<String>,
    pub kiwi_env_entry: String,
    pub extra_label_xml_lines: String,
    pub kiwi_packages: String,
}

impl KiwiContext {
    pub fn new(image: &ContainerImage) -> Result<Self> {
        let tags = image.build_tags();
        let (container_name, container_tag) = tags
            .first()
            .and_then(|tag| tag.split_once(':'))
            .map(|(name, tag)| (name.to_string(), tag.to_string()))
            .unwrap_or_else(|| (image.name().to_string(), image.version_label()));

        Ok(Self {
            common: CommonContext::new(image),
            container_name,
            container_tag,
            additional_tags: image.kiwi_additional_tags(),
            entrypoint: image.kiwi_entrypoint()?,
            cmd: image.cmd().to_vec(),
            exposes_tcp: image.exposes_tcp().to_vec(),
            user: image.entrypoint_user().map(str::to_string),
            kiwi_env_entry: image.kiwi_env_entry(),
            extra_label_xml_lines: image.extra_label_xml_lines(),
            kiwi_packages: image.kiwi_packages(),
        })
    }
}

/// Context of the `_service` template
#[derive(Debug, Serialize)]
pub struct ServiceContext {
    pub kiwi: bool,
    pub recipe_file: String,
    pub replacements: Vec<Replacement>,
}

impl ServiceContext {
    pub fn new(image: &ContainerImage) -> Self {
        Self {
            kiwi: image.build_type() == BuildType::Kiwi,
            recipe_file: image.recipe_file_name(),
            replacements: image.replacements_via_service().to_vec(),
        }
    }
}
