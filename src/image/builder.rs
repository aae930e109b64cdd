// src/image/builder.rs

//! Validated construction of container image descriptors

use super::{
    BuildType, CONFIG_SH, ContainerImage, DEFAULT_MAINTAINER, DOCKERFILE, FileContents, FromImage,
    ImageKind, Package, ReleaseStage, Replacement, SERVICE_FILE, SUPPORTED_SERVICE_PACKS,
};
use crate::error::{Error, Result};

/// Builder for [`ContainerImage`]
///
/// Optional settings default to the values most images use: derived from the
/// SLE base image of their service pack, built from a `Dockerfile`, tech
/// preview label set, maintained by SUSE.
#[derive(Debug, Clone)]
pub struct ImageBuilder {
    kind: ImageKind,
    name: String,
    pretty_name: String,
    version: String,
    ibs_package: Option<String>,
    sp_version: Option<u8>,
    release_stage: Option<ReleaseStage>,
    from_image: FromImage,
    is_latest: bool,
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

impl ImageBuilder {
    fn new(kind: ImageKind, name: impl Into<String>, pretty_name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            pretty_name: pretty_name.into(),
            version: String::new(),
            ibs_package: None,
            sp_version: None,
            release_stage: None,
            from_image: FromImage::Default,
            is_latest: false,
            additional_versions: Vec::new(),
            entrypoint: None,
            entrypoint_user: None,
            cmd: Vec::new(),
            exposes_tcp: Vec::new(),
            env: Vec::new(),
            replacements_via_service: Vec::new(),
            tech_preview: true,
            extra_labels: Vec::new(),
            package_list: Vec::new(),
            custom_end: String::new(),
            config_sh_script: String::new(),
            maintainer: DEFAULT_MAINTAINER.to_string(),
            extra_files: Vec::new(),
            additional_names: Vec::new(),
            custom_labelprefix_end: String::new(),
            custom_description: String::new(),
            build_type: BuildType::Docker,
        }
    }

    /// Start an OS image (`bci/bci-<name>`)
    pub fn os(name: impl Into<String>, pretty_name: impl Into<String>) -> Self {
        Self::new(ImageKind::Os, name, pretty_name)
    }

    /// Start a language stack image (`bci/<name>:<version>`)
    pub fn language_stack(
        name: impl Into<String>,
        pretty_name: impl Into<String>,
        version: impl ToString,
    ) -> Self {
        let mut builder = Self::new(ImageKind::LanguageStack, name, pretty_name);
        builder.version = version.to_string();
        builder
    }

    /// Start an application stack image (`suse/<name>:<version>`)
    pub fn application_stack(
        name: impl Into<String>,
        pretty_name: impl Into<String>,
        version: impl ToString,
    ) -> Self {
        let mut builder = Self::new(ImageKind::ApplicationStack, name, pretty_name);
        builder.version = version.to_string();
        builder
    }

    /// Set the package name in the build service
    pub fn with_ibs_package(mut self, ibs_package: impl Into<String>) -> Self {
        self.ibs_package = Some(ibs_package.into());
        self
    }

    pub fn with_sp_version(mut self, sp_version: u8) -> Self {
        self.sp_version = Some(sp_version);
        self
    }

    pub fn with_release_stage(mut self, release_stage: ReleaseStage) -> Self {
        self.release_stage = Some(release_stage);
        self
    }

    pub fn with_from_image(mut self, from_image: FromImage) -> Self {
        self.from_image = from_image;
        self
    }

    /// Mark the image as the one published under the `latest` tag
    pub fn with_latest(mut self, is_latest: bool) -> Self {
        self.is_latest = is_latest;
        self
    }

    /// Add version aliases that are published as additional tags
    pub fn with_additional_versions<I, S>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional_versions
            .extend(versions.into_iter().map(Into::into));
        self
    }

    /// Set the entrypoint, either an executable or an exec-form JSON array
    pub fn with_entrypoint(mut self, entrypoint: impl Into<String>) -> Self {
        self.entrypoint = Some(entrypoint.into());
        self
    }

    /// Set the user the entrypoint runs as
    pub fn with_entrypoint_user(mut self, user: impl Into<String>) -> Self {
        self.entrypoint_user = Some(user.into());
        self
    }

    /// Set the default command
    pub fn with_cmd<I, S>(mut self, cmd: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cmd = cmd.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exposed_tcp_ports(mut self, ports: impl IntoIterator<Item = u16>) -> Self {
        self.exposes_tcp.extend(ports);
        self
    }

    /// Add an environment variable, keeping declaration order
    ///
    /// Setting an existing key replaces its value in place.
    pub fn with_env(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.env.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.env.push((key, value)),
        }
        self
    }

    pub fn with_replacement(mut self, replacement: Replacement) -> Self {
        self.replacements_via_service.push(replacement);
        self
    }

    /// Control the `com.suse.techpreview` label
    pub fn with_tech_preview(mut self, tech_preview: bool) -> Self {
        self.tech_preview = tech_preview;
        self
    }

    /// Add a label to the prefixed label section
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_labels.push((key.into(), value.into()));
        self
    }

    /// Append packages to the package list
    pub fn with_packages<I, P>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Package>,
    {
        self.package_list
            .extend(packages.into_iter().map(Into::into));
        self
    }

    /// Raw instructions appended to the `Dockerfile`
    pub fn with_custom_end(mut self, custom_end: impl Into<String>) -> Self {
        self.custom_end = custom_end.into();
        self
    }

    /// Script for kiwi's `config.sh`, or a `RUN` line in a `Dockerfile`
    pub fn with_config_sh_script(mut self, script: impl Into<String>) -> Self {
        self.config_sh_script = script.into();
        self
    }

    pub fn with_maintainer(mut self, maintainer: impl Into<String>) -> Self {
        self.maintainer = maintainer.into();
        self
    }

    /// Ship an additional file next to the build recipe
    pub fn with_extra_file(
        mut self,
        name: impl Into<String>,
        contents: impl Into<FileContents>,
    ) -> Self {
        self.extra_files.push((name.into(), contents.into()));
        self
    }

    /// Publish the image under additional names
    pub fn with_additional_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional_names
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Use `com.suse.bci.<end>` instead of `com.suse.bci.<name>` as label prefix
    pub fn with_custom_labelprefix_end(mut self, end: impl Into<String>) -> Self {
        self.custom_labelprefix_end = end.into();
        self
    }

    pub fn with_custom_description(mut self, description: impl Into<String>) -> Self {
        self.custom_description = description.into();
        self
    }

    pub fn with_build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    /// Validate the settings and create the image
    pub fn build(self) -> Result<ContainerImage> {
        if self.package_list.is_empty() {
            return Err(Error::EmptyPackageList(self.pretty_name));
        }
        if !self.config_sh_script.is_empty() && !self.custom_end.is_empty() {
            return Err(Error::ConflictingTail(self.pretty_name));
        }
        if self.kind.is_stack() && self.version.is_empty() {
            return Err(Error::MissingVersion(self.pretty_name));
        }

        let ibs_package = self.ibs_package.ok_or_else(|| Error::MissingField {
            image: self.name.clone(),
            field: "ibs_package",
        })?;
        let sp_version = self.sp_version.ok_or_else(|| Error::MissingField {
            image: self.name.clone(),
            field: "sp_version",
        })?;
        let release_stage = self.release_stage.ok_or_else(|| Error::MissingField {
            image: self.name.clone(),
            field: "release_stage",
        })?;

        if !SUPPORTED_SERVICE_PACKS.contains(&sp_version) {
            return Err(Error::UnsupportedServicePack {
                image: self.name,
                sp_version,
            });
        }

        check_extra_files(&self.name, &ibs_package, &self.extra_files)?;

        Ok(ContainerImage {
            kind: self.kind,
            name: self.name,
            pretty_name: self.pretty_name,
            ibs_package,
            sp_version,
            release_stage,
            from_image: self.from_image,
            is_latest: self.is_latest,
            version: self.version,
            additional_versions: self.additional_versions,
            entrypoint: self.entrypoint.filter(|e| !e.is_empty()),
            entrypoint_user: self.entrypoint_user,
            cmd: self.cmd,
            exposes_tcp: self.exposes_tcp,
            env: self.env,
            replacements_via_service: self.replacements_via_service,
            tech_preview: self.tech_preview,
            extra_labels: self.extra_labels,
            package_list: self.package_list,
            custom_end: self.custom_end,
            config_sh_script: self.config_sh_script,
            maintainer: self.maintainer,
            extra_files: self.extra_files,
            additional_names: self.additional_names,
            custom_labelprefix_end: self.custom_labelprefix_end,
            custom_description: self.custom_description,
            build_type: self.build_type,
        })
    }
}

/// Extra files land next to the generated files in one flat directory
fn check_extra_files(
    image: &str,
    ibs_package: &str,
    extra_files: &[(String, FileContents)],
) -> Result<()> {
    let reserved = [
        SERVICE_FILE.to_string(),
        DOCKERFILE.to_string(),
        CONFIG_SH.to_string(),
        format!("{}.kiwi", ibs_package),
        format!("{}.changes", ibs_package),
    ];

    for (idx, (file, _)) in extra_files.iter().enumerate() {
        let reason = if file.is_empty() {
            Some("empty file name")
        } else if file.contains(['/', '\\']) || file.contains("..") {
            Some("must be a plain file name")
        } else if reserved.contains(file) {
            Some("clashes with a generated file")
        } else if extra_files[..idx].iter().any(|(other, _)| other == file) {
            Some("added more than once")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(Error::InvalidExtraFile {
                image: image.to_string(),
                file: file.clone(),
                reason,
            });
        }
    }

    Ok(())
}
