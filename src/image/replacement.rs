// src/image/replacement.rs

//! Version replacements performed by the build service
//!
//! Placeholders such as `%%py3_ver%%` are substituted at build time with the
//! version of a package by the `replace_using_package_version` service.

use serde::Serialize;
use strum_macros::{Display, EnumString};

/// How the package version is formatted before substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ParseVersion {
    Major,
    Minor,
    Patch,
    PatchUpdate,
    Offset,
}

/// A placeholder whose value is the version of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    /// Regex to be replaced in the build recipe
    pub regex_in_dockerfile: String,
    /// Package queried for the version
    pub package_name: String,
    /// Version format, the full version when unset
    pub parse_version: Option<ParseVersion>,
}

impl Replacement {
    pub fn new(regex_in_dockerfile: impl Into<String>, package_name: impl Into<String>) -> Self {
        Self {
            regex_in_dockerfile: regex_in_dockerfile.into(),
            package_name: package_name.into(),
            parse_version: None,
        }
    }

    /// Set the version format
    pub fn with_parse_version(mut self, parse_version: ParseVersion) -> Self {
        self.parse_version = Some(parse_version);
        self
    }
}
