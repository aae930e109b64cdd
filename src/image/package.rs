// src/image/package.rs

//! Packages and their install phases
//!
//! Kiwi installs packages in phases: `bootstrap` packages populate an empty
//! root, `image` packages are installed into it, `delete` packages are
//! removed without dependency checks and `uninstall` packages are removed
//! together with their dependencies. A `Dockerfile` only knows about one
//! `zypper in` call, so only `image` packages may appear there.

use std::fmt;

use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use super::{ContainerImage, xml_escape};
use crate::error::{Error, Result};

/// Install phase of a package in a kiwi build
///
/// Variants are declared in the order in which kiwi package blocks are
/// emitted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    Delete,
    Bootstrap,
    #[default]
    Image,
    Uninstall,
}

/// A package installed into an image
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Package {
    /// Package name as known to zypper
    pub name: String,
    /// Kiwi install phase, only meaningful for kiwi builds
    pub pkg_type: PackageType,
}

impl Package {
    /// Create a package installed in the `image` phase
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pkg_type: PackageType::Image,
        }
    }

    /// Create a package for a specific kiwi phase
    pub fn with_type(name: impl Into<String>, pkg_type: PackageType) -> Self {
        Self {
            name: name.into(),
            pkg_type,
        }
    }

    pub fn bootstrap(name: impl Into<String>) -> Self {
        Self::with_type(name, PackageType::Bootstrap)
    }

    pub fn delete(name: impl Into<String>) -> Self {
        Self::with_type(name, PackageType::Delete)
    }

    pub fn uninstall(name: impl Into<String>) -> Self {
        Self::with_type(name, PackageType::Uninstall)
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for Package {
    fn from(name: &str) -> Self {
        Package::new(name)
    }
}

impl From<String> for Package {
    fn from(name: String) -> Self {
        Package::new(name)
    }
}

impl ContainerImage {
    /// The package list joined for a single `zypper in` invocation
    ///
    /// Fails if any package belongs to a phase other than `image`.
    pub fn packages(&self) -> Result<String> {
        if let Some(pkg) = self
            .package_list
            .iter()
            .find(|p| p.pkg_type != PackageType::Image)
        {
            return Err(Error::PackageTypeNotSupported {
                package: pkg.name.clone(),
                pkg_type: pkg.pkg_type,
            });
        }

        let names: Vec<&str> = self.package_list.iter().map(|p| p.name.as_str()).collect();
        Ok(names.join(" "))
    }

    /// Packages belonging to one install phase, in declaration order
    pub fn packages_of_type(&self, pkg_type: PackageType) -> Vec<&Package> {
        self.package_list
            .iter()
            .filter(|p| p.pkg_type == pkg_type)
            .collect()
    }

    /// The package list as `<packages>` blocks for a kiwi build description
    ///
    /// Phases without packages produce no block at all.
    pub fn kiwi_packages(&self) -> String {
        let mut res = String::new();

        for pkg_type in PackageType::iter() {
            let pkgs = self.packages_of_type(pkg_type);
            if pkgs.is_empty() {
                continue;
            }

            res.push_str(&format!("  <packages type=\"{}\">\n", pkg_type));
            for pkg in pkgs {
                res.push_str(&format!(
                    "    <package name=\"{}\"/>\n",
                    xml_escape(&pkg.name)
                ));
            }
            res.push_str("  </packages>\n");
        }

        res
    }
}
