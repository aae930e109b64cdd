// src/catalog/mod.rs

//! The catalog of container images
//!
//! Every image the build service knows about is declared here once, keyed by
//! `<nvr>-sp<service pack>` (for example `python-3.6-sp3` or `init-sp4`).
//! The key is what users pass on the command line.

mod applications;
mod languages;
mod os;

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::image::ContainerImage;

/// Keys declared by the image families that are not published
const EXCLUDED_KEYS: &[&str] = &["nodejs-16-sp3"];

/// All known container images, ordered by key
#[derive(Debug, Clone)]
pub struct Catalog {
    images: BTreeMap<String, ContainerImage>,
}

impl Catalog {
    /// Build every image of the catalog
    ///
    /// Fails if any image declaration is invalid or two images share a key.
    pub fn load() -> Result<Self> {
        let mut images = BTreeMap::new();

        let declared = languages::images()?
            .into_iter()
            .chain(applications::images()?)
            .chain(os::images()?);

        for image in declared {
            let key = image.catalog_key();
            if images.contains_key(&key) {
                return Err(Error::DuplicateImage(key));
            }
            images.insert(key, image);
        }

        for key in EXCLUDED_KEYS {
            images.remove(*key);
        }

        debug!("Loaded {} images into the catalog", images.len());
        Ok(Self { images })
    }

    /// Look up an image by its key
    pub fn get(&self, key: &str) -> Result<&ContainerImage> {
        self.images.get(key).ok_or_else(|| Error::UnknownImage {
            name: key.to_string(),
            available: self.keys().collect::<Vec<_>>().join(", "),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.images.contains_key(key)
    }

    /// All image keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContainerImage)> {
        self.images.iter().map(|(key, image)| (key.as_str(), image))
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
