// src/render/mod.rs

//! Rendering of build recipes
//!
//! Three templates turn an image descriptor into files for the build
//! service:
//! - `Dockerfile` for Dockerfile based builds
//! - `<ibs_package>.kiwi` for kiwi based builds
//! - `_service` with the label helpers and version replacements
//!
//! Templates are embedded at compile time and rendered with tera. Values
//! that land in XML attributes are escaped either while deriving them or with
//! tera's `escape_xml` filter, so autoescaping is disabled.

mod context;

pub use context::{CommonContext, DockerfileContext, KiwiContext, ServiceContext};

use chrono::Datelike;
use tera::{Context, Tera};
use tracing::debug;

use crate::error::Result;
use crate::image::{BuildType, ContainerImage};

/// Template of Dockerfile based builds
pub const DOCKERFILE_TEMPLATE: &str = include_str!("../../templates/Dockerfile.j2");

/// Template of kiwi build descriptions
pub const KIWI_TEMPLATE: &str = include_str!("../../templates/kiwi.xml.j2");

/// Template of the `_service` file
pub const SERVICE_TEMPLATE: &str = include_str!("../../templates/_service.j2");

const DOCKERFILE: &str = "Dockerfile";
const KIWI: &str = "kiwi.xml";
const SERVICE: &str = "_service";

/// Renders image descriptors into build service files
#[derive(Debug)]
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Parse the embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(vec![
            (DOCKERFILE, DOCKERFILE_TEMPLATE),
            (KIWI, KIWI_TEMPLATE),
            (SERVICE, SERVICE_TEMPLATE),
        ])?;

        Ok(Self { tera })
    }

    /// Render the `Dockerfile` of an image
    ///
    /// Fails if the image contains packages of a kiwi-only install phase.
    pub fn render_dockerfile(&self, image: &ContainerImage) -> Result<String> {
        let year = chrono::Local::now().year();
        let context = Context::from_serialize(DockerfileContext::new(image, year)?)?;
        debug!("Rendering Dockerfile for {}", image.name());
        Ok(self.tera.render(DOCKERFILE, &context)?)
    }

    /// Render the kiwi build description of an image
    pub fn render_kiwi(&self, image: &ContainerImage) -> Result<String> {
        let context = Context::from_serialize(KiwiContext::new(image)?)?;
        debug!("Rendering kiwi description for {}", image.name());
        Ok(self.tera.render(KIWI, &context)?)
    }

    /// Render the `_service` file of an image
    pub fn render_service(&self, image: &ContainerImage) -> Result<String> {
        let context = Context::from_serialize(ServiceContext::new(image))?;
        Ok(self.tera.render(SERVICE, &context)?)
    }

    /// Render the primary recipe for the image's build type
    pub fn render_recipe(&self, image: &ContainerImage) -> Result<String> {
        match image.build_type() {
            BuildType::Docker => self.render_dockerfile(image),
            BuildType::Kiwi => self.render_kiwi(image),
        }
    }
}
