// tests/catalog.rs

//! Properties every image of the catalog must satisfy.

mod common;

use bci_build::{BuildType, Error, PackageType};
use common::{expected_tag_count, setup};

#[test]
fn test_tag_count_for_every_image() {
    let (catalog, _) = setup();

    for (key, image) in catalog.iter() {
        assert_eq!(
            image.build_tags().len(),
            expected_tag_count(image),
            "unexpected tags for {}",
            key
        );
    }
}

#[test]
fn test_every_image_renders() {
    let (catalog, renderer) = setup();

    for (key, image) in catalog.iter() {
        let recipe = renderer
            .render_recipe(image)
            .unwrap_or_else(|e| panic!("failed to render {}: {}", key, e));
        let service = renderer.render_service(image).unwrap();

        assert!(!recipe.contains("{{"), "unrendered template in {}", key);
        assert_eq!(
            service.matches("replace_using_package_version").count(),
            image.replacements_via_service().len()
        );

        if image.build_type() == BuildType::Kiwi {
            assert!(recipe.contains(&format!("name=\"{}\"", image.ibs_package())));
            assert!(image.config_sh().is_ok(), "{} cannot be built by kiwi", key);
        } else {
            assert!(recipe.contains(&format!("#!BuildTag: {}", image.build_tags()[0])));
        }
    }
}

#[test]
fn test_kiwi_images_never_emit_empty_blocks() {
    let (catalog, renderer) = setup();

    for (key, image) in catalog.iter() {
        if image.build_type() != BuildType::Kiwi {
            continue;
        }
        let kiwi = renderer.render_kiwi(image).unwrap();
        let blocks = kiwi.matches("<packages type=").count();
        let phases = [
            PackageType::Delete,
            PackageType::Bootstrap,
            PackageType::Image,
            PackageType::Uninstall,
        ]
        .into_iter()
        .filter(|t| !image.packages_of_type(*t).is_empty())
        .count();

        assert_eq!(blocks, phases, "unexpected package blocks in {}", key);
        assert!(!kiwi.contains("\">\n  </packages>"), "empty block in {}", key);
    }
}

#[test]
fn test_flat_rendering_rejects_phase_packages() {
    let (catalog, renderer) = setup();

    for (key, image) in catalog.iter() {
        let has_phase_packages = image
            .package_list()
            .iter()
            .any(|p| p.pkg_type != PackageType::Image);

        let result = renderer.render_dockerfile(image);
        if has_phase_packages {
            assert!(
                matches!(result, Err(Error::PackageTypeNotSupported { .. })),
                "{} rendered a Dockerfile with phase packages",
                key
            );
        } else {
            assert!(result.is_ok(), "{} failed to render a Dockerfile", key);
        }
    }
}

#[test]
fn test_unknown_key_lists_available_images() {
    let (catalog, _) = setup();

    let message = catalog.get("nodejs-16-sp3").unwrap_err().to_string();
    assert!(message.contains("nodejs-16-sp3"));
    assert!(message.contains("nodejs-16-sp4"));
}
