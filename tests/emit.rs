// tests/emit.rs

//! Writing catalog images to package directories.

mod common;

use bci_build::{BuildType, write_files_to_folder};
use common::{package_dir, setup};

#[tokio::test]
async fn test_written_files_exist_for_every_image() {
    let (catalog, renderer) = setup();

    for (key, image) in catalog.iter() {
        let dir = package_dir();
        let files = write_files_to_folder(image, &renderer, dir.path())
            .await
            .unwrap_or_else(|e| panic!("failed to write {}: {}", key, e));

        assert_eq!(files[0], "_service");
        assert_eq!(files[1], image.recipe_file_name());

        for file in &files {
            let contents = std::fs::read(dir.path().join(file)).unwrap();
            if *file == image.changes_file_name() {
                assert!(contents.is_empty(), "{} has a non-empty changelog", key);
            } else {
                assert!(!contents.is_empty(), "{} wrote an empty {}", key, file);
            }
        }
    }
}

#[tokio::test]
async fn test_changelog_is_never_overwritten() {
    let (catalog, renderer) = setup();
    let image = catalog.get("init-sp4").unwrap();
    let dir = package_dir();
    let changes = dir.path().join(image.changes_file_name());

    let files = write_files_to_folder(image, &renderer, dir.path())
        .await
        .unwrap();
    assert!(files.contains(&image.changes_file_name()));

    std::fs::write(&changes, "- Update to the latest systemd\n").unwrap();

    let files = write_files_to_folder(image, &renderer, dir.path())
        .await
        .unwrap();
    assert_eq!(files, vec!["_service", "Dockerfile"]);
    assert_eq!(
        std::fs::read_to_string(&changes).unwrap(),
        "- Update to the latest systemd\n"
    );
}

#[tokio::test]
async fn test_kiwi_image_with_script() {
    let (catalog, renderer) = setup();
    let image = catalog.get("python-3.9-sp3").unwrap();
    assert_eq!(image.build_type(), BuildType::Kiwi);
    let dir = package_dir();

    let files = write_files_to_folder(image, &renderer, dir.path())
        .await
        .unwrap();

    assert_eq!(
        files,
        vec!["_service", "python-3.9.kiwi", "config.sh", "python-3.9.changes"]
    );
    let config_sh = std::fs::read_to_string(dir.path().join("config.sh")).unwrap();
    assert!(config_sh.contains("ln -s /usr/bin/python3.9 /usr/bin/python3"));
    let service = std::fs::read_to_string(dir.path().join("_service")).unwrap();
    assert!(service.contains("<param name=\"file\">python-3.9.kiwi</param>"));
}

#[tokio::test]
async fn test_existing_files_are_replaced() {
    let (catalog, renderer) = setup();
    let image = catalog.get("golang-1.17-sp4").unwrap();
    let dir = package_dir();
    std::fs::write(dir.path().join("Dockerfile"), "FROM scratch\n").unwrap();

    write_files_to_folder(image, &renderer, dir.path())
        .await
        .unwrap();

    let dockerfile = std::fs::read_to_string(dir.path().join("Dockerfile")).unwrap();
    assert!(dockerfile.contains("#!BuildTag: bci/golang:1.17"));
    assert!(
        std::fs::read_to_string(dir.path().join("_constraints"))
            .unwrap()
            .contains("<size unit=\"G\">6</size>")
    );
}
