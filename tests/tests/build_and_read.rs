use std::{fs, path::Path};
use test_case::test_case;
use uuid::Uuid;
use webapp_pack_packer::package::{PackageOptions, build};
use webapp_pack_tests::{archive_files, copy_tree, read_package, read_tree, sample_app_path};

fn build_package(
    source_path: &Path,
    output_path: &Path,
) {
    build(
        &PackageOptions {
            source_path: source_path.to_owned(),
            output_path: output_path.to_owned(),
            ..PackageOptions::default()
        },
        |_| {},
    )
    .unwrap();
}

#[test]
fn package_contains_metadata_and_application_in_order() {
    let directory = tempfile::tempdir().unwrap();
    let output_path = directory.path().join("sample-app.zip");

    build_package(&sample_app_path(), &output_path);

    let package = read_package(&output_path).unwrap();
    assert_eq!(package.entry_names, ["metadata.json", "application.zip"]);
}

#[test]
fn application_reproduces_sample_app() {
    let directory = tempfile::tempdir().unwrap();
    let output_path = directory.path().join("sample-app.zip");

    build_package(&sample_app_path(), &output_path);

    let package = read_package(&output_path).unwrap();
    assert_eq!(
        archive_files(&package.application),
        read_tree(&sample_app_path()).unwrap()
    );
}

#[test]
fn application_entry_names_are_normalized() {
    let directory = tempfile::tempdir().unwrap();
    let output_path = directory.path().join("sample-app.zip");

    build_package(&sample_app_path(), &output_path);

    let package = read_package(&output_path).unwrap();
    let sample_app_path = sample_app_path();
    let sample_app_path = sample_app_path.to_str().unwrap();

    assert_eq!(
        package
            .application
            .iter()
            .map(|entry| entry.name.as_str())
            .collect::<Vec<_>>(),
        [
            "css/",
            "css/style.css",
            "icons/",
            "icons/icon.svg",
            "index.html",
            "js/",
            "js/app.js",
            "js/lib/",
            "js/lib/util.js",
            "locales/",
            "locales/en-US.properties",
            "manifest.webapp",
        ]
    );
    for entry in &package.application {
        assert!(!entry.name.starts_with('/'));
        assert!(!entry.name.contains(sample_app_path));
        assert!(!entry.name.contains('\\'));
        assert_eq!(entry.name.ends_with('/'), entry.is_dir);
        if entry.is_dir {
            assert!(entry.content.is_empty());
        }
    }
}

#[test]
fn descriptor_points_at_origin() {
    let directory = tempfile::tempdir().unwrap();
    let output_path = directory.path().join("sample-app.zip");

    build_package(&sample_app_path(), &output_path);

    let package = read_package(&output_path).unwrap();
    assert_eq!(package.descriptor.version, 1);
    assert_eq!(
        package.descriptor.manifest_url,
        "https://sample-app.example.com/manifest.webapp"
    );
}

#[test_case(".git"; "in root")]
#[test_case("js/.git"; "nested")]
#[test_case("js/lib/vendor/.git"; "deeply nested")]
fn version_control_directory_is_not_packed(git_directory: &str) {
    let directory = tempfile::tempdir().unwrap();
    let source_path = directory.path().join("app");
    copy_tree(&sample_app_path(), &source_path).unwrap();

    let git_path = source_path.join(git_directory);
    fs::create_dir_all(git_path.join("refs").join("heads")).unwrap();
    fs::write(git_path.join("HEAD"), "ref: refs/heads/main\n").unwrap();
    fs::write(git_path.join("refs").join("heads").join("main"), "0123abcd\n").unwrap();

    let output_path = directory.path().join("app.zip");
    build_package(&source_path, &output_path);

    let package = read_package(&output_path).unwrap();
    assert!(
        package
            .application
            .iter()
            .all(|entry| !entry.name.split('/').any(|component| component == ".git"))
    );
    assert_eq!(
        archive_files(&package.application),
        read_tree(&sample_app_path()).unwrap()
    );
}

#[test]
fn missing_origin_generates_unique_application_id() {
    let directory = tempfile::tempdir().unwrap();
    let source_path = directory.path().join("app");
    copy_tree(&sample_app_path(), &source_path).unwrap();
    fs::write(
        source_path.join("manifest.webapp"),
        r#"{"name": "Sample App", "launch_path": "/index.html"}"#,
    )
    .unwrap();

    let application_ids = ["first.zip", "second.zip"].map(|output_name| {
        let output_path = directory.path().join(output_name);
        build_package(&source_path, &output_path);

        let manifest_url = read_package(&output_path).unwrap().descriptor.manifest_url;
        let application_id = manifest_url
            .strip_prefix("app://")
            .and_then(|rest| rest.strip_suffix("/manifest.webapp"))
            .unwrap()
            .to_owned();
        assert_eq!(application_id.len(), 36);
        assert_eq!(
            Uuid::parse_str(&application_id).unwrap().get_version_num(),
            4
        );

        application_id
    });

    assert_ne!(application_ids[0], application_ids[1]);
}

#[test]
fn existing_output_is_overwritten() {
    let directory = tempfile::tempdir().unwrap();
    let output_path = directory.path().join("sample-app.zip");
    fs::write(&output_path, "stale").unwrap();

    build_package(&sample_app_path(), &output_path);

    assert_eq!(read_package(&output_path).unwrap().entry_names.len(), 2);
}

#[test]
fn regular_file_source_produces_no_output() {
    let directory = tempfile::tempdir().unwrap();
    let output_path = directory.path().join("app.zip");

    let error = build(
        &PackageOptions {
            source_path: sample_app_path().join("index.html"),
            output_path: output_path.clone(),
            ..PackageOptions::default()
        },
        |_| {},
    )
    .unwrap_err();

    assert!(error.to_string().contains("source is not a directory"));
    assert!(!output_path.exists());
}

#[test]
fn missing_manifest_produces_no_output() {
    let directory = tempfile::tempdir().unwrap();
    let source_path = directory.path().join("app");
    copy_tree(&sample_app_path(), &source_path).unwrap();
    fs::remove_file(source_path.join("manifest.webapp")).unwrap();
    let output_path = directory.path().join("app.zip");

    let result = build(
        &PackageOptions {
            source_path,
            output_path: output_path.clone(),
            ..PackageOptions::default()
        },
        |_| {},
    );

    assert!(result.is_err());
    assert!(!output_path.exists());
}
