//! Integration tests for loading fixture catalogues from disk.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::fs;

use camino::Utf8PathBuf;
use fixture_data::{CatalogueError, FixtureCatalogue};

fn write_catalogue(dir: &tempfile::TempDir, contents: &str) -> Utf8PathBuf {
    let path = dir.path().join("catalogue.json");
    fs::write(&path, contents).expect("write catalogue");
    Utf8PathBuf::from_path_buf(path).expect("temp path is UTF-8")
}

#[test]
fn loads_catalogue_from_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_catalogue(
        &dir,
        r#"{
            "version": 1,
            "suppliers": [{
                "id": "1", "name": "AMD Official", "contactPerson": "Rahul Khan",
                "email": "rahul@amd-distribution.example", "phone": "+8801712345678",
                "address": "Dhaka", "createdAt": "2025-01-10T09:00:00Z",
                "updatedAt": "2025-05-15T14:30:00Z"
            }]
        }"#,
    );

    let catalogue = FixtureCatalogue::from_file(&path).expect("catalogue loads");

    assert_eq!(catalogue.suppliers().len(), 1);
    assert!(catalogue.products().is_empty());
}

#[test]
fn reports_missing_file_as_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.json"))
        .expect("temp path is UTF-8");

    let result = FixtureCatalogue::from_file(&path);

    match result {
        Err(CatalogueError::IoError { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected IoError, got: {other:?}"),
    }
}

#[test]
fn file_contents_are_validated() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_catalogue(&dir, r#"{"version": 2}"#);

    let result = FixtureCatalogue::from_file(&path);

    assert_eq!(
        result,
        Err(CatalogueError::UnsupportedVersion {
            expected: 1,
            actual: 2
        })
    );
}

#[test]
fn bundled_sales_reference_bundled_products() {
    let catalogue = FixtureCatalogue::bundled().expect("bundled catalogue parses");

    for sale in catalogue.sales() {
        assert!(
            catalogue
                .products()
                .iter()
                .any(|product| product.id == sale.product_id),
            "sale {} references a missing product",
            sale.id
        );
    }
}
