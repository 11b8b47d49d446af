use std::io::Write;

use approx::assert_relative_eq;
use camino::Utf8Path;
use camsprep::stations::camera_sites::read_camera_sites;
use camsprep::stations::time_offsets::read_time_offsets;
use camsprep::{Cams, CamsError, StationCatalog, StationId};

mod common;
use common::{data, CAMERA_SITES, CAMERA_TIME_OFFSETS};

#[test]
fn test_read_camera_sites() {
    let sites = read_camera_sites(data(CAMERA_SITES)).unwrap();
    assert_eq!(sites.len(), 3);

    let ids: Vec<_> = sites.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["453", "454", "CA0001"]);

    let elginfield = &sites[0];
    assert_relative_eq!(elginfield.latitude, 43.19279_f64.to_radians());
    assert_relative_eq!(elginfield.longitude, (-81.31565_f64).to_radians());
    assert_relative_eq!(elginfield.height, 324.0, epsilon = 1e-9);
    assert_eq!(elginfield.time_offset, None);

    let catalog = StationCatalog::from_camera_sites(data(CAMERA_SITES)).unwrap();
    assert!(catalog.contains(&StationId::new("453")));
    assert!(!catalog.contains(&StationId::new("455")));
    assert!(!catalog.has_time_offsets());
}

#[test]
fn test_read_time_offsets() {
    let offsets = read_time_offsets(data(CAMERA_TIME_OFFSETS)).unwrap();
    assert_eq!(offsets.len(), 2);
    assert_eq!(offsets.get(&StationId::new("453")), Some(0.12));
    assert_eq!(offsets.get(&StationId::new("CA0001")), Some(-0.5));
}

#[test]
fn test_catalog_with_offsets() {
    let cams = Cams::from_files(data(CAMERA_SITES), Some(data(CAMERA_TIME_OFFSETS))).unwrap();
    let catalog = cams.catalog();

    assert_eq!(catalog.len(), 3);
    assert!(catalog.has_time_offsets());
    assert_eq!(catalog.clock_offset(&StationId::new("000453")), Ok(Some(0.12)));
    assert_eq!(catalog.clock_offset(&StationId::new("CA0001")), Ok(Some(-0.5)));
    assert_eq!(
        catalog.clock_offset(&StationId::new("454")),
        Err(CamsError::MissingTimeOffset(StationId::new("454")))
    );
}

#[test]
fn test_malformed_site_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CameraSites.txt");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "Camera sites").unwrap();
    writeln!(file, "ID Lat Lon Height").unwrap();
    writeln!(file, "000001 43.0 81.0 0.3").unwrap();
    writeln!(file, "000002 43.0 81.O 0.3").unwrap();
    drop(file);

    let path = Utf8Path::from_path(&path).unwrap();
    let result = read_camera_sites(path);
    assert_eq!(
        result,
        Err(CamsError::CatalogParsing {
            path: path.to_path_buf(),
            line_number: 4,
            line: "000002 43.0 81.O 0.3".into(),
        })
    );
}

#[test]
fn test_missing_site_file() {
    let result = Cams::from_files(Utf8Path::new("tests/data/NoSuchSites.txt"), None);
    assert!(matches!(result, Err(CamsError::IoError(_))));
}
