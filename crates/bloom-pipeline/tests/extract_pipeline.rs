//! End-to-end tests for the extraction pipeline against the in-memory
//! raster source.

use bloom_common::{BoundingBox, SampleGrid};
use bloom_pipeline::{extract_from_container, write_atomic, ExtractConfig, ExtractError};
use bloom_protocol::BloomFeatureCollection;
use raster_source::{MemoryContainer, RasterError};
use test_utils::generators::{create_constant_grid, create_gradient_grid};
use test_utils::{fixtures, temp_test_dir};

fn config_with(stride: usize, region: BoundingBox) -> ExtractConfig {
    ExtractConfig {
        stride,
        region,
        ..Default::default()
    }
}

fn container_with(grid: SampleGrid) -> MemoryContainer {
    MemoryContainer::single(grid, fixtures::transforms::unit())
}

#[test]
fn scenario_a_mixed_validity_grid() {
    let grid = SampleGrid::from_rows(vec![
        vec![0, 5000, -3000, 12000],
        vec![9999, 1, 2, 3],
        vec![4, 5, 6, 7],
        vec![8, 9, 10, 11],
    ]);
    let container = container_with(grid);
    let config = config_with(1, fixtures::regions::global());

    let (collection, summary) = extract_from_container(&container, &config).unwrap();

    // Only the two fill encodings are excluded.
    assert_eq!(summary.features, 14);

    let ndvis: Vec<f64> = collection
        .features
        .iter()
        .map(|f| f.properties.ndvi)
        .collect();
    assert_eq!(ndvis[0], 0.0); // raw 0
    assert_eq!(ndvis[1], 0.5); // raw 5000
    assert_eq!(ndvis[2], 1.0); // raw 9999, rounded to 3 decimals
    assert!(!ndvis.contains(&-0.3)); // raw -3000 never decoded
    assert!(!ndvis.contains(&1.2)); // raw 12000 never decoded
}

#[test]
fn scenario_b_empty_subdataset_list_is_open_error() {
    let container = MemoryContainer::new();
    let config = config_with(1, fixtures::regions::global());

    let err = extract_from_container(&container, &config).unwrap_err();
    assert!(matches!(
        err,
        ExtractError::Raster(RasterError::NoSubdatasets)
    ));
}

#[test]
fn scenario_c_stride_two_visits_sixteen_cells() {
    let container = container_with(create_constant_grid(8, 8, 5000));
    let config = config_with(2, fixtures::regions::global());

    let (_, summary) = extract_from_container(&container, &config).unwrap();
    assert_eq!(summary.features, 16);
}

#[test]
fn scenario_d_grid_outside_region_emits_empty_collection() {
    let container = container_with(create_constant_grid(4, 4, 5000));
    let config = config_with(1, fixtures::regions::far_away());

    let (collection, summary) = extract_from_container(&container, &config).unwrap();
    assert_eq!(summary.features, 0);
    assert_eq!(summary.ndvi_range, None);

    // A valid empty FeatureCollection is still written.
    let dir = temp_test_dir();
    let path = dir.path().join("empty.json");
    write_atomic(&collection, &path).unwrap();

    let parsed: BloomFeatureCollection =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed.type_, "FeatureCollection");
    assert!(parsed.features.is_empty());
}

#[test]
fn test_output_order_is_row_major() {
    let container = container_with(create_constant_grid(3, 3, 5000));
    let config = config_with(1, fixtures::regions::global());

    let (collection, _) = extract_from_container(&container, &config).unwrap();

    // Unit transform: lon = col, lat = -row. Row-major order means latitude
    // never increases, and longitude increases within a row.
    let coords: Vec<[f64; 2]> = collection
        .features
        .iter()
        .map(|f| f.geometry.coordinates)
        .collect();
    let expected: Vec<[f64; 2]> = vec![
        [0.0, 0.0],
        [1.0, 0.0],
        [2.0, 0.0],
        [0.0, -1.0],
        [1.0, -1.0],
        [2.0, -1.0],
        [0.0, -2.0],
        [1.0, -2.0],
        [2.0, -2.0],
    ];
    assert_eq!(coords, expected);
}

#[test]
fn test_emitted_points_satisfy_region_and_intensity_invariants() {
    let container = MemoryContainer::single(
        create_gradient_grid(40, 40),
        fixtures::transforms::kenya(),
    );
    let config = config_with(3, fixtures::regions::kenya());

    let (collection, summary) = extract_from_container(&container, &config).unwrap();
    assert!(summary.features > 0);

    let region = fixtures::regions::kenya();
    for feature in &collection.features {
        let [lon, lat] = feature.geometry.coordinates;
        assert!(region.contains(lon, lat));

        let ndvi = feature.properties.ndvi;
        let intensity = feature.properties.intensity;
        assert_eq!(intensity, ndvi.clamp(0.0, 1.0));

        // Rounded to exactly 3 decimal places.
        assert!((ndvi * 1000.0 - (ndvi * 1000.0).round()).abs() < 1e-9);
        assert!((lon * 1000.0 - (lon * 1000.0).round()).abs() < 1e-9);
        assert!((lat * 1000.0 - (lat * 1000.0).round()).abs() < 1e-9);
    }
}

#[test]
fn test_idempotent_output_bytes() {
    let container = MemoryContainer::single(
        create_gradient_grid(20, 20),
        fixtures::transforms::kenya(),
    );
    let config = config_with(2, fixtures::regions::kenya());
    let dir = temp_test_dir();

    let first = dir.path().join("run1.json");
    let second = dir.path().join("run2.json");

    let (collection, _) = extract_from_container(&container, &config).unwrap();
    write_atomic(&collection, &first).unwrap();

    let (collection, _) = extract_from_container(&container, &config).unwrap();
    write_atomic(&collection, &second).unwrap();

    assert_eq!(
        std::fs::read(&first).unwrap(),
        std::fs::read(&second).unwrap()
    );
}

#[test]
fn test_stride_monotonicity() {
    let container = MemoryContainer::single(
        create_gradient_grid(24, 24),
        fixtures::transforms::unit(),
    );

    let mut previous = usize::MAX;
    for stride in 1..=6 {
        let config = config_with(stride, fixtures::regions::global());
        let (_, summary) = extract_from_container(&container, &config).unwrap();
        assert!(
            summary.features <= previous,
            "stride {} produced {} features, more than stride {}",
            stride,
            summary.features,
            stride - 1
        );
        previous = summary.features;
    }
}

#[test]
fn test_subdataset_index_out_of_range() {
    let container = container_with(create_constant_grid(2, 2, 5000));
    let config = ExtractConfig {
        subdataset: 3,
        region: fixtures::regions::global(),
        stride: 1,
        ..Default::default()
    };

    let err = extract_from_container(&container, &config).unwrap_err();
    assert!(matches!(
        err,
        ExtractError::Raster(RasterError::SubdatasetIndex { index: 3, count: 1 })
    ));
}

#[test]
fn test_invalid_config_rejected_before_any_io() {
    let container = container_with(create_constant_grid(2, 2, 5000));
    let config = config_with(0, fixtures::regions::global());

    let err = extract_from_container(&container, &config).unwrap_err();
    assert!(matches!(err, ExtractError::InvalidConfig(_)));
}

#[test]
fn test_configured_subdataset_selection() {
    // Two sub-datasets with different constant values; index picks layer 1.
    let container = MemoryContainer::new()
        .with_dataset(
            "memory:ndvi",
            raster_source::MemoryDataset::new(
                create_constant_grid(2, 2, 1000),
                fixtures::transforms::unit(),
            ),
        )
        .with_dataset(
            "memory:evi",
            raster_source::MemoryDataset::new(
                create_constant_grid(2, 2, 2000),
                fixtures::transforms::unit(),
            ),
        );

    let config = ExtractConfig {
        subdataset: 1,
        stride: 1,
        region: fixtures::regions::global(),
        ..Default::default()
    };

    let (collection, summary) = extract_from_container(&container, &config).unwrap();
    assert_eq!(summary.subdatasets, 2);
    assert!(collection
        .features
        .iter()
        .all(|f| f.properties.ndvi == 0.2));
}
