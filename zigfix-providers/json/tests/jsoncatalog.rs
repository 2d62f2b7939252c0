//! Integration tests covering the JSON-backed [`Catalog`] implementation.
use std::io::{Cursor, Write};

use rstest::{fixture, rstest};
use zigfix_core::{Catalog, DeviceOptions, DeviceType, FixtureGeneratorBuilder, StubDevice};
use zigfix_providers_json::{JsonCatalog, JsonCatalogError};

#[fixture]
fn document() -> &'static str {
    r#"[
        {
            "model": "HUE-1",
            "vendor": "Lumen",
            "description": "Colour bulb",
            "whiteLabel": [{"vendor": "Budget", "model": "B-HUE"}],
            "exposes": [
                {"type": "light", "features": [
                    {"type": "binary", "name": "state", "value_on": "ON", "value_off": "OFF"},
                    {"type": "numeric", "name": "brightness", "value_min": 0, "value_max": 254}
                ]},
                {"type": "numeric", "name": "linkquality"}
            ],
            "options": [{"type": "numeric", "name": "transition", "value_min": 0, "value_max": 10}],
            "ota": true
        },
        {
            "model": "GP-1",
            "vendor": "Kinetic",
            "fingerprint": [{"modelID": "GreenPower_2", "manufacturerName": "GreenPower"}],
            "exposes": [{"type": "enum", "name": "action", "values": ["press", "release"]}],
            "endpoints": {"default": 242}
        }
    ]"#
}

#[rstest]
fn loads_records_in_order(document: &str) {
    let catalog =
        JsonCatalog::try_from_reader("lab", Cursor::new(document)).expect("catalog must load");
    assert_eq!(catalog.name(), "lab");
    let models: Vec<&str> = catalog
        .definitions()
        .iter()
        .map(|definition| definition.model.as_str())
        .collect();
    assert_eq!(models, ["HUE-1", "GP-1"]);

    let bulb = catalog.find_by_model("b-hue").expect("alias must resolve");
    assert!(bulb.supports_ota);
    assert_eq!(bulb.options.len(), 1);
    assert_eq!(bulb.exposes.resolve(&StubDevice::dummy()).len(), 2);
}

#[rstest]
fn green_power_records_are_detected(document: &str) {
    let catalog =
        JsonCatalog::try_from_reader("lab", Cursor::new(document)).expect("catalog must load");
    let green: Vec<&str> = catalog
        .green_power_definitions()
        .into_iter()
        .map(|definition| definition.model.as_str())
        .collect();
    assert_eq!(green, ["GP-1"]);
    let resolver = catalog.definitions()[1]
        .endpoint
        .as_ref()
        .expect("endpoints must be declared");
    assert_eq!(resolver(&StubDevice::dummy()).get("default"), Some(&242));
}

#[rstest]
fn drives_the_generator(document: &str) {
    let catalog =
        JsonCatalog::try_from_reader("lab", Cursor::new(document)).expect("catalog must load");
    let mut generator = FixtureGeneratorBuilder::new().with_seed(7).build(&catalog);
    let device = generator
        .device(&DeviceOptions::new().with_device_type(DeviceType::GreenPower))
        .expect("device must generate");
    assert_eq!(device.model_id.as_deref(), Some("GreenPower_2"));
    assert_eq!(device.endpoint_ids(), [242]);

    let snapshot = generator.snapshot(6, 1).expect("snapshot must generate");
    assert_eq!(snapshot.devices.len(), 7);
}

#[rstest]
#[case::empty_array("[]")]
#[case::whitespace_array("  [ ]\n")]
fn empty_catalog_is_rejected(#[case] raw: &str) {
    let err = JsonCatalog::try_from_reader("lab", Cursor::new(raw)).expect_err("empty must fail");
    assert!(matches!(err, JsonCatalogError::EmptyCatalog { ref name } if name == "lab"));
    assert_eq!(err.code(), "ZIGFIX_CATALOG_EMPTY");
}

#[rstest]
#[case::not_json("definitions")]
#[case::object(r#"{"model": "X"}"#)]
#[case::missing_vendor(r#"[{"model": "X"}]"#)]
#[case::unknown_kind(r#"[{"model": "X", "vendor": "Y", "exposes": [{"type": "hologram"}]}]"#)]
fn malformed_documents_are_rejected(#[case] raw: &str) {
    let err = JsonCatalog::try_from_reader("lab", Cursor::new(raw)).expect_err("must fail");
    assert!(matches!(err, JsonCatalogError::Parse(_)));
    assert_eq!(err.code(), "ZIGFIX_CATALOG_PARSE");
}

#[rstest]
fn blank_model_is_rejected() {
    let raw = r#"[{"model": "A", "vendor": "V"}, {"model": "  ", "vendor": "V"}]"#;
    let err = JsonCatalog::try_from_reader("lab", Cursor::new(raw)).expect_err("must fail");
    assert!(matches!(err, JsonCatalogError::MissingModel { index: 1 }));
}

#[rstest]
fn io_errors_propagate() {
    struct FailingReader;

    impl std::io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("boom"))
        }
    }

    let err = JsonCatalog::try_from_reader("lab", FailingReader).expect_err("must fail");
    assert!(matches!(err, JsonCatalogError::Parse(_) | JsonCatalogError::Io(_)));
}

#[rstest]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = JsonCatalog::try_from_path(dir.path().join("absent.json")).expect_err("must fail");
    assert!(matches!(err, JsonCatalogError::Io(_)));
    assert_eq!(err.code(), "ZIGFIX_CATALOG_IO");
}

#[rstest]
fn path_loading_names_the_catalog_after_the_file(document: &str) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("kitchen.json");
    let mut file = std::fs::File::create(&path).expect("create");
    file.write_all(document.as_bytes()).expect("write");
    drop(file);

    let catalog = JsonCatalog::try_from_path(&path).expect("catalog must load");
    assert_eq!(catalog.name(), "kitchen");
    assert_eq!(catalog.definitions().len(), 2);
}
