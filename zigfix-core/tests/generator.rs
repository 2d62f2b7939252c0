//! Tests for the standalone entry points of `FixtureGenerator`.

mod common;

use common::{assert_topology_invariants, seeded, suite_proptest_config};
use proptest::prelude::*;
use rstest::{fixture, rstest};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use zigfix_core::{
    Definition, DeviceOptions, DeviceType, Expose, GenerateError, GenerateErrorCode,
    InterviewState, StaticCatalog, sample_catalog,
};
use zigfix_test_support::tracing::RecordingLayer;

#[fixture]
fn catalog() -> StaticCatalog {
    sample_catalog()
}

#[rstest]
fn seed_one_device_is_stable(catalog: StaticCatalog) {
    let device = seeded(&catalog, 1)
        .device(&DeviceOptions::new())
        .expect("device");
    assert_eq!(device.ieee_address, "0xff49b6f772632716");
    assert_eq!(device.device_type, DeviceType::Unknown);
    assert_eq!(device.network_address, 50267);
    let definition = device.definition.expect("definition");
    assert_eq!(definition.vendor, "ADEO");
    assert_eq!(definition.source, "native");
}

#[rstest]
fn seed_one_extended_pan_id_is_stable(catalog: StaticCatalog) {
    let id = seeded(&catalog, 1).extended_pan_id();
    assert_eq!(id.to_string(), "0xa08ff49b6f772632");
    assert_eq!(id.to_bytes(), [0x32, 0x26, 0x77, 0x6f, 0x9b, 0xf4, 0x8f, 0xa0]);
}

#[rstest]
#[case::router(DeviceType::Router)]
#[case::end_device(DeviceType::EndDevice)]
#[case::green_power(DeviceType::GreenPower)]
fn forced_types_are_honoured(catalog: StaticCatalog, #[case] device_type: DeviceType) {
    let device = seeded(&catalog, 11)
        .device(&DeviceOptions::new().with_device_type(device_type))
        .expect("device");
    assert_eq!(device.device_type, device_type);
    assert_eq!(
        device.interviewing,
        device.interview_state == InterviewState::InProgress
    );
    assert_eq!(
        device.interview_completed,
        device.interview_state == InterviewState::Successful
    );
}

#[rstest]
fn white_label_alias_is_reported(catalog: StaticCatalog) {
    let device = seeded(&catalog, 4)
        .device(&DeviceOptions::new().with_model("lxek-5"))
        .expect("device");
    let definition = device.definition.expect("definition");
    assert_eq!(definition.model, "LXEK-5");
    assert_eq!(definition.vendor, "Lexman");
    assert_eq!(definition.source, "white_label");
}

#[rstest]
fn missing_model_names_the_catalog(catalog: StaticCatalog) {
    let err = seeded(&catalog, 4)
        .device(&DeviceOptions::new().with_model("NOPE-1"))
        .expect_err("unknown model");
    assert_eq!(err.code(), GenerateErrorCode::DefinitionNotFound);
    assert_eq!(
        err,
        GenerateError::DefinitionNotFound {
            model: "NOPE-1".to_owned(),
            catalog: "sample".to_owned(),
        }
    );
}

#[test]
fn empty_catalog_is_rejected() {
    let catalog = StaticCatalog::new("empty", Vec::new());
    let err = seeded(&catalog, 1)
        .device(&DeviceOptions::new().with_device_type(DeviceType::Router))
        .expect_err("empty catalog");
    assert_eq!(err.code(), GenerateErrorCode::EmptyInput);
}

#[test]
fn green_power_needs_a_green_power_definition() {
    let catalog = StaticCatalog::new(
        "plain",
        vec![Definition::new("M1", "Acme", "Bulb").with_exposes(vec![Expose::text("note")])],
    );
    let err = seeded(&catalog, 1)
        .device(&DeviceOptions::new().with_device_type(DeviceType::GreenPower))
        .expect_err("no green-power records");
    assert_eq!(err, GenerateError::EmptyInput { what: "definition" });
}

#[rstest]
fn device_span_records_seed_and_catalog(catalog: StaticCatalog) {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    tracing::subscriber::with_default(subscriber, || {
        let mut generator = seeded(&catalog, 8);
        generator.device(&DeviceOptions::new()).expect("device");
        let _ = generator.device(&DeviceOptions::new().with_model("NOPE-1"));
    });

    let spans: Vec<_> = layer
        .spans()
        .into_iter()
        .filter(|span| span.name == "generate.device")
        .collect();
    assert_eq!(spans.len(), 2);
    assert!(spans.iter().all(|span| span.field("seed") == Some("8")));
    assert!(spans.iter().all(|span| span.field("catalog") == Some("sample")));
    assert!(
        layer
            .events()
            .iter()
            .any(|event| event.level == Level::ERROR)
    );
}

#[rstest]
fn group_members_come_from_candidates(catalog: StaticCatalog) {
    let mut generator = seeded(&catalog, 21);
    let devices: Vec<_> = (0..12)
        .map(|_| generator.device(&DeviceOptions::new()).expect("device"))
        .collect();
    for _ in 0..6 {
        let group = generator.group(&devices).expect("group");
        for member in &group.members {
            let device = devices
                .iter()
                .find(|device| device.ieee_address == member.ieee_address)
                .expect("member is a candidate");
            assert!(device.endpoints.contains_key(&member.endpoint));
        }
        assert!(group.scenes.len() <= 4);
    }
}

#[rstest]
fn group_without_candidates_has_no_members(catalog: StaticCatalog) {
    let group = seeded(&catalog, 2).group(&[]).expect("group");
    assert!(group.members.is_empty());
    assert!(group.id >= 1);
}

#[rstest]
fn device_state_for_unsupported_device_is_empty(catalog: StaticCatalog) {
    let mut generator = seeded(&catalog, 6);
    let coordinator = generator.coordinator().expect("coordinator");
    assert!(generator.device_state(&coordinator).expect("state").is_empty());
}

#[rstest]
fn network_map_over_standalone_devices(catalog: StaticCatalog) {
    let mut generator = seeded(&catalog, 13);
    let coordinator = generator.coordinator().expect("coordinator");
    let devices: Vec<_> = (0..25)
        .map(|_| generator.device(&DeviceOptions::new()).expect("device"))
        .collect();
    let map = generator
        .network_map(&coordinator, &devices, false)
        .expect("map");
    assert_topology_invariants(&map);
    assert!(map.links.iter().all(|link| link.routes.is_empty()));
}

#[rstest]
fn extra_coordinators_are_left_out(catalog: StaticCatalog) {
    let mut generator = seeded(&catalog, 13);
    let coordinator = generator.coordinator().expect("coordinator");
    let twin = generator.coordinator().expect("coordinator");
    let map = generator
        .network_map(&coordinator, &[twin], false)
        .expect("map");
    assert_eq!(map.nodes.len(), 1);
}

proptest! {
    #![proptest_config(suite_proptest_config(32))]

    #[test]
    fn devices_respect_field_ranges(seed in any::<u32>(), epoch_ms in 86_400_000_u64..=4_000_000_000_000) {
        let catalog = sample_catalog();
        let mut generator = zigfix_core::FixtureGeneratorBuilder::new()
            .with_seed(seed)
            .with_epoch_ms(epoch_ms)
            .build(&catalog);
        let device = generator.device(&DeviceOptions::new()).expect("device");

        prop_assert!(device.ieee_address.starts_with("0x"));
        prop_assert_eq!(device.ieee_address.len(), 18);
        prop_assert!((1..=0xFFF7).contains(&device.network_address));
        prop_assert_ne!(device.device_type, DeviceType::Coordinator);
        let last_seen = device.last_seen.expect("last seen");
        prop_assert!(last_seen <= epoch_ms && epoch_ms - last_seen <= 86_400_000);
        prop_assert!(device.endpoints.keys().all(|id| (1..=254).contains(id)));
    }
}
