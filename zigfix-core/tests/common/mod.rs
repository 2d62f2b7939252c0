use std::collections::HashSet;

use proptest::test_runner::Config as ProptestConfig;
use zigfix_core::{
    DeviceType, FixtureGenerator, FixtureGeneratorBuilder, NetworkMap, StaticCatalog,
};
use zigfix_test_support::ci::property_test_profile::ProptestRunProfile;

/// Builds a seeded generator over `catalog` with the default epoch.
#[must_use]
pub fn seeded(catalog: &StaticCatalog, seed: u32) -> FixtureGenerator<'_> {
    FixtureGeneratorBuilder::new().with_seed(seed).build(catalog)
}

/// Returns the proptest configuration for a suite, honouring CI overrides.
#[must_use]
pub fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Checks the structural guarantees every generated network map carries.
pub fn assert_topology_invariants(map: &NetworkMap) {
    let first = map.nodes.first().expect("map has a coordinator node");
    assert_eq!(first.device_type, DeviceType::Coordinator);
    assert!(
        map.nodes
            .iter()
            .skip(1)
            .all(|node| node.device_type != DeviceType::Coordinator
                && node.device_type != DeviceType::GreenPower)
    );

    let types: std::collections::HashMap<&str, DeviceType> = map
        .nodes
        .iter()
        .map(|node| (node.ieee_addr.as_str(), node.device_type))
        .collect();
    let mut pairs = HashSet::new();
    for link in &map.links {
        let source = link.source.ieee_addr.as_str();
        let target = link.target.ieee_addr.as_str();
        assert_ne!(source, target, "self link");
        assert!(pairs.insert((source, target)), "duplicate link {source} -> {target}");
        assert!(
            !(types[source] == DeviceType::EndDevice && types[target] == DeviceType::EndDevice),
            "end devices linked directly"
        );
        assert!((30..=255).contains(&link.linkquality));
        assert_eq!(link.lqi, link.linkquality);
        assert!((1..=3).contains(&link.depth));
        assert_eq!(link.source_ieee_addr, link.source.ieee_addr);
        assert_eq!(link.target_ieee_addr, link.target.ieee_addr);
        assert_eq!(link.source_nwk_addr, link.source.network_address);
    }
}
