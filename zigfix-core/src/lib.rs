//! Zigfix core library: deterministic fixtures for a mesh-network
//! home-automation gateway.
//!
//! A [`FixtureGenerator`] turns a seed and a capability [`Catalog`] into
//! devices, groups, bridge metadata, device states and network maps. Equal
//! seeds and equal call sequences always produce equal output.

mod catalog;
mod error;
mod expose;
mod generator;
mod model;
mod rng;
mod snapshot;
mod topology;
mod words;

pub use crate::{
    catalog::{
        Catalog, Definition, EndpointResolver, Exposes, ExposesFn, Fingerprint, StaticCatalog,
        StubDevice, StubEndpoint, WhiteLabel, sample_catalog,
    },
    error::{GenerateError, GenerateErrorCode, Result},
    expose::{
        ACCESS_ALL, ACCESS_GET, ACCESS_SET, ACCESS_STATE, Expose, ExposeKind, synthesize,
        synthesize_state, walk,
    },
    generator::{DEFAULT_EPOCH_MS, DeviceOptions, FixtureGenerator, FixtureGeneratorBuilder},
    model::{
        Binding, BindingTarget, BridgeHealth, BridgeInfo, BridgeOnline, BridgeState, Clusters,
        ConfiguredReporting, CoordinatorInfo, CoordinatorMeta, DefinitionSummary, Device,
        DeviceHealth, DeviceType, Endpoint, ExtendedPanId, ExtendedPanIdError, Group, GroupMember,
        InterviewState, LinkEnd, LogLevel, MqttHealth, NetworkInfo, NetworkMap, NetworkMapKind,
        NetworkMapResponse, NodeDefinition, OsHealth, ProcessHealth, Relationship, Route,
        RouteStatus, Scene, TopologyLink, TopologyNode,
    },
    rng::RandomStream,
    snapshot::Snapshot,
    topology::{generate_network_map, render_graphviz, resolve_relationship},
};
