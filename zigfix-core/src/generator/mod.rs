//! Entity generators and the configuration surface that drives them.
//!
//! Every public entry point on [`FixtureGenerator`] consumes the shared
//! [`RandomStream`] in a fixed order, so equal seeds and equal call sequences
//! give equal fixtures. Identifier uniqueness is tracked per [`Session`]: each
//! standalone call starts a fresh one, and a snapshot threads one session
//! through all of its parts.

mod bridge;
mod device;
mod endpoint;
mod group;

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::instrument;

use crate::{
    catalog::Catalog,
    error::Result,
    expose::synthesize_state,
    model::{
        BridgeHealth, BridgeInfo, BridgeState, Device, DeviceType, ExtendedPanId, Group,
        NetworkMap,
    },
    rng::{RandomStream, clock_seed},
    topology,
};

/// Reference "now" used when none is configured: 2024-01-01T00:00:00Z.
pub const DEFAULT_EPOCH_MS: u64 = 1_704_067_200_000;

/// Identifier bookkeeping shared by the parts of one generation session.
#[derive(Debug, Default)]
pub(crate) struct Session {
    pub(crate) network_addresses: HashSet<u16>,
    pub(crate) scene_ids: HashSet<u8>,
    pub(crate) group_ids: HashSet<u16>,
}

/// Constraints on a generated device.
///
/// # Examples
/// ```
/// use zigfix_core::{DeviceOptions, DeviceType};
///
/// let options = DeviceOptions::new()
///     .with_device_type(DeviceType::Router)
///     .with_model("PLUG-2");
/// assert_eq!(options.device_type, Some(DeviceType::Router));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DeviceOptions {
    /// Forced device type.
    pub device_type: Option<DeviceType>,
    /// Forced model, matched case-insensitively against models and aliases.
    pub model: Option<String>,
}

impl DeviceOptions {
    /// Creates unconstrained options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the device type.
    #[must_use]
    pub const fn with_device_type(mut self, device_type: DeviceType) -> Self {
        self.device_type = Some(device_type);
        self
    }

    /// Forces the catalog model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Configures and constructs [`FixtureGenerator`] instances.
///
/// # Examples
/// ```
/// use zigfix_core::{FixtureGeneratorBuilder, sample_catalog};
///
/// let catalog = sample_catalog();
/// let generator = FixtureGeneratorBuilder::new()
///     .with_seed(1)
///     .with_epoch_ms(1_700_000_000_000)
///     .with_routes(true)
///     .build(&catalog);
/// assert_eq!(generator.seed(), 1);
/// assert!(generator.routes());
/// ```
#[derive(Clone, Debug, Default)]
pub struct FixtureGeneratorBuilder {
    seed: Option<u32>,
    epoch_ms: Option<u64>,
    routes: bool,
}

impl FixtureGeneratorBuilder {
    /// Creates a builder with a clock seed, the default epoch and no routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stream seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the reference time used for last-seen and permit-join stamps.
    #[must_use]
    pub const fn with_epoch_ms(mut self, epoch_ms: u64) -> Self {
        self.epoch_ms = Some(epoch_ms);
        self
    }

    /// Sets whether snapshot topologies carry routing entries.
    #[must_use]
    pub const fn with_routes(mut self, routes: bool) -> Self {
        self.routes = routes;
        self
    }

    /// Constructs a generator reading from `catalog`.
    #[must_use]
    pub fn build(self, catalog: &dyn Catalog) -> FixtureGenerator<'_> {
        let seed = self.seed.unwrap_or_else(clock_seed);
        FixtureGenerator {
            stream: RandomStream::new(seed),
            catalog,
            seed,
            epoch_ms: self.epoch_ms.unwrap_or(DEFAULT_EPOCH_MS),
            routes: self.routes,
        }
    }
}

/// Deterministic fixture generator over one random stream and one catalog.
pub struct FixtureGenerator<'c> {
    stream: RandomStream,
    catalog: &'c dyn Catalog,
    seed: u32,
    epoch_ms: u64,
    routes: bool,
}

impl std::fmt::Debug for FixtureGenerator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureGenerator")
            .field("catalog", &self.catalog.name())
            .field("seed", &self.seed)
            .field("epoch_ms", &self.epoch_ms)
            .field("routes", &self.routes)
            .finish_non_exhaustive()
    }
}

impl<'c> FixtureGenerator<'c> {
    /// Returns the seed the stream started from.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Returns the reference time in milliseconds since the epoch.
    #[must_use]
    pub const fn epoch_ms(&self) -> u64 {
        self.epoch_ms
    }

    /// Returns whether snapshot topologies carry routing entries.
    #[must_use]
    pub const fn routes(&self) -> bool {
        self.routes
    }

    /// Returns the catalog definitions are drawn from.
    #[must_use]
    pub fn catalog(&self) -> &'c dyn Catalog {
        self.catalog
    }

    /// Generates the network coordinator.
    ///
    /// # Errors
    /// Returns [`crate::GenerateError::EmptyInput`] only if an internal word
    /// or cluster pool is empty.
    pub fn coordinator(&mut self) -> Result<Device> {
        let mut session = Session::default();
        device::coordinator(&mut self.stream, &mut session)
    }

    /// Generates one device.
    ///
    /// # Errors
    /// Returns [`crate::GenerateError::DefinitionNotFound`] when a forced model
    /// is not in the catalog, and [`crate::GenerateError::EmptyInput`] when no
    /// candidate definition exists.
    #[instrument(
        name = "generate.device",
        err,
        skip(self, options),
        fields(seed = self.seed, catalog = self.catalog.name())
    )]
    pub fn device(&mut self, options: &DeviceOptions) -> Result<Device> {
        let mut session = Session::default();
        self.device_in(&mut session, options)
    }

    pub(crate) fn device_in(
        &mut self,
        session: &mut Session,
        options: &DeviceOptions,
    ) -> Result<Device> {
        device::device(&mut self.stream, session, self.catalog, self.epoch_ms, options)
    }

    pub(crate) fn coordinator_in(&mut self, session: &mut Session) -> Result<Device> {
        device::coordinator(&mut self.stream, session)
    }

    /// Generates one group whose members are drawn from `candidates`.
    ///
    /// # Errors
    /// Returns [`crate::GenerateError::EmptyInput`] when every group id is
    /// already taken.
    #[instrument(
        name = "generate.group",
        err,
        skip(self, candidates),
        fields(seed = self.seed, candidates = candidates.len())
    )]
    pub fn group(&mut self, candidates: &[Device]) -> Result<Group> {
        let mut session = Session::default();
        self.group_in(&mut session, candidates)
    }

    pub(crate) fn group_in(
        &mut self,
        session: &mut Session,
        candidates: &[Device],
    ) -> Result<Group> {
        group::group(&mut self.stream, session, candidates)
    }

    /// Generates the bridge reachability state.
    pub fn bridge_state(&mut self) -> BridgeState {
        bridge::state(&mut self.stream)
    }

    /// Generates bridge information for a coordinator and its devices.
    ///
    /// # Errors
    /// Propagates synthesis errors from device option trees.
    #[instrument(
        name = "generate.bridge_info",
        err,
        skip(self, coordinator, devices, groups),
        fields(seed = self.seed, devices = devices.len(), groups = groups.len())
    )]
    pub fn bridge_info(
        &mut self,
        coordinator: &Device,
        devices: &[Device],
        groups: &[Group],
    ) -> Result<BridgeInfo> {
        bridge::info(&mut self.stream, self.epoch_ms, coordinator, devices, groups)
    }

    /// Generates bridge health statistics for `devices`. The coordinator, if
    /// present, gets no per-device entry.
    #[instrument(
        name = "generate.bridge_health",
        skip(self, devices),
        fields(seed = self.seed, devices = devices.len())
    )]
    pub fn bridge_health(&mut self, devices: &[Device]) -> BridgeHealth {
        bridge::health(&mut self.stream, devices)
    }

    /// Synthesizes a flat state object for a device's capability tree.
    /// Devices without a definition get an empty object.
    ///
    /// # Errors
    /// Propagates synthesis errors, such as an enum without values.
    pub fn device_state(&mut self, device: &Device) -> Result<Map<String, Value>> {
        match &device.definition {
            Some(definition) => synthesize_state(&mut self.stream, &definition.exposes),
            None => Ok(Map::new()),
        }
    }

    /// Generates a raw network map over a coordinator and devices.
    ///
    /// # Errors
    /// Propagates [`crate::GenerateError`] from relationship resolution and
    /// route picks. Coordinators and green-power nodes in `devices` are left
    /// out of the map.
    #[instrument(
        name = "generate.network_map",
        err,
        skip(self, coordinator, devices),
        fields(seed = self.seed, devices = devices.len())
    )]
    pub fn network_map(
        &mut self,
        coordinator: &Device,
        devices: &[Device],
        routes: bool,
    ) -> Result<NetworkMap> {
        topology::generate_network_map(&mut self.stream, coordinator, devices, routes)
    }

    /// Draws an extended PAN id.
    pub fn extended_pan_id(&mut self) -> ExtendedPanId {
        ExtendedPanId::generate(&mut self.stream)
    }
}
