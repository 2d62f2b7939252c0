//! Capability catalog abstractions and the built-in sample catalog.
//!
//! A catalog is an immutable, ordered list of [`Definition`] records built
//! once and injected into the generators. Record order matters: random
//! definition picks index into it.

use std::{collections::BTreeMap, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::expose::{ACCESS_ALL, ACCESS_SET, ACCESS_STATE, Expose};

const GREEN_POWER_PREFIX: &str = "GreenPower_";

/// Alternative vendor/model a definition is also sold as.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WhiteLabel {
    /// Alias vendor.
    pub vendor: String,
    /// Alias model.
    pub model: String,
    /// Alias description, falling back to the primary one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Identity reported by hardware matching a definition.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fingerprint {
    /// Model id reported by the device.
    #[serde(default, rename = "modelID", skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    /// Manufacturer name reported by the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer_name: Option<String>,
}

/// Endpoint of a [`StubDevice`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StubEndpoint {
    /// Endpoint id.
    pub id: u8,
    /// Input cluster names.
    pub input_clusters: Vec<String>,
}

/// Minimal device handed to catalog hooks before a real device exists.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StubDevice {
    /// Always `true` for stubs; hooks use it to return their full surface.
    pub is_dummy_device: bool,
    /// Stub endpoints.
    pub endpoints: Vec<StubEndpoint>,
}

impl StubDevice {
    /// Creates the stub used during generation: one endpoint exposing the
    /// basic cluster.
    #[must_use]
    pub fn dummy() -> Self {
        Self {
            is_dummy_device: true,
            endpoints: vec![StubEndpoint {
                id: 1,
                input_clusters: vec!["genBasic".to_owned()],
            }],
        }
    }
}

/// Hook computing a capability tree from a device.
pub type ExposesFn = Arc<dyn Fn(&StubDevice) -> Vec<Expose> + Send + Sync>;

/// Hook mapping endpoint names to ids for a device.
pub type EndpointResolver = Arc<dyn Fn(&StubDevice) -> BTreeMap<String, u32> + Send + Sync>;

/// Capability tree of a definition.
#[derive(Clone)]
pub enum Exposes {
    /// A fixed tree.
    Static(Vec<Expose>),
    /// A tree computed per device.
    Dynamic(ExposesFn),
}

impl Exposes {
    /// Returns the tree for `device`.
    #[must_use]
    pub fn resolve(&self, device: &StubDevice) -> Vec<Expose> {
        match self {
            Self::Static(exposes) => exposes.clone(),
            Self::Dynamic(hook) => hook(device),
        }
    }
}

impl fmt::Debug for Exposes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(exposes) => f.debug_tuple("Static").field(exposes).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl Default for Exposes {
    fn default() -> Self {
        Self::Static(Vec::new())
    }
}

/// One catalog record.
///
/// # Examples
/// ```
/// use zigfix_core::{Definition, Expose, StubDevice};
///
/// let definition = Definition::new("SW-1", "Acme", "Wall switch")
///     .with_exposes(vec![Expose::binary("state", "ON", "OFF")])
///     .with_white_label("Budget", "B-SW", None);
/// assert!(definition.matches_model("b-sw"));
/// assert_eq!(definition.exposes.resolve(&StubDevice::dummy()).len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct Definition {
    /// Primary model id.
    pub model: String,
    /// Primary vendor.
    pub vendor: String,
    /// Human description.
    pub description: String,
    /// Alternative vendor/model pairs.
    pub white_label: Vec<WhiteLabel>,
    /// Hardware identities matching this record.
    pub fingerprint: Vec<Fingerprint>,
    /// Capability tree.
    pub exposes: Exposes,
    /// Options tree.
    pub options: Vec<Expose>,
    /// Fixed endpoint ids, when the hardware declares them.
    pub endpoint: Option<EndpointResolver>,
    /// Whether the hardware supports over-the-air updates.
    pub supports_ota: bool,
}

impl Definition {
    /// Creates a record with no capabilities.
    #[must_use]
    pub fn new(model: &str, vendor: &str, description: &str) -> Self {
        Self {
            model: model.to_owned(),
            vendor: vendor.to_owned(),
            description: description.to_owned(),
            ..Self::default()
        }
    }

    /// Sets a fixed capability tree.
    #[must_use]
    pub fn with_exposes(mut self, exposes: Vec<Expose>) -> Self {
        self.exposes = Exposes::Static(exposes);
        self
    }

    /// Sets a per-device capability hook.
    #[must_use]
    pub fn with_dynamic_exposes<F>(mut self, hook: F) -> Self
    where
        F: Fn(&StubDevice) -> Vec<Expose> + Send + Sync + 'static,
    {
        self.exposes = Exposes::Dynamic(Arc::new(hook));
        self
    }

    /// Sets the options tree.
    #[must_use]
    pub fn with_options(mut self, options: Vec<Expose>) -> Self {
        self.options = options;
        self
    }

    /// Adds a white-label alias.
    #[must_use]
    pub fn with_white_label(mut self, vendor: &str, model: &str, description: Option<&str>) -> Self {
        self.white_label.push(WhiteLabel {
            vendor: vendor.to_owned(),
            model: model.to_owned(),
            description: description.map(str::to_owned),
        });
        self
    }

    /// Adds a hardware fingerprint.
    #[must_use]
    pub fn with_fingerprint(mut self, model_id: &str, manufacturer_name: &str) -> Self {
        self.fingerprint.push(Fingerprint {
            model_id: Some(model_id.to_owned()),
            manufacturer_name: Some(manufacturer_name.to_owned()),
        });
        self
    }

    /// Sets the endpoint resolution hook.
    #[must_use]
    pub fn with_endpoints<F>(mut self, hook: F) -> Self
    where
        F: Fn(&StubDevice) -> BTreeMap<String, u32> + Send + Sync + 'static,
    {
        self.endpoint = Some(Arc::new(hook));
        self
    }

    /// Marks the record as OTA-capable.
    #[must_use]
    pub const fn with_ota(mut self, supports_ota: bool) -> Self {
        self.supports_ota = supports_ota;
        self
    }

    /// Returns whether `model` names this record or one of its aliases,
    /// ignoring case.
    #[must_use]
    pub fn matches_model(&self, model: &str) -> bool {
        self.model.eq_ignore_ascii_case(model) || self.white_label_for(model).is_some()
    }

    /// Returns the alias `model` names, ignoring case.
    #[must_use]
    pub fn white_label_for(&self, model: &str) -> Option<&WhiteLabel> {
        self.white_label
            .iter()
            .find(|label| label.model.eq_ignore_ascii_case(model))
    }

    /// Returns whether the record describes green-power hardware.
    #[must_use]
    pub fn is_green_power(&self) -> bool {
        self.fingerprint.iter().any(|print| {
            print
                .model_id
                .as_deref()
                .is_some_and(|id| id.starts_with(GREEN_POWER_PREFIX))
        })
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("model", &self.model)
            .field("vendor", &self.vendor)
            .field("description", &self.description)
            .field("white_label", &self.white_label)
            .field("fingerprint", &self.fingerprint)
            .field("exposes", &self.exposes)
            .field("options", &self.options)
            .field("endpoint", &self.endpoint.as_ref().map(|_| ".."))
            .field("supports_ota", &self.supports_ota)
            .finish()
    }
}

/// Read-only source of capability definitions.
///
/// # Examples
/// ```
/// use zigfix_core::{Catalog, Definition};
///
/// struct One(Vec<Definition>);
///
/// impl Catalog for One {
///     fn name(&self) -> &str { "one" }
///     fn definitions(&self) -> &[Definition] { &self.0 }
/// }
///
/// let catalog = One(vec![Definition::new("M1", "Acme", "Bulb")]);
/// assert!(catalog.find_by_model("m1").is_some());
/// assert!(catalog.green_power_definitions().is_empty());
/// ```
pub trait Catalog {
    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Returns every record in catalog order.
    fn definitions(&self) -> &[Definition];

    /// Finds the first record whose model or white-label model equals
    /// `model`, ignoring case.
    fn find_by_model(&self, model: &str) -> Option<&Definition> {
        self.definitions()
            .iter()
            .find(|definition| definition.matches_model(model))
    }

    /// Returns the green-power records in catalog order.
    fn green_power_definitions(&self) -> Vec<&Definition> {
        self.definitions()
            .iter()
            .filter(|definition| definition.is_green_power())
            .collect()
    }
}

/// Catalog over an in-memory list.
#[derive(Clone, Debug)]
pub struct StaticCatalog {
    name: String,
    definitions: Vec<Definition>,
}

impl StaticCatalog {
    /// Creates a catalog from records.
    #[must_use]
    pub fn new(name: impl Into<String>, definitions: Vec<Definition>) -> Self {
        Self {
            name: name.into(),
            definitions,
        }
    }
}

impl Catalog for StaticCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    fn definitions(&self) -> &[Definition] {
        &self.definitions
    }
}

fn linkquality() -> Expose {
    Expose::numeric("linkquality", Some(0.0), Some(255.0))
        .with_label("Linkquality")
        .with_access(ACCESS_STATE)
}

fn battery() -> Expose {
    Expose::numeric("battery", Some(0.0), Some(100.0))
        .with_label("Battery")
        .with_access(ACCESS_STATE)
}

fn on_off() -> Expose {
    Expose::binary("state", "ON", "OFF")
        .with_property("state")
        .with_access(ACCESS_ALL)
}

fn brightness() -> Expose {
    Expose::numeric("brightness", Some(0.0), Some(254.0)).with_access(ACCESS_ALL)
}

fn transition_option() -> Expose {
    Expose::numeric("transition", Some(0.0), None)
        .with_label("Transition")
        .with_access(ACCESS_SET)
}

fn green_power_switch(model: &str, model_id: &str, description: &str) -> Definition {
    Definition::new(model, "GreenPower", description)
        .with_fingerprint(model_id, "GreenPower")
        .with_exposes(vec![
            Expose::enumeration(
                "action",
                ["press_1_of_1", "release_1_of_1", "press_2_of_2", "release_2_of_2"],
            )
            .with_access(ACCESS_STATE),
            linkquality(),
        ])
        .with_endpoints(|_| BTreeMap::from([("default".to_owned(), 242)]))
}

fn sensor_exposes(device: &StubDevice) -> Vec<Expose> {
    let mut exposes = vec![Expose::numeric("temperature", Some(-40.0), Some(80.0))];
    if device.is_dummy_device {
        exposes.push(Expose::numeric("humidity", Some(0.0), Some(100.0)));
        exposes.push(battery());
    }
    exposes.push(linkquality());
    exposes
}

/// Returns the built-in sample catalog.
///
/// The catalog covers each capability shape the generators handle: lights
/// (including a gradient strip), a thermostat with a schedule, a lock, a
/// cover, a fan, a multi-endpoint plug, a sensor with a dynamic tree and two
/// green-power switches. Its first record is an `ADEO` bulb.
#[must_use]
pub fn sample_catalog() -> StaticCatalog {
    let definitions = vec![
        Definition::new("HR-C99C-Z-C045", "ADEO", "RGB CCT E27 bulb")
            .with_exposes(vec![
                Expose::light(vec![
                    on_off(),
                    brightness(),
                    Expose::numeric("color_temp", Some(153.0), Some(500.0))
                        .with_access(ACCESS_ALL),
                ]),
                Expose::enumeration("effect", ["blink", "breathe", "okay"])
                    .with_access(ACCESS_SET),
                linkquality(),
            ])
            .with_options(vec![transition_option()])
            .with_white_label("Lexman", "LXEK-5", Some("Smart RGB bulb"))
            .with_ota(true),
        Definition::new("GS-LED-STRIP", "Glimmer", "Gradient light strip")
            .with_exposes(vec![
                Expose::light(vec![
                    on_off(),
                    brightness(),
                    Expose::list("gradient", Expose::text("color"), Some(1), Some(9))
                        .with_access(ACCESS_ALL),
                ]),
                linkquality(),
            ])
            .with_options(vec![
                transition_option(),
                Expose::binary("color_sync", true, false).with_access(ACCESS_SET),
            ])
            .with_ota(true),
        Definition::new("TRV-3", "Thermia", "Radiator valve")
            .with_exposes(vec![
                Expose::climate(vec![
                    Expose::numeric("occupied_heating_setpoint", Some(5.0), Some(30.0))
                        .with_access(ACCESS_ALL),
                    Expose::numeric("local_temperature", Some(-10.0), Some(40.0))
                        .with_access(ACCESS_STATE),
                    Expose::enumeration("system_mode", ["off", "auto", "heat"])
                        .with_access(ACCESS_ALL),
                ]),
                Expose::list(
                    "schedule",
                    Expose::composite(
                        "transition",
                        "transition",
                        vec![
                            Expose::numeric("hour", Some(0.0), Some(23.0)),
                            Expose::numeric("heating_setpoint", Some(5.0), Some(30.0)),
                        ],
                    ),
                    Some(1),
                    Some(6),
                ),
                battery(),
                linkquality(),
            ])
            .with_options(vec![
                Expose::numeric("local_temperature_calibration", Some(-5.0), Some(5.0))
                    .with_access(ACCESS_SET),
            ]),
        Definition::new("DL-200", "Boltwise", "Door lock")
            .with_exposes(vec![
                Expose::lock(vec![
                    Expose::binary("state", "LOCK", "UNLOCK").with_access(ACCESS_ALL),
                    Expose::enumeration("lock_state", ["locked", "unlocked", "not_fully_locked"])
                        .with_access(ACCESS_STATE),
                ]),
                Expose::list("pin_codes", Expose::text("pin"), None, Some(4)),
                battery(),
                linkquality(),
            ])
            .with_ota(true),
        Definition::new("BL-40", "Shadeco", "Roller blind motor")
            .with_exposes(vec![
                Expose::cover(vec![
                    Expose::enumeration("state", ["OPEN", "CLOSE", "STOP"])
                        .with_access(ACCESS_ALL),
                    Expose::numeric("position", Some(0.0), Some(100.0)).with_access(ACCESS_ALL),
                ]),
                linkquality(),
            ])
            .with_options(vec![
                Expose::binary("invert_cover", true, false).with_access(ACCESS_SET),
            ]),
        Definition::new("CF-1", "Breezy", "Ceiling fan controller")
            .with_exposes(vec![
                Expose::fan(vec![
                    on_off(),
                    Expose::enumeration("mode", ["off", "low", "medium", "high", "auto"])
                        .with_property("fan_mode")
                        .with_access(ACCESS_ALL),
                ]),
                Expose::numeric("power", None, None).with_access(ACCESS_STATE),
                linkquality(),
            ]),
        Definition::new("PLUG-2", "Voltio", "Dual outlet plug")
            .with_exposes(vec![
                Expose::switch(vec![on_off().with_property("state_l1").with_endpoint("l1")]),
                Expose::switch(vec![on_off().with_property("state_l2").with_endpoint("l2")]),
                Expose::numeric("power", Some(0.0), Some(3680.0)).with_access(ACCESS_STATE),
                Expose::text("firmware_note"),
                linkquality(),
            ])
            .with_endpoints(|_| {
                BTreeMap::from([("l1".to_owned(), 1), ("l2".to_owned(), 2)])
            })
            .with_white_label("Homebrand", "HB-PLUG-2", None),
        Definition::new("TH-01", "Climasense", "Temperature and humidity sensor")
            .with_dynamic_exposes(sensor_exposes)
            .with_options(vec![
                Expose::numeric("temperature_precision", Some(0.0), Some(3.0))
                    .with_access(ACCESS_SET),
            ]),
        green_power_switch("GP-SW2", "GreenPower_2", "Green power two-button switch"),
        green_power_switch("GP-SW7", "GreenPower_7", "Green power switch"),
    ];
    StaticCatalog::new("sample", definitions)
}
