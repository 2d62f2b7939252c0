//! Capability descriptors ("exposes") and the machinery built on them.
//!
//! A descriptor is either a leaf with a directly synthesizable value, or a
//! composite-shaped node whose `features` supply their own keyed values. The
//! same shape describes both a definition's capability tree and its options
//! tree, so [`walk`] and [`synthesize`] serve both.

mod synth;
mod walk;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use synth::{synthesize, synthesize_state};
pub use walk::walk;

/// Access bit: the value is published in state.
pub const ACCESS_STATE: u8 = 0b001;
/// Access bit: the value can be set.
pub const ACCESS_SET: u8 = 0b010;
/// Access bit: the value can be read on demand.
pub const ACCESS_GET: u8 = 0b100;
/// All access bits.
pub const ACCESS_ALL: u8 = ACCESS_STATE | ACCESS_SET | ACCESS_GET;

/// One capability descriptor.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use zigfix_core::Expose;
///
/// let state = Expose::binary("state", "ON", "OFF");
/// let light = Expose::light(vec![state, Expose::numeric("brightness", Some(0.0), Some(254.0))]);
/// assert_eq!(light.features().map(<[Expose]>::len), Some(2));
///
/// let parsed: Expose = serde_json::from_value(json!({
///     "type": "enum",
///     "name": "effect",
///     "values": ["blink", "breathe"],
/// }))?;
/// assert_eq!(parsed.key(), Some("effect"));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expose {
    /// Kind-specific payload, tagged by `type`.
    #[serde(flatten)]
    pub kind: ExposeKind,
    /// Descriptor name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Human label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// State key, when it differs from the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    /// Human description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Endpoint name the descriptor is bound to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Access bit mask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<u8>,
}

/// Kind-specific descriptor payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExposeKind {
    /// Two-valued property.
    Binary {
        /// Value meaning "on".
        value_on: Value,
        /// Value meaning "off".
        value_off: Value,
        /// Value requesting a toggle.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value_toggle: Option<Value>,
    },
    /// Numeric property.
    Numeric {
        /// Inclusive lower bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value_min: Option<f64>,
        /// Inclusive upper bound.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value_max: Option<f64>,
        /// Step between valid values.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value_step: Option<f64>,
        /// Unit label.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
    },
    /// Free-text property.
    Text,
    /// One of a fixed set of values.
    Enum {
        /// Declared values.
        values: Vec<Value>,
    },
    /// Homogeneous list.
    List {
        /// Descriptor of each element.
        item_type: Box<Expose>,
        /// Minimum length.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        length_min: Option<u32>,
        /// Maximum length.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        length_max: Option<u32>,
    },
    /// Generic grouping of features.
    Composite {
        /// Child descriptors.
        features: Vec<Expose>,
    },
    /// Thermostat features.
    Climate {
        /// Child descriptors.
        features: Vec<Expose>,
    },
    /// Blind or shutter features.
    Cover {
        /// Child descriptors.
        features: Vec<Expose>,
    },
    /// Fan features.
    Fan {
        /// Child descriptors.
        features: Vec<Expose>,
    },
    /// Lock features.
    Lock {
        /// Child descriptors.
        features: Vec<Expose>,
    },
    /// Switch features.
    Switch {
        /// Child descriptors.
        features: Vec<Expose>,
    },
    /// Light features.
    Light {
        /// Child descriptors.
        features: Vec<Expose>,
    },
}

impl Expose {
    /// Creates an unnamed descriptor of the given kind.
    #[must_use]
    pub const fn new(kind: ExposeKind) -> Self {
        Self {
            kind,
            name: None,
            label: None,
            property: None,
            description: None,
            endpoint: None,
            access: None,
        }
    }

    /// Creates a binary descriptor.
    #[must_use]
    pub fn binary(name: &str, value_on: impl Into<Value>, value_off: impl Into<Value>) -> Self {
        Self::new(ExposeKind::Binary {
            value_on: value_on.into(),
            value_off: value_off.into(),
            value_toggle: None,
        })
        .named(name)
    }

    /// Creates a numeric descriptor.
    #[must_use]
    pub fn numeric(name: &str, value_min: Option<f64>, value_max: Option<f64>) -> Self {
        Self::new(ExposeKind::Numeric {
            value_min,
            value_max,
            value_step: None,
            unit: None,
        })
        .named(name)
    }

    /// Creates a text descriptor.
    #[must_use]
    pub fn text(name: &str) -> Self {
        Self::new(ExposeKind::Text).named(name)
    }

    /// Creates an enum descriptor.
    #[must_use]
    pub fn enumeration<I, V>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::new(ExposeKind::Enum {
            values: values.into_iter().map(Into::into).collect(),
        })
        .named(name)
    }

    /// Creates a list descriptor.
    #[must_use]
    pub fn list(
        name: &str,
        item_type: Self,
        length_min: Option<u32>,
        length_max: Option<u32>,
    ) -> Self {
        Self::new(ExposeKind::List {
            item_type: Box::new(item_type),
            length_min,
            length_max,
        })
        .named(name)
    }

    /// Creates a generic composite descriptor.
    #[must_use]
    pub fn composite(name: &str, property: &str, features: Vec<Self>) -> Self {
        Self::new(ExposeKind::Composite { features })
            .named(name)
            .with_property(property)
    }

    /// Creates a light descriptor.
    #[must_use]
    pub const fn light(features: Vec<Self>) -> Self {
        Self::new(ExposeKind::Light { features })
    }

    /// Creates a switch descriptor.
    #[must_use]
    pub const fn switch(features: Vec<Self>) -> Self {
        Self::new(ExposeKind::Switch { features })
    }

    /// Creates a climate descriptor.
    #[must_use]
    pub const fn climate(features: Vec<Self>) -> Self {
        Self::new(ExposeKind::Climate { features })
    }

    /// Creates a cover descriptor.
    #[must_use]
    pub const fn cover(features: Vec<Self>) -> Self {
        Self::new(ExposeKind::Cover { features })
    }

    /// Creates a fan descriptor.
    #[must_use]
    pub const fn fan(features: Vec<Self>) -> Self {
        Self::new(ExposeKind::Fan { features })
    }

    /// Creates a lock descriptor.
    #[must_use]
    pub const fn lock(features: Vec<Self>) -> Self {
        Self::new(ExposeKind::Lock { features })
    }

    /// Sets the descriptor name.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    /// Sets the state key.
    #[must_use]
    pub fn with_property(mut self, property: &str) -> Self {
        self.property = Some(property.to_owned());
        self
    }

    /// Sets the human label.
    #[must_use]
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_owned());
        self
    }

    /// Sets the access mask.
    #[must_use]
    pub fn with_access(mut self, access: u8) -> Self {
        self.access = Some(access);
        self
    }

    /// Binds the descriptor to a named endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_owned());
        self
    }

    /// Returns the key the descriptor's value is stored under: the property
    /// when present, else the name.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.property.as_deref().or(self.name.as_deref())
    }

    /// Returns the child descriptors of composite-shaped kinds.
    #[must_use]
    pub fn features(&self) -> Option<&[Self]> {
        match &self.kind {
            ExposeKind::Composite { features }
            | ExposeKind::Climate { features }
            | ExposeKind::Cover { features }
            | ExposeKind::Fan { features }
            | ExposeKind::Lock { features }
            | ExposeKind::Switch { features }
            | ExposeKind::Light { features } => Some(features),
            ExposeKind::Binary { .. }
            | ExposeKind::Numeric { .. }
            | ExposeKind::Text
            | ExposeKind::Enum { .. }
            | ExposeKind::List { .. } => None,
        }
    }
}
