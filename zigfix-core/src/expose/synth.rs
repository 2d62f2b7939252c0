//! Value synthesis for capability descriptors.

use serde_json::{Map, Value};

use super::{Expose, ExposeKind, walk};
use crate::{error::Result, rng::RandomStream, words};

const LINK_QUALITY_KEY: &str = "linkquality";
const GRADIENT_KEY: &str = "gradient";
const DEFAULT_LIST_MAX: i64 = 10;

/// Synthesizes one value for `expose`.
///
/// Returns `Ok(None)` for composite-shaped descriptors, whose children carry
/// their own keyed values.
///
/// # Errors
/// Returns [`crate::GenerateError::EmptyInput`] when an enum declares no
/// values.
///
/// # Examples
/// ```
/// use zigfix_core::{Expose, RandomStream, synthesize};
///
/// let mut stream = RandomStream::new(1);
/// let quality = synthesize(&mut stream, &Expose::numeric("linkquality", None, None))?
///     .and_then(|value| value.as_i64());
/// assert!(matches!(quality, Some(30..=255)));
/// assert_eq!(synthesize(&mut stream, &Expose::light(Vec::new()))?, None);
/// # Ok::<(), zigfix_core::GenerateError>(())
/// ```
pub fn synthesize(stream: &mut RandomStream, expose: &Expose) -> Result<Option<Value>> {
    let value = match &expose.kind {
        ExposeKind::Binary {
            value_on,
            value_off,
            ..
        } => {
            let choices = [value_on, value_off];
            Value::clone(stream.pick("binary value", &choices)?)
        }
        ExposeKind::Numeric {
            value_min,
            value_max,
            ..
        } => Value::from(numeric(stream, expose.key(), *value_min, *value_max)),
        ExposeKind::Text => Value::String(words::sentence(stream)?),
        ExposeKind::Enum { values } => stream.pick("enum value", values)?.clone(),
        ExposeKind::List {
            item_type,
            length_min,
            length_max,
        } => {
            let len = stream.int(
                length_min.map_or(0, i64::from),
                length_max.map_or(DEFAULT_LIST_MAX, i64::from),
            );
            let gradient = expose.key() == Some(GRADIENT_KEY);
            let mut items = Vec::new();
            for _ in 0..len {
                items.push(if gradient {
                    Value::String(format!("#{}", stream.hex(6)))
                } else {
                    list_item(stream, item_type)?
                });
            }
            Value::Array(items)
        }
        ExposeKind::Composite { .. }
        | ExposeKind::Climate { .. }
        | ExposeKind::Cover { .. }
        | ExposeKind::Fan { .. }
        | ExposeKind::Lock { .. }
        | ExposeKind::Switch { .. }
        | ExposeKind::Light { .. } => return Ok(None),
    };
    Ok(Some(value))
}

/// Builds a flat state object for a descriptor tree.
///
/// Walks `exposes` skipping composite roots and stores each synthesized value
/// under the descriptor's key. Descriptors without a key draw nothing.
///
/// # Errors
/// Propagates any error from [`synthesize`].
pub fn synthesize_state(stream: &mut RandomStream, exposes: &[Expose]) -> Result<Map<String, Value>> {
    let mut nodes = Vec::new();
    walk(exposes, true, &mut |node| nodes.push(node));

    let mut state = Map::new();
    for node in nodes {
        let Some(key) = node.key() else {
            continue;
        };
        if let Some(value) = synthesize(stream, node)? {
            state.insert(key.to_owned(), value);
        }
    }
    Ok(state)
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "descriptor bounds are whole numbers well inside the i64 range"
)]
fn numeric(
    stream: &mut RandomStream,
    key: Option<&str>,
    value_min: Option<f64>,
    value_max: Option<f64>,
) -> i64 {
    if key == Some(LINK_QUALITY_KEY) {
        return stream.int(30, 255);
    }
    let min = value_min.map_or(0, |min| min.ceil() as i64);
    let max = match value_max {
        Some(max) => max.floor() as i64,
        None => {
            if stream.bool(0.75) {
                255
            } else {
                1000
            }
        }
    };
    stream.int(min, max)
}

fn list_item(stream: &mut RandomStream, item: &Expose) -> Result<Value> {
    if let Some(features) = item.features() {
        return synthesize_state(stream, features).map(Value::Object);
    }
    Ok(synthesize(stream, item)?.unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerateError;
    use rstest::rstest;
    use serde_json::json;

    fn stream() -> RandomStream {
        RandomStream::new(17)
    }

    #[test]
    fn binary_picks_declared_value() {
        let mut stream = stream();
        let expose = Expose::binary("state", "ON", "OFF");
        for _ in 0..20 {
            let value = synthesize(&mut stream, &expose).expect("binary").expect("leaf");
            assert!(value == json!("ON") || value == json!("OFF"));
        }
    }

    #[rstest]
    #[case::bounded(Expose::numeric("brightness", Some(0.0), Some(254.0)), 0, 254)]
    #[case::fractional(Expose::numeric("temp", Some(4.5), Some(30.5)), 5, 30)]
    #[case::link_quality(Expose::numeric("linkquality", Some(0.0), Some(10.0)), 30, 255)]
    #[case::unbounded(Expose::numeric("power", None, None), 0, 1000)]
    fn numeric_respects_bounds(#[case] expose: Expose, #[case] min: i64, #[case] max: i64) {
        let mut stream = stream();
        for _ in 0..200 {
            let value = synthesize(&mut stream, &expose)
                .expect("numeric")
                .and_then(|value| value.as_i64())
                .expect("integer");
            assert!((min..=max).contains(&value), "{value} outside [{min}, {max}]");
        }
    }

    #[test]
    fn property_named_link_quality_uses_link_range() {
        let mut stream = stream();
        let expose = Expose::numeric("quality", Some(0.0), Some(1.0)).with_property("linkquality");
        let value = synthesize(&mut stream, &expose)
            .expect("numeric")
            .and_then(|value| value.as_i64())
            .expect("integer");
        assert!((30..=255).contains(&value));
    }

    #[test]
    fn enum_picks_from_declared_values() {
        let mut stream = stream();
        let expose = Expose::enumeration("mode", ["auto", "heat", "off"]);
        let value = synthesize(&mut stream, &expose).expect("enum").expect("leaf");
        assert!(["auto", "heat", "off"].contains(&value.as_str().expect("string")));
    }

    #[test]
    fn empty_enum_is_an_error() {
        let mut stream = stream();
        let expose = Expose::enumeration("mode", Vec::<String>::new());
        let err = synthesize(&mut stream, &expose).expect_err("no values");
        assert_eq!(err, GenerateError::EmptyInput { what: "enum value" });
    }

    #[test]
    fn gradient_lists_hold_colours() {
        let mut stream = stream();
        let expose = Expose::list("gradient", Expose::text("colour"), Some(1), Some(9));
        let value = synthesize(&mut stream, &expose).expect("list").expect("leaf");
        let items = value.as_array().expect("array");
        assert!((1..=9).contains(&items.len()));
        for item in items {
            let colour = item.as_str().expect("string");
            assert_eq!(colour.len(), 7);
            assert!(colour.starts_with('#'));
        }
    }

    #[test]
    fn list_items_recurse_into_item_type() {
        let mut stream = stream();
        let expose = Expose::list(
            "levels",
            Expose::numeric("level", Some(1.0), Some(3.0)),
            Some(2),
            Some(2),
        );
        let value = synthesize(&mut stream, &expose).expect("list").expect("leaf");
        let items = value.as_array().expect("array");
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| matches!(item.as_i64(), Some(1..=3))));
    }

    #[test]
    fn composite_list_items_become_objects() {
        let mut stream = stream();
        let item = Expose::composite(
            "transition",
            "transition",
            vec![
                Expose::numeric("hour", Some(0.0), Some(23.0)),
                Expose::numeric("heating_setpoint", Some(5.0), Some(30.0)),
            ],
        );
        let expose = Expose::list("schedule", item, Some(3), Some(3));
        let value = synthesize(&mut stream, &expose).expect("list").expect("leaf");
        let items = value.as_array().expect("array");
        assert_eq!(items.len(), 3);
        for entry in items {
            let object = entry.as_object().expect("object item");
            assert!(object.contains_key("hour"));
            assert!(object.contains_key("heating_setpoint"));
        }
    }

    #[test]
    fn state_is_keyed_by_property_then_name() {
        let mut stream = stream();
        let exposes = vec![
            Expose::light(vec![
                Expose::binary("state", "ON", "OFF").with_property("state_l1"),
                Expose::numeric("brightness", Some(0.0), Some(254.0)),
            ]),
            Expose::numeric("linkquality", None, None),
            Expose::text("note"),
        ];
        let state = synthesize_state(&mut stream, &exposes).expect("state");
        let keys: Vec<&str> = state.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 4);
        for key in ["state_l1", "brightness", "linkquality", "note"] {
            assert!(state.contains_key(key), "missing {key}");
        }
    }

    #[test]
    fn state_is_deterministic() {
        let exposes = vec![
            Expose::climate(vec![
                Expose::numeric("local_temperature", Some(-10.0), Some(40.0)),
                Expose::enumeration("system_mode", ["off", "heat"]),
            ]),
            Expose::text("label"),
        ];
        let left = synthesize_state(&mut RandomStream::new(3), &exposes).expect("state");
        let right = synthesize_state(&mut RandomStream::new(3), &exposes).expect("state");
        assert_eq!(left, right);
    }
}
