//! Relationship codes for adjacent device types.

use crate::{
    error::{GenerateError, Result},
    model::{DeviceType, Relationship},
    rng::RandomStream,
};

/// Lower ranks act as the authority of a pair.
const fn rank(device_type: DeviceType) -> Option<u8> {
    match device_type {
        DeviceType::Coordinator => Some(0),
        DeviceType::Router => Some(1),
        DeviceType::EndDevice => Some(2),
        DeviceType::Unknown => Some(3),
        DeviceType::GreenPower => None,
    }
}

/// Resolves how `target` relates to `source` on a link `source -> target`.
///
/// Router pairings with a coordinator or another router draw from the stream;
/// every other pairing is fixed. `Unknown` nodes behave like end devices,
/// except that an end device is the parent of an `Unknown` node.
///
/// # Errors
/// Returns [`GenerateError::InvalidRelationship`] for coordinator pairs, end
/// device pairs and any pairing with a green-power device.
///
/// # Examples
/// ```
/// use zigfix_core::{DeviceType, RandomStream, Relationship, resolve_relationship};
///
/// let mut stream = RandomStream::new(1);
/// let down = resolve_relationship(&mut stream, DeviceType::Coordinator, DeviceType::EndDevice)?;
/// let up = resolve_relationship(&mut stream, DeviceType::EndDevice, DeviceType::Coordinator)?;
/// assert_eq!((down, up), (Relationship::Child, Relationship::Parent));
/// # Ok::<(), zigfix_core::GenerateError>(())
/// ```
pub fn resolve_relationship(
    stream: &mut RandomStream,
    source: DeviceType,
    target: DeviceType,
) -> Result<Relationship> {
    let invalid = GenerateError::InvalidRelationship {
        left: source,
        right: target,
    };
    let (Some(source_rank), Some(target_rank)) = (rank(source), rank(target)) else {
        return Err(invalid);
    };
    let swapped = target_rank < source_rank;
    let (authority, other) = if swapped {
        (target, source)
    } else {
        (source, target)
    };

    let downward = match (authority, other) {
        (DeviceType::Coordinator, DeviceType::Router) => {
            if stream.bool(0.75) {
                Relationship::Sibling
            } else {
                *stream.pick(
                    "relationship",
                    &[Relationship::Child, Relationship::Sibling],
                )?
            }
        }
        (DeviceType::Router, DeviceType::Router) => {
            if stream.bool(0.75) {
                Relationship::Sibling
            } else {
                *stream.pick(
                    "relationship",
                    &[Relationship::Parent, Relationship::Sibling],
                )?
            }
        }
        (
            DeviceType::Coordinator | DeviceType::Router,
            DeviceType::EndDevice | DeviceType::Unknown,
        )
        | (DeviceType::EndDevice, DeviceType::Unknown) => Relationship::Child,
        (DeviceType::Unknown, DeviceType::Unknown) => Relationship::NoneOfTheAbove,
        _ => return Err(invalid),
    };
    Ok(if swapped { downward.inverse() } else { downward })
}
