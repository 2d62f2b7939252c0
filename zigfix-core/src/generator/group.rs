//! Group generation.

use super::{Session, endpoint::scenes};
use crate::{
    error::{GenerateError, Result},
    model::{Device, Group, GroupMember},
    rng::RandomStream,
    words,
};

const GROUP_ID_MAX: u16 = 0xFFFE;
const DEFAULT_GROUP_NAME: &str = "default_bind_group";

/// Generates one group, drawing members from `candidates` in order.
pub(super) fn group(
    stream: &mut RandomStream,
    session: &mut Session,
    candidates: &[Device],
) -> Result<Group> {
    if session.group_ids.len() >= usize::from(GROUP_ID_MAX) {
        return Err(GenerateError::EmptyInput { what: "group id" });
    }
    let id = loop {
        let candidate = stream.int_as(1_u16, GROUP_ID_MAX);
        if session.group_ids.insert(candidate) {
            break candidate;
        }
    };

    let friendly_name = if stream.bool(0.05) {
        DEFAULT_GROUP_NAME.to_owned()
    } else {
        let word = words::word(stream)?;
        let number = stream.int(0, 9999);
        format!("{word}_group_{number}")
    };
    let description = if stream.bool(0.5) {
        Some(words::sentence(stream)?)
    } else {
        None
    };
    let scene_count = stream.int(0, 4);
    let scenes = scenes(stream, session, scene_count)?;

    let mut members = Vec::new();
    for device in candidates {
        if !stream.bool(0.3) {
            continue;
        }
        let ids = device.endpoint_ids();
        if ids.is_empty() {
            continue;
        }
        let endpoint = *stream.pick("member endpoint", &ids)?;
        members.push(GroupMember {
            ieee_address: device.ieee_address.clone(),
            endpoint,
        });
    }

    Ok(Group {
        id,
        friendly_name,
        description,
        members,
        scenes,
    })
}
