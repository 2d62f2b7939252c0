//! Device and coordinator generation.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::{
    DeviceOptions, Session,
    endpoint::{BASIC_CLUSTER, GREEN_POWER_CLUSTER, endpoint},
};
use crate::{
    catalog::{Catalog, Definition, StubDevice},
    error::{GenerateError, Result},
    model::{DefinitionSummary, Device, DeviceType, Endpoint, InterviewState},
    rng::RandomStream,
    words,
};

const POWER_SOURCES: &[&str] = &["Unknown", "Mains (single phase)", "Battery", "DC Source"];
const NETWORK_ADDRESS_MAX: u16 = 0xFFF7;
const LAST_SEEN_WINDOW_MS: i64 = 86_400_000;
const COORDINATOR_ENDPOINT: u8 = 1;
const GREEN_POWER_ENDPOINT: u8 = 242;
const ENDPOINT_RANGE: std::ops::RangeInclusive<u32> = 1..=254;

fn software_build_id(stream: &mut RandomStream) -> String {
    let major = stream.int(0, 9);
    let minor = stream.int(0, 20);
    let patch = stream.int(0, 99);
    format!("{major}.{minor}.{patch}")
}

fn date_code(stream: &mut RandomStream) -> String {
    let year = stream.int(2015, 2025);
    let month = stream.int(1, 12);
    let day = stream.int(1, 28);
    format!("{year:04}{month:02}{day:02}")
}

fn address(stream: &mut RandomStream) -> String {
    format!("0x{}", stream.hex(16))
}

fn network_address(stream: &mut RandomStream, session: &mut Session) -> Result<u16> {
    if session.network_addresses.len() >= usize::from(NETWORK_ADDRESS_MAX) {
        return Err(GenerateError::EmptyInput {
            what: "network address",
        });
    }
    loop {
        let candidate = stream.int_as(1_u16, NETWORK_ADDRESS_MAX);
        if session.network_addresses.insert(candidate) {
            return Ok(candidate);
        }
        debug!(candidate, "network address already used; redrawing");
    }
}

/// Generates the coordinator with its base and green-power endpoints.
pub(super) fn coordinator(stream: &mut RandomStream, session: &mut Session) -> Result<Device> {
    let ieee_address = address(stream);
    let software_build_id = software_build_id(stream);
    let date_code = date_code(stream);
    let mut endpoints = BTreeMap::new();
    endpoints.insert(
        COORDINATOR_ENDPOINT,
        endpoint(stream, session, BASIC_CLUSTER, None)?,
    );
    endpoints.insert(
        GREEN_POWER_ENDPOINT,
        endpoint(stream, session, GREEN_POWER_CLUSTER, None)?,
    );
    Ok(Device {
        ieee_address,
        device_type: DeviceType::Coordinator,
        network_address: 0,
        supported: true,
        friendly_name: "Coordinator".to_owned(),
        disabled: false,
        description: None,
        definition: None,
        power_source: Some("Mains (single phase)".to_owned()),
        software_build_id: Some(software_build_id),
        date_code: Some(date_code),
        model_id: None,
        manufacturer: None,
        interviewing: false,
        interview_completed: true,
        interview_state: InterviewState::Successful,
        last_seen: None,
        endpoints,
    })
}

fn choose_definition<'c>(
    stream: &mut RandomStream,
    catalog: &'c dyn Catalog,
    device_type: DeviceType,
    options: &DeviceOptions,
) -> Result<(&'c Definition, DefinitionSummary)> {
    let definition = match options.model.as_deref() {
        Some(model) => catalog
            .find_by_model(model)
            .ok_or_else(|| GenerateError::DefinitionNotFound {
                model: model.to_owned(),
                catalog: catalog.name().to_owned(),
            })?,
        None => {
            let candidates: Vec<&Definition> = if device_type == DeviceType::GreenPower {
                catalog.green_power_definitions()
            } else {
                catalog.definitions().iter().collect()
            };
            *stream.pick("definition", &candidates)?
        }
    };

    let label = options
        .model
        .as_deref()
        .and_then(|model| definition.white_label_for(model));
    let exposes = definition.exposes.resolve(&StubDevice::dummy());
    let summary = match label {
        Some(label) => DefinitionSummary {
            model: label.model.clone(),
            vendor: label.vendor.clone(),
            description: label
                .description
                .clone()
                .unwrap_or_else(|| definition.description.clone()),
            supports_ota: definition.supports_ota,
            exposes,
            options: definition.options.clone(),
            source: "white_label",
        },
        None => DefinitionSummary {
            model: definition.model.clone(),
            vendor: definition.vendor.clone(),
            description: definition.description.clone(),
            supports_ota: definition.supports_ota,
            exposes,
            options: definition.options.clone(),
            source: "native",
        },
    };
    Ok((definition, summary))
}

/// Resolves catalog-declared endpoints, dropping ids outside `1..=254`.
fn declared_endpoints(definition: &Definition) -> Option<BTreeMap<u8, String>> {
    let hook = definition.endpoint.as_ref()?;
    let mut resolved = BTreeMap::new();
    for (name, id) in hook(&StubDevice::dummy()) {
        let valid = ENDPOINT_RANGE
            .contains(&id)
            .then(|| u8::try_from(id).ok())
            .flatten();
        match valid {
            Some(id) => {
                resolved.insert(id, name);
            }
            None => warn!(
                model = %definition.model,
                endpoint = %name,
                id,
                "ignoring endpoint id outside 1..=254"
            ),
        }
    }
    Some(resolved)
}

/// Generates one non-coordinator device.
pub(super) fn device(
    stream: &mut RandomStream,
    session: &mut Session,
    catalog: &dyn Catalog,
    epoch_ms: u64,
    options: &DeviceOptions,
) -> Result<Device> {
    let device_type = match options.device_type {
        Some(forced) => forced,
        None => *stream.pick("device type", &DeviceType::GENERATED)?,
    };
    let (definition, summary) = choose_definition(stream, catalog, device_type, options)?;
    let power_source = (*stream.pick("power source", POWER_SOURCES)?).to_owned();
    let ieee_address = address(stream);
    let network_address = network_address(stream, session)?;
    let friendly_name = words::friendly_name(stream)?;
    let interview_state = if stream.bool(0.9) {
        InterviewState::Successful
    } else {
        *stream.pick("interview state", &InterviewState::ALL)?
    };
    let disabled = stream.bool(0.05);
    let description = if stream.bool(0.25) {
        Some(words::sentence(stream)?)
    } else {
        None
    };
    let software_build_id = software_build_id(stream);
    let date_code = date_code(stream);
    let seen_ago = u64::try_from(stream.int(0, LAST_SEEN_WINDOW_MS)).unwrap_or_default();
    let last_seen = epoch_ms.saturating_sub(seen_ago);

    let endpoint_ids = match declared_endpoints(definition) {
        Some(declared) => declared,
        None if stream.bool(0.95) => BTreeMap::from([(1, String::new())]),
        None => BTreeMap::new(),
    };
    let mut endpoints: BTreeMap<u8, Endpoint> = BTreeMap::new();
    for (id, name) in endpoint_ids {
        let name = (!name.is_empty()).then_some(name);
        endpoints.insert(id, endpoint(stream, session, BASIC_CLUSTER, name)?);
    }

    let fingerprint = definition.fingerprint.first();
    let model_id = fingerprint
        .and_then(|print| print.model_id.clone())
        .unwrap_or_else(|| definition.model.clone());
    let manufacturer = fingerprint
        .and_then(|print| print.manufacturer_name.clone())
        .unwrap_or_else(|| definition.vendor.clone());

    Ok(Device {
        ieee_address,
        device_type,
        network_address,
        supported: true,
        friendly_name,
        disabled,
        description,
        definition: Some(summary),
        power_source: Some(power_source),
        software_build_id: Some(software_build_id),
        date_code: Some(date_code),
        model_id: Some(model_id),
        manufacturer: Some(manufacturer),
        interviewing: interview_state == InterviewState::InProgress,
        interview_completed: interview_state == InterviewState::Successful,
        interview_state,
        last_seen: Some(last_seen),
        endpoints,
    })
}
