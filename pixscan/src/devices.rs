use crate::{
    config::Config,
    profile::{Profile, Vendor},
};
use anyhow::{anyhow, bail};
use scanimage::{Backend, Device};

/// Device to pre-select: the first one whose vendor comes earliest in `priority`,
/// otherwise the first listed.
pub fn preselect<'d>(devices: &'d [Device], priority: &[String]) -> Option<&'d Device> {
    priority
        .iter()
        .find_map(|vendor| {
            devices
                .iter()
                .find(|device| device.vendor.eq_ignore_ascii_case(vendor))
        })
        .or_else(|| devices.first())
}

/// Device and profile a scan runs with.
#[derive(Debug)]
pub struct Target {
    /// `None` in single-device mode, where `scanimage` uses its default device.
    pub device: Option<String>,
    pub profile: &'static Profile,
}

/// Resolve the scan target from the command line.
///
/// With a forced profile and no device, no enumeration happens and `scanimage`
/// picks the device. Otherwise devices are enumerated, and an empty list is an error.
pub fn resolve_target(
    backend: &Backend,
    config: &Config,
    device_name: Option<&str>,
    vendor: Option<Vendor>,
) -> anyhow::Result<Target> {
    match (device_name, vendor) {
        (None, Some(vendor)) => {
            log::debug!("Use default device with '{vendor}' profile");
            return Ok(Target {
                device: None,
                profile: vendor.profile(),
            });
        }
        (Some(name), Some(vendor)) => {
            return Ok(Target {
                device: Some(name.to_owned()),
                profile: vendor.profile(),
            });
        }
        _ => {}
    }

    let devices = backend.list_devices();
    if devices.is_empty() {
        bail!("no scanners found");
    }

    let device = match device_name {
        Some(name) => devices
            .iter()
            .find(|device| device.name == name)
            .ok_or_else(|| anyhow!("scanner '{name}' not found"))?,
        None => preselect(&devices, &config.devices.priority)
            .ok_or_else(|| anyhow!("no scanners found"))?,
    };

    log::info!("Use scanner {device}");

    Ok(Target {
        device: Some(device.name.clone()),
        profile: config.profile_for(device),
    })
}
