use crate::profile::{select_profile, Profile, Vendor};
use anyhow::Context;
use scanimage::{Backend, Device, DEFAULT_PROGRAM};
use serde::Deserialize;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scanimage: Scanimage,

    pub devices: Devices,

    /// Extra vendor strings mapped to a profile, checked before the built-in mapping.
    pub vendors: HashMap<String, Vendor>,

    pub output: Output,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Scanimage {
    pub program: PathBuf,

    /// Without a value scans wait for `scanimage` indefinitely.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Devices {
    /// Vendors in the order their devices are preferred when several are attached.
    pub priority: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Output {
    pub directory: PathBuf,
}

impl Default for Scanimage {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            timeout_secs: None,
        }
    }
}

impl Default for Devices {
    fn default() -> Self {
        Self {
            priority: ["HP", "EPSON", "BROTHER", "CANON"]
                .map(str::to_owned)
                .to_vec(),
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn read_from<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let dpath = path.display();

        let raw = fs::read_to_string(path).with_context(|| format!("reading file '{dpath}'"))?;
        let config = toml::from_str(&raw).with_context(|| format!("parsing file '{dpath}'"))?;

        Ok(config)
    }

    pub fn backend(&self) -> Backend {
        let timeout = self
            .scanimage
            .timeout_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs);

        Backend::new(&self.scanimage.program).with_timeout(timeout)
    }

    /// Profile for a device, honoring configured vendor aliases.
    pub fn profile_for(&self, device: &Device) -> &'static Profile {
        let alias = self
            .vendors
            .iter()
            .find(|(vendor, _)| vendor.to_uppercase() == device.vendor);

        match alias {
            Some((vendor, profile)) => {
                log::debug!("Vendor '{vendor}' is aliased to profile '{profile}'");
                profile.profile()
            }
            None => select_profile(device),
        }
    }
}
