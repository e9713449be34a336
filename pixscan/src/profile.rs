use crate::tables;
use image::ImageFormat;
use scanimage::Device;
use serde::Deserialize;

/// Page format that leaves the scan area to the scanner, i.e. the whole bed.
pub const MAXIMUM_AREA: &str = "Maximum Area";

/// Scanner families with a dedicated capability table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Vendor {
    Generic,
    Hp,
    Epson,
    Brother,
    Canon,
}

impl Vendor {
    /// Map an upper-cased vendor string from the device list to a scanner family.
    ///
    /// HP devices are not matched here and fall back to [`Vendor::Generic`];
    /// they reach [`Vendor::Hp`] only through a configured vendor alias.
    pub fn from_vendor_name(vendor: &str) -> Self {
        match vendor {
            "EPSON" => Self::Epson,
            "BROTHER" => Self::Brother,
            "CANON" => Self::Canon,
            _ => Self::Generic,
        }
    }

    pub fn profile(self) -> &'static Profile {
        match self {
            Self::Generic => &tables::GENERIC,
            Self::Hp => &tables::HP,
            Self::Epson => &tables::EPSON,
            Self::Brother => &tables::BROTHER,
            Self::Canon => &tables::CANON,
        }
    }
}

/// Profile for a device, chosen by its vendor string only.
pub fn select_profile(device: &Device) -> &'static Profile {
    Vendor::from_vendor_name(&device.vendor).profile()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Tiff,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => ".jpg",
            Self::Tiff => ".tiff",
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Tiff => ImageFormat::Tiff,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMode {
    /// Mode name as the backend spells it.
    pub name: &'static str,
    pub format: OutputFormat,
}

/// Physical scan area in millimeters, kept as the vendor-rounded strings passed to `scanimage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanArea {
    pub width: &'static str,
    pub height: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFormat {
    pub name: &'static str,
    /// `None` only for [`MAXIMUM_AREA`].
    pub area: Option<ScanArea>,
}

impl PageFormat {
    pub const fn maximum() -> Self {
        Self {
            name: MAXIMUM_AREA,
            area: None,
        }
    }

    pub const fn new(name: &'static str, width: &'static str, height: &'static str) -> Self {
        Self {
            name,
            area: Some(ScanArea { width, height }),
        }
    }
}

/// Pixel rectangle with top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Full-bed scan followed by a fixed crop, used instead of an on-device area
/// for one page format at one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropCorrection {
    pub page_format: &'static str,
    pub resolution: u32,
    pub rect: CropRect,
}

impl CropCorrection {
    pub fn applies_to(&self, page_format: &str, resolution: u32) -> bool {
        self.page_format == page_format && self.resolution == resolution
    }
}

#[derive(Debug)]
pub struct Profile {
    pub vendor: Vendor,
    pub color_modes: &'static [ColorMode],
    /// Supported resolutions in DPI.
    pub resolutions: &'static [u32],
    pub page_formats: &'static [PageFormat],
    /// Flags appended to every scan with this profile.
    pub extra_args: &'static [&'static str],
    pub crop_correction: Option<CropCorrection>,
    pub default_color: usize,
    pub default_resolution: usize,
    pub default_page_format: usize,
}

impl Profile {
    pub fn default_selection(&self, device: Option<String>) -> Selection {
        Selection {
            device,
            color: self.default_color,
            resolution: self.default_resolution,
            page_format: self.default_page_format,
        }
    }

    pub fn color_mode_index(&self, name: &str) -> Option<usize> {
        self.color_modes
            .iter()
            .position(|mode| mode.name.eq_ignore_ascii_case(name))
    }

    pub fn resolution_index(&self, dpi: u32) -> Option<usize> {
        self.resolutions.iter().position(|&r| r == dpi)
    }

    pub fn page_format_index(&self, name: &str) -> Option<usize> {
        self.page_formats
            .iter()
            .position(|format| format.name.eq_ignore_ascii_case(name))
    }
}

/// User choices for one scan. Indices point into the tables of the profile
/// the selection was made for; an out-of-range index panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// `None` lets `scanimage` pick its default device.
    pub device: Option<String>,
    pub color: usize,
    pub resolution: usize,
    pub page_format: usize,
}

impl Selection {
    pub fn color_mode<'p>(&self, profile: &'p Profile) -> &'p ColorMode {
        &profile.color_modes[self.color]
    }

    pub fn resolution(&self, profile: &Profile) -> u32 {
        profile.resolutions[self.resolution]
    }

    pub fn page_format<'p>(&self, profile: &'p Profile) -> &'p PageFormat {
        &profile.page_formats[self.page_format]
    }

    pub fn scan_area(&self, profile: &Profile) -> Option<ScanArea> {
        self.page_format(profile).area
    }

    pub fn output_format(&self, profile: &Profile) -> OutputFormat {
        self.color_mode(profile).format
    }

    pub fn extension(&self, profile: &Profile) -> &'static str {
        self.output_format(profile).extension()
    }
}
