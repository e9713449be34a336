use crate::profile::{CropRect, Profile, Selection};

/// Everything needed to run and post-process one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    /// Arguments for `scanimage`.
    pub args: Vec<String>,
    /// Rectangle to cut from the scanned image, if the scan covers the whole bed.
    pub crop: Option<CropRect>,
}

impl ScanRequest {
    pub fn crop_needed(&self) -> bool {
        self.crop.is_some()
    }
}

pub fn build_arguments(profile: &Profile, selection: &Selection) -> ScanRequest {
    let color_mode = selection.color_mode(profile);
    let resolution = selection.resolution(profile);
    let page_format = selection.page_format(profile);

    let mut args = Vec::with_capacity(6 + profile.extra_args.len());

    if let Some(device) = &selection.device {
        args.push(format!("--device-name={device}"));
    }

    args.push(format!("--mode={}", color_mode.name));
    args.push(format!("--resolution={resolution}"));
    args.push(format!("--format={}", color_mode.format));

    args.extend(profile.extra_args.iter().map(|&arg| arg.to_owned()));

    if let Some(correction) = profile.crop_correction {
        if correction.applies_to(page_format.name, resolution) {
            log::debug!(
                "Scan full bed for '{}' at {resolution} DPI and crop to {:?}",
                page_format.name,
                correction.rect
            );

            return ScanRequest {
                args,
                crop: Some(correction.rect),
            };
        }
    }

    if let Some(area) = selection.scan_area(profile) {
        args.push(format!("-x{}", area.width));
        args.push(format!("-y{}", area.height));
    }

    ScanRequest { args, crop: None }
}
