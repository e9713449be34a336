use crate::{
    arguments::build_arguments,
    filename::next_available_filename,
    profile::{CropRect, OutputFormat, Profile, Selection},
};
use anyhow::{anyhow, Context};
use scanimage::Backend;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Scan with `selection` and save the image into `directory`.
///
/// The file is named `<name><extension>`; without a name the next free
/// `ScanNNN` is taken. Returns the path of the written file.
pub fn scan_to_file(
    backend: &Backend,
    profile: &Profile,
    selection: &Selection,
    directory: &Path,
    name: Option<&str>,
) -> anyhow::Result<PathBuf> {
    let format = selection.output_format(profile);
    let extension = format.extension();

    let request = build_arguments(profile, selection);

    log::info!("Scan started");
    log::debug!("Run {} {:?}", backend.program().display(), request.args);
    if request.crop_needed() {
        log::debug!("Image will be cropped to {:?}", request.crop);
    }

    let bytes = match backend.scan(&request.args) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::error!("Scanning failed: {err}");
            return Err(anyhow!("scanning failed"));
        }
    };

    let name = match name {
        Some(name) => name.to_owned(),
        None => next_available_filename(directory, extension),
    };
    let path = directory.join(format!("{name}{extension}"));

    save_image(bytes, format, request.crop, &path)?;

    log::info!("Scan completed successfully: {}", path.display());

    Ok(path)
}

/// Write scanned bytes to `path`, cropping them first if `crop` is set.
pub fn save_image(
    bytes: Vec<u8>,
    format: OutputFormat,
    crop: Option<CropRect>,
    path: &Path,
) -> anyhow::Result<()> {
    let dpath = path.display();

    let Some(rect) = crop else {
        fs::write(path, bytes).with_context(|| format!("writing file '{dpath}'"))?;
        return Ok(());
    };

    let decoded = image::load_from_memory_with_format(&bytes, format.image_format())
        .context("decoding scanned image")?;

    log::debug!(
        "Crop {}x{} image to {rect:?}",
        decoded.width(),
        decoded.height()
    );

    decoded
        .crop_imm(rect.x, rect.y, rect.width, rect.height)
        .save_with_format(path, format.image_format())
        .with_context(|| format!("saving cropped image to '{dpath}'"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Vendor;
    use image::{DynamicImage, GenericImageView, ImageFormat, RgbImage};
    use std::io::Cursor;

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
            .unwrap();
        bytes
    }

    #[test]
    fn writes_raw_bytes_without_crop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Scan001.jpg");

        save_image(b"not decoded".to_vec(), OutputFormat::Jpeg, None, &path).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"not decoded");
    }

    #[test]
    fn crops_decoded_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Scan001.jpg");
        let rect = CropRect {
            x: 8,
            y: 4,
            width: 32,
            height: 16,
        };

        save_image(jpeg_bytes(64, 48), OutputFormat::Jpeg, Some(rect), &path).unwrap();

        let saved = image::open(&path).unwrap();
        assert_eq!(saved.dimensions(), (32, 16));
    }

    #[test]
    fn crop_of_undecodable_data_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Scan001.jpg");
        let rect = CropRect {
            x: 0,
            y: 0,
            width: 1,
            height: 1,
        };

        assert!(save_image(b"garbage".to_vec(), OutputFormat::Jpeg, Some(rect), &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn scan_saves_output_under_next_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Scan001.jpg"), b"").unwrap();

        // `echo` stands in for scanimage and prints the arguments as the "image".
        let backend = Backend::new("echo");
        let profile = Vendor::Generic.profile();
        let selection = profile.default_selection(None);

        let path = scan_to_file(&backend, profile, &selection, dir.path(), None).unwrap();

        assert_eq!(path, dir.path().join("Scan002.jpg"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "--mode=Color --resolution=300 --format=jpeg\n"
        );
    }

    #[test]
    fn scan_uses_given_name_and_mode_extension() {
        let dir = tempfile::tempdir().unwrap();

        let backend = Backend::new("echo");
        let profile = Vendor::Canon.profile();
        let mut selection = profile.default_selection(Some("pixma:04A91912".to_owned()));
        selection.color = profile.color_mode_index("Lineart").unwrap();

        let path =
            scan_to_file(&backend, profile, &selection, dir.path(), Some("receipt")).unwrap();

        assert_eq!(path, dir.path().join("receipt.tiff"));
        assert!(fs::read_to_string(&path)
            .unwrap()
            .starts_with("--device-name=pixma:04A91912 --mode=Lineart"));
    }

    #[test]
    fn failed_scan_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();

        let backend = Backend::new("false");
        let profile = Vendor::Epson.profile();
        let selection = profile.default_selection(None);

        let err = scan_to_file(&backend, profile, &selection, dir.path(), None).unwrap_err();

        assert_eq!(err.to_string(), "scanning failed");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
