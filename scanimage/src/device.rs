use bstr::ByteSlice;

/// Separator between fields in the formatted device list.
pub(crate) const FIELD_SEPARATOR: &str = "=>";

/// Format passed to `--formatted-device-list`.
pub(crate) const DEVICE_LIST_FORMAT: &str = "%d=>%v=>%m%n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub name: String,
    /// Upper-cased vendor string, e.g. `EPSON`.
    pub vendor: String,
    pub model: String,
}

impl Device {
    /// Parses one `device=>vendor=>model` line. A line with any other shape is rejected whole.
    pub fn parse_line(line: &[u8]) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let fields: Vec<&[u8]> = line.split_str(FIELD_SEPARATOR).collect();
        let [name, vendor, model] = fields.as_slice() else {
            log::debug!("Skip malformed device line '{}'", line.as_bstr());
            return None;
        };

        let name = name.trim();
        if name.is_empty() {
            log::debug!("Skip device line without name '{}'", line.as_bstr());
            return None;
        }

        Some(Self {
            name: name.to_str_lossy().into_owned(),
            vendor: vendor.trim().to_str_lossy().to_uppercase(),
            model: model.trim().to_str_lossy().into_owned(),
        })
    }

    pub(crate) fn parse_list(output: &[u8]) -> Vec<Self> {
        output.lines().filter_map(Self::parse_line).collect()
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{name}' (vendor '{vendor}', model '{model}')",
            name = self.name,
            vendor = self.vendor,
            model = self.model,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_formatted_line() {
        let device = Device::parse_line(b"epson2:libusb:001:004=>Epson=>Perfection V39").unwrap();

        assert_eq!(device.name, "epson2:libusb:001:004");
        assert_eq!(device.vendor, "EPSON");
        assert_eq!(device.model, "Perfection V39");
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!(Device::parse_line(b""), None);
        assert_eq!(Device::parse_line(b"device `test:0' is a Noname frontend-tester"), None);
        assert_eq!(Device::parse_line(b"a=>b"), None);
        assert_eq!(Device::parse_line(b"a=>b=>c=>d"), None);
        assert_eq!(Device::parse_line(b"=>HP=>Deskjet"), None);
    }

    #[test]
    fn parses_multi_device_listing() {
        let output = b"hpaio:/usb/Deskjet_2130?serial=CN1=>HP=>Deskjet 2130\n\
                       garbage line\n\
                       brother4:bus2;dev3=>Brother=>DCP-L2510D\n";

        let devices = Device::parse_list(output);

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].vendor, "HP");
        assert_eq!(devices[1].name, "brother4:bus2;dev3");
        assert_eq!(devices[1].vendor, "BROTHER");
    }
}
