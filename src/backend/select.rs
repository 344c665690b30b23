/// Names reported by one platform and its accelerator devices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInfo {
    pub name: String,
    pub devices: Vec<String>,
}

impl PlatformInfo {
    pub fn new(name: &str, devices: &[&str]) -> Self {
        PlatformInfo {
            name: name.into(),
            devices: devices.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// Pick `(platform, device)` indices
///
/// The first platform whose name contains `platform_marker` and which has at
/// least one device wins. Within it a device whose name contains any of
/// `device_markers` is preferred, else the first device.
pub fn select_device(
    platforms: &[PlatformInfo],
    platform_marker: &str,
    device_markers: &[String],
) -> Option<(usize, usize)> {
    let (p, platform) = platforms
        .iter()
        .enumerate()
        .find(|(_, p)| p.name.contains(platform_marker) && !p.devices.is_empty())?;
    let d = platform
        .devices
        .iter()
        .position(|name| device_markers.iter().any(|m| name.contains(m.as_str())))
        .unwrap_or(0);
    Some((p, d))
}
