use dirs::home_dir;
use failure::err_msg;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::*;

use crate::error::*;

/// Launch settings, read from TOML like
///
/// ```text
/// seed = 42
/// low = -1000
/// high = 1000
/// platform_marker = "Xilinx"
/// device_markers = ["Zynq", "xilinx"]
/// ```
///
/// Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    pub seed: u64,
    pub low: i32,
    pub high: i32,
    pub default_size: i64,
    pub platform_marker: String,
    pub device_markers: Vec<String>,
    pub kernel_name: String,
    pub max_reported_mismatches: usize,
    pub sample_len: usize,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        LaunchConfig {
            seed: 42,
            low: -1000,
            high: 1000,
            default_size: 1024,
            platform_marker: "Xilinx".to_string(),
            device_markers: vec!["Zynq".to_string(), "xilinx".to_string()],
            kernel_name: "adder".to_string(),
            max_reported_mismatches: 10,
            sample_len: 5,
        }
    }
}

impl LaunchConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = expand_home(path);
        let text = fs::read_to_string(&path)
            .log(Step::Config, &format!("Cannot read {}", path.display()))?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let cfg: LaunchConfig = toml::from_str(text).log(Step::Config, "Invalid TOML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn as_toml(&self) -> Result<String> {
        toml::to_string(self).log(Step::Config, "Cannot serialize configuration")
    }

    fn validate(&self) -> Result<()> {
        if self.low > self.high {
            return Err(LaunchError::ConfigError {
                comment: format!("low ({}) must not exceed high ({})", self.low, self.high),
                error: err_msg("empty value range"),
            });
        }
        Ok(())
    }
}

/// Replace a leading `~` with the home directory
pub fn expand_home<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if path.starts_with("~") {
        if let (Some(home), Ok(rest)) = (home_dir(), path.strip_prefix("~")) {
            return home.join(rest);
        }
    }
    path.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = LaunchConfig::default();
        assert_eq!(cfg.seed, 42);
        assert_eq!((cfg.low, cfg.high), (-1000, 1000));
        assert_eq!(cfg.default_size, 1024);
        assert_eq!(cfg.kernel_name, "adder");
        assert_eq!(cfg.max_reported_mismatches, 10);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = LaunchConfig::from_toml("seed = 7\nplatform_marker = \"Intel\"\n").unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.platform_marker, "Intel");
        assert_eq!(cfg.device_markers, LaunchConfig::default().device_markers);
    }

    #[test]
    fn toml_roundtrip() {
        let cfg = LaunchConfig::default();
        let text = cfg.as_toml().unwrap();
        assert_eq!(LaunchConfig::from_toml(&text).unwrap(), cfg);
    }

    #[test]
    fn reject_empty_range() {
        let err = LaunchConfig::from_toml("low = 5\nhigh = -5\n").unwrap_err();
        assert_eq!(err.step(), Step::Config);
    }

    #[test]
    fn reject_bad_toml() {
        let err = LaunchConfig::from_toml("seed = \"forty-two\"").unwrap_err();
        assert_eq!(err.step(), Step::Config);
    }

    #[test]
    fn expand_tilde() {
        let p = expand_home("/abs/kernel.xclbin");
        assert_eq!(p, PathBuf::from("/abs/kernel.xclbin"));
        if let Some(home) = home_dir() {
            assert_eq!(expand_home("~/k.xclbin"), home.join("k.xclbin"));
        }
    }
}
