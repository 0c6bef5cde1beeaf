use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub smoothing: SmoothingOptions,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: String,
}

/// Visual-stability transform applied to each frame's magnitude spectrum.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SmoothingOptions {
    /// Gaussian kernel width in frequency bins.
    #[serde(default = "default_sigma")]
    pub sigma: f64,
    /// Compress magnitudes with a cube root before smoothing.
    #[serde(default = "default_cube_root")]
    pub cube_root_compression: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            audio_bitrate: default_audio_bitrate(),
        }
    }
}

impl Default for SmoothingOptions {
    fn default() -> Self {
        Self {
            sigma: default_sigma(),
            cube_root_compression: default_cube_root(),
        }
    }
}

fn default_fps() -> u32 { 30 }
fn default_audio_bitrate() -> String { "192k".into() }
fn default_sigma() -> f64 { 3.0 }
fn default_cube_root() -> bool { true }

pub fn load_config(path: &Path) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.output.fps, 30);
        assert_eq!(config.output.audio_bitrate, "192k");
        assert_eq!(config.smoothing.sigma, 3.0);
        assert!(config.smoothing.cube_root_compression);
    }

    #[test]
    fn partial_config_overrides() {
        let config: Config = toml::from_str(
            "[output]\nfps = 60\n\n[smoothing]\nsigma = 1.5\ncube_root_compression = false\n",
        )
        .unwrap();
        assert_eq!(config.output.fps, 60);
        assert_eq!(config.output.audio_bitrate, "192k");
        assert_eq!(config.smoothing.sigma, 1.5);
        assert!(!config.smoothing.cube_root_compression);
    }
}
