//! Configuration for the waymark application
//!
//! Loads configuration from TOML file with the parameters needed to pick a
//! location source, style the map, and drive the simulated provider.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub map: MapConfig,
    pub source: SourceConfig,
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

/// Map view configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MapConfig {
    /// Initial camera center latitude (degrees)
    pub initial_latitude: f64,
    /// Initial camera center longitude (degrees)
    pub initial_longitude: f64,
    /// Zoom applied before any fix arrives
    pub initial_zoom: f64,
    /// Widget zoom bounds
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Zoom applied when re-centering on a map tap
    pub tap_zoom: f64,
    /// Route polyline stroke width (pixels)
    pub route_width: f32,
    /// Route polyline color, `#rrggbb` or `#aarrggbb`
    pub route_color: String,
}

/// Location source selection and per-variant camera targets
///
/// The three zoom targets intentionally stay separate per variant; the
/// values come from the screens this module replaces and were never
/// unified there.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Active source: "manager", "fused", or "overlay"
    pub kind: String,
    /// Zoom applied on a manager (one-shot) fix
    pub manager_zoom: f64,
    /// Zoom applied on fused stream fixes
    pub fused_zoom: f64,
    /// Zoom applied on the overlay first fix
    pub overlay_zoom: f64,
}

/// Simulated provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Walk start latitude (degrees)
    pub start_latitude: f64,
    /// Walk start longitude (degrees)
    pub start_longitude: f64,
    /// Interval between generated fixes (milliseconds)
    pub fix_interval_ms: u64,
    /// Per-fix walk step, degrees of standard deviation
    pub step_sigma_deg: f64,
    /// RNG seed; 0 = random each run
    pub random_seed: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl AppConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Default configuration: fused source over a simulated walk
    ///
    /// Map centered on Bago, walk starting at Monywa. Suitable for testing
    /// and development; deployments should use a TOML configuration file.
    pub fn demo_defaults() -> Self {
        Self {
            map: MapConfig {
                initial_latitude: 17.312240,
                initial_longitude: 96.516172,
                initial_zoom: 16.0,
                min_zoom: 4.0,
                max_zoom: 19.0,
                tap_zoom: 16.0,
                route_width: 5.0,
                route_color: "#ff0000".to_string(),
            },
            source: SourceConfig {
                kind: "fused".to_string(),
                manager_zoom: 16.0,
                fused_zoom: 19.0,
                overlay_zoom: 19.0,
            },
            simulation: SimulationConfig {
                start_latitude: 19.122104,
                start_longitude: 96.009651,
                fix_interval_ms: 1000,
                step_sigma_deg: 0.0002,
                random_seed: 42,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::demo_defaults()
    }
}

/// Parse `#rrggbb` or `#aarrggbb` into an ARGB u32 (alpha defaults to FF)
pub fn parse_color(color: &str) -> Result<u32> {
    let hex = color
        .strip_prefix('#')
        .ok_or_else(|| Error::InvalidParameter(format!("color must start with '#': {color}")))?;

    match hex.len() {
        6 => {
            let rgb = u32::from_str_radix(hex, 16)
                .map_err(|_| Error::InvalidParameter(format!("invalid color: {color}")))?;
            Ok(0xFF00_0000 | rgb)
        }
        8 => u32::from_str_radix(hex, 16)
            .map_err(|_| Error::InvalidParameter(format!("invalid color: {color}"))),
        _ => Err(Error::InvalidParameter(format!(
            "color must be #rrggbb or #aarrggbb: {color}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::demo_defaults();
        assert_eq!(config.source.kind, "fused");
        assert_eq!(config.map.initial_latitude, 17.312240);
        assert_eq!(config.map.initial_longitude, 96.516172);
        assert_eq!(config.map.route_width, 5.0);
        assert_eq!(config.source.manager_zoom, 16.0);
        assert_eq!(config.source.fused_zoom, 19.0);
        assert_eq!(config.source.overlay_zoom, 19.0);
        assert_eq!(config.simulation.random_seed, 42);
    }

    #[test]
    fn test_toml_serialization() {
        let config = AppConfig::demo_defaults();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        // Should contain all sections
        assert!(toml_string.contains("[map]"));
        assert!(toml_string.contains("[source]"));
        assert!(toml_string.contains("[simulation]"));
        assert!(toml_string.contains("[logging]"));

        // Should contain key values
        assert!(toml_string.contains("kind = \"fused\""));
        assert!(toml_string.contains("route_color = \"#ff0000\""));
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_content = r##"
[map]
initial_latitude = 19.122104
initial_longitude = 96.009651
initial_zoom = 10.0
min_zoom = 4.0
max_zoom = 19.0
tap_zoom = 16.0
route_width = 5.0
route_color = "#ff0000"

[source]
kind = "overlay"
manager_zoom = 16.0
fused_zoom = 19.0
overlay_zoom = 19.0

[simulation]
start_latitude = 19.122104
start_longitude = 96.009651
fix_interval_ms = 500
step_sigma_deg = 0.0001
random_seed = 7

[logging]
level = "debug"
"##;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.source.kind, "overlay");
        assert_eq!(config.map.initial_zoom, 10.0);
        assert_eq!(config.simulation.fix_interval_ms, 500);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#ff0000").unwrap(), 0xFFFF_0000);
        assert_eq!(parse_color("#80ff0000").unwrap(), 0x80FF_0000);
        assert!(parse_color("ff0000").is_err());
        assert!(parse_color("#ff00").is_err());
        assert!(parse_color("#zzxxyy").is_err());
    }
}
