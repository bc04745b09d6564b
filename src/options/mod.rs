//! Orbiter configuration with TOML preset support.
//!
//! The runtime-tweakable fields (delay, input gating, axis flips, speed
//! gains) are not validated: negative speeds invert the
//! gesture and a negative delay queries the model ahead of the input
//! stream. Camera placement is flattened into the same table so a
//! single preset file describes both.

mod camera;

use std::path::Path;

pub use camera::CameraOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::OrbiterError;

/// Lag applied to state queries, in milliseconds.
pub const DEFAULT_DELAY_MS: f64 = 40.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
/// Orbiter configuration. Missing fields fall back to their defaults.
pub struct OrbiterOptions {
    /// Query lag in milliseconds. Larger values trade latency for
    /// smoother motion.
    #[schemars(title = "Smoothing Delay", range(min = 0.0, max = 200.0), extend("step" = 5.0))]
    pub delay: f64,
    /// Gates every input-driven command.
    #[schemars(title = "Input Enabled")]
    pub input_enabled: bool,
    /// Invert the horizontal drag axis.
    #[schemars(title = "Flip X")]
    pub flip_x: bool,
    /// Invert the vertical drag axis.
    #[schemars(title = "Flip Y")]
    pub flip_y: bool,
    /// Pan gain.
    #[schemars(title = "Translate Speed", range(min = 0.1, max = 4.0), extend("step" = 0.05))]
    pub translate_speed: f64,
    /// Dolly gain.
    #[schemars(title = "Zoom Speed", range(min = 0.1, max = 4.0), extend("step" = 0.05))]
    pub zoom_speed: f64,
    /// Rotation gain, in half-turns per surface height of drag.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 4.0), extend("step" = 0.05))]
    pub rotate_speed: f64,
    /// Initial camera placement.
    #[serde(flatten)]
    #[schemars(skip)]
    pub camera: CameraOptions,
}

impl Default for OrbiterOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY_MS,
            input_enabled: true,
            flip_x: false,
            flip_y: false,
            translate_speed: 1.0,
            zoom_speed: 1.0,
            rotate_speed: 1.0,
            camera: CameraOptions::default(),
        }
    }
}

impl OrbiterOptions {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(OrbiterOptions)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, OrbiterError> {
        let content = std::fs::read_to_string(path).map_err(OrbiterError::Io)?;
        let options = toml::from_str(&content)
            .map_err(|e| OrbiterError::OptionsParse(e.to_string()))?;
        log::info!("loaded options preset {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), OrbiterError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrbiterError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(OrbiterError::Io)?;
        }
        std::fs::write(path, content).map_err(OrbiterError::Io)?;
        log::info!("saved options preset {}", path.display());
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Overwrite the runtime fields present in a JSON object.
    ///
    /// Only `delay`, `inputEnabled`, `flipX`, `flipY`, `translateSpeed`,
    /// `zoomSpeed` and `rotateSpeed` are recognized. Keys of the wrong
    /// type and anything else are skipped; nothing is rejected.
    pub fn merge_json(&mut self, value: &Value) {
        let Some(obj) = value.as_object() else {
            log::debug!("ignoring non-object options: {value}");
            return;
        };
        for (key, v) in obj {
            let applied = match key.as_str() {
                "delay" => set_f64(&mut self.delay, v),
                "inputEnabled" => set_bool(&mut self.input_enabled, v),
                "flipX" => set_bool(&mut self.flip_x, v),
                "flipY" => set_bool(&mut self.flip_y, v),
                "translateSpeed" => set_f64(&mut self.translate_speed, v),
                "zoomSpeed" => set_f64(&mut self.zoom_speed, v),
                "rotateSpeed" => set_f64(&mut self.rotate_speed, v),
                // Owned by the camera model.
                "camera" => true,
                _ => false,
            };
            if !applied {
                log::debug!("ignoring option '{key}': {v}");
            }
        }
    }
}

fn set_f64(target: &mut f64, value: &Value) -> bool {
    let Some(v) = value.as_f64() else {
        return false;
    };
    *target = v;
    true
}

fn set_bool(target: &mut bool, value: &Value) -> bool {
    let Some(v) = value.as_bool() else {
        return false;
    };
    *target = v;
    true
}
