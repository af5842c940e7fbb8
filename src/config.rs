use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PixsphereConfig {
    #[serde(default)]
    pub window: WindowSection,
    #[serde(default)]
    pub radius: RadiusSection,
    #[serde(default)]
    pub generation: GenerationSection,
    #[serde(default)]
    pub camera: CameraSection,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WindowSection {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
}
fn default_width() -> i32 {
    1280
}
fn default_height() -> i32 {
    720
}
fn default_title() -> String {
    "pixsphere".to_string()
}
fn default_target_fps() -> u32 {
    60
}
impl Default for WindowSection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            target_fps: default_target_fps(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RadiusSection {
    #[serde(default = "default_initial_radius")]
    pub initial: u32,
    #[serde(default = "default_radius_min")]
    pub min: u32,
    #[serde(default = "default_radius_max")]
    pub max: u32,
    #[serde(default = "default_warn_at")]
    pub warn_at: u32,
}
fn default_initial_radius() -> u32 {
    10
}
fn default_radius_min() -> u32 {
    4
}
fn default_radius_max() -> u32 {
    75
}
fn default_warn_at() -> u32 {
    50
}
impl Default for RadiusSection {
    fn default() -> Self {
        Self {
            initial: default_initial_radius(),
            min: default_radius_min(),
            max: default_radius_max(),
            warn_at: default_warn_at(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct GenerationSection {
    #[serde(default = "default_chunk_budget")]
    pub chunk_budget: usize,
}
fn default_chunk_budget() -> usize {
    pixsphere_shell::DEFAULT_CHUNK_BUDGET
}
impl Default for GenerationSection {
    fn default() -> Self {
        Self {
            chunk_budget: default_chunk_budget(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct CameraSection {
    #[serde(default = "default_distance")]
    pub distance: f32,
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_damping")]
    pub damping: f32,
    #[serde(default = "default_rotate_speed")]
    pub rotate_speed: f32,
    #[serde(default = "default_zoom_speed")]
    pub zoom_speed: f32,
}
fn default_distance() -> f32 {
    100.0
}
fn default_fov() -> f32 {
    75.0
}
fn default_damping() -> f32 {
    0.5
}
fn default_rotate_speed() -> f32 {
    0.3
}
fn default_zoom_speed() -> f32 {
    1.0
}
impl Default for CameraSection {
    fn default() -> Self {
        Self {
            distance: default_distance(),
            fov: default_fov(),
            damping: default_damping(),
            rotate_speed: default_rotate_speed(),
            zoom_speed: default_zoom_speed(),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub radius: Option<u32>,
    pub chunk_budget: Option<usize>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl PixsphereConfig {
    pub fn apply(&mut self, o: &Overrides) {
        if let Some(r) = o.radius {
            self.radius.initial = r;
        }
        if let Some(b) = o.chunk_budget {
            self.generation.chunk_budget = b;
        }
        if let Some(w) = o.width {
            self.window.width = w;
        }
        if let Some(h) = o.height {
            self.window.height = h;
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<PixsphereConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: PixsphereConfig = toml::from_str(&s)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg: PixsphereConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.window.width, 1280);
        assert_eq!(cfg.radius.initial, 10);
        assert_eq!((cfg.radius.min, cfg.radius.max, cfg.radius.warn_at), (4, 75, 50));
        assert_eq!(cfg.generation.chunk_budget, 2000);
        assert_eq!(cfg.camera.distance, 100.0);
        assert_eq!(cfg.camera.fov, 75.0);
        assert_eq!(cfg.camera.damping, 0.5);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg: PixsphereConfig = toml::from_str(
            r#"
            [radius]
            initial = 30

            [camera]
            damping = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(cfg.radius.initial, 30);
        assert_eq!(cfg.radius.max, 75);
        assert_eq!(cfg.camera.damping, 0.25);
        assert_eq!(cfg.camera.fov, 75.0);
        assert_eq!(cfg.window.title, "pixsphere");
    }

    #[test]
    fn overrides_win_over_file() {
        let mut cfg: PixsphereConfig = toml::from_str("[window]\nwidth = 640\n").unwrap();
        cfg.apply(&Overrides {
            radius: Some(12),
            chunk_budget: Some(50),
            width: None,
            height: Some(480),
        });
        assert_eq!(cfg.window.width, 640);
        assert_eq!(cfg.window.height, 480);
        assert_eq!(cfg.radius.initial, 12);
        assert_eq!(cfg.generation.chunk_budget, 50);
    }

    #[test]
    fn wrong_type_is_an_error() {
        assert!(toml::from_str::<PixsphereConfig>("[radius]\ninitial = \"big\"\n").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config_from_path(Path::new("/nonexistent/pixsphere.toml")).is_err());
    }
}
