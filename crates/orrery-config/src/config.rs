//! Configuration structs with defaults and RON persistence.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level run configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Canvas, animation and lighting.
    pub render: RenderConfig,
    /// Seed and mesh detail.
    pub generation: GenerationConfig,
    /// Bodies and where they sit.
    pub scene: SceneConfig,
    /// Where the animation is written.
    pub output: OutputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Canvas and animation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Number of frames to render.
    pub frames: u32,
    /// Playback rate of the written animation.
    pub fps: u32,
    /// Per-frame body rotation in degrees about x, y and z.
    pub rotation_degrees: [f64; 3],
    /// Direction toward the light.
    pub light_direction: [f64; 3],
    /// Background RGBA color.
    pub background: [u8; 4],
    /// Stars scattered over the background; 0 disables the starfield.
    pub star_count: u32,
    /// Draw mesh edges over the terrain.
    pub wireframe: bool,
}

/// Terrain generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Text hashed into every random stream of the run.
    pub seed: String,
    /// Subdivision passes applied to each icosahedron.
    pub complexity: u32,
}

/// The bodies to generate, in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub bodies: Vec<BodyConfig>,
}

/// One body in the scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodyConfig {
    /// Unique name; also salts the body's random stream.
    pub name: String,
    pub kind: BodyKind,
    pub diameter: f64,
    #[serde(default)]
    pub placement: PlacementConfig,
}

/// Body archetypes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BodyKind {
    TerrestrialOceans,
    TerrestrialIronOxide,
    ClassicMoon,
}

/// Where a body is drawn.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum PlacementConfig {
    /// Middle of the canvas.
    #[default]
    Centered,
    /// Fixed pixel position.
    Absolute { x: f64, y: f64 },
    /// Offset from a previously listed body, swept around `axis` once per
    /// animation.
    Orbiting {
        primary: String,
        x: f64,
        y: f64,
        z: f64,
        axis: [f64; 3],
    },
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Target file (GIF) or directory (PNG sequence).
    pub path: PathBuf,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Gif,
    PngSequence,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            frames: 385,
            fps: 60,
            rotation_degrees: [0.25, 0.75, 0.5],
            light_direction: [0.0, 0.0, 1.0],
            background: [0, 0, 0, 255],
            star_count: 150,
            wireframe: false,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: "planet sim 2017".to_string(),
            complexity: 3,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            bodies: vec![BodyConfig {
                name: "terra".to_string(),
                kind: BodyKind::TerrestrialOceans,
                diameter: 375.0,
                placement: PlacementConfig::Centered,
            }],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("movie.gif"),
            format: OutputFormat::Gif,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read the file: `Some(new_config)` if it changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Reject values that would make a run meaningless. Body archetype
    /// parameters and orbit references are checked later, when the scene is
    /// built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason: &str| {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };
        let render = &self.render;
        if render.width == 0 || render.height == 0 {
            return invalid("render.width/height", "canvas must be at least 1x1");
        }
        if render.frames == 0 {
            return invalid("render.frames", "at least one frame is required");
        }
        if render.fps == 0 {
            return invalid("render.fps", "frame rate must be at least 1");
        }
        if render.light_direction.iter().all(|c| *c == 0.0) {
            return invalid("render.light_direction", "direction must not be zero");
        }
        if self.generation.seed.is_empty() {
            log::warn!("Empty seed string; all runs will share one terrain");
        }

        let mut names = HashSet::new();
        for body in &self.scene.bodies {
            if !names.insert(body.name.as_str()) {
                return invalid("scene.bodies", &format!("duplicate body name `{}`", body.name));
            }
        }
        Ok(())
    }
}
