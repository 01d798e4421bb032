//! Simulation configuration and built-in profiles
//!
//! One `SimConfig` drives the whole simulation. The two historical variants of
//! the game (fixed pipe spacing on desktop, randomized spacing with
//! size-adaptive speed on touch devices) are just different values of it.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Built-in configuration profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Profile {
    /// 320x480 field, fixed pipe spacing, fixed speed factor
    #[default]
    Classic,
    /// Viewport-sized field, random pipe spacing, size-adaptive speed
    Touch,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Classic => "classic",
            Profile::Touch => "touch",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "desktop" => Some(Profile::Classic),
            "touch" | "mobile" => Some(Profile::Touch),
            _ => None,
        }
    }
}

/// How the horizontal distance to the next pipe is chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PipeSpacing {
    /// Every pipe uses the same spacing
    Fixed { spacing: f32 },
    /// Spacing sampled uniformly from `[min, max]` when the pipe is created
    Random { min: f32, max: f32 },
}

/// Bird physics constants (all per tick)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirdConfig {
    /// Fixed horizontal position of the bird's left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Added to velocity every tick (positive = down)
    pub gravity: f32,
    /// Velocity set by a flap (negative = up)
    pub jump: f32,
    /// Rotation in radians per unit of velocity
    pub rotation_speed: f32,
}

/// Pipe geometry and spawning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeConfig {
    pub width: f32,
    /// Gap height at the start of a run
    pub initial_gap: f32,
    /// Margin kept free above and below the gap
    pub min_gap_position: f32,
    pub spacing: PipeSpacing,
    /// Pipe speed at the start of a run (before the speed factor)
    pub initial_speed: f32,
}

/// Difficulty ramp driven by score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    /// Score interval between difficulty steps (up to the ceiling)
    pub interval: u64,
    /// Added to pipe speed on every step
    pub speed_increase: f32,
    /// Subtracted from the gap on every step up to the ceiling
    pub gap_decrease: f32,
    /// Floor for the gap height
    pub min_gap: f32,
    /// Maximum number of interval steps
    pub max_steps: u64,
    /// Score after which the gap is frozen
    pub ceiling: u64,
    /// Speed-only step interval beyond the ceiling
    pub post_ceiling_interval: u64,
}

/// Conversion from pipe speed to pixels moved per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedScaling {
    pub multiplier: f32,
    /// Divide by the (capped) screen scale when true
    pub size_adaptive: bool,
    /// Canvas width that corresponds to a scale of 1.0
    pub reference_width: f32,
    /// Upper bound on the screen scale
    pub scale_cap: f32,
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub profile: Profile,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub ground_height: f32,
    pub bird: BirdConfig,
    pub pipe: PipeConfig,
    pub difficulty: DifficultyConfig,
    pub speed: SpeedScaling,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl SimConfig {
    /// Desktop profile: fixed 320x480 canvas, fixed spacing and speed factor
    pub fn classic() -> Self {
        Self {
            profile: Profile::Classic,
            canvas_width: 320.0,
            canvas_height: 480.0,
            ground_height: 112.0,
            bird: BirdConfig {
                x: 50.0,
                width: 34.0,
                height: 24.0,
                gravity: 0.08,
                jump: -2.5,
                rotation_speed: 0.08,
            },
            pipe: PipeConfig {
                width: 42.0,
                initial_gap: 150.0,
                min_gap_position: 120.0,
                spacing: PipeSpacing::Fixed { spacing: 160.0 },
                initial_speed: 0.25,
            },
            difficulty: DifficultyConfig {
                speed_increase: 0.02,
                ..DifficultyConfig::default()
            },
            speed: SpeedScaling {
                multiplier: 5.0,
                size_adaptive: false,
                reference_width: 320.0,
                scale_cap: 0.4,
            },
        }
    }

    /// Touch profile sized to the given viewport
    pub fn touch(width: f32, height: f32) -> Self {
        Self {
            profile: Profile::Touch,
            canvas_width: width,
            canvas_height: height,
            ground_height: 112.0,
            bird: BirdConfig {
                x: width * 0.2,
                width: 34.0,
                height: 24.0,
                gravity: 0.1,
                jump: -3.0,
                rotation_speed: 0.08,
            },
            pipe: PipeConfig {
                width: 42.0,
                initial_gap: 150.0,
                min_gap_position: 120.0,
                spacing: PipeSpacing::Random {
                    min: 120.0,
                    max: 180.0,
                },
                initial_speed: 0.4,
            },
            difficulty: DifficultyConfig {
                speed_increase: 0.03,
                ..DifficultyConfig::default()
            },
            speed: SpeedScaling {
                multiplier: 2.0,
                size_adaptive: true,
                reference_width: 320.0,
                scale_cap: 0.6,
            },
        }
    }

    /// Build a profile. `Classic` ignores the viewport size.
    pub fn from_profile(profile: Profile, width: f32, height: f32) -> Self {
        match profile {
            Profile::Classic => Self::classic(),
            Profile::Touch => Self::touch(width, height),
        }
    }

    /// Y coordinate of the top of the ground strip
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.canvas_height - self.ground_height
    }

    /// Pixels per tick for one unit of pipe speed
    pub fn speed_factor(&self) -> f32 {
        let s = &self.speed;
        if s.size_adaptive {
            let scale = (self.canvas_width / s.reference_width).min(s.scale_cap);
            s.multiplier / scale
        } else {
            s.multiplier
        }
    }

    /// Check the configuration for values the simulation cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(ConfigError::Invalid("canvas size must be positive"));
        }
        if self.ground_height < 0.0 || self.ground_height >= self.canvas_height {
            return Err(ConfigError::Invalid("ground height out of range"));
        }
        if self.bird.width <= 0.0 || self.bird.height <= 0.0 {
            return Err(ConfigError::Invalid("bird size must be positive"));
        }
        if self.pipe.width <= 0.0 {
            return Err(ConfigError::Invalid("pipe width must be positive"));
        }
        if self.pipe.initial_gap < 0.0 || self.difficulty.min_gap < 0.0 {
            return Err(ConfigError::Invalid("pipe gap must not be negative"));
        }
        let max_gap_y = self.canvas_height - self.pipe.initial_gap - self.pipe.min_gap_position;
        if max_gap_y < self.pipe.min_gap_position {
            return Err(ConfigError::Invalid("no room for the gap between the margins"));
        }
        match self.pipe.spacing {
            PipeSpacing::Fixed { spacing } if spacing <= 0.0 => {
                return Err(ConfigError::Invalid("pipe spacing must be positive"));
            }
            PipeSpacing::Random { min, max } if min <= 0.0 || max < min => {
                return Err(ConfigError::Invalid("pipe spacing range is inverted"));
            }
            _ => {}
        }
        if self.difficulty.interval == 0 || self.difficulty.post_ceiling_interval == 0 {
            return Err(ConfigError::Invalid("difficulty intervals must be non-zero"));
        }
        let scaling = &self.speed;
        if scaling.size_adaptive && (scaling.reference_width <= 0.0 || scaling.scale_cap <= 0.0) {
            return Err(ConfigError::Invalid("speed scaling must be positive"));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded {} config from {}", config.profile.as_str(), path.as_ref().display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Config saved to {}", path.as_ref().display());
        Ok(())
    }
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            interval: 15,
            speed_increase: 0.02,
            gap_decrease: 10.0,
            min_gap: 90.0,
            max_steps: 5,
            ceiling: 60,
            post_ceiling_interval: 10,
        }
    }
}

/// Why a configuration could not be used
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_validate() {
        assert!(SimConfig::classic().validate().is_ok());
        assert!(SimConfig::touch(390.0, 844.0).validate().is_ok());
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!(Profile::from_str("Desktop"), Some(Profile::Classic));
        assert_eq!(Profile::from_str("touch"), Some(Profile::Touch));
        assert_eq!(Profile::from_str("MOBILE"), Some(Profile::Touch));
        assert_eq!(Profile::from_str("arcade"), None);
        assert_eq!(Profile::from_str(Profile::Touch.as_str()), Some(Profile::Touch));
    }

    #[test]
    fn test_speed_factor_fixed() {
        let config = SimConfig::classic();
        assert!((config.speed_factor() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_speed_factor_size_adaptive_is_capped() {
        // Small screen: scale below the cap
        let small = SimConfig::touch(160.0, 600.0);
        assert!((small.speed_factor() - 4.0).abs() < 1e-5);

        // Any screen at least cap * reference wide gets the same factor
        let phone = SimConfig::touch(390.0, 844.0);
        let tablet = SimConfig::touch(2048.0, 1536.0);
        assert!((phone.speed_factor() - 2.0 / 0.6).abs() < 1e-5);
        assert!((phone.speed_factor() - tablet.speed_factor()).abs() < 1e-6);
    }

    #[test]
    fn test_validate_rejects_negative_gap() {
        let mut config = SimConfig::classic();
        config.pipe.initial_gap = -10.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_spacing() {
        let mut config = SimConfig::touch(390.0, 844.0);
        config.pipe.spacing = PipeSpacing::Random { min: 200.0, max: 100.0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_cramped_canvas() {
        // 120 + 150 + 120 does not fit in 300
        let config = SimConfig::touch(320.0, 300.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_spacing_mode() {
        let config = SimConfig::touch(390.0, 844.0);
        let json = config.to_json().unwrap();
        assert!(json.contains("\"mode\": \"random\""));
        let parsed = SimConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_save_then_load() {
        let name = format!("flappy_sim_config_{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        let mut config = SimConfig::touch(414.0, 896.0);
        config.pipe.spacing = PipeSpacing::Fixed { spacing: 140.0 };
        config.save(&path).unwrap();
        let loaded = SimConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("flappy_sim_no_such_config.json");
        assert!(matches!(SimConfig::load(&path), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_error_messages() {
        let invalid = ConfigError::Invalid("pipe width must be positive");
        assert_eq!(invalid.to_string(), "invalid config: pipe width must be positive");
        let parse = SimConfig::from_json("{").unwrap_err();
        assert!(parse.to_string().starts_with("config parse error: "));
    }

    #[test]
    fn test_from_json_reports_parse_error() {
        assert!(matches!(SimConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }
}
