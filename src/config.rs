//! Tunables for layout, animation timing and path jitter.
//!
//! Everything has a default, so an empty JSON object is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::{PathPosition, Viewport};

pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 1024.0,
    height: 768.0,
};

/// Where the agent waits when there is no path to stand on.
pub const DEFAULT_AGENT_POSITION: PathPosition = PathPosition { x: 50.0, y: 85.0 };

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Widest row of the snake; fewer levels shrink the grid.
    pub max_columns: usize,
    /// Pixel spacing between columns. Derived from the viewport when absent.
    pub spacing_x: Option<f64>,
    pub spacing_y: Option<f64>,
    pub margin: f64,
    /// Falls back to the environment (browser window or `DEFAULT_VIEWPORT`).
    pub viewport: Option<Viewport>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_columns: 3,
            spacing_x: None,
            spacing_y: None,
            margin: 60.0,
            viewport: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay between waypoints of the initial replay.
    pub replay_step_ms: f64,
    /// Delay before the single hop of an advance.
    pub advance_delay_ms: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            replay_step_ms: 300.0,
            advance_delay_ms: 800.0,
        }
    }
}

/// Full jitter spans; offsets are drawn from `[-span/2, span/2)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JitterConfig {
    pub span_x: f64,
    pub span_y: f64,
    /// Seed for the LCG jitter source, used when OS randomness is unavailable.
    pub seed: u64,
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self {
            span_x: 10.0,
            span_y: 5.0,
            seed: 0x5eed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdventureConfig {
    pub layout: LayoutConfig,
    pub timing: TimingConfig,
    pub jitter: JitterConfig,
    pub default_position: PathPosition,
}

impl Default for AdventureConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            timing: TimingConfig::default(),
            jitter: JitterConfig::default(),
            default_position: DEFAULT_AGENT_POSITION,
        }
    }
}

impl AdventureConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(Error::InvalidConfig("configuration must be a JSON object".into()));
        }
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        if layout.max_columns == 0 {
            return Err(Error::InvalidConfig("layout.max_columns must be at least 1".into()));
        }
        for (name, value) in [
            ("layout.spacing_x", layout.spacing_x),
            ("layout.spacing_y", layout.spacing_y),
            ("layout.margin", Some(layout.margin)),
            ("timing.replay_step_ms", Some(self.timing.replay_step_ms)),
            ("timing.advance_delay_ms", Some(self.timing.advance_delay_ms)),
            ("jitter.span_x", Some(self.jitter.span_x)),
            ("jitter.span_y", Some(self.jitter.span_y)),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(Error::InvalidConfig(format!("{name} must be a non-negative number, got {v}")));
                }
            }
        }
        if let Some(vp) = layout.viewport {
            if !(vp.width.is_finite() && vp.height.is_finite()) || vp.width < 0.0 || vp.height < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "layout.viewport must be non-negative, got {}x{}",
                    vp.width, vp.height
                )));
            }
        }
        Ok(())
    }

    /// Viewport used for layout: explicit one, else the given environment value.
    pub fn viewport_or(&self, environment: Viewport) -> Viewport {
        self.layout.viewport.unwrap_or(environment)
    }
}
