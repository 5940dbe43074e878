use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::camera::CameraSettings;
use crate::cli::Cli;
use crate::core::DEFAULT_DAMPING_FACTOR;
use crate::scenes::{GardenBuilder, DEFAULT_LEAF_COUNT};

pub const DEFAULT_WINDOW_WIDTH: u32 = 800;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 600;

/// Startup configuration, read from JSON and then overridden by flags.
///
/// Every field has a default, so a file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    pub leaf_count: i32,
    pub seed: Option<u64>,
    pub window_width: u32,
    pub window_height: u32,
    pub camera: CameraSettings,
    pub damping_factor: f32,
    pub show_panel: bool,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            leaf_count: DEFAULT_LEAF_COUNT,
            seed: None,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            camera: CameraSettings::default(),
            damping_factor: DEFAULT_DAMPING_FACTOR,
            show_panel: true,
        }
    }
}

impl GardenConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Config file named by `--config` (or defaults) with flags applied on top
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(leaves) = cli.leaves {
            self.leaf_count = leaves;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if let Some(width) = cli.width {
            self.window_width = width;
        }
        if let Some(height) = cli.height {
            self.window_height = height;
        }
        if cli.no_ui {
            self.show_panel = false;
        }
    }

    pub fn garden_builder(&self) -> GardenBuilder {
        let builder = GardenBuilder::new().leaf_count(self.leaf_count);
        match self.seed {
            Some(seed) => builder.seed(seed),
            None => builder,
        }
    }
}
