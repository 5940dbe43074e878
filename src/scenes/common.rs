use rand::Rng;

use crate::error::SceneResult;
use crate::math::Color;

/// Uniform sample from the closed range [low, high].
#[inline]
pub fn random_uniform<R: Rng + ?Sized>(rng: &mut R, low: f32, high: f32) -> f32 {
    rng.gen_range(low..=high)
}

pub fn color(value: &str) -> SceneResult<Color> {
    Color::parse(value)
}

pub const GROUND_COLOR: &str = "#a9c388";
pub const WATER_COLOR: &str = "blue";
pub const BARK_COLOR: &str = "#6b4423";
pub const FOLIAGE_COLOR: &str = "#3f7d3a";
pub const FOG_COLOR: u32 = 0xcccccc;
