pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod frame;
pub mod material;
pub mod math;
pub mod primitives;
pub mod renderer;
pub mod scene;
pub mod scenes;
pub mod shape;
pub mod tunables;
pub mod types;
pub mod viewport;

pub use error::{ConstructionError, RenderError, SceneResult};
pub use scene::Scene;
pub use scenes::GardenBuilder;
