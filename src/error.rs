//! Error types for scene construction and rendering.

use thiserror::Error;

/// Shape kinds, used to report which primitive rejected its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Cylinder,
    Box,
    Torus,
    Plane,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Box => "box",
            ShapeKind::Torus => "torus",
            ShapeKind::Plane => "plane",
        };
        f.write_str(name)
    }
}

/// Invalid parameters rejected while building primitives, compound objects or the scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionError {
    /// A dimension was zero, negative or not finite.
    #[error("{shape} {field} must be a positive finite number, got {value}")]
    InvalidDimension {
        shape: ShapeKind,
        field: &'static str,
        value: f32,
    },

    /// A segment count was below the minimum of 3.
    #[error("{shape} {field} must be at least 3, got {value}")]
    TooFewSegments {
        shape: ShapeKind,
        field: &'static str,
        value: u32,
    },

    #[error("leaf count must not be negative, got {0}")]
    NegativeLeafCount(i32),

    /// A random leaf range was inverted, unbounded or not finite.
    #[error("leaf {field} range [{low}, {high}] is invalid")]
    InvalidLeafRange {
        field: &'static str,
        low: f32,
        high: f32,
    },

    #[error("roughness must be within [0, 1], got {0}")]
    InvalidRoughness(f32),

    #[error("unrecognised colour '{0}'")]
    InvalidColor(String),

    #[error("fog range is invalid: near {near}, far {far}")]
    InvalidFog { near: f32, far: f32 },

    #[error("tunable '{label}' has an invalid range [{min}, {max}] with step {step}")]
    InvalidTunableRange {
        label: &'static str,
        min: f32,
        max: f32,
        step: f32,
    },
}

/// Result type alias for scene construction.
pub type SceneResult<T> = Result<T, ConstructionError>;

/// Failures of the GPU backend.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable graphics adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("failed to acquire surface texture: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
