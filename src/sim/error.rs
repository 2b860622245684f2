//! Configuration errors raised while building tube geometry

use thiserror::Error;

use crate::settings::SettingsError;

/// Errors that reject level construction
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeometryError {
    #[error("tube must contain at least one segment")]
    EmptyTube,
    #[error("shape {shape} produced {actual} boundary points, expected {expected}")]
    PointCountMismatch {
        shape: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("invalid tube radii: inner {inner}, outer {outer}")]
    InvalidRadii { inner: f32, outer: f32 },
}

/// Errors that reject a new session
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
