/*
 * Error Module
 *
 * Configuration errors reported synchronously by the simulation core.
 * Coincident particles during force accumulation are not an error: the
 * kernel simply skips them.
 */

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("interaction matrix must be {expected}x{expected}, got {rows}x{columns}")]
    MatrixDimension {
        expected: usize,
        rows: usize,
        columns: usize,
    },
    #[error("interaction matrix row {row} has {actual} entries, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("grid cell size must be positive, got {0}")]
    NonPositiveCellSize(f64),
    #[error("interaction radius must be positive, got {0}")]
    NonPositiveRMax(f64),
    #[error("domain must have a positive size, got {width}x{height}")]
    EmptyDomain { width: f64, height: f64 },
    #[error("domain {width}x{height} leaves no room for the {margin} spawn margin")]
    DomainTooSmall { width: f64, height: f64, margin: f64 },
    #[error("at least one particle group is required")]
    NoGroups,
    #[error("particle {index} assigned to group {group}, but only {groups} groups exist")]
    GroupOutOfRange { index: usize, group: u32, groups: usize },
    #[error("matrix randomization needs a positive step and at least one value")]
    InvalidRandomization,
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;
