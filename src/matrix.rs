/*
 * Interaction Matrix Module
 *
 * Square group x group table of attraction coefficients. Entry (i, j) scales
 * the force a group-i particle feels from a group-j neighbor, so the table is
 * asymmetric in general. Negative values repel.
 */

use rand::Rng;

use crate::error::{ConfigurationError, Result};
use crate::params::MatrixRandomization;

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionMatrix {
    size: usize,
    // Row-major, size * size entries
    coefficients: Vec<f64>,
}

impl InteractionMatrix {
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            coefficients: vec![0.0; size * size],
        }
    }

    pub fn identity(size: usize) -> Self {
        let mut matrix = Self::zeros(size);
        for i in 0..size {
            matrix.set(i, i, 1.0);
        }
        matrix
    }

    /// Builds a matrix from nested rows, rejecting ragged or non-square input.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let size = rows.len();
        let mut coefficients = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(ConfigurationError::RaggedMatrix {
                    row,
                    expected: size,
                    actual: values.len(),
                });
            }
            coefficients.extend_from_slice(values);
        }
        Ok(Self { size, coefficients })
    }

    /// Matrix with every cell drawn independently and uniformly from the
    /// discrete value set described by `range`.
    pub fn random<R: Rng + ?Sized>(size: usize, range: &MatrixRandomization, rng: &mut R) -> Result<Self> {
        range.validate()?;
        let coefficients = (0..size * size)
            .map(|_| range.value(rng.gen_range(0..range.steps)))
            .collect();
        Ok(Self { size, coefficients })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.coefficients[i * self.size + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.coefficients[i * self.size + j] = value;
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.coefficients[i * self.size..(i + 1) * self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact(0) panics, and an empty matrix has no rows anyway
        self.coefficients.chunks_exact(self.size.max(1))
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    /// Fails unless this matrix covers exactly `groups` groups.
    pub fn ensure_size(&self, groups: usize) -> Result<()> {
        if self.size != groups {
            return Err(ConfigurationError::MatrixDimension {
                expected: groups,
                rows: self.size,
                columns: self.size,
            });
        }
        Ok(())
    }
}

/// Named matrices the control layer can switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// All zero; only the short-range core repulsion remains.
    TotalRepulsion,
    /// Each group attracts itself and ignores the others.
    SelfAttract,
    /// Self attraction plus a chase band below the diagonal.
    RgbWorm,
    /// Self repulsion, attraction to everyone else.
    Chaotic,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::TotalRepulsion,
        Preset::SelfAttract,
        Preset::RgbWorm,
        Preset::Chaotic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::TotalRepulsion => "Total repulsion",
            Preset::SelfAttract => "Self attract",
            Preset::RgbWorm => "RGB worm",
            Preset::Chaotic => "Chaotic",
        }
    }

    pub fn matrix(self, size: usize) -> InteractionMatrix {
        match self {
            Preset::TotalRepulsion => InteractionMatrix::zeros(size),
            Preset::SelfAttract => InteractionMatrix::identity(size),
            Preset::RgbWorm => {
                let mut matrix = InteractionMatrix::identity(size);
                for i in 1..size {
                    matrix.set(i, i - 1, 0.2);
                }
                if size > 1 {
                    matrix.set(0, 1, -0.1);
                }
                matrix
            }
            Preset::Chaotic => {
                let mut matrix = InteractionMatrix::zeros(size);
                for i in 0..size {
                    for j in 0..size {
                        matrix.set(i, j, if i == j { -1.0 } else { 1.0 });
                    }
                }
                matrix
            }
        }
    }
}
