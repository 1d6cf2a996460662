//! Type definitions.

use crate::diagnostics::Diagnostics;
use nalgebra::DMatrix;

/// A quadrature rule on a reference cell or simplex
#[derive(Debug, Clone, PartialEq)]
pub struct QuadratureRule {
    /// The dimension d of a single point.
    pub dim: usize,

    /// The polynomial degree the rule integrates exactly.
    pub degree: usize,

    /// The point coordinates of the quadrature rule.
    ///
    /// Each row holds one point.
    pub points: DMatrix<f64>,

    /// The weights of the quadrature rule.
    pub weights: Vec<f64>,
}

impl QuadratureRule {
    /// The number of points
    pub fn npoints(&self) -> usize {
        self.weights.len()
    }

    /// Integrate a function given by its values at the quadrature points
    pub fn integrate(&self, values: &[f64]) -> f64 {
        self.weights.iter().zip(values).map(|(w, v)| w * v).sum()
    }
}

/// Options for the iterative parts of rule generation
#[derive(Debug, Clone, Copy)]
pub struct QuadratureOptions<'a> {
    /// Newton iterations stop once the correction is smaller than this
    newton_tolerance: f64,
    /// Maximum number of Newton iterations per point
    max_newton_iterations: usize,
    /// Where diagnostic events are sent
    diagnostics: Diagnostics<'a>,
}

impl Default for QuadratureOptions<'static> {
    fn default() -> Self {
        Self {
            newton_tolerance: 1e-8,
            max_newton_iterations: 100,
            diagnostics: Diagnostics::default(),
        }
    }
}

impl<'a> QuadratureOptions<'a> {
    /// Newton tolerance
    pub fn newton_tolerance(&self) -> f64 {
        self.newton_tolerance
    }

    /// Set the Newton tolerance
    pub fn set_newton_tolerance(&mut self, tolerance: f64) {
        self.newton_tolerance = tolerance;
    }

    /// Maximum number of Newton iterations per point
    pub fn max_newton_iterations(&self) -> usize {
        self.max_newton_iterations
    }

    /// Set the maximum number of Newton iterations per point
    pub fn set_max_newton_iterations(&mut self, iterations: usize) {
        self.max_newton_iterations = iterations;
    }

    /// Diagnostics handle
    pub fn diagnostics(&self) -> &Diagnostics<'a> {
        &self.diagnostics
    }

    /// Replace the diagnostics handle
    pub fn with_diagnostics<'b>(self, diagnostics: Diagnostics<'b>) -> QuadratureOptions<'b> {
        QuadratureOptions {
            newton_tolerance: self.newton_tolerance,
            max_newton_iterations: self.max_newton_iterations,
            diagnostics,
        }
    }
}
