//! Quadrature
//!
//! Gauss-Jacobi rules are found by Newton iteration and combined into rules on reference
//! cells using collapsed coordinates. Gauss and Gauss-Lobatto rules can also be built from
//! the Jacobi recursion coefficients by the Golub-Welsch algorithm.

pub mod gauss_jacobi;
pub mod golub_welsch;
pub mod jacobi;
pub mod simplex_rules;
pub mod types;

pub use gauss_jacobi::{gauss_jacobi_rule, gauss_jacobi_rule_with_options};
pub use golub_welsch::{gauss, gauss_legendre, gauss_lobatto_legendre, lobatto};
pub use simplex_rules::{
    make_gauss_jacobi_quadrature_with_options, make_quadrature_with_options,
    make_simplex_quadrature,
};
pub use types::{QuadratureOptions, QuadratureRule};

use crate::types::{ReferenceCellType, Result};

/// Rule on a reference cell that integrates polynomials of the given degree exactly
pub fn make_quadrature(cell: ReferenceCellType, degree: usize) -> Result<QuadratureRule> {
    make_quadrature_with_options(cell, degree, &QuadratureOptions::default())
}

/// Rule on a reference cell with `m` Gauss-Jacobi points in each direction
pub fn make_gauss_jacobi_quadrature(cell: ReferenceCellType, m: usize) -> Result<QuadratureRule> {
    make_gauss_jacobi_quadrature_with_options(cell, m, &QuadratureOptions::default())
}
