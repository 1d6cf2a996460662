//! Gauss and Gauss-Lobatto rules from recursion coefficients
//!
//! The nodes are the eigenvalues of the symmetric tridiagonal Jacobi matrix, and each weight
//! is `beta[0]` times the squared first component of the matching eigenvector.

use crate::quadrature::jacobi::recurrence_coefficients;
use crate::types::{Error, Result};
use nalgebra::{DMatrix, SymmetricEigen};

/// Gauss rule for the recursion coefficients `alpha` and `beta`
///
/// The points are returned in increasing order.
pub fn gauss(alpha: &[f64], beta: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    let n = alpha.len();
    if beta.len() != n {
        return Err(Error::ShapeMismatch(format!(
            "{n} alpha coefficients but {} beta coefficients",
            beta.len()
        )));
    }
    if n == 0 {
        return Ok((vec![], vec![]));
    }
    let mut jacobi_matrix = DMatrix::<f64>::zeros(n, n);
    for i in 0..n {
        jacobi_matrix[(i, i)] = alpha[i];
    }
    for i in 1..n {
        let b = beta[i].sqrt();
        jacobi_matrix[(i, i - 1)] = b;
        jacobi_matrix[(i - 1, i)] = b;
    }

    let eigen = SymmetricEigen::new(jacobi_matrix);
    let mut rule = (0..n)
        .map(|i| {
            let v0 = eigen.eigenvectors[(0, i)];
            (eigen.eigenvalues[i], beta[0] * v0 * v0)
        })
        .collect::<Vec<_>>();
    rule.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(rule.into_iter().unzip())
}

/// Gauss-Lobatto rule with the fixed nodes `xl1` and `xl2`
///
/// The last recursion pair is replaced so that the Gauss rule of the modified Jacobi matrix
/// has `xl1` and `xl2` among its nodes.
pub fn lobatto(alpha: &[f64], beta: &[f64], xl1: f64, xl2: f64) -> Result<(Vec<f64>, Vec<f64>)> {
    let n = alpha.len();
    if n < 2 {
        return Err(Error::TooFewPoints(n));
    }
    if beta.len() != n {
        return Err(Error::ShapeMismatch(format!(
            "{n} alpha coefficients but {} beta coefficients",
            beta.len()
        )));
    }
    let bsqrt = beta.iter().map(|b| b.sqrt()).collect::<Vec<_>>();

    // Forward elimination of (J - x I) for each fixed node
    let mut g1 = 0.0;
    let mut g2 = 0.0;
    for i in 1..n - 1 {
        g1 = bsqrt[i] / (alpha[i] - xl1 - bsqrt[i - 1] * g1);
        g2 = bsqrt[i] / (alpha[i] - xl2 - bsqrt[i - 1] * g2);
    }
    g1 = 1.0 / (alpha[n - 1] - xl1 - bsqrt[n - 2] * g1);
    g2 = 1.0 / (alpha[n - 1] - xl2 - bsqrt[n - 2] * g2);

    let mut alpha_l = alpha.to_vec();
    let mut beta_l = beta.to_vec();
    alpha_l[n - 1] = (g1 * xl2 - g2 * xl1) / (g1 - g2);
    beta_l[n - 1] = (xl2 - xl1) / (g1 - g2);

    let (mut pts, wts) = gauss(&alpha_l, &beta_l)?;
    // The fixed nodes are exact
    pts[0] = xl1.min(xl2);
    pts[n - 1] = xl1.max(xl2);
    Ok((pts, wts))
}

/// Gauss-Legendre rule with `m` points on [-1, 1]
pub fn gauss_legendre(m: usize) -> Result<(Vec<f64>, Vec<f64>)> {
    let (alpha, beta) = recurrence_coefficients(m, 0.0, 0.0);
    gauss(&alpha, &beta)
}

/// Gauss-Lobatto-Legendre rule with `m` points on [-1, 1]
pub fn gauss_lobatto_legendre(m: usize) -> Result<(Vec<f64>, Vec<f64>)> {
    if m < 2 {
        return Err(Error::TooFewPoints(m));
    }
    let (alpha, beta) = recurrence_coefficients(m, 0.0, 0.0);
    lobatto(&alpha, &beta, -1.0, 1.0)
}
