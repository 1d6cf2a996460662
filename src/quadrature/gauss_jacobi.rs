//! Gauss-Jacobi rules by Newton iteration

use crate::diagnostics::Diagnostic;
use crate::quadrature::jacobi::tabulate_jacobi;
use crate::quadrature::types::QuadratureOptions;
use crate::types::{Error, Result};
use log::trace;
use std::f64::consts::PI;

/// The roots of P_m^{(a, 0)} on [-1, 1], in increasing order
///
/// Each root is found by Newton's method starting from a Chebyshev point. The roots already
/// found are deflated out of the update so that the iteration cannot return to them.
pub fn gauss_jacobi_points(a: f64, m: usize, options: &QuadratureOptions) -> Result<Vec<f64>> {
    let mut x = vec![0.0; m];

    for k in 0..m {
        x[k] = -(((2 * k + 1) as f64) * PI / (2.0 * m as f64)).cos();
        if k > 0 {
            x[k] = 0.5 * (x[k] + x[k - 1]);
        }

        let mut iterations = 0;
        let mut correction = f64::INFINITY;
        while iterations < options.max_newton_iterations() {
            let s: f64 = x[..k].iter().map(|xi| 1.0 / (x[k] - xi)).sum();
            let f = tabulate_jacobi(a, m, 1, &x[k..k + 1]);
            let delta = f[(0, 0)] / (f[(1, 0)] - f[(0, 0)] * s);
            x[k] -= delta;
            iterations += 1;
            correction = delta.abs();
            if correction < options.newton_tolerance() {
                break;
            }
        }
        if correction >= options.newton_tolerance() {
            return Err(Error::NoConvergence {
                root: k,
                iterations,
                correction,
            });
        }
        trace!("Gauss-Jacobi root {k} of {m} converged after {iterations} iterations");
        options
            .diagnostics()
            .emit(|| Diagnostic::NewtonConverged {
                exponent: a,
                npoints: m,
                root: k,
                iterations,
            });
    }
    Ok(x)
}

/// Gauss-Jacobi points and weights on [-1, 1] for the weight (1-x)^a
pub fn gauss_jacobi_rule_with_options(
    a: f64,
    m: usize,
    options: &QuadratureOptions,
) -> Result<(Vec<f64>, Vec<f64>)> {
    if m == 0 {
        return Err(Error::TooFewPoints(m));
    }
    let pts = gauss_jacobi_points(a, m, options)?;
    let derivs = tabulate_jacobi(a, m, 1, &pts);

    let factorial = (1..=m).map(|i| i as f64).product::<f64>();
    let scale = 2f64.powf(a + 1.0) * libm::tgamma(m as f64 + 1.0) / factorial;

    let wts = pts
        .iter()
        .enumerate()
        .map(|(i, x)| {
            let d = derivs[(1, i)];
            scale / (1.0 - x * x) / (d * d)
        })
        .collect();
    Ok((pts, wts))
}

/// Gauss-Jacobi points and weights on [-1, 1] for the weight (1-x)^a, with default options
pub fn gauss_jacobi_rule(a: f64, m: usize) -> Result<(Vec<f64>, Vec<f64>)> {
    gauss_jacobi_rule_with_options(a, m, &QuadratureOptions::default())
}
