//! Jacobi polynomials
//!
//! Recursion coefficients and derivative-carrying recurrences for the Jacobi polynomials
//! on [-1, 1] with weight (1-x)^a (1+x)^b.

use nalgebra::DMatrix;

/// The first `n` recursion coefficients (alpha, beta) of the Jacobi polynomials
///
/// `beta[0]` is the total mass of the weight function.
pub fn recurrence_coefficients(n: usize, a: f64, b: f64) -> (Vec<f64>, Vec<f64>) {
    if n == 0 {
        return (vec![], vec![]);
    }
    let mut alpha = Vec::with_capacity(n);
    let mut beta = Vec::with_capacity(n);

    alpha.push((b - a) / (a + b + 2.0));
    beta.push(
        2f64.powf(a + b + 1.0) * libm::tgamma(a + 1.0) * libm::tgamma(b + 1.0)
            / libm::tgamma(a + b + 2.0),
    );

    for k in 1..n {
        let k = k as f64;
        let s = 2.0 * k + a + b;
        alpha.push((b * b - a * a) / (s * (s + 2.0)));
        beta.push(
            4.0 * (k + a) * (k + b) * k * (k + a + b) / (s * s * (s + 1.0) * (s - 1.0)),
        );
    }
    (alpha, beta)
}

/// Coefficients (a3, a2, a4) of the recurrence P_n = (a3 x + a2) P_{n-1} - a4 P_{n-2}
///
/// These are the coefficients for P_n^{(a, 0)} with n >= 2.
pub(crate) fn recurrence_terms(a: f64, n: usize) -> (f64, f64, f64) {
    let n = n as f64;
    let a1 = 2.0 * n * (n + a) * (2.0 * n + a - 2.0);
    let a2 = (2.0 * n + a - 1.0) * (a * a) / a1;
    let a3 = (2.0 * n + a - 1.0) * (2.0 * n + a) / (2.0 * n * (n + a));
    let a4 = 2.0 * (n + a - 1.0) * (n - 1.0) * (2.0 * n + a) / a1;
    (a3, a2, a4)
}

/// Tabulate the Jacobi polynomial P_n^{(a, 0)} and its derivatives
///
/// Row `k` of the result holds the k-th derivative at each point.
pub fn tabulate_jacobi(a: f64, n: usize, nderiv: usize, x: &[f64]) -> DMatrix<f64> {
    let npts = x.len();
    let mut table = DMatrix::<f64>::zeros(nderiv + 1, npts);

    // values[p] holds the current derivative of P_p; previous holds the derivative below it
    let mut previous = vec![vec![0.0; npts]; n + 1];
    for i in 0..=nderiv {
        let mut values = vec![vec![0.0; npts]; n + 1];
        if i == 0 {
            values[0].fill(1.0);
        }
        if n > 0 {
            if i == 0 {
                for (v, xj) in values[1].iter_mut().zip(x) {
                    *v = (xj * (a + 2.0) + a) * 0.5;
                }
            } else if i == 1 {
                values[1].fill(a * 0.5 + 1.0);
            }
        }
        for k in 2..=n {
            let (a3, a2, a4) = recurrence_terms(a, k);
            for j in 0..npts {
                let mut v = values[k - 1][j] * (x[j] * a3 + a2) - values[k - 2][j] * a4;
                if i > 0 {
                    v += i as f64 * a3 * previous[k - 1][j];
                }
                values[k][j] = v;
            }
        }
        for j in 0..npts {
            table[(i, j)] = values[n][j];
        }
        previous = values;
    }
    table
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_legendre_coefficients() {
        let (alpha, beta) = recurrence_coefficients(4, 0.0, 0.0);
        assert_relative_eq!(beta[0], 2.0, epsilon = 1e-14);
        for k in 1..4 {
            let kf = k as f64;
            assert_relative_eq!(alpha[k], 0.0, epsilon = 1e-14);
            assert_relative_eq!(beta[k], kf * kf / (4.0 * kf * kf - 1.0), epsilon = 1e-14);
        }
    }

    #[test]
    fn test_weight_mass() {
        // integral of (1-x) over [-1, 1]
        let (_, beta) = recurrence_coefficients(1, 1.0, 0.0);
        assert_relative_eq!(beta[0], 2.0, epsilon = 1e-13);
        let (alpha, beta) = recurrence_coefficients(1, 2.0, 0.0);
        assert_relative_eq!(beta[0], 8.0 / 3.0, epsilon = 1e-13);
        assert_relative_eq!(alpha[0], -0.5, epsilon = 1e-14);
    }

    #[test]
    fn test_legendre_values() {
        let x = [-1.0, -0.3, 0.2, 0.7, 1.0];
        let p2 = tabulate_jacobi(0.0, 2, 2, &x);
        let p3 = tabulate_jacobi(0.0, 3, 1, &x);
        for (j, xj) in x.iter().enumerate() {
            assert_relative_eq!(p2[(0, j)], 1.5 * xj * xj - 0.5, epsilon = 1e-13);
            assert_relative_eq!(p2[(1, j)], 3.0 * xj, epsilon = 1e-13);
            assert_relative_eq!(p2[(2, j)], 3.0, epsilon = 1e-13);
            assert_relative_eq!(p3[(0, j)], 2.5 * xj.powi(3) - 1.5 * xj, epsilon = 1e-13);
            assert_relative_eq!(p3[(1, j)], 7.5 * xj * xj - 1.5, epsilon = 1e-13);
        }
    }

    #[test]
    fn test_jacobi_derivative() {
        let a = 1.0;
        let eps = 1e-6;
        let x = [-0.8, -0.1, 0.35, 0.9];
        let xp = x.iter().map(|v| v + eps).collect::<Vec<_>>();
        let xm = x.iter().map(|v| v - eps).collect::<Vec<_>>();
        for n in 1..6 {
            let t = tabulate_jacobi(a, n, 1, &x);
            let tp = tabulate_jacobi(a, n, 0, &xp);
            let tm = tabulate_jacobi(a, n, 0, &xm);
            for j in 0..x.len() {
                assert_relative_eq!(
                    t[(1, j)],
                    (tp[(0, j)] - tm[(0, j)]) / (2.0 * eps),
                    epsilon = 1e-6
                );
            }
        }
    }

    #[test]
    fn test_jacobi_endpoint() {
        // P_n^{(a,0)}(1) = binomial(n + a, n)
        let p = tabulate_jacobi(2.0, 3, 0, &[1.0]);
        assert_relative_eq!(p[(0, 0)], 10.0, epsilon = 1e-12);
    }
}
