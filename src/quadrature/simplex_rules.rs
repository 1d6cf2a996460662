//! Rules on reference cells and on arbitrary simplices.

use crate::diagnostics::Diagnostic;
use crate::quadrature::gauss_jacobi::gauss_jacobi_rule_with_options;
use crate::quadrature::types::{QuadratureOptions, QuadratureRule};
use crate::types::{Error, ReferenceCellType, Result};
use itertools::iproduct;
use log::debug;
use nalgebra::{DMatrix, Vector3};

/// Gauss-Jacobi rule with `m` points on [0, 1]
fn line_rule(m: usize, options: &QuadratureOptions) -> Result<(Vec<f64>, Vec<f64>)> {
    let (x, w) = gauss_jacobi_rule_with_options(0.0, m, options)?;
    Ok((
        x.iter().map(|xi| 0.5 * (xi + 1.0)).collect(),
        w.iter().map(|wi| 0.5 * wi).collect(),
    ))
}

/// Collapsed Gauss-Jacobi rule on the reference triangle, as (points, weights)
fn triangle_rule(m: usize, options: &QuadratureOptions) -> Result<(Vec<[f64; 2]>, Vec<f64>)> {
    let (ptx, wx) = gauss_jacobi_rule_with_options(0.0, m, options)?;
    let (pty, wy) = gauss_jacobi_rule_with_options(1.0, m, options)?;

    let mut pts = Vec::with_capacity(m * m);
    let mut wts = Vec::with_capacity(m * m);
    for (i, j) in iproduct!(0..m, 0..m) {
        pts.push([
            0.25 * (1.0 + ptx[i]) * (1.0 - pty[j]),
            0.5 * (1.0 + pty[j]),
        ]);
        wts.push(wx[i] * wy[j] * 0.125);
    }
    Ok((pts, wts))
}

/// Collapsed Gauss-Jacobi rule on the reference tetrahedron, as (points, weights)
fn tetrahedron_rule(
    m: usize,
    options: &QuadratureOptions,
) -> Result<(Vec<[f64; 3]>, Vec<f64>)> {
    let (ptx, wx) = gauss_jacobi_rule_with_options(0.0, m, options)?;
    let (pty, wy) = gauss_jacobi_rule_with_options(1.0, m, options)?;
    let (ptz, wz) = gauss_jacobi_rule_with_options(2.0, m, options)?;

    let mut pts = Vec::with_capacity(m * m * m);
    let mut wts = Vec::with_capacity(m * m * m);
    for (i, j, k) in iproduct!(0..m, 0..m, 0..m) {
        pts.push([
            0.125 * (1.0 + ptx[i]) * (1.0 - pty[j]) * (1.0 - ptz[k]),
            0.25 * (1.0 + pty[j]) * (1.0 - ptz[k]),
            0.5 * (1.0 + ptz[k]),
        ]);
        wts.push(wx[i] * wy[j] * wz[k] * 0.125 * 0.125);
    }
    Ok((pts, wts))
}

fn to_matrix<const D: usize>(pts: &[[f64; D]]) -> DMatrix<f64> {
    DMatrix::from_fn(pts.len(), D, |i, j| pts[i][j])
}

/// Rule on a reference cell with `m` points in each direction
pub fn make_gauss_jacobi_quadrature_with_options(
    cell: ReferenceCellType,
    m: usize,
    options: &QuadratureOptions,
) -> Result<QuadratureRule> {
    if m == 0 {
        return Err(Error::TooFewPoints(m));
    }
    let degree = 2 * m - 1;
    let rule = match cell {
        ReferenceCellType::Interval => {
            let (x, weights) = line_rule(m, options)?;
            QuadratureRule {
                dim: 1,
                degree,
                points: DMatrix::from_column_slice(m, 1, &x),
                weights,
            }
        }
        ReferenceCellType::Quadrilateral => {
            let (x, w) = line_rule(m, options)?;
            let mut pts = Vec::with_capacity(m * m);
            let mut weights = Vec::with_capacity(m * m);
            for (j, i) in iproduct!(0..m, 0..m) {
                pts.push([x[i], x[j]]);
                weights.push(w[i] * w[j]);
            }
            QuadratureRule {
                dim: 2,
                degree,
                points: to_matrix(&pts),
                weights,
            }
        }
        ReferenceCellType::Hexahedron => {
            let (x, w) = line_rule(m, options)?;
            let mut pts = Vec::with_capacity(m * m * m);
            let mut weights = Vec::with_capacity(m * m * m);
            for (k, j, i) in iproduct!(0..m, 0..m, 0..m) {
                pts.push([x[i], x[j], x[k]]);
                weights.push(w[i] * w[j] * w[k]);
            }
            QuadratureRule {
                dim: 3,
                degree,
                points: to_matrix(&pts),
                weights,
            }
        }
        ReferenceCellType::Triangle => {
            let (pts, weights) = triangle_rule(m, options)?;
            QuadratureRule {
                dim: 2,
                degree,
                points: to_matrix(&pts),
                weights,
            }
        }
        ReferenceCellType::Tetrahedron => {
            let (pts, weights) = tetrahedron_rule(m, options)?;
            QuadratureRule {
                dim: 3,
                degree,
                points: to_matrix(&pts),
                weights,
            }
        }
        ReferenceCellType::Prism => {
            let (x, w) = line_rule(m, options)?;
            let (tri_pts, tri_wts) = triangle_rule(m, options)?;
            let mut pts = Vec::with_capacity(m * tri_pts.len());
            let mut weights = Vec::with_capacity(m * tri_pts.len());
            for (k, (p, wt)) in iproduct!(0..m, tri_pts.iter().zip(&tri_wts)) {
                pts.push([p[0], p[1], x[k]]);
                weights.push(wt * w[k]);
            }
            QuadratureRule {
                dim: 3,
                degree,
                points: to_matrix(&pts),
                weights,
            }
        }
        ReferenceCellType::Pyramid => {
            return Err(Error::unsupported(cell, "no quadrature rule for pyramids"))
        }
        ReferenceCellType::Point => QuadratureRule {
            dim: 0,
            degree: usize::MAX,
            points: DMatrix::zeros(1, 0),
            weights: vec![1.0],
        },
    };
    debug!("Created {cell:?} rule with {} points", rule.npoints());
    Ok(rule)
}

/// Number of points per direction needed to integrate polynomials of the given degree
pub fn points_for_degree(degree: usize) -> usize {
    degree / 2 + 1
}

/// Rule on a reference cell that integrates polynomials of the given degree exactly
pub fn make_quadrature_with_options(
    cell: ReferenceCellType,
    degree: usize,
    options: &QuadratureOptions,
) -> Result<QuadratureRule> {
    make_gauss_jacobi_quadrature_with_options(cell, points_for_degree(degree), options)
}

/// Rule on an arbitrary simplex
///
/// `vertices` holds one vertex per row. A simplex of dimension d has d + 1 vertices and may be
/// embedded in a space of dimension d or higher. The rule integrates polynomials of the given
/// degree exactly.
pub fn make_simplex_quadrature(
    vertices: &DMatrix<f64>,
    degree: usize,
    options: &QuadratureOptions,
) -> Result<QuadratureRule> {
    if vertices.nrows() < 2 || vertices.nrows() > 4 {
        return Err(Error::InvalidSimplex(format!(
            "a simplex of dimension 1 to 3 needs 2 to 4 vertices, got {}",
            vertices.nrows()
        )));
    }
    let dim = vertices.nrows() - 1;
    let gdim = vertices.ncols();
    if gdim < dim {
        return Err(Error::InvalidSimplex(format!(
            "a simplex of dimension {dim} cannot be embedded in {gdim} dimensions"
        )));
    }
    let cell = match dim {
        1 => ReferenceCellType::Interval,
        2 => ReferenceCellType::Triangle,
        _ => ReferenceCellType::Tetrahedron,
    };

    let v0 = vertices.row(0);
    let edge_vectors = DMatrix::from_fn(dim, gdim, |i, j| vertices[(i + 1, j)] - v0[j]);

    let scale = match dim {
        1 => edge_vectors.norm(),
        2 if gdim == 2 => edge_vectors.determinant(),
        2 if gdim == 3 => {
            let a = Vector3::from_fn(|j, _| edge_vectors[(0, j)]);
            let b = Vector3::from_fn(|j, _| edge_vectors[(1, j)]);
            a.cross(&b).norm()
        }
        2 => {
            let r0 = edge_vectors.row(0);
            let r1 = edge_vectors.row(1);
            (r0.dot(&r0) * r1.dot(&r1) - r0.dot(&r1).powi(2))
                .max(0.0)
                .sqrt()
        }
        _ if gdim == 3 => edge_vectors.determinant(),
        _ => (&edge_vectors * edge_vectors.transpose())
            .determinant()
            .max(0.0)
            .sqrt(),
    }
    .abs();

    options.diagnostics().emit(|| Diagnostic::SimplexScale {
        dim,
        edge_vectors: edge_vectors.clone(),
        scale,
    });

    let max_coord = vertices.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    if scale <= f64::EPSILON * max_coord.max(1.0).powi(dim as i32) {
        return Err(Error::InvalidSimplex(format!(
            "the simplex is degenerate (volume scale {scale:e})"
        )));
    }

    let reference = make_quadrature_with_options(cell, degree, options)?;
    let npts = reference.npoints();
    let mut points = DMatrix::<f64>::zeros(npts, gdim);
    for i in 0..npts {
        for j in 0..gdim {
            points[(i, j)] = v0[j]
                + (0..dim)
                    .map(|k| reference.points[(i, k)] * edge_vectors[(k, j)])
                    .sum::<f64>();
        }
    }
    Ok(QuadratureRule {
        dim: gdim,
        degree: reference.degree,
        points,
        weights: reference.weights.iter().map(|w| w * scale).collect(),
    })
}
