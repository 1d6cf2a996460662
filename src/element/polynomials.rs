//! Orthonormal polynomials
//!
//! The polynomials are orthonormal in L2 of the reference cell. On simplices they are built in
//! collapsed coordinates, with every factor homogenised so that the recurrences only involve
//! polynomials in the cell coordinates.
//!
//! A tabulation is a vector with one matrix per derivative. Each matrix has one row per
//! polynomial and one column per point.

use crate::element::reference_cell;
use crate::quadrature::jacobi::recurrence_terms;
use crate::types::{Error, ReferenceCellType, Result};
use nalgebra::DMatrix;

fn idx2(i: usize, j: usize) -> usize {
    (i + j + 1) * (i + j) / 2 + j
}

fn idx3(i: usize, j: usize, k: usize) -> usize {
    let s = i + j + k;
    s * (s + 1) * (s + 2) / 6 + (j + k) * (j + k + 1) / 2 + k
}

/// The index of a derivative in a tabulation
///
/// `orders` holds the number of derivatives taken in each direction.
pub fn derivative_index(orders: &[usize]) -> Result<usize> {
    match *orders {
        [] => Ok(0),
        [kx] => Ok(kx),
        [kx, ky] => Ok(idx2(kx, ky)),
        [kx, ky, kz] => Ok(idx3(kx, ky, kz)),
        _ => Err(Error::ShapeMismatch(format!(
            "derivatives are only defined in up to 3 dimensions, got {}",
            orders.len()
        ))),
    }
}

/// The number of derivatives of order up to `nderiv`
pub fn derivative_count(cell: ReferenceCellType, nderiv: usize) -> usize {
    let tdim = reference_cell::dim(cell);
    num::integer::binomial(nderiv + tdim, tdim)
}

/// The number of polynomials of degree up to `degree` on the cell
pub fn polynomial_count(cell: ReferenceCellType, degree: usize) -> Result<usize> {
    match cell {
        ReferenceCellType::Interval => Ok(degree + 1),
        ReferenceCellType::Triangle => Ok((degree + 1) * (degree + 2) / 2),
        ReferenceCellType::Quadrilateral => Ok((degree + 1) * (degree + 1)),
        ReferenceCellType::Tetrahedron => Ok((degree + 1) * (degree + 2) * (degree + 3) / 6),
        ReferenceCellType::Hexahedron => Ok((degree + 1) * (degree + 1) * (degree + 1)),
        ReferenceCellType::Prism => Ok((degree + 1) * (degree + 1) * (degree + 2) / 2),
        ReferenceCellType::Point | ReferenceCellType::Pyramid => Err(Error::unsupported(
            cell,
            "no orthonormal polynomial set on this cell",
        )),
    }
}

/// Orthonormal Legendre polynomials on [0, 1] and their derivatives
fn tabulate_interval(x: &[f64], degree: usize, nderiv: usize) -> Vec<DMatrix<f64>> {
    let npts = x.len();
    let mut data = vec![DMatrix::<f64>::zeros(degree + 1, npts); nderiv + 1];
    data[0].row_mut(0).fill(1.0);

    for k in 0..=nderiv {
        let (done, rest) = data.split_at_mut(k);
        let current = &mut rest[0];
        for p in 1..=degree {
            let pf = p as f64;
            let a = 1.0 - 1.0 / pf;
            let b = (a + 1.0) * ((2.0 * pf + 1.0) / (2.0 * pf - 1.0)).sqrt();
            let c = a * ((2.0 * pf + 1.0) / (2.0 * pf - 3.0)).sqrt();
            for (i, xi) in x.iter().enumerate() {
                let mut v = (2.0 * xi - 1.0) * current[(p - 1, i)] * b;
                if p > 1 {
                    v -= current[(p - 2, i)] * c;
                }
                if k > 0 {
                    v += 2.0 * k as f64 * done[k - 1][(p - 1, i)] * b;
                }
                current[(p, i)] = v;
            }
        }
    }
    data
}

/// Orthonormal polynomials on the reference triangle
fn tabulate_triangle(x: &[f64], y: &[f64], n: usize, nderiv: usize) -> Vec<DMatrix<f64>> {
    let npts = x.len();
    let pdim = (n + 1) * (n + 2) / 2;
    let mut data = vec![DMatrix::<f64>::zeros(pdim, npts); (nderiv + 1) * (nderiv + 2) / 2];
    data[0].row_mut(0).fill(1.0);

    for kx in 0..=nderiv {
        for ky in 0..=nderiv - kx {
            let d = idx2(kx, ky);
            let (done, rest) = data.split_at_mut(d);
            let current = &mut rest[0];

            // P_p(2x + y - 1 / 1 - y) (1 - y)^p
            for p in 1..=n {
                let a = (2 * p - 1) as f64 / p as f64;
                for i in 0..npts {
                    let mut v = (2.0 * x[i] + y[i] - 1.0) * a * current[(idx2(p - 1, 0), i)];
                    if kx > 0 {
                        v += 2.0 * kx as f64 * a * done[idx2(kx - 1, ky)][(idx2(p - 1, 0), i)];
                    }
                    if ky > 0 {
                        v += ky as f64 * a * done[idx2(kx, ky - 1)][(idx2(p - 1, 0), i)];
                    }
                    if p > 1 {
                        let f = 1.0 - y[i];
                        let mut w = f * f * current[(idx2(p - 2, 0), i)];
                        if ky > 0 {
                            w += ky as f64
                                * 2.0
                                * (y[i] - 1.0)
                                * done[idx2(kx, ky - 1)][(idx2(p - 2, 0), i)];
                        }
                        if ky > 1 {
                            w += (ky * (ky - 1)) as f64
                                * done[idx2(kx, ky - 2)][(idx2(p - 2, 0), i)];
                        }
                        v -= (a - 1.0) * w;
                    }
                    current[(idx2(p, 0), i)] = v;
                }
            }

            // P_q^{(2p + 1, 0)}(2y - 1)
            for p in 0..n {
                let c = (2 * p + 3) as f64;
                for i in 0..npts {
                    let mut v = current[(idx2(p, 0), i)] * (c * y[i] - 1.0);
                    if ky > 0 {
                        v += ky as f64 * c * done[idx2(kx, ky - 1)][(idx2(p, 0), i)];
                    }
                    current[(idx2(p, 1), i)] = v;
                }
                for q in 1..n - p {
                    let (a3, a2, a4) = recurrence_terms((2 * p + 1) as f64, q + 1);
                    for i in 0..npts {
                        let mut v = current[(idx2(p, q), i)] * (a3 * (2.0 * y[i] - 1.0) + a2)
                            - a4 * current[(idx2(p, q - 1), i)];
                        if ky > 0 {
                            v += ky as f64 * 2.0 * a3 * done[idx2(kx, ky - 1)][(idx2(p, q), i)];
                        }
                        current[(idx2(p, q + 1), i)] = v;
                    }
                }
            }
        }
    }

    for table in data.iter_mut() {
        for p in 0..=n {
            for q in 0..=n - p {
                let scale = (((2 * p + 1) * (2 * p + 2 * q + 2)) as f64).sqrt();
                table.row_mut(idx2(p, q)).scale_mut(scale);
            }
        }
    }
    data
}

/// Orthonormal polynomials on the reference tetrahedron
fn tabulate_tetrahedron(
    x: &[f64],
    y: &[f64],
    z: &[f64],
    n: usize,
    nderiv: usize,
) -> Vec<DMatrix<f64>> {
    let npts = x.len();
    let pdim = (n + 1) * (n + 2) * (n + 3) / 6;
    let nd = (nderiv + 1) * (nderiv + 2) * (nderiv + 3) / 6;
    let mut data = vec![DMatrix::<f64>::zeros(pdim, npts); nd];
    data[0].row_mut(0).fill(1.0);

    for kx in 0..=nderiv {
        for ky in 0..=nderiv - kx {
            for kz in 0..=nderiv - kx - ky {
                let d = idx3(kx, ky, kz);
                let (done, rest) = data.split_at_mut(d);
                let current = &mut rest[0];
                let (kxf, kyf, kzf) = (kx as f64, ky as f64, kz as f64);

                for p in 1..=n {
                    let a = (2 * p - 1) as f64 / p as f64;
                    let r0 = idx3(p - 1, 0, 0);
                    for i in 0..npts {
                        let mut v = (2.0 * x[i] + y[i] + z[i] - 1.0) * a * current[(r0, i)];
                        if kx > 0 {
                            v += 2.0 * kxf * a * done[idx3(kx - 1, ky, kz)][(r0, i)];
                        }
                        if ky > 0 {
                            v += kyf * a * done[idx3(kx, ky - 1, kz)][(r0, i)];
                        }
                        if kz > 0 {
                            v += kzf * a * done[idx3(kx, ky, kz - 1)][(r0, i)];
                        }
                        if p > 1 {
                            let r1 = idx3(p - 2, 0, 0);
                            let f = 1.0 - y[i] - z[i];
                            let df = 2.0 * (y[i] + z[i] - 1.0);
                            let mut w = f * f * current[(r1, i)];
                            if ky > 0 {
                                w += kyf * df * done[idx3(kx, ky - 1, kz)][(r1, i)];
                            }
                            if kz > 0 {
                                w += kzf * df * done[idx3(kx, ky, kz - 1)][(r1, i)];
                            }
                            if ky > 1 {
                                w += kyf * (kyf - 1.0) * done[idx3(kx, ky - 2, kz)][(r1, i)];
                            }
                            if kz > 1 {
                                w += kzf * (kzf - 1.0) * done[idx3(kx, ky, kz - 2)][(r1, i)];
                            }
                            if ky > 0 && kz > 0 {
                                w += 2.0 * kyf * kzf * done[idx3(kx, ky - 1, kz - 1)][(r1, i)];
                            }
                            v -= (a - 1.0) * w;
                        }
                        current[(idx3(p, 0, 0), i)] = v;
                    }
                }

                for p in 0..n {
                    let c = (2 * p + 3) as f64;
                    let r0 = idx3(p, 0, 0);
                    for i in 0..npts {
                        let mut v = current[(r0, i)] * (c * y[i] + z[i] - 1.0);
                        if ky > 0 {
                            v += kyf * c * done[idx3(kx, ky - 1, kz)][(r0, i)];
                        }
                        if kz > 0 {
                            v += kzf * done[idx3(kx, ky, kz - 1)][(r0, i)];
                        }
                        current[(idx3(p, 1, 0), i)] = v;
                    }
                    for q in 1..n - p {
                        let (a3, a2, a4) = recurrence_terms((2 * p + 1) as f64, q + 1);
                        let r0 = idx3(p, q, 0);
                        let r1 = idx3(p, q - 1, 0);
                        for i in 0..npts {
                            let f = 1.0 - z[i];
                            let mut v = current[(r0, i)]
                                * (a3 * (2.0 * y[i] + z[i] - 1.0) + a2 * f)
                                - a4 * f * f * current[(r1, i)];
                            if ky > 0 {
                                v += kyf * 2.0 * a3 * done[idx3(kx, ky - 1, kz)][(r0, i)];
                            }
                            if kz > 0 {
                                v += kzf * (a3 - a2) * done[idx3(kx, ky, kz - 1)][(r0, i)];
                                v -= a4 * kzf * 2.0 * (z[i] - 1.0)
                                    * done[idx3(kx, ky, kz - 1)][(r1, i)];
                            }
                            if kz > 1 {
                                v -= a4 * kzf * (kzf - 1.0) * done[idx3(kx, ky, kz - 2)][(r1, i)];
                            }
                            current[(idx3(p, q + 1, 0), i)] = v;
                        }
                    }
                }

                for p in 0..n {
                    for q in 0..n - p {
                        let c = 2.0 * (p + q + 2) as f64;
                        let r0 = idx3(p, q, 0);
                        for i in 0..npts {
                            let mut v = current[(r0, i)] * (c * z[i] - 1.0);
                            if kz > 0 {
                                v += kzf * c * done[idx3(kx, ky, kz - 1)][(r0, i)];
                            }
                            current[(idx3(p, q, 1), i)] = v;
                        }
                        for r in 1..n - p - q {
                            let (a3, a2, a4) = recurrence_terms((2 * p + 2 * q + 2) as f64, r + 1);
                            let r0 = idx3(p, q, r);
                            let r1 = idx3(p, q, r - 1);
                            for i in 0..npts {
                                let mut v = current[(r0, i)] * (a3 * (2.0 * z[i] - 1.0) + a2)
                                    - a4 * current[(r1, i)];
                                if kz > 0 {
                                    v += kzf * 2.0 * a3 * done[idx3(kx, ky, kz - 1)][(r0, i)];
                                }
                                current[(idx3(p, q, r + 1), i)] = v;
                            }
                        }
                    }
                }
            }
        }
    }

    for table in data.iter_mut() {
        for p in 0..=n {
            for q in 0..=n - p {
                for r in 0..=n - p - q {
                    let scale = (((2 * p + 1) * (2 * p + 2 * q + 2) * (2 * p + 2 * q + 2 * r + 3))
                        as f64)
                        .sqrt();
                    table.row_mut(idx3(p, q, r)).scale_mut(scale);
                }
            }
        }
    }
    data
}

fn column(points: &DMatrix<f64>, j: usize) -> Vec<f64> {
    points.column(j).iter().copied().collect()
}

/// Tabulate the orthonormal polynomials of degree up to `degree` and their derivatives
///
/// `points` holds one point per row. The result holds one `[polynomial, point]` matrix for
/// each derivative, indexed by [derivative_index].
pub fn tabulate(
    cell: ReferenceCellType,
    degree: usize,
    nderiv: usize,
    points: &DMatrix<f64>,
) -> Result<Vec<DMatrix<f64>>> {
    polynomial_count(cell, degree)?;
    let tdim = reference_cell::dim(cell);
    if points.ncols() != tdim {
        return Err(Error::ShapeMismatch(format!(
            "points on a {cell:?} need {tdim} coordinates, got {}",
            points.ncols()
        )));
    }
    let npts = points.nrows();
    let n = degree;

    match cell {
        ReferenceCellType::Interval => Ok(tabulate_interval(&column(points, 0), n, nderiv)),
        ReferenceCellType::Triangle => Ok(tabulate_triangle(
            &column(points, 0),
            &column(points, 1),
            n,
            nderiv,
        )),
        ReferenceCellType::Tetrahedron => Ok(tabulate_tetrahedron(
            &column(points, 0),
            &column(points, 1),
            &column(points, 2),
            n,
            nderiv,
        )),
        ReferenceCellType::Quadrilateral => {
            let lx = tabulate_interval(&column(points, 0), n, nderiv);
            let ly = tabulate_interval(&column(points, 1), n, nderiv);
            let mut data = vec![
                DMatrix::<f64>::zeros((n + 1) * (n + 1), npts);
                derivative_count(cell, nderiv)
            ];
            for kx in 0..=nderiv {
                for ky in 0..=nderiv - kx {
                    let table = &mut data[idx2(kx, ky)];
                    for j in 0..=n {
                        for i in 0..=n {
                            for pt in 0..npts {
                                table[(j * (n + 1) + i, pt)] = lx[kx][(i, pt)] * ly[ky][(j, pt)];
                            }
                        }
                    }
                }
            }
            Ok(data)
        }
        ReferenceCellType::Hexahedron => {
            let lx = tabulate_interval(&column(points, 0), n, nderiv);
            let ly = tabulate_interval(&column(points, 1), n, nderiv);
            let lz = tabulate_interval(&column(points, 2), n, nderiv);
            let m = n + 1;
            let mut data =
                vec![DMatrix::<f64>::zeros(m * m * m, npts); derivative_count(cell, nderiv)];
            for kx in 0..=nderiv {
                for ky in 0..=nderiv - kx {
                    for kz in 0..=nderiv - kx - ky {
                        let table = &mut data[idx3(kx, ky, kz)];
                        for k in 0..m {
                            for j in 0..m {
                                for i in 0..m {
                                    for pt in 0..npts {
                                        table[(k * m * m + j * m + i, pt)] = lx[kx][(i, pt)]
                                            * ly[ky][(j, pt)]
                                            * lz[kz][(k, pt)];
                                    }
                                }
                            }
                        }
                    }
                }
            }
            Ok(data)
        }
        ReferenceCellType::Prism => {
            let tri = tabulate_triangle(&column(points, 0), &column(points, 1), n, nderiv);
            let lz = tabulate_interval(&column(points, 2), n, nderiv);
            let tdim_count = (n + 1) * (n + 2) / 2;
            let mut data = vec![
                DMatrix::<f64>::zeros(tdim_count * (n + 1), npts);
                derivative_count(cell, nderiv)
            ];
            for kx in 0..=nderiv {
                for ky in 0..=nderiv - kx {
                    for kz in 0..=nderiv - kx - ky {
                        let table = &mut data[idx3(kx, ky, kz)];
                        for t in 0..tdim_count {
                            for r in 0..=n {
                                for pt in 0..npts {
                                    table[(t * (n + 1) + r, pt)] =
                                        tri[idx2(kx, ky)][(t, pt)] * lz[kz][(r, pt)];
                                }
                            }
                        }
                    }
                }
            }
            Ok(data)
        }
        ReferenceCellType::Point | ReferenceCellType::Pyramid => Err(Error::unsupported(
            cell,
            "no orthonormal polynomial set on this cell",
        )),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::quadrature::make_quadrature;
    use approx::assert_relative_eq;
    use paste::paste;

    macro_rules! test_orthonormal {
        ($($cell:ident),+) => {
        $(
            paste! {
                #[test]
                fn [<test_orthonormal_ $cell:lower>]() {
                    let cell = ReferenceCellType::[<$cell>];
                    for degree in 0..5 {
                        let rule = make_quadrature(cell, 2 * degree).unwrap();
                        let table = tabulate(cell, degree, 0, &rule.points).unwrap();
                        let pdim = polynomial_count(cell, degree).unwrap();
                        assert_eq!(table[0].nrows(), pdim);
                        for i in 0..pdim {
                            for j in 0..pdim {
                                let product = (0..rule.npoints())
                                    .map(|k| rule.weights[k] * table[0][(i, k)] * table[0][(j, k)])
                                    .sum::<f64>();
                                let expected = if i == j { 1.0 } else { 0.0 };
                                assert_relative_eq!(product, expected, epsilon = 1e-10);
                            }
                        }
                    }
                }

                #[test]
                fn [<test_derivatives_ $cell:lower>]() {
                    let cell = ReferenceCellType::[<$cell>];
                    let tdim = reference_cell::dim(cell);
                    let base = [0.15, 0.2, 0.3];
                    let eps = 1e-6;
                    let degree = 4;
                    let points = DMatrix::from_fn(1, tdim, |_, j| base[j]);
                    let table = tabulate(cell, degree, 2, &points).unwrap();
                    assert_eq!(table.len(), derivative_count(cell, 2));
                    for dir in 0..tdim {
                        let mut plus = points.clone();
                        plus[(0, dir)] += eps;
                        let mut minus = points.clone();
                        minus[(0, dir)] -= eps;
                        let tp = tabulate(cell, degree, 1, &plus).unwrap();
                        let tm = tabulate(cell, degree, 1, &minus).unwrap();
                        let mut orders = vec![0; tdim];
                        orders[dir] = 1;
                        let first = derivative_index(&orders).unwrap();
                        orders[dir] = 2;
                        let second = derivative_index(&orders).unwrap();
                        for p in 0..table[0].nrows() {
                            assert_relative_eq!(
                                table[first][(p, 0)],
                                (tp[0][(p, 0)] - tm[0][(p, 0)]) / (2.0 * eps),
                                epsilon = 1e-5, max_relative = 1e-5
                            );
                            assert_relative_eq!(
                                table[second][(p, 0)],
                                (tp[first][(p, 0)] - tm[first][(p, 0)]) / (2.0 * eps),
                                epsilon = 1e-5, max_relative = 1e-5
                            );
                        }
                    }
                }
            }
        )*
        };
    }

    test_orthonormal!(Interval, Triangle, Quadrilateral, Tetrahedron, Hexahedron, Prism);

    #[test]
    fn test_mixed_derivatives_tetrahedron() {
        let cell = ReferenceCellType::Tetrahedron;
        let points = DMatrix::from_row_slice(1, 3, &[0.1, 0.25, 0.35]);
        let eps = 1e-6;
        let table = tabulate(cell, 4, 2, &points).unwrap();
        let mut plus = points.clone();
        plus[(0, 2)] += eps;
        let mut minus = points.clone();
        minus[(0, 2)] -= eps;
        let tp = tabulate(cell, 4, 1, &plus).unwrap();
        let tm = tabulate(cell, 4, 1, &minus).unwrap();
        let dy = derivative_index(&[0, 1, 0]).unwrap();
        let dyz = derivative_index(&[0, 1, 1]).unwrap();
        let dx = derivative_index(&[1, 0, 0]).unwrap();
        let dxz = derivative_index(&[1, 0, 1]).unwrap();
        for p in 0..table[0].nrows() {
            assert_relative_eq!(
                table[dyz][(p, 0)],
                (tp[dy][(p, 0)] - tm[dy][(p, 0)]) / (2.0 * eps),
                epsilon = 1e-5, max_relative = 1e-5
            );
            assert_relative_eq!(
                table[dxz][(p, 0)],
                (tp[dx][(p, 0)] - tm[dx][(p, 0)]) / (2.0 * eps),
                epsilon = 1e-5, max_relative = 1e-5
            );
        }
    }

    #[test]
    fn test_known_interval() {
        let points = DMatrix::from_column_slice(4, 1, &[0.0, 0.2, 0.6, 1.0]);
        let table = tabulate(ReferenceCellType::Interval, 2, 0, &points).unwrap();
        for i in 0..4 {
            let x = points[(i, 0)];
            assert_relative_eq!(table[0][(0, i)], 1.0, epsilon = 1e-14);
            assert_relative_eq!(table[0][(1, i)], 3f64.sqrt() * (2.0 * x - 1.0), epsilon = 1e-14);
            assert_relative_eq!(
                table[0][(2, i)],
                5f64.sqrt() * (6.0 * x * x - 6.0 * x + 1.0),
                epsilon = 1e-14
            );
        }
    }

    #[test]
    fn test_known_triangle() {
        let points = DMatrix::from_row_slice(3, 2, &[0.0, 0.0, 0.3, 0.5, 0.1, 0.9]);
        let table = tabulate(ReferenceCellType::Triangle, 1, 0, &points).unwrap();
        for i in 0..3 {
            let (x, y) = (points[(i, 0)], points[(i, 1)]);
            assert_relative_eq!(table[0][(0, i)], 2f64.sqrt(), epsilon = 1e-14);
            assert_relative_eq!(
                table[0][(1, i)],
                2.0 * 3f64.sqrt() * (2.0 * x + y - 1.0),
                epsilon = 1e-14
            );
            assert_relative_eq!(table[0][(2, i)], 2.0 * (3.0 * y - 1.0), epsilon = 1e-14);
        }
    }

    #[test]
    fn test_known_quadrilateral() {
        let points = DMatrix::from_row_slice(2, 2, &[0.2, 0.7, 0.9, 0.4]);
        let table = tabulate(ReferenceCellType::Quadrilateral, 2, 0, &points).unwrap();
        for i in 0..2 {
            let (x, y) = (points[(i, 0)], points[(i, 1)]);
            assert_relative_eq!(
                table[0][(4, i)],
                3.0 * (2.0 * x - 1.0) * (2.0 * y - 1.0),
                epsilon = 1e-13
            );
        }
    }

    #[test]
    fn test_counts() {
        assert_eq!(polynomial_count(ReferenceCellType::Triangle, 3).unwrap(), 10);
        assert_eq!(polynomial_count(ReferenceCellType::Tetrahedron, 2).unwrap(), 10);
        assert_eq!(polynomial_count(ReferenceCellType::Prism, 1).unwrap(), 6);
        assert!(polynomial_count(ReferenceCellType::Pyramid, 1).is_err());
        assert!(polynomial_count(ReferenceCellType::Point, 0).is_err());
        assert_eq!(derivative_count(ReferenceCellType::Triangle, 2), 6);
        assert_eq!(derivative_count(ReferenceCellType::Hexahedron, 1), 4);
        assert_eq!(derivative_index(&[1, 0]).unwrap(), 1);
        assert_eq!(derivative_index(&[0, 1]).unwrap(), 2);
        assert_eq!(derivative_index(&[0, 0, 1]).unwrap(), 3);
    }

    #[test]
    fn test_derivative_index_dimension() {
        assert_eq!(derivative_index(&[]).unwrap(), 0);
        assert_eq!(derivative_index(&[2, 1, 0]).unwrap(), 11);
        assert!(matches!(
            derivative_index(&[0, 0, 0, 1]),
            Err(Error::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_wrong_point_shape() {
        let points = DMatrix::<f64>::zeros(3, 2);
        assert!(matches!(
            tabulate(ReferenceCellType::Tetrahedron, 1, 0, &points),
            Err(Error::ShapeMismatch(_))
        ));
    }
}
