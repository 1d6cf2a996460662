//! Nedelec elements
//!
//! The first kind spans the polynomials of degree k - 1 plus the degree k fields `x x p` for
//! homogeneous p of degree k - 1. The second kind spans the full polynomials of degree k.

use crate::element::ciarlet::{check_cell, lagrange, raviart_thomas, CiarletElement};
use crate::element::moments::{
    make_dot_integral_moments, make_integral_moments, make_tangent_integral_moments,
};
use crate::element::polynomials::{polynomial_count, tabulate};
use crate::element::reference_cell;
use crate::quadrature::make_quadrature;
use crate::types::{Continuity, ElementFamily, Error, MapType, ReferenceCellType, Result};
use nalgebra::DMatrix;

fn check_degree(family: ElementFamily, degree: usize) -> Result<()> {
    if degree < 1 {
        Err(Error::InvalidDegree {
            family,
            degree,
            reason: "degree must be at least 1".to_string(),
        })
    } else {
        Ok(())
    }
}

/// Integral of `w p_a x_j p_b` over the cell, for the orthonormal polynomials `p_a` and `p_b`
struct Projection {
    weights: Vec<f64>,
    points: DMatrix<f64>,
    table: Vec<DMatrix<f64>>,
}

impl Projection {
    fn new(cell_type: ReferenceCellType, degree: usize) -> Result<Self> {
        let rule = make_quadrature(cell_type, 2 * degree)?;
        let table = tabulate(cell_type, degree, 0, &rule.points)?;
        Ok(Self {
            weights: rule.weights,
            points: rule.points,
            table,
        })
    }

    fn psize(&self) -> usize {
        self.table[0].nrows()
    }

    fn integral(&self, a: usize, j: usize, b: usize) -> f64 {
        self.weights
            .iter()
            .enumerate()
            .map(|(q, w)| w * self.table[0][(a, q)] * self.points[(q, j)] * self.table[0][(b, q)])
            .sum()
    }
}

fn create_first_kind_2d_space(degree: usize) -> Result<DMatrix<f64>> {
    let cell_type = ReferenceCellType::Triangle;
    let nv = polynomial_count(cell_type, degree - 1)?;
    let ns0 = if degree > 1 {
        polynomial_count(cell_type, degree - 2)?
    } else {
        0
    };
    let ns = degree;

    let projection = Projection::new(cell_type, degree)?;
    let psize = projection.psize();
    let mut wcoeffs = DMatrix::<f64>::zeros(nv * 2 + ns, psize * 2);
    for i in 0..nv {
        wcoeffs[(i, i)] = 1.0;
        wcoeffs[(nv + i, psize + i)] = 1.0;
    }
    for i in 0..ns {
        for k in 0..psize {
            wcoeffs[(2 * nv + i, k)] = projection.integral(ns0 + i, 1, k);
            wcoeffs[(2 * nv + i, k + psize)] = -projection.integral(ns0 + i, 0, k);
        }
    }
    Ok(wcoeffs)
}

fn create_first_kind_3d_space(degree: usize) -> Result<DMatrix<f64>> {
    let cell_type = ReferenceCellType::Tetrahedron;
    let tdim = 3;
    let nv = polynomial_count(cell_type, degree - 1)?;
    let ns0 = if degree > 1 {
        polynomial_count(cell_type, degree - 2)?
    } else {
        0
    };
    let ns = degree * (degree + 1) / 2;
    // The fields (0, -z p, y p) for the first ns_remove homogeneous p are combinations of the
    // others
    let ns_remove = degree * (degree - 1) / 2;
    let ndofs = nv * tdim + 3 * ns - ns_remove;

    let projection = Projection::new(cell_type, degree)?;
    let psize = projection.psize();
    let mut wcoeffs = DMatrix::<f64>::zeros(ndofs, psize * tdim);
    for c in 0..tdim {
        for i in 0..nv {
            wcoeffs[(nv * c + i, psize * c + i)] = 1.0;
        }
    }
    let base = tdim * nv;
    for i in 0..ns {
        for k in 0..psize {
            let wz = projection.integral(ns0 + i, 2, k);
            if i >= ns_remove {
                wcoeffs[(base + i - ns_remove, psize + k)] = -wz;
            }
            wcoeffs[(base + i + ns - ns_remove, k)] = wz;

            let wy = projection.integral(ns0 + i, 1, k);
            wcoeffs[(base + i + 2 * ns - ns_remove, k)] = -wy;
            if i >= ns_remove {
                wcoeffs[(base + i - ns_remove, 2 * psize + k)] = wy;
            }

            let wx = projection.integral(ns0 + i, 0, k);
            wcoeffs[(base + i + ns - ns_remove, 2 * psize + k)] = -wx;
            wcoeffs[(base + i + 2 * ns - ns_remove, psize + k)] = wx;
        }
    }
    Ok(wcoeffs)
}

/// Create a Nedelec (first kind) element
pub fn create_first_kind(
    cell_type: ReferenceCellType,
    degree: usize,
    continuity: Continuity,
) -> Result<CiarletElement> {
    let family = ElementFamily::NedelecFirstKind;
    check_cell(
        family,
        cell_type,
        &[ReferenceCellType::Triangle, ReferenceCellType::Tetrahedron],
    )?;
    check_degree(family, degree)?;

    let q_deg = 2 * degree;
    let (tdim, wcoeffs) = if cell_type == ReferenceCellType::Triangle {
        (2, create_first_kind_2d_space(degree)?)
    } else {
        (3, create_first_kind_3d_space(degree)?)
    };

    let mut functionals = vec![make_tangent_integral_moments(
        &lagrange::create(ReferenceCellType::Interval, degree - 1, Continuity::Discontinuous)?,
        cell_type,
        tdim,
        degree,
        q_deg,
    )?];
    if degree > 1 {
        functionals.push(make_integral_moments(
            &lagrange::create(
                ReferenceCellType::Triangle,
                degree - 2,
                Continuity::Discontinuous,
            )?,
            cell_type,
            tdim,
            degree,
            q_deg,
        )?);
    }
    if tdim == 3 && degree > 2 {
        functionals.push(make_integral_moments(
            &lagrange::create(cell_type, degree - 3, Continuity::Discontinuous)?,
            cell_type,
            tdim,
            degree,
            q_deg,
        )?);
    }

    CiarletElement::create(
        family,
        cell_type,
        degree,
        vec![tdim],
        wcoeffs,
        &functionals,
        MapType::CovariantPiola,
        continuity,
        degree,
    )
}

/// Create a Nedelec (second kind) element
///
/// The edge DOFs are tangential moments against degree k polynomials. The face DOFs are dot
/// moments against Raviart-Thomas of degree k - 1 and, on a tetrahedron, the interior DOFs are
/// dot moments against Raviart-Thomas of degree k - 2.
pub fn create_second_kind(
    cell_type: ReferenceCellType,
    degree: usize,
    continuity: Continuity,
) -> Result<CiarletElement> {
    let family = ElementFamily::NedelecSecondKind;
    check_cell(
        family,
        cell_type,
        &[ReferenceCellType::Triangle, ReferenceCellType::Tetrahedron],
    )?;
    check_degree(family, degree)?;

    let tdim = reference_cell::dim(cell_type);
    let psize = polynomial_count(cell_type, degree)?;
    let wcoeffs = DMatrix::<f64>::identity(tdim * psize, tdim * psize);

    let q_deg = 2 * degree;
    let mut functionals = vec![make_tangent_integral_moments(
        &lagrange::create(ReferenceCellType::Interval, degree, Continuity::Discontinuous)?,
        cell_type,
        tdim,
        degree,
        q_deg,
    )?];
    if degree > 1 {
        functionals.push(make_dot_integral_moments(
            &raviart_thomas::create(
                ReferenceCellType::Triangle,
                degree - 1,
                Continuity::Continuous,
            )?,
            cell_type,
            tdim,
            degree,
            q_deg,
        )?);
    }
    if tdim == 3 && degree > 2 {
        functionals.push(make_dot_integral_moments(
            &raviart_thomas::create(cell_type, degree - 2, Continuity::Continuous)?,
            cell_type,
            tdim,
            degree,
            q_deg,
        )?);
    }

    CiarletElement::create(
        family,
        cell_type,
        degree,
        vec![tdim],
        wcoeffs,
        &functionals,
        MapType::CovariantPiola,
        continuity,
        degree,
    )
}
