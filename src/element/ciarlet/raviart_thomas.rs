//! Raviart-Thomas elements

use crate::element::ciarlet::{check_cell, lagrange, CiarletElement};
use crate::element::moments::{make_integral_moments, make_normal_integral_moments};
use crate::element::polynomials::{polynomial_count, tabulate};
use crate::element::reference_cell;
use crate::quadrature::make_quadrature;
use crate::types::{Continuity, ElementFamily, Error, MapType, ReferenceCellType, Result};
use nalgebra::DMatrix;

/// Create a Raviart-Thomas element
pub fn create(
    cell_type: ReferenceCellType,
    degree: usize,
    continuity: Continuity,
) -> Result<CiarletElement> {
    check_cell(
        ElementFamily::RaviartThomas,
        cell_type,
        &[ReferenceCellType::Triangle, ReferenceCellType::Tetrahedron],
    )?;
    if degree < 1 {
        return Err(Error::InvalidDegree {
            family: ElementFamily::RaviartThomas,
            degree,
            reason: "degree must be at least 1".to_string(),
        });
    }

    let tdim = reference_cell::dim(cell_type);
    let facet_type = if tdim == 2 {
        ReferenceCellType::Interval
    } else {
        ReferenceCellType::Triangle
    };

    // Vector polynomials of degree k - 1
    let nv = polynomial_count(cell_type, degree - 1)?;
    // Scalar polynomials of degree k - 2
    let ns0 = if degree > 1 {
        polynomial_count(cell_type, degree - 2)?
    } else {
        0
    };
    // Homogeneous polynomials of degree k - 1, multiplied by x
    let ns = polynomial_count(facet_type, degree - 1)?;

    let rule = make_quadrature(cell_type, 2 * degree)?;
    let table = tabulate(cell_type, degree, 0, &rule.points)?;
    let psize = table[0].nrows();

    let mut wcoeffs = DMatrix::<f64>::zeros(nv * tdim + ns, psize * tdim);
    for j in 0..tdim {
        for i in 0..nv {
            wcoeffs[(nv * j + i, psize * j + i)] = 1.0;
        }
    }
    for i in 0..ns {
        for k in 0..psize {
            for j in 0..tdim {
                wcoeffs[(nv * tdim + i, k + psize * j)] = (0..rule.npoints())
                    .map(|q| {
                        rule.weights[q]
                            * table[0][(ns0 + i, q)]
                            * rule.points[(q, j)]
                            * table[0][(k, q)]
                    })
                    .sum();
            }
        }
    }

    let q_deg = 2 * degree;
    let mut functionals = vec![make_normal_integral_moments(
        &lagrange::create(facet_type, degree - 1, Continuity::Discontinuous)?,
        cell_type,
        tdim,
        degree,
        q_deg,
    )?];
    if degree > 1 {
        functionals.push(make_integral_moments(
            &lagrange::create(cell_type, degree - 2, Continuity::Discontinuous)?,
            cell_type,
            tdim,
            degree,
            q_deg,
        )?);
    }

    CiarletElement::create(
        ElementFamily::RaviartThomas,
        cell_type,
        degree,
        vec![tdim],
        wcoeffs,
        &functionals,
        MapType::ContravariantPiola,
        continuity,
        degree,
    )
}
