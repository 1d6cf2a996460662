//! Lagrange elements

use crate::element::ciarlet::{check_cell, entity_midpoint, lattice_points, CiarletElement};
use crate::element::moments::make_point_evaluations;
use crate::element::permutations::Lattice;
use crate::element::polynomials::polynomial_count;
use crate::element::reference_cell;
use crate::types::{Continuity, ElementFamily, Error, MapType, ReferenceCellType, Result};
use nalgebra::DMatrix;

/// Create a Lagrange element
///
/// Continuous elements have point evaluations at the vertices and at equispaced points inside
/// each sub-entity. Discontinuous elements use the full equispaced lattice of the cell, with the
/// last coordinate varying slowest.
pub fn create(
    cell_type: ReferenceCellType,
    degree: usize,
    continuity: Continuity,
) -> Result<CiarletElement> {
    check_cell(
        ElementFamily::Lagrange,
        cell_type,
        &[
            ReferenceCellType::Interval,
            ReferenceCellType::Triangle,
            ReferenceCellType::Tetrahedron,
        ],
    )?;
    if degree == 0 && continuity == Continuity::Continuous {
        return Err(Error::InvalidDegree {
            family: ElementFamily::Lagrange,
            degree,
            reason: "continuous Lagrange elements need degree at least 1".to_string(),
        });
    }

    let tdim = reference_cell::dim(cell_type);
    let dim = polynomial_count(cell_type, degree)?;
    let wcoeffs = DMatrix::<f64>::identity(dim, dim);

    let functionals = if continuity == Continuity::Discontinuous {
        let vertices = reference_cell::vertices(cell_type);
        let points = if degree == 0 {
            entity_midpoint(&vertices)
        } else {
            lattice_points(&vertices, degree, false)
        };
        vec![make_point_evaluations(cell_type, degree, tdim, vec![points], None)?]
    } else {
        let counts = reference_cell::entity_counts(cell_type);
        (0..=tdim)
            .map(|d| {
                let points = (0..counts[d])
                    .map(|e| {
                        let geometry = reference_cell::sub_entity_geometry(cell_type, d, e)?;
                        Ok(lattice_points(&geometry, degree, true))
                    })
                    .collect::<Result<Vec<_>>>()?;
                let lattice = match d {
                    1 if d < tdim => Some(Lattice::Interval(degree - 1)),
                    2 if d < tdim => Some(Lattice::Triangle(degree.saturating_sub(2))),
                    _ => None,
                };
                make_point_evaluations(cell_type, degree, d, points, lattice)
            })
            .collect::<Result<Vec<_>>>()?
    };

    CiarletElement::create(
        ElementFamily::Lagrange,
        cell_type,
        degree,
        vec![],
        wcoeffs,
        &functionals,
        MapType::Identity,
        continuity,
        degree,
    )
}
