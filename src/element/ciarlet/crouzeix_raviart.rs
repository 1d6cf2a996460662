//! Crouzeix-Raviart elements

use crate::element::ciarlet::{check_cell, entity_midpoint, CiarletElement};
use crate::element::moments::make_point_evaluations;
use crate::element::permutations::Lattice;
use crate::element::polynomials::polynomial_count;
use crate::element::reference_cell;
use crate::types::{Continuity, ElementFamily, Error, MapType, ReferenceCellType, Result};
use nalgebra::DMatrix;

/// Create a Crouzeix-Raviart element
///
/// The DOFs are point evaluations at the facet midpoints. Only degree 1 is defined.
pub fn create(
    cell_type: ReferenceCellType,
    degree: usize,
    continuity: Continuity,
) -> Result<CiarletElement> {
    check_cell(
        ElementFamily::CrouzeixRaviart,
        cell_type,
        &[ReferenceCellType::Triangle, ReferenceCellType::Tetrahedron],
    )?;
    if degree != 1 {
        return Err(Error::InvalidDegree {
            family: ElementFamily::CrouzeixRaviart,
            degree,
            reason: "only degree 1 is supported".to_string(),
        });
    }

    let tdim = reference_cell::dim(cell_type);
    let facet_dim = tdim - 1;
    let points = (0..reference_cell::entity_counts(cell_type)[facet_dim])
        .map(|f| {
            reference_cell::sub_entity_geometry(cell_type, facet_dim, f)
                .map(|geometry| entity_midpoint(&geometry))
        })
        .collect::<Result<Vec<_>>>()?;
    let lattice = if facet_dim == 1 {
        Lattice::Interval(1)
    } else {
        Lattice::Triangle(1)
    };

    let dim = polynomial_count(cell_type, degree)?;
    CiarletElement::create(
        ElementFamily::CrouzeixRaviart,
        cell_type,
        degree,
        vec![],
        DMatrix::<f64>::identity(dim, dim),
        &[make_point_evaluations(
            cell_type,
            degree,
            facet_dim,
            points,
            Some(lattice),
        )?],
        MapType::Identity,
        continuity,
        degree,
    )
}
