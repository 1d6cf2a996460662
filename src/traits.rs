//! Trait definitions

use crate::element::ciarlet::Tabulation;
use crate::element::polynomials::derivative_count;
use crate::types::{Continuity, ElementFamily, MapType, ReferenceCellType, Result};
use nalgebra::DMatrix;

pub trait FiniteElement {
    //! A finite element defined on a reference cell

    /// The element family
    fn family(&self) -> ElementFamily;

    /// The reference cell type
    fn cell_type(&self) -> ReferenceCellType;

    /// The polynomial degree
    fn degree(&self) -> usize;

    /// The highest degree polynomial in the element's polynomial set
    fn highest_degree(&self) -> usize;

    /// The shape of the values of a basis function
    fn value_shape(&self) -> &[usize];

    /// The number of values of a basis function
    fn value_size(&self) -> usize;

    /// The push forward / pull back map to use for this element
    fn map_type(&self) -> MapType;

    /// The continuity of the element between cells
    fn continuity(&self) -> Continuity;

    /// The number of basis functions
    fn dim(&self) -> usize;

    /// Tabulate the values of the basis functions and their derivatives at a set of points
    ///
    /// `points` has one row per point. The result is indexed by derivative, point, basis function
    /// and value component.
    fn tabulate(&self, points: &DMatrix<f64>, nderivs: usize) -> Result<Tabulation>;

    /// The DOFs that are associated with a subentity of the reference cell
    fn entity_dofs(&self, entity_dim: usize, entity_number: usize) -> Option<&[usize]>;

    /// The shape of the table returned by [FiniteElement::tabulate]
    fn tabulate_array_shape(&self, nderivs: usize, npoints: usize) -> [usize; 4] {
        [
            derivative_count(self.cell_type(), nderivs),
            npoints,
            self.dim(),
            self.value_size(),
        ]
    }
}
