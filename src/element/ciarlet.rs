//! Ciarlet finite elements
//!
//! An element is defined by a polynomial set (the rows of `wcoeffs`, written in the orthonormal
//! polynomials) and a set of dual functionals. The basis functions are the combinations of the
//! polynomial set that are dual to the functionals.

use crate::element::dual::DualMatrix;
use crate::element::moments::FunctionalBlock;
use crate::element::permutations::{base_permutations, DofPermutation};
use crate::element::{polynomials, reference_cell};
use crate::traits::FiniteElement;
use crate::types::{Continuity, ElementFamily, Error, MapType, ReferenceCellType, Result};
use log::debug;
use nalgebra::DMatrix;
use std::ops::Index;

pub mod crouzeix_raviart;
pub mod lagrange;
pub mod nedelec;
pub mod raviart_thomas;

/// Compute the coefficients of the basis functions in the orthonormal polynomials
///
/// The result `C = (W D^T)^-1 W` satisfies `D C^T = I`.
pub fn compute_expansion_coefficients(
    wcoeffs: &DMatrix<f64>,
    dual: &DMatrix<f64>,
) -> Result<DMatrix<f64>> {
    if wcoeffs.shape() != dual.shape() {
        return Err(Error::ShapeMismatch(format!(
            "polynomial set has shape {:?} but dual matrix has shape {:?}",
            wcoeffs.shape(),
            dual.shape()
        )));
    }
    if wcoeffs.nrows() == 0 {
        return Ok(wcoeffs.clone());
    }
    let lu = (wcoeffs * dual.transpose()).lu();
    let pivots = lu.u().diagonal().abs();
    let largest = pivots.max();
    if largest == 0.0 || pivots.min() < 1e-12 * largest {
        return Err(Error::SingularSystem);
    }
    lu.solve(wcoeffs).ok_or(Error::SingularSystem)
}

/// Values of basis functions and their derivatives
///
/// Indexed by `[derivative, point, basis function, component]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tabulation {
    shape: [usize; 4],
    data: Vec<f64>,
}

impl Tabulation {
    fn zeros(shape: [usize; 4]) -> Self {
        Self {
            shape,
            data: vec![0.0; shape.iter().product()],
        }
    }

    fn offset(&self, index: [usize; 4]) -> Option<usize> {
        if index.iter().zip(&self.shape).any(|(i, s)| i >= s) {
            return None;
        }
        Some(
            ((index[0] * self.shape[1] + index[1]) * self.shape[2] + index[2]) * self.shape[3]
                + index[3],
        )
    }

    /// The shape of the table
    pub fn shape(&self) -> [usize; 4] {
        self.shape
    }

    /// Get an entry, or `None` if the index is out of bounds
    pub fn get(&self, index: [usize; 4]) -> Option<f64> {
        self.offset(index).map(|i| self.data[i])
    }

    fn get_mut(&mut self, index: [usize; 4]) -> Option<&mut f64> {
        self.offset(index).map(|i| &mut self.data[i])
    }
}

impl Index<[usize; 4]> for Tabulation {
    type Output = f64;
    fn index(&self, index: [usize; 4]) -> &f64 {
        match self.offset(index) {
            Some(i) => &self.data[i],
            None => panic!(
                "Index {index:?} out of bounds for tabulation of shape {:?}",
                self.shape
            ),
        }
    }
}

/// A Ciarlet element
#[derive(Debug, Clone)]
pub struct CiarletElement {
    family: ElementFamily,
    cell_type: ReferenceCellType,
    degree: usize,
    highest_degree: usize,
    map_type: MapType,
    value_shape: Vec<usize>,
    value_size: usize,
    continuity: Continuity,
    wcoeffs: DMatrix<f64>,
    dual: DualMatrix,
    coefficients: DMatrix<f64>,
    entity_dofs: Vec<Vec<Vec<usize>>>,
    base_permutations: Vec<DofPermutation>,
}

impl CiarletElement {
    /// Create a Ciarlet element
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        family: ElementFamily,
        cell_type: ReferenceCellType,
        degree: usize,
        value_shape: Vec<usize>,
        wcoeffs: DMatrix<f64>,
        functionals: &[FunctionalBlock],
        map_type: MapType,
        continuity: Continuity,
        highest_degree: usize,
    ) -> Result<Self> {
        let value_size = value_shape.iter().product::<usize>();
        let pdim = polynomials::polynomial_count(cell_type, highest_degree)?;
        if wcoeffs.ncols() != value_size * pdim {
            return Err(Error::ShapeMismatch(format!(
                "polynomial set has {} columns, expected {}",
                wcoeffs.ncols(),
                value_size * pdim
            )));
        }

        let mut dual = DualMatrix::new(cell_type, highest_degree, value_size, functionals)?;
        if continuity == Continuity::Discontinuous {
            dual = dual.into_discontinuous();
        }
        let coefficients = compute_expansion_coefficients(&wcoeffs, dual.matrix())?;
        let base_permutations = base_permutations(&dual)?;
        let entity_dofs = dual.entity_dofs();

        debug!(
            "Created {continuity:?} {family:?} element of degree {degree} on a {cell_type:?} with {} DOFs",
            coefficients.nrows()
        );

        Ok(Self {
            family,
            cell_type,
            degree,
            highest_degree,
            map_type,
            value_shape,
            value_size,
            continuity,
            wcoeffs,
            dual,
            coefficients,
            entity_dofs,
            base_permutations,
        })
    }

    /// The coefficients of the polynomial set in the orthonormal polynomials
    pub fn wcoeffs(&self) -> &DMatrix<f64> {
        &self.wcoeffs
    }

    /// The dual matrix
    pub fn dual_matrix(&self) -> &DualMatrix {
        &self.dual
    }

    /// The coefficients of the basis functions in the orthonormal polynomials
    ///
    /// Row `b` holds basis function `b`; column `c * npolys + k` is the coefficient of
    /// polynomial `k` in component `c`.
    pub fn coefficients(&self) -> &DMatrix<f64> {
        &self.coefficients
    }

    /// The number of DOFs attached to each sub-entity, indexed by dimension and then entity
    pub fn entity_dof_counts(&self) -> Vec<Vec<usize>> {
        self.entity_dofs
            .iter()
            .map(|dofs| dofs.iter().map(|d| d.len()).collect())
            .collect()
    }

    /// The permutation of the DOFs for each symmetry generator of the cell
    pub fn base_permutations(&self) -> &[DofPermutation] {
        &self.base_permutations
    }
}

impl FiniteElement for CiarletElement {
    fn family(&self) -> ElementFamily {
        self.family
    }
    fn cell_type(&self) -> ReferenceCellType {
        self.cell_type
    }
    fn degree(&self) -> usize {
        self.degree
    }
    fn highest_degree(&self) -> usize {
        self.highest_degree
    }
    fn value_shape(&self) -> &[usize] {
        &self.value_shape
    }
    fn value_size(&self) -> usize {
        self.value_size
    }
    fn map_type(&self) -> MapType {
        self.map_type
    }
    fn continuity(&self) -> Continuity {
        self.continuity
    }
    fn dim(&self) -> usize {
        self.coefficients.nrows()
    }
    fn tabulate(&self, points: &DMatrix<f64>, nderivs: usize) -> Result<Tabulation> {
        let table = polynomials::tabulate(self.cell_type, self.highest_degree, nderivs, points)?;
        let pdim = polynomials::polynomial_count(self.cell_type, self.highest_degree)?;
        let mut data = Tabulation::zeros(self.tabulate_array_shape(nderivs, points.nrows()));

        for (d, t) in table.iter().enumerate() {
            for c in 0..self.value_size {
                let values = self.coefficients.columns(c * pdim, pdim) * t;
                for b in 0..values.nrows() {
                    for p in 0..values.ncols() {
                        if let Some(entry) = data.get_mut([d, p, b, c]) {
                            *entry = values[(b, p)];
                        }
                    }
                }
            }
        }
        Ok(data)
    }
    fn entity_dofs(&self, entity_dim: usize, entity_number: usize) -> Option<&[usize]> {
        self.entity_dofs
            .get(entity_dim)
            .and_then(|dofs| dofs.get(entity_number))
            .map(|dofs| dofs.as_slice())
    }
}

/// Create an element
///
/// The family, cell and degree are checked before any numerical work is done.
pub fn build_element(
    family: ElementFamily,
    cell_type: ReferenceCellType,
    degree: usize,
    continuity: Continuity,
) -> Result<CiarletElement> {
    match family {
        ElementFamily::Lagrange => lagrange::create(cell_type, degree, continuity),
        ElementFamily::RaviartThomas => raviart_thomas::create(cell_type, degree, continuity),
        ElementFamily::NedelecFirstKind => {
            nedelec::create_first_kind(cell_type, degree, continuity)
        }
        ElementFamily::NedelecSecondKind => {
            nedelec::create_second_kind(cell_type, degree, continuity)
        }
        ElementFamily::CrouzeixRaviart => crouzeix_raviart::create(cell_type, degree, continuity),
    }
}

/// Check that a cell is one of those supported by a family
pub(crate) fn check_cell(
    family: ElementFamily,
    cell_type: ReferenceCellType,
    supported: &[ReferenceCellType],
) -> Result<()> {
    if supported.contains(&cell_type) {
        Ok(())
    } else {
        Err(Error::unsupported(
            cell_type,
            &format!("{family:?} elements are only defined on {supported:?}"),
        ))
    }
}

/// The points of an equispaced lattice on a sub-simplex
///
/// `geometry` holds the vertices of the sub-simplex, one per row. The lattice has `n` intervals
/// along each edge, and the last coordinate varies slowest. If `interior` is set, points on the
/// boundary of the sub-simplex are left out.
pub(crate) fn lattice_points(geometry: &DMatrix<f64>, n: usize, interior: bool) -> DMatrix<f64> {
    let d = geometry.nrows() - 1;
    let indices: Vec<Vec<usize>> = match d {
        0 => vec![vec![]],
        1 => (0..=n).map(|i| vec![i]).collect(),
        2 => itertools::iproduct!(0..=n, 0..=n)
            .map(|(j, i)| vec![i, j])
            .collect(),
        _ => itertools::iproduct!(0..=n, 0..=n, 0..=n)
            .map(|(k, j, i)| vec![i, j, k])
            .collect(),
    };
    let indices = indices
        .into_iter()
        .filter(|a| {
            let total = a.iter().sum::<usize>();
            if interior {
                a.iter().all(|i| *i > 0) && total < n
            } else {
                total <= n
            }
        })
        .collect::<Vec<_>>();
    DMatrix::from_fn(indices.len(), geometry.ncols(), |p, j| {
        geometry[(0, j)]
            + indices[p]
                .iter()
                .enumerate()
                .map(|(m, a)| {
                    *a as f64 / n.max(1) as f64 * (geometry[(m + 1, j)] - geometry[(0, j)])
                })
                .sum::<f64>()
    })
}

/// The midpoint of a sub-entity, as a single row
pub(crate) fn entity_midpoint(geometry: &DMatrix<f64>) -> DMatrix<f64> {
    let n = geometry.nrows() as f64;
    DMatrix::from_fn(1, geometry.ncols(), |_, j| geometry.column(j).sum() / n)
}
