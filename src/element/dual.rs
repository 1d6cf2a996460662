//! The dual matrix
//!
//! Rows are ordered entity by entity in increasing topological dimension. The rows of one
//! entity follow the order of the blocks that contribute to it. Each contiguous run of rows is
//! described by a [DualRecord], and callers look rows up through the records rather than by
//! offset.

use crate::element::moments::{FunctionalBlock, FunctionalKind};
use crate::element::permutations::EntitySymmetry;
use crate::element::{polynomials, reference_cell};
use crate::types::{Error, ReferenceCellType, Result};
use nalgebra::DMatrix;
use std::ops::Range;

/// The rows of the dual matrix that come from one block on one sub-entity
#[derive(Debug, Clone, PartialEq)]
pub struct DualRecord {
    /// Dimension of the sub-entity
    pub entity_dim: usize,
    /// Index of the sub-entity
    pub entity_index: usize,
    /// Type of the functionals
    pub kind: FunctionalKind,
    /// Rows of the dual matrix
    pub rows: Range<usize>,
    /// Layout of the functionals on the sub-entity
    pub symmetry: Option<EntitySymmetry>,
}

/// Dual functionals applied to the orthonormal polynomials
#[derive(Debug, Clone, PartialEq)]
pub struct DualMatrix {
    cell: ReferenceCellType,
    degree: usize,
    value_size: usize,
    matrix: DMatrix<f64>,
    records: Vec<DualRecord>,
}

impl DualMatrix {
    /// Assemble the dual matrix from blocks of functionals
    pub fn new(
        cell: ReferenceCellType,
        degree: usize,
        value_size: usize,
        blocks: &[FunctionalBlock],
    ) -> Result<Self> {
        let tdim = reference_cell::dim(cell);
        let counts = reference_cell::entity_counts(cell);
        let pdim = polynomials::polynomial_count(cell, degree)?;
        for block in blocks {
            if block.cell_type() != cell
                || block.degree() != degree
                || block.value_size() != value_size
            {
                return Err(Error::ShapeMismatch(format!(
                    "{:?} block on a {:?} of degree {} with value size {} does not match a {cell:?} of degree {degree} with value size {value_size}",
                    block.kind(),
                    block.cell_type(),
                    block.degree(),
                    block.value_size()
                )));
            }
            if block.entity_dim() > tdim || block.entities().len() != counts[block.entity_dim()] {
                return Err(Error::ShapeMismatch(format!(
                    "{:?} block has {} sub-entities of dimension {}",
                    block.kind(),
                    block.entities().len(),
                    block.entity_dim()
                )));
            }
        }

        let mut parts = vec![];
        let mut records = vec![];
        let mut nrows = 0;
        for (d, count) in counts.iter().enumerate().take(tdim + 1) {
            for e in 0..*count {
                for block in blocks.iter().filter(|b| b.entity_dim() == d) {
                    let part = block.matrix(e)?;
                    records.push(DualRecord {
                        entity_dim: d,
                        entity_index: e,
                        kind: block.kind(),
                        rows: nrows..nrows + part.nrows(),
                        symmetry: block.symmetry(),
                    });
                    nrows += part.nrows();
                    parts.push(part);
                }
            }
        }

        let mut matrix = DMatrix::<f64>::zeros(nrows, value_size * pdim);
        for (record, part) in records.iter().zip(&parts) {
            matrix
                .rows_mut(record.rows.start, record.rows.len())
                .copy_from(part);
        }
        Ok(Self {
            cell,
            degree,
            value_size,
            matrix,
            records,
        })
    }

    /// Attach every functional to the interior of the cell
    pub fn into_discontinuous(mut self) -> Self {
        let tdim = reference_cell::dim(self.cell);
        for record in self.records.iter_mut() {
            record.entity_dim = tdim;
            record.entity_index = 0;
            record.symmetry = None;
        }
        self
    }

    /// The cell type
    pub fn cell_type(&self) -> ReferenceCellType {
        self.cell
    }

    /// The degree of the polynomial set
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The value size
    pub fn value_size(&self) -> usize {
        self.value_size
    }

    /// The matrix, with one row per functional
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// The records of the rows attached to a sub-entity
    pub fn records(
        &self,
        entity_dim: usize,
        entity_index: usize,
    ) -> impl Iterator<Item = &DualRecord> {
        self.records
            .iter()
            .filter(move |r| r.entity_dim == entity_dim && r.entity_index == entity_index)
    }

    /// The rows attached to a sub-entity
    pub fn rows(&self, entity_dim: usize, entity_index: usize) -> Range<usize> {
        let mut records = self.records(entity_dim, entity_index);
        match records.next() {
            Some(first) => {
                let end = records.last().map_or(first.rows.end, |r| r.rows.end);
                first.rows.start..end
            }
            None => 0..0,
        }
    }

    /// The rows of the first block of a given kind attached to a sub-entity
    pub fn rows_of_kind(
        &self,
        entity_dim: usize,
        entity_index: usize,
        kind: FunctionalKind,
    ) -> Option<Range<usize>> {
        self.records(entity_dim, entity_index)
            .find(|r| r.kind == kind)
            .map(|r| r.rows.clone())
    }

    /// The DOFs attached to each sub-entity, indexed by dimension and then entity
    pub fn entity_dofs(&self) -> Vec<Vec<Vec<usize>>> {
        reference_cell::entity_counts(self.cell)
            .iter()
            .enumerate()
            .map(|(d, count)| (0..*count).map(|e| self.rows(d, e).collect()).collect())
            .collect()
    }

    /// The number of DOFs attached to each sub-entity, indexed by dimension and then entity
    pub fn entity_dof_counts(&self) -> Vec<Vec<usize>> {
        reference_cell::entity_counts(self.cell)
            .iter()
            .enumerate()
            .map(|(d, count)| (0..*count).map(|e| self.rows(d, e).len()).collect())
            .collect()
    }
}
