//! DOF permutations
//!
//! When two cells share a sub-entity they may see it with different orientations. Each symmetry
//! generator of the reference cell gives a signed permutation of the local DOFs. The matrix for
//! a generator is built per entity from an index permutation of the entity's node lattice and a
//! frame block that says how the value attached to each node transforms.

use crate::element::dual::DualMatrix;
use crate::element::reference_cell;
use crate::types::{Error, ReferenceCellType, Result};
use nalgebra::DMatrix;

/// An elementary symmetry of a sub-entity of a reference cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymmetryGenerator {
    /// Reverse an edge
    EdgeReflection(usize),
    /// Rotate a face by one vertex
    FaceRotation(usize),
    /// Reflect a face, swapping its vertices 1 and 2
    FaceReflection(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeneratorKind {
    Rotation,
    Reflection,
}

/// Generators of each type of sub-entity
///
/// Quadrilateral faces have no generators, so their DOFs are never permuted.
const GENERATOR_TABLE: [(ReferenceCellType, &[GeneratorKind]); 2] = [
    (ReferenceCellType::Interval, &[GeneratorKind::Reflection]),
    (
        ReferenceCellType::Triangle,
        &[GeneratorKind::Rotation, GeneratorKind::Reflection],
    ),
];

impl SymmetryGenerator {
    fn new(entity_dim: usize, entity: usize, kind: GeneratorKind) -> Option<Self> {
        match (entity_dim, kind) {
            (1, GeneratorKind::Reflection) => Some(SymmetryGenerator::EdgeReflection(entity)),
            (2, GeneratorKind::Rotation) => Some(SymmetryGenerator::FaceRotation(entity)),
            (2, GeneratorKind::Reflection) => Some(SymmetryGenerator::FaceReflection(entity)),
            _ => None,
        }
    }

    fn kind(&self) -> GeneratorKind {
        match self {
            SymmetryGenerator::FaceRotation(_) => GeneratorKind::Rotation,
            _ => GeneratorKind::Reflection,
        }
    }

    /// The dimension and index of the sub-entity this generator acts on
    pub fn entity(&self) -> (usize, usize) {
        match *self {
            SymmetryGenerator::EdgeReflection(e) => (1, e),
            SymmetryGenerator::FaceRotation(f) | SymmetryGenerator::FaceReflection(f) => (2, f),
        }
    }

    /// The number of times the generator must be applied to get back to the identity
    pub fn order(&self) -> usize {
        match self.kind() {
            GeneratorKind::Rotation => 3,
            GeneratorKind::Reflection => 2,
        }
    }
}

/// The layout of the nodes that an entity's DOFs are attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lattice {
    /// `n` nodes along an edge, in order from the first vertex
    Interval(usize),
    /// A triangle with `n` nodes along each side
    ///
    /// Node (i, j) has index `j n - j (j - 1) / 2 + i`, so i runs fastest.
    Triangle(usize),
    /// `n` DOFs that every generator leaves in place
    Fixed(usize),
}

impl Lattice {
    /// The number of nodes
    pub fn size(&self) -> usize {
        match *self {
            Lattice::Interval(n) => n,
            Lattice::Triangle(n) => n * (n + 1) / 2,
            Lattice::Fixed(n) => n,
        }
    }

    fn permutation(&self, generator: &SymmetryGenerator) -> Result<Vec<usize>> {
        match (*self, generator) {
            (Lattice::Interval(n), SymmetryGenerator::EdgeReflection(_)) => {
                Ok(interval_reflection(n))
            }
            (Lattice::Triangle(n), SymmetryGenerator::FaceRotation(_)) => Ok(triangle_rotation(n)),
            (Lattice::Triangle(n), SymmetryGenerator::FaceReflection(_)) => {
                Ok(triangle_reflection(n))
            }
            (Lattice::Fixed(n), _) => Ok((0..n).collect()),
            (lattice, g) => Err(Error::ShapeMismatch(format!(
                "{lattice:?} lattice cannot be transformed by {g:?}"
            ))),
        }
    }
}

/// How the value attached to each node transforms under a generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    /// One scalar per node
    Scalar,
    /// One component along the entity normal per node
    Normal,
    /// One component along an edge tangent per node
    Tangent,
    /// Two components along the edges of a face per node
    Plane,
}

impl Frame {
    /// The number of DOFs attached to each node
    pub fn block_size(&self) -> usize {
        match self {
            Frame::Plane => 2,
            _ => 1,
        }
    }

    /// The transform of the values at a node
    fn block(&self, generator: &SymmetryGenerator) -> Result<DMatrix<f64>> {
        let entries: &[f64] = match (self, generator) {
            (Frame::Scalar, _) => &[1.0],
            (Frame::Normal, SymmetryGenerator::FaceRotation(_)) => &[1.0],
            (Frame::Normal, _) => &[-1.0],
            (Frame::Tangent, SymmetryGenerator::EdgeReflection(_)) => &[-1.0],
            (Frame::Plane, SymmetryGenerator::FaceRotation(_)) => &[-1.0, 1.0, -1.0, 0.0],
            (Frame::Plane, SymmetryGenerator::FaceReflection(_)) => &[0.0, 1.0, 1.0, 0.0],
            (frame, g) => {
                return Err(Error::ShapeMismatch(format!(
                    "{frame:?} frame cannot be transformed by {g:?}"
                )))
            }
        };
        let bs = self.block_size();
        Ok(DMatrix::from_row_slice(bs, bs, entries))
    }
}

/// The symmetry of the DOFs on one sub-entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntitySymmetry {
    /// Node layout
    pub lattice: Lattice,
    /// Transform at each node
    pub frame: Frame,
}

/// Reflection of `n` nodes on an interval
pub fn interval_reflection(n: usize) -> Vec<usize> {
    (0..n).rev().collect()
}

fn triangle_index(n: usize, i: usize, j: usize) -> usize {
    j * n + i - j * j.saturating_sub(1) / 2
}

/// Rotation of a triangular lattice with `n` nodes on each side
///
/// Entry `p` is the node that node `p` is moved to.
pub fn triangle_rotation(n: usize) -> Vec<usize> {
    let mut perm = vec![0; n * (n + 1) / 2];
    for j in 0..n {
        for i in 0..n - j {
            perm[triangle_index(n, i, j)] = triangle_index(n, n - 1 - i - j, i);
        }
    }
    perm
}

/// Reflection of a triangular lattice with `n` nodes on each side
pub fn triangle_reflection(n: usize) -> Vec<usize> {
    let mut perm = vec![0; n * (n + 1) / 2];
    for j in 0..n {
        for i in 0..n - j {
            perm[triangle_index(n, i, j)] = triangle_index(n, j, i);
        }
    }
    perm
}

/// The symmetry generators of a reference cell
///
/// Edge reflections come first, followed by the rotation and reflection of each triangular
/// face. The cell itself has no generators.
pub fn symmetry_generators(cell: ReferenceCellType) -> Vec<SymmetryGenerator> {
    let tdim = reference_cell::dim(cell);
    let mut generators = vec![];
    for (d, types) in reference_cell::entity_types(cell)
        .iter()
        .enumerate()
        .take(tdim)
        .skip(1)
    {
        for (e, entity_type) in types.iter().enumerate() {
            let kinds = GENERATOR_TABLE
                .iter()
                .find(|(t, _)| t == entity_type)
                .map_or(&[][..], |(_, kinds)| *kinds);
            generators.extend(
                kinds
                    .iter()
                    .filter_map(|kind| SymmetryGenerator::new(d, e, *kind)),
            );
        }
    }
    generators
}

/// A signed permutation of the DOFs of an element
#[derive(Debug, Clone, PartialEq)]
pub struct DofPermutation {
    /// The generator that this permutation represents
    pub generator: SymmetryGenerator,
    /// The matrix, with entries in {-1, 0, 1}
    pub matrix: DMatrix<f64>,
}

/// Compute the permutation of the DOFs of a dual matrix for every symmetry generator of its cell
pub fn base_permutations(dual: &DualMatrix) -> Result<Vec<DofPermutation>> {
    let ndofs = dual.matrix().nrows();
    symmetry_generators(dual.cell_type())
        .into_iter()
        .map(|generator| {
            let (entity_dim, entity_index) = generator.entity();
            let mut matrix = DMatrix::<f64>::identity(ndofs, ndofs);
            for record in dual.records(entity_dim, entity_index) {
                if record.rows.is_empty() {
                    continue;
                }
                let symmetry = record.symmetry.ok_or_else(|| {
                    Error::ShapeMismatch(format!(
                        "no symmetry attached to the {:?} DOFs of entity {entity_index} of dimension {entity_dim}",
                        record.kind
                    ))
                })?;
                let perm = symmetry.lattice.permutation(&generator)?;
                let block = symmetry.frame.block(&generator)?;
                let bs = symmetry.frame.block_size();
                if perm.len() * bs != record.rows.len() {
                    return Err(Error::ShapeMismatch(format!(
                        "{} DOFs do not fit a {:?} lattice with {bs} values per node",
                        record.rows.len(),
                        symmetry.lattice
                    )));
                }
                let start = record.rows.start;
                for row in record.rows.clone() {
                    matrix.row_mut(row).fill(0.0);
                }
                for (p, q) in perm.iter().enumerate() {
                    for a in 0..bs {
                        for b in 0..bs {
                            matrix[(start + p * bs + a, start + q * bs + b)] = block[(a, b)];
                        }
                    }
                }
            }
            Ok(DofPermutation { generator, matrix })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn apply(perm: &[usize], times: usize) -> Vec<usize> {
        (0..perm.len())
            .map(|mut i| {
                for _ in 0..times {
                    i = perm[i];
                }
                i
            })
            .collect()
    }

    #[test]
    fn test_interval_reflection() {
        assert_eq!(interval_reflection(4), vec![3, 2, 1, 0]);
        assert_eq!(interval_reflection(1), vec![0]);
        assert!(interval_reflection(0).is_empty());
    }

    #[test]
    fn test_triangle_lattice() {
        // (0,0) (1,0) (2,0) (0,1) (1,1) (0,2)
        assert_eq!(triangle_rotation(3), vec![2, 4, 5, 1, 3, 0]);
        assert_eq!(triangle_reflection(3), vec![0, 3, 5, 1, 4, 2]);
        assert_eq!(triangle_rotation(1), vec![0]);
    }

    #[test]
    fn test_fixed_lattice() {
        for g in [
            SymmetryGenerator::EdgeReflection(1),
            SymmetryGenerator::FaceRotation(0),
            SymmetryGenerator::FaceReflection(2),
        ] {
            assert_eq!(Lattice::Fixed(3).permutation(&g).unwrap(), vec![0, 1, 2]);
        }
        assert_eq!(Lattice::Fixed(3).size(), 3);
    }

    #[test]
    fn test_lattice_orders() {
        for n in 1..8 {
            let identity = (0..n * (n + 1) / 2).collect::<Vec<_>>();
            assert_eq!(apply(&triangle_rotation(n), 3), identity);
            assert_eq!(apply(&triangle_reflection(n), 2), identity);
            assert_eq!(apply(&interval_reflection(n), 2), (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_frame_orders() {
        let rotation = SymmetryGenerator::FaceRotation(0);
        let reflection = SymmetryGenerator::FaceReflection(0);
        for frame in [Frame::Scalar, Frame::Normal, Frame::Plane] {
            let r = frame.block(&rotation).unwrap();
            let s = frame.block(&reflection).unwrap();
            let n = frame.block_size();
            assert_eq!(&r * &r * &r, DMatrix::identity(n, n));
            assert_eq!(&s * &s, DMatrix::identity(n, n));
        }
        let edge = SymmetryGenerator::EdgeReflection(0);
        assert!(Frame::Plane.block(&edge).is_err());
        assert!(Frame::Tangent.block(&rotation).is_err());
        assert_eq!(Frame::Tangent.block(&edge).unwrap()[(0, 0)], -1.0);
    }

    #[test]
    fn test_generators() {
        assert!(symmetry_generators(ReferenceCellType::Interval).is_empty());
        assert_eq!(
            symmetry_generators(ReferenceCellType::Triangle),
            vec![
                SymmetryGenerator::EdgeReflection(0),
                SymmetryGenerator::EdgeReflection(1),
                SymmetryGenerator::EdgeReflection(2),
            ]
        );
        let tet = symmetry_generators(ReferenceCellType::Tetrahedron);
        assert_eq!(tet.len(), 14);
        assert_eq!(tet[5], SymmetryGenerator::EdgeReflection(5));
        assert_eq!(tet[6], SymmetryGenerator::FaceRotation(0));
        assert_eq!(tet[7], SymmetryGenerator::FaceReflection(0));
        assert_eq!(tet[13], SymmetryGenerator::FaceReflection(3));
        assert_eq!(tet[13].entity(), (2, 3));
    }

    #[test]
    fn test_generators_quadrilateral_faces() {
        // Only edges are reflected on cells whose faces are all quadrilaterals
        for cell in [ReferenceCellType::Quadrilateral, ReferenceCellType::Hexahedron] {
            let generators = symmetry_generators(cell);
            assert_eq!(generators.len(), reference_cell::entity_counts(cell)[1]);
            assert!(generators
                .iter()
                .all(|g| matches!(g, SymmetryGenerator::EdgeReflection(_))));
        }

        // The prism has two triangular faces, 0 and 4
        let prism = symmetry_generators(ReferenceCellType::Prism);
        assert_eq!(prism.len(), 9 + 4);
        assert_eq!(
            &prism[9..],
            &[
                SymmetryGenerator::FaceRotation(0),
                SymmetryGenerator::FaceReflection(0),
                SymmetryGenerator::FaceRotation(4),
                SymmetryGenerator::FaceReflection(4),
            ]
        );
        assert!(prism
            .iter()
            .filter(|g| matches!(g, SymmetryGenerator::FaceRotation(_)))
            .all(|g| g.order() == 3));
    }

    #[test]
    fn test_lattice_mismatch() {
        let edge = SymmetryGenerator::EdgeReflection(0);
        assert!(Lattice::Triangle(2).permutation(&edge).is_err());
        assert!(Lattice::Interval(2)
            .permutation(&SymmetryGenerator::FaceRotation(0))
            .is_err());
    }
}
