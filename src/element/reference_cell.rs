//! Cell definitions

use crate::types::{Error, ReferenceCellType, Result};
use nalgebra::DMatrix;

/// The topological dimension of the cell
pub fn dim(cell: ReferenceCellType) -> usize {
    match cell {
        ReferenceCellType::Point => 0,
        ReferenceCellType::Interval => 1,
        ReferenceCellType::Triangle | ReferenceCellType::Quadrilateral => 2,
        ReferenceCellType::Tetrahedron
        | ReferenceCellType::Hexahedron
        | ReferenceCellType::Prism
        | ReferenceCellType::Pyramid => 3,
    }
}

/// Is the cell a simplex?
pub fn is_simplex(cell: ReferenceCellType) -> bool {
    matches!(
        cell,
        ReferenceCellType::Point
            | ReferenceCellType::Interval
            | ReferenceCellType::Triangle
            | ReferenceCellType::Tetrahedron
    )
}

/// The vertices of the reference cell, one per row
pub fn vertices(cell: ReferenceCellType) -> DMatrix<f64> {
    let coords: &[&[f64]] = match cell {
        ReferenceCellType::Point => &[&[]],
        ReferenceCellType::Interval => &[&[0.0], &[1.0]],
        ReferenceCellType::Triangle => &[&[0.0, 0.0], &[1.0, 0.0], &[0.0, 1.0]],
        ReferenceCellType::Quadrilateral => {
            &[&[0.0, 0.0], &[1.0, 0.0], &[0.0, 1.0], &[1.0, 1.0]]
        }
        ReferenceCellType::Tetrahedron => &[
            &[0.0, 0.0, 0.0],
            &[1.0, 0.0, 0.0],
            &[0.0, 1.0, 0.0],
            &[0.0, 0.0, 1.0],
        ],
        ReferenceCellType::Hexahedron => &[
            &[0.0, 0.0, 0.0],
            &[1.0, 0.0, 0.0],
            &[0.0, 1.0, 0.0],
            &[1.0, 1.0, 0.0],
            &[0.0, 0.0, 1.0],
            &[1.0, 0.0, 1.0],
            &[0.0, 1.0, 1.0],
            &[1.0, 1.0, 1.0],
        ],
        ReferenceCellType::Prism => &[
            &[0.0, 0.0, 0.0],
            &[1.0, 0.0, 0.0],
            &[0.0, 1.0, 0.0],
            &[0.0, 0.0, 1.0],
            &[1.0, 0.0, 1.0],
            &[0.0, 1.0, 1.0],
        ],
        ReferenceCellType::Pyramid => &[
            &[0.0, 0.0, 0.0],
            &[1.0, 0.0, 0.0],
            &[0.0, 1.0, 0.0],
            &[1.0, 1.0, 0.0],
            &[0.0, 0.0, 1.0],
        ],
    };
    let tdim = dim(cell);
    DMatrix::from_fn(coords.len(), tdim, |i, j| coords[i][j])
}

/// The midpoint of the cell
pub fn midpoint(cell: ReferenceCellType) -> Vec<f64> {
    let v = vertices(cell);
    let nvertices = v.nrows() as f64;
    (0..v.ncols())
        .map(|j| v.column(j).sum() / nvertices)
        .collect()
}

/// The measure of the reference cell
pub fn volume(cell: ReferenceCellType) -> f64 {
    match cell {
        ReferenceCellType::Point => 0.0,
        ReferenceCellType::Interval => 1.0,
        ReferenceCellType::Triangle => 0.5,
        ReferenceCellType::Quadrilateral => 1.0,
        ReferenceCellType::Tetrahedron => 1.0 / 6.0,
        ReferenceCellType::Hexahedron => 1.0,
        ReferenceCellType::Prism => 0.5,
        ReferenceCellType::Pyramid => 1.0 / 3.0,
    }
}

/// The edges of the reference cell
pub fn edges(cell: ReferenceCellType) -> Vec<Vec<usize>> {
    let pairs: &[[usize; 2]] = match cell {
        ReferenceCellType::Point => &[],
        ReferenceCellType::Interval => &[[0, 1]],
        ReferenceCellType::Triangle => &[[1, 2], [0, 2], [0, 1]],
        ReferenceCellType::Quadrilateral => &[[0, 1], [0, 2], [1, 3], [2, 3]],
        ReferenceCellType::Tetrahedron => &[[2, 3], [1, 3], [1, 2], [0, 3], [0, 2], [0, 1]],
        ReferenceCellType::Hexahedron => &[
            [0, 1],
            [0, 2],
            [0, 4],
            [1, 3],
            [1, 5],
            [2, 3],
            [2, 6],
            [3, 7],
            [4, 5],
            [4, 6],
            [5, 7],
            [6, 7],
        ],
        ReferenceCellType::Prism => &[
            [0, 1],
            [0, 2],
            [0, 3],
            [1, 2],
            [1, 4],
            [2, 5],
            [3, 4],
            [3, 5],
            [4, 5],
        ],
        ReferenceCellType::Pyramid => &[
            [0, 1],
            [0, 2],
            [0, 4],
            [1, 3],
            [1, 4],
            [2, 3],
            [2, 4],
            [3, 4],
        ],
    };
    pairs.iter().map(|e| e.to_vec()).collect()
}

/// The faces of the reference cell
pub fn faces(cell: ReferenceCellType) -> Vec<Vec<usize>> {
    match cell {
        ReferenceCellType::Point | ReferenceCellType::Interval => vec![],
        ReferenceCellType::Triangle => vec![vec![0, 1, 2]],
        ReferenceCellType::Quadrilateral => vec![vec![0, 1, 2, 3]],
        ReferenceCellType::Tetrahedron => {
            vec![vec![1, 2, 3], vec![0, 2, 3], vec![0, 1, 3], vec![0, 1, 2]]
        }
        ReferenceCellType::Hexahedron => vec![
            vec![0, 1, 2, 3],
            vec![0, 1, 4, 5],
            vec![0, 2, 4, 6],
            vec![1, 3, 5, 7],
            vec![2, 3, 6, 7],
            vec![4, 5, 6, 7],
        ],
        ReferenceCellType::Prism => vec![
            vec![0, 1, 2],
            vec![0, 1, 3, 4],
            vec![0, 2, 3, 5],
            vec![1, 2, 4, 5],
            vec![3, 4, 5],
        ],
        ReferenceCellType::Pyramid => vec![
            vec![0, 1, 2, 3],
            vec![0, 1, 4],
            vec![0, 2, 4],
            vec![1, 3, 4],
            vec![2, 3, 4],
        ],
    }
}

/// The vertices of each sub-entity of dimension `entity_dim`
pub fn sub_entities(cell: ReferenceCellType, entity_dim: usize) -> Vec<Vec<usize>> {
    let tdim = dim(cell);
    let nvertices = vertices(cell).nrows();
    match entity_dim {
        0 => (0..nvertices).map(|v| vec![v]).collect(),
        d if d == tdim => vec![(0..nvertices).collect()],
        1 => edges(cell),
        2 => faces(cell),
        _ => vec![],
    }
}

/// The types of the subentities of the reference cell
pub fn entity_types(cell: ReferenceCellType) -> Vec<Vec<ReferenceCellType>> {
    (0..4)
        .map(|d| {
            sub_entities(cell, d)
                .iter()
                .map(|e| match (d, e.len()) {
                    (0, _) => ReferenceCellType::Point,
                    (1, _) => ReferenceCellType::Interval,
                    (2, 3) => ReferenceCellType::Triangle,
                    (2, _) => ReferenceCellType::Quadrilateral,
                    _ => cell,
                })
                .collect()
        })
        .collect()
}

/// The number of subentities of each dimension
pub fn entity_counts(cell: ReferenceCellType) -> Vec<usize> {
    (0..4).map(|d| sub_entities(cell, d).len()).collect()
}

/// The coordinates of the vertices of a sub-entity, one vertex per row
pub fn sub_entity_geometry(
    cell: ReferenceCellType,
    entity_dim: usize,
    entity_index: usize,
) -> Result<DMatrix<f64>> {
    let entities = sub_entities(cell, entity_dim);
    let entity = entities.get(entity_index).ok_or_else(|| {
        Error::ShapeMismatch(format!(
            "{cell:?} has no sub-entity {entity_index} of dimension {entity_dim}"
        ))
    })?;
    let v = vertices(cell);
    Ok(DMatrix::from_fn(entity.len(), v.ncols(), |i, j| {
        v[(entity[i], j)]
    }))
}
