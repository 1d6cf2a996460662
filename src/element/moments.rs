//! Dual functionals
//!
//! Every functional is stored as a set of points on a sub-entity and a weight matrix. Applying
//! the functionals to a function means evaluating the function at the points and contracting
//! with the weights. Integral moments put quadrature points in the points and fold the
//! quadrature weights, the auxiliary basis functions and any normal or tangent into the weights.

use crate::element::ciarlet::{CiarletElement, Tabulation};
use crate::element::permutations::{EntitySymmetry, Frame, Lattice};
use crate::element::{polynomials, reference_cell};
use crate::quadrature::{make_quadrature, QuadratureRule};
use crate::traits::FiniteElement;
use crate::types::{Continuity, ElementFamily, Error, ReferenceCellType, Result};
use log::debug;
use nalgebra::DMatrix;

/// The type of a functional
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionalKind {
    /// Evaluation at a point
    PointEvaluation,
    /// Integral against a scalar function, or against a scalar function times each axis of the
    /// sub-entity
    IntegralMoment,
    /// Integral of the dot product with a vector-valued function
    DotMoment,
    /// Integral of the tangential component against a scalar function
    TangentMoment,
    /// Integral of the normal component against a scalar function
    NormalMoment,
}

/// The functionals on one sub-entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntityFunctionals {
    /// Points in the coordinates of the cell, one per row
    pub points: DMatrix<f64>,
    /// Weights, one row per functional
    ///
    /// Column `c * npoints + q` multiplies component `c` of the function at point `q`.
    pub weights: DMatrix<f64>,
}

impl EntityFunctionals {
    /// The number of functionals
    pub fn count(&self) -> usize {
        self.weights.nrows()
    }
}

/// Functionals of one kind on every sub-entity of one dimension
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionalBlock {
    cell: ReferenceCellType,
    degree: usize,
    value_size: usize,
    kind: FunctionalKind,
    entity_dim: usize,
    entities: Vec<EntityFunctionals>,
    symmetry: Option<EntitySymmetry>,
}

impl FunctionalBlock {
    /// The cell the functionals are defined on
    pub fn cell_type(&self) -> ReferenceCellType {
        self.cell
    }
    /// The degree of the polynomial set the functionals act on
    pub fn degree(&self) -> usize {
        self.degree
    }
    /// The value size of the functions the functionals act on
    pub fn value_size(&self) -> usize {
        self.value_size
    }
    /// The type of functional
    pub fn kind(&self) -> FunctionalKind {
        self.kind
    }
    /// The dimension of the sub-entities
    pub fn entity_dim(&self) -> usize {
        self.entity_dim
    }
    /// The functionals on each sub-entity
    pub fn entities(&self) -> &[EntityFunctionals] {
        &self.entities
    }
    /// How the functionals on a sub-entity are laid out
    pub fn symmetry(&self) -> Option<EntitySymmetry> {
        self.symmetry
    }

    /// The functionals on a sub-entity applied to the orthonormal polynomials
    ///
    /// The result has one row per functional. Column `c * npolys + k` is the functional applied
    /// to polynomial `k` in component `c`.
    pub fn matrix(&self, entity_index: usize) -> Result<DMatrix<f64>> {
        let entity = self.entities.get(entity_index).ok_or_else(|| {
            Error::ShapeMismatch(format!(
                "no functionals on entity {entity_index} of dimension {}",
                self.entity_dim
            ))
        })?;
        let pdim = polynomials::polynomial_count(self.cell, self.degree)?;
        let npts = entity.points.nrows();
        let mut out = DMatrix::<f64>::zeros(entity.count(), self.value_size * pdim);
        if npts == 0 || entity.count() == 0 {
            return Ok(out);
        }
        if entity.weights.ncols() != self.value_size * npts {
            return Err(Error::ShapeMismatch(format!(
                "weights have {} columns, expected {}",
                entity.weights.ncols(),
                self.value_size * npts
            )));
        }
        let table = polynomials::tabulate(self.cell, self.degree, 0, &entity.points)?;
        for c in 0..self.value_size {
            let w = entity.weights.columns(c * npts, npts);
            out.columns_mut(c * pdim, pdim)
                .copy_from(&(w * table[0].transpose()));
        }
        Ok(out)
    }
}

/// The origin and axes of a sub-entity
///
/// Axis `k` is the vector from vertex 0 to vertex `k + 1`.
fn entity_axes(
    cell: ReferenceCellType,
    entity_dim: usize,
    entity_index: usize,
) -> Result<(Vec<f64>, Vec<Vec<f64>>)> {
    let geometry = reference_cell::sub_entity_geometry(cell, entity_dim, entity_index)?;
    let origin = geometry.row(0).iter().copied().collect::<Vec<_>>();
    let axes = (1..=entity_dim)
        .map(|k| {
            geometry
                .row(k)
                .iter()
                .zip(&origin)
                .map(|(v, o)| v - o)
                .collect()
        })
        .collect();
    Ok((origin, axes))
}

fn map_points(rule: &QuadratureRule, origin: &[f64], axes: &[Vec<f64>]) -> DMatrix<f64> {
    DMatrix::from_fn(rule.npoints(), origin.len(), |q, j| {
        origin[j]
            + axes
                .iter()
                .enumerate()
                .map(|(k, axis)| rule.points[(q, k)] * axis[j])
                .sum::<f64>()
    })
}

/// The lattice of the nodes of an equispaced discontinuous Lagrange element
fn aux_lattice(aux: &CiarletElement) -> Option<Lattice> {
    if aux.family() != ElementFamily::Lagrange || aux.continuity() != Continuity::Discontinuous {
        return None;
    }
    match aux.cell_type() {
        ReferenceCellType::Interval => Some(Lattice::Interval(aux.degree() + 1)),
        ReferenceCellType::Triangle => Some(Lattice::Triangle(aux.degree() + 1)),
        _ => None,
    }
}

/// Data shared by all the integral moment builders
struct MomentSetup {
    entity_dim: usize,
    count: usize,
    rule: QuadratureRule,
    values: Tabulation,
}

fn setup(aux: &CiarletElement, cell: ReferenceCellType, q_deg: usize) -> Result<MomentSetup> {
    let entity_dim = reference_cell::dim(aux.cell_type());
    let tdim = reference_cell::dim(cell);
    if entity_dim > tdim
        || reference_cell::entity_types(cell)[entity_dim]
            .iter()
            .any(|t| *t != aux.cell_type())
    {
        return Err(Error::unsupported(
            cell,
            &format!(
                "sub-entities of dimension {entity_dim} are not all {:?} cells",
                aux.cell_type()
            ),
        ));
    }
    let rule = make_quadrature(aux.cell_type(), q_deg)?;
    let values = aux.tabulate(&rule.points, 0)?;
    Ok(MomentSetup {
        entity_dim,
        count: reference_cell::entity_counts(cell)[entity_dim],
        rule,
        values,
    })
}

fn check_value_size(cell: ReferenceCellType, value_size: usize) -> Result<()> {
    let tdim = reference_cell::dim(cell);
    if value_size != tdim {
        Err(Error::ShapeMismatch(format!(
            "moments on a {cell:?} need value size {tdim}, got {value_size}"
        )))
    } else {
        Ok(())
    }
}

fn check_scalar(aux: &CiarletElement) -> Result<()> {
    if aux.value_size() != 1 {
        Err(Error::ShapeMismatch(format!(
            "the auxiliary element must be scalar, got value size {}",
            aux.value_size()
        )))
    } else {
        Ok(())
    }
}

/// Integral moments against a scalar auxiliary element
///
/// If `value_size` is 1, there is one functional per auxiliary basis function. Otherwise
/// there is one functional per auxiliary basis function and axis of the sub-entity, with the
/// axes varying fastest.
pub fn make_integral_moments(
    aux: &CiarletElement,
    cell: ReferenceCellType,
    value_size: usize,
    degree: usize,
    q_deg: usize,
) -> Result<FunctionalBlock> {
    check_scalar(aux)?;
    if value_size != 1 {
        check_value_size(cell, value_size)?;
    }
    let s = setup(aux, cell, q_deg)?;
    let tdim = reference_cell::dim(cell);
    let npts = s.rule.npoints();
    let naux = aux.dim();

    let mut entities = Vec::with_capacity(s.count);
    for e in 0..s.count {
        let (origin, axes) = entity_axes(cell, s.entity_dim, e)?;
        let points = map_points(&s.rule, &origin, &axes);
        let weights = if value_size == 1 {
            DMatrix::from_fn(naux, npts, |j, q| {
                s.rule.weights[q] * s.values[[0, q, j, 0]]
            })
        } else {
            let mut weights = DMatrix::<f64>::zeros(naux * s.entity_dim, value_size * npts);
            for j in 0..naux {
                for (d, axis) in axes.iter().enumerate() {
                    for q in 0..npts {
                        let wq = s.rule.weights[q] * s.values[[0, q, j, 0]];
                        for (c, a) in axis.iter().enumerate() {
                            weights[(j * s.entity_dim + d, c * npts + q)] = wq * a;
                        }
                    }
                }
            }
            weights
        };
        entities.push(EntityFunctionals { points, weights });
    }

    let frame = match (value_size, s.entity_dim) {
        (1, _) => Some(Frame::Scalar),
        (_, 1) => Some(Frame::Tangent),
        (_, 2) => Some(Frame::Plane),
        _ => None,
    };
    let symmetry = if s.entity_dim < tdim {
        aux_lattice(aux)
            .zip(frame)
            .map(|(lattice, frame)| EntitySymmetry { lattice, frame })
    } else {
        None
    };
    debug!(
        "Integral moments on {} sub-entities of dimension {} with {npts} quadrature points",
        s.count, s.entity_dim
    );
    Ok(FunctionalBlock {
        cell,
        degree,
        value_size,
        kind: FunctionalKind::IntegralMoment,
        entity_dim: s.entity_dim,
        entities,
        symmetry,
    })
}

/// Integral moments of the dot product with a vector-valued auxiliary element
///
/// The auxiliary element is defined on the sub-entity and is pushed forward by the axes of
/// the sub-entity. Every symmetry generator leaves the DOFs on a facet or edge in place.
pub fn make_dot_integral_moments(
    aux: &CiarletElement,
    cell: ReferenceCellType,
    value_size: usize,
    degree: usize,
    q_deg: usize,
) -> Result<FunctionalBlock> {
    check_value_size(cell, value_size)?;
    let s = setup(aux, cell, q_deg)?;
    if aux.value_size() != s.entity_dim {
        return Err(Error::ShapeMismatch(format!(
            "the auxiliary element must have value size {}, got {}",
            s.entity_dim,
            aux.value_size()
        )));
    }
    let tdim = reference_cell::dim(cell);
    let npts = s.rule.npoints();
    let naux = aux.dim();

    let mut entities = Vec::with_capacity(s.count);
    for e in 0..s.count {
        let (origin, axes) = entity_axes(cell, s.entity_dim, e)?;
        let points = map_points(&s.rule, &origin, &axes);
        let mut weights = DMatrix::<f64>::zeros(naux, value_size * npts);
        for j in 0..naux {
            for q in 0..npts {
                for c in 0..value_size {
                    weights[(j, c * npts + q)] = s.rule.weights[q]
                        * axes
                            .iter()
                            .enumerate()
                            .map(|(d, axis)| s.values[[0, q, j, d]] * axis[c])
                            .sum::<f64>();
                }
            }
        }
        entities.push(EntityFunctionals { points, weights });
    }
    Ok(FunctionalBlock {
        cell,
        degree,
        value_size,
        kind: FunctionalKind::DotMoment,
        entity_dim: s.entity_dim,
        entities,
        // TODO: map the vector-valued auxiliary DOFs under face rotations and reflections
        symmetry: (s.entity_dim < tdim).then_some(EntitySymmetry {
            lattice: Lattice::Fixed(naux),
            frame: Frame::Scalar,
        }),
    })
}

/// Integral moments of the tangential component on each edge
pub fn make_tangent_integral_moments(
    aux: &CiarletElement,
    cell: ReferenceCellType,
    value_size: usize,
    degree: usize,
    q_deg: usize,
) -> Result<FunctionalBlock> {
    check_scalar(aux)?;
    check_value_size(cell, value_size)?;
    if aux.cell_type() != ReferenceCellType::Interval {
        return Err(Error::unsupported(
            aux.cell_type(),
            "tangent moments can only be taken on edges",
        ));
    }
    let s = setup(aux, cell, q_deg)?;
    let npts = s.rule.npoints();
    let naux = aux.dim();

    let mut entities = Vec::with_capacity(s.count);
    for e in 0..s.count {
        let (origin, axes) = entity_axes(cell, 1, e)?;
        let points = map_points(&s.rule, &origin, &axes);
        let tangent = &axes[0];
        let mut weights = DMatrix::<f64>::zeros(naux, value_size * npts);
        for j in 0..naux {
            for q in 0..npts {
                let wq = s.rule.weights[q] * s.values[[0, q, j, 0]];
                for (c, t) in tangent.iter().enumerate() {
                    weights[(j, c * npts + q)] = wq * t;
                }
            }
        }
        entities.push(EntityFunctionals { points, weights });
    }
    Ok(FunctionalBlock {
        cell,
        degree,
        value_size,
        kind: FunctionalKind::TangentMoment,
        entity_dim: 1,
        entities,
        symmetry: aux_lattice(aux).map(|lattice| EntitySymmetry {
            lattice,
            frame: Frame::Tangent,
        }),
    })
}

/// Integral moments of the normal component on each facet
///
/// The normal is not normalised: in 2D it is the tangent rotated clockwise, in 3D it is the
/// cross product of the two axes of the face.
pub fn make_normal_integral_moments(
    aux: &CiarletElement,
    cell: ReferenceCellType,
    value_size: usize,
    degree: usize,
    q_deg: usize,
) -> Result<FunctionalBlock> {
    check_scalar(aux)?;
    check_value_size(cell, value_size)?;
    let tdim = reference_cell::dim(cell);
    let s = setup(aux, cell, q_deg)?;
    if s.entity_dim + 1 != tdim {
        return Err(Error::unsupported(
            cell,
            "normal moments can only be taken on facets",
        ));
    }
    let npts = s.rule.npoints();
    let naux = aux.dim();

    let mut entities = Vec::with_capacity(s.count);
    for e in 0..s.count {
        let (origin, axes) = entity_axes(cell, s.entity_dim, e)?;
        let points = map_points(&s.rule, &origin, &axes);
        let normal = match tdim {
            2 => vec![-axes[0][1], axes[0][0]],
            _ => {
                let (a, b) = (&axes[0], &axes[1]);
                vec![
                    a[1] * b[2] - a[2] * b[1],
                    a[2] * b[0] - a[0] * b[2],
                    a[0] * b[1] - a[1] * b[0],
                ]
            }
        };
        let mut weights = DMatrix::<f64>::zeros(naux, value_size * npts);
        for j in 0..naux {
            for q in 0..npts {
                let wq = s.rule.weights[q] * s.values[[0, q, j, 0]];
                for (c, n) in normal.iter().enumerate() {
                    weights[(j, c * npts + q)] = wq * n;
                }
            }
        }
        entities.push(EntityFunctionals { points, weights });
    }
    Ok(FunctionalBlock {
        cell,
        degree,
        value_size,
        kind: FunctionalKind::NormalMoment,
        entity_dim: s.entity_dim,
        entities,
        symmetry: aux_lattice(aux).map(|lattice| EntitySymmetry {
            lattice,
            frame: Frame::Normal,
        }),
    })
}

/// Point evaluations of a scalar function
///
/// `points` holds the points on each sub-entity of dimension `entity_dim`, in the coordinates of
/// the cell. If the points on each sub-entity form a lattice, it should be given so that the
/// DOFs can be permuted.
pub fn make_point_evaluations(
    cell: ReferenceCellType,
    degree: usize,
    entity_dim: usize,
    points: Vec<DMatrix<f64>>,
    lattice: Option<Lattice>,
) -> Result<FunctionalBlock> {
    let tdim = reference_cell::dim(cell);
    if entity_dim > tdim {
        return Err(Error::ShapeMismatch(format!(
            "{cell:?} has no sub-entities of dimension {entity_dim}"
        )));
    }
    let count = reference_cell::entity_counts(cell)[entity_dim];
    if points.len() != count {
        return Err(Error::ShapeMismatch(format!(
            "{count} sub-entities of dimension {entity_dim} but points for {}",
            points.len()
        )));
    }
    let entities = points
        .into_iter()
        .map(|p| {
            if p.nrows() > 0 && p.ncols() != tdim {
                return Err(Error::ShapeMismatch(format!(
                    "points on a {cell:?} need {tdim} coordinates, got {}",
                    p.ncols()
                )));
            }
            if let Some(l) = lattice {
                if l.size() != p.nrows() {
                    return Err(Error::ShapeMismatch(format!(
                        "{} points do not fill a {l:?} lattice",
                        p.nrows()
                    )));
                }
            }
            let n = p.nrows();
            Ok(EntityFunctionals {
                points: p,
                weights: DMatrix::identity(n, n),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(FunctionalBlock {
        cell,
        degree,
        value_size: 1,
        kind: FunctionalKind::PointEvaluation,
        entity_dim,
        entities,
        symmetry: lattice.map(|lattice| EntitySymmetry {
            lattice,
            frame: Frame::Scalar,
        }),
    })
}
