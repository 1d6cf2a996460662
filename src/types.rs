//! General type definitions

/// The type of a reference cell
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum ReferenceCellType {
    /// A point
    Point = 0,
    /// A line interval
    Interval = 1,
    /// A triangle
    Triangle = 2,
    /// A quadrilateral
    Quadrilateral = 3,
    /// A tetrahedron (whose faces are all triangles)
    Tetrahedron = 4,
    /// A hexahedron (whose faces are all quadrilaterals)
    Hexahedron = 5,
    /// A triangular prism
    Prism = 6,
    /// A square-based pyramid
    Pyramid = 7,
}

impl ReferenceCellType {
    /// Create a reference cell type from a u8
    pub fn from(i: u8) -> Option<ReferenceCellType> {
        match i {
            0 => Some(ReferenceCellType::Point),
            1 => Some(ReferenceCellType::Interval),
            2 => Some(ReferenceCellType::Triangle),
            3 => Some(ReferenceCellType::Quadrilateral),
            4 => Some(ReferenceCellType::Tetrahedron),
            5 => Some(ReferenceCellType::Hexahedron),
            6 => Some(ReferenceCellType::Prism),
            7 => Some(ReferenceCellType::Pyramid),
            _ => None,
        }
    }
}

/// The family of an element
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum ElementFamily {
    /// Lagrange
    Lagrange = 0,
    /// Raviart-Thomas
    RaviartThomas = 1,
    /// Nedelec (first kind)
    NedelecFirstKind = 2,
    /// Nedelec (second kind)
    NedelecSecondKind = 3,
    /// Crouzeix-Raviart
    CrouzeixRaviart = 4,
}

/// The map type used by an element
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum MapType {
    /// Identity map
    Identity = 0,
    /// Covariant Piola map
    ///
    /// This map is used by H(curl) elements
    CovariantPiola = 1,
    /// Contravariant Piola map
    ///
    /// This map is used by H(div) elements
    ContravariantPiola = 2,
    /// L2 Piola map
    L2Piola = 3,
}

/// Continuity type
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum Continuity {
    /// The element has standard continuity between cells
    ///
    /// For some element, this option does not indicate that the values are fully continuous.
    /// For example, for Raviart-Thomas elements it only indicates that the normal components
    /// are continuous across edges
    Continuous = 0,
    /// The element is discontinuous betweeen cells
    Discontinuous = 1,
}

/// Error type
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The cell type cannot be used for the requested operation
    #[error("Unsupported cell type {cell:?}: {reason}")]
    UnsupportedCell {
        /// The cell type
        cell: ReferenceCellType,
        /// What was being attempted
        reason: String,
    },
    /// The degree is not valid for the requested element
    #[error("Invalid degree {degree} for {family:?}: {reason}")]
    InvalidDegree {
        /// The element family
        family: ElementFamily,
        /// The degree
        degree: usize,
        /// What is required
        reason: String,
    },
    /// The simplex vertices do not describe a valid simplex
    #[error("Invalid simplex: {0}")]
    InvalidSimplex(String),
    /// Too few points were requested for a rule
    ///
    /// Gauss rules need at least one point and Lobatto rules need both endpoints.
    #[error("Too few quadrature points: {0}")]
    TooFewPoints(usize),
    /// Newton iteration for a Gauss-Jacobi point did not converge
    #[error("Newton iteration for root {root} did not converge after {iterations} iterations (last correction {correction:e})")]
    NoConvergence {
        /// Index of the root
        root: usize,
        /// Number of iterations performed
        iterations: usize,
        /// Magnitude of the last Newton correction
        correction: f64,
    },
    /// The dual matrix contracted with the primal coefficients cannot be inverted
    #[error("Singular system: the dual functionals are not unisolvent for the polynomial set")]
    SingularSystem,
    /// Array dimensions do not agree
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
}

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn unsupported(cell: ReferenceCellType, reason: &str) -> Self {
        Error::UnsupportedCell {
            cell,
            reason: reason.to_string(),
        }
    }
}
