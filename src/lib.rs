//! Reftab
//!
//! Tabulation of finite element basis functions on reference cells. Elements are built by the
//! Ciarlet construction: a span of orthonormal polynomials, a set of dual functionals, and the
//! expansion coefficients that make the two biorthogonal. Quadrature rules on the reference
//! cells are provided for the moment functionals and for use elsewhere.
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod diagnostics;
pub mod element;
pub mod quadrature;
pub mod traits;
pub mod types;

pub use element::ciarlet::{build_element, CiarletElement, Tabulation};
pub use quadrature::{make_quadrature, QuadratureRule};
pub use traits::FiniteElement;
pub use types::{Continuity, ElementFamily, Error, MapType, ReferenceCellType, Result};
