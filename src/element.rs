//! Finite elements

pub mod ciarlet;
pub mod dual;
pub mod moments;
pub mod permutations;
pub mod polynomials;
pub mod reference_cell;
