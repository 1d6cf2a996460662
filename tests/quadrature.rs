use approx::assert_relative_eq;
use nalgebra::DMatrix;
use reftab::diagnostics::{Diagnostic, Diagnostics, MemorySink};
use reftab::quadrature::{
    gauss_jacobi_rule, gauss_lobatto_legendre, make_quadrature_with_options,
    make_simplex_quadrature, QuadratureOptions,
};
use reftab::{make_quadrature, Error, ReferenceCellType};

#[test]
fn test_reference_volumes() {
    for (cell, volume) in [
        (ReferenceCellType::Interval, 1.0),
        (ReferenceCellType::Triangle, 0.5),
        (ReferenceCellType::Quadrilateral, 1.0),
        (ReferenceCellType::Tetrahedron, 1.0 / 6.0),
        (ReferenceCellType::Hexahedron, 1.0),
    ] {
        for degree in 0..10 {
            let rule = make_quadrature(cell, degree).unwrap();
            assert_relative_eq!(rule.weights.iter().sum::<f64>(), volume, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_physical_triangle() {
    // Integral of x y over the triangle (1, 1), (3, 1), (1, 2)
    let vertices = DMatrix::from_row_slice(3, 2, &[1.0, 1.0, 3.0, 1.0, 1.0, 2.0]);
    let rule = make_simplex_quadrature(&vertices, 2, &QuadratureOptions::default()).unwrap();
    let values = (0..rule.npoints())
        .map(|q| rule.points[(q, 0)] * rule.points[(q, 1)])
        .collect::<Vec<_>>();
    assert_relative_eq!(rule.integrate(&values), 13.0 / 6.0, epsilon = 1e-12);
}

#[test]
fn test_gauss_jacobi_and_lobatto() {
    let (x, w) = gauss_jacobi_rule(0.0, 5).unwrap();
    assert_relative_eq!(w.iter().sum::<f64>(), 2.0, epsilon = 1e-12);
    assert_relative_eq!(
        x.iter().zip(&w).map(|(x, w)| w * x.powi(8)).sum::<f64>(),
        2.0 / 9.0,
        epsilon = 1e-12
    );

    let (x, w) = gauss_lobatto_legendre(5).unwrap();
    assert_eq!(x[0], -1.0);
    assert_eq!(x[4], 1.0);
    assert_relative_eq!(
        x.iter().zip(&w).map(|(x, w)| w * x.powi(6)).sum::<f64>(),
        2.0 / 7.0,
        epsilon = 1e-12
    );
}

#[test]
fn test_newton_diagnostics() {
    let sink = MemorySink::new();
    let options = QuadratureOptions::default().with_diagnostics(Diagnostics::new(&sink, true));
    make_quadrature_with_options(ReferenceCellType::Triangle, 5, &options).unwrap();
    let events = sink.events();
    assert!(!events.is_empty());
    assert!(events
        .iter()
        .all(|e| matches!(e, Diagnostic::NewtonConverged { npoints: 3, .. })));
}

#[test]
fn test_newton_failure() {
    let mut options = QuadratureOptions::default();
    options.set_max_newton_iterations(1);
    options.set_newton_tolerance(0.0);
    assert!(matches!(
        make_quadrature_with_options(ReferenceCellType::Interval, 7, &options),
        Err(Error::NoConvergence { .. })
    ));
}
