use approx::assert_relative_eq;
use nalgebra::DMatrix;
use reftab::element::moments::FunctionalKind;
use reftab::element::permutations::{symmetry_generators, SymmetryGenerator};
use reftab::element::{polynomials, reference_cell};
use reftab::{
    build_element, make_quadrature, CiarletElement, Continuity, ElementFamily, ReferenceCellType,
};

fn check_group_relations(e: &CiarletElement) {
    let n = e.dual_matrix().matrix().nrows();
    let identity = DMatrix::<f64>::identity(n, n);
    let perms = e.base_permutations();
    assert_eq!(perms.len(), symmetry_generators(e.dual_matrix().cell_type()).len());
    for p in perms {
        assert!(p.matrix.iter().all(|v| [-1.0, 0.0, 1.0].contains(v)));
        let mut power = p.matrix.clone();
        for _ in 1..p.generator.order() {
            power = &power * &p.matrix;
        }
        assert_eq!(power, identity, "{:?}", p.generator);

        // Only the DOFs of the generator's own entity move
        let (d, entity) = p.generator.entity();
        let rows = e.dual_matrix().rows(d, entity);
        for i in (0..n).filter(|i| !rows.contains(i)) {
            assert_eq!(p.matrix[(i, i)], 1.0);
        }
    }
}

#[test]
fn test_group_relations() {
    let cases = [
        (ElementFamily::Lagrange, ReferenceCellType::Triangle, 5),
        (ElementFamily::Lagrange, ReferenceCellType::Tetrahedron, 5),
        (ElementFamily::RaviartThomas, ReferenceCellType::Triangle, 5),
        (ElementFamily::RaviartThomas, ReferenceCellType::Tetrahedron, 5),
        (ElementFamily::NedelecFirstKind, ReferenceCellType::Triangle, 5),
        (ElementFamily::NedelecFirstKind, ReferenceCellType::Tetrahedron, 5),
        (ElementFamily::NedelecSecondKind, ReferenceCellType::Triangle, 5),
        (ElementFamily::NedelecSecondKind, ReferenceCellType::Tetrahedron, 3),
        (ElementFamily::CrouzeixRaviart, ReferenceCellType::Tetrahedron, 1),
    ];
    for (family, cell, max_degree) in cases {
        for degree in 1..=max_degree {
            let e = build_element(family, cell, degree, Continuity::Continuous).unwrap();
            check_group_relations(&e);
        }
    }
}

#[test]
fn test_lowest_order_edge_reflections() {
    // A single tangential or normal DOF on an edge changes sign when the edge is reversed
    for family in [ElementFamily::RaviartThomas, ElementFamily::NedelecFirstKind] {
        let e = build_element(family, ReferenceCellType::Triangle, 1, Continuity::Continuous)
            .unwrap();
        for p in e.base_permutations() {
            let SymmetryGenerator::EdgeReflection(edge) = p.generator else {
                panic!("unexpected generator {:?}", p.generator);
            };
            let mut expected = DMatrix::<f64>::identity(3, 3);
            expected[(edge, edge)] = -1.0;
            assert_eq!(p.matrix, expected);
        }
    }
}

#[test]
fn test_lagrange_edge_reflection() {
    // The interior points of edge 0 of a degree 4 triangle are DOFs 3, 4 and 5
    let e = build_element(
        ElementFamily::Lagrange,
        ReferenceCellType::Triangle,
        4,
        Continuity::Continuous,
    )
    .unwrap();
    let p = &e.base_permutations()[0];
    assert_eq!(p.generator, SymmetryGenerator::EdgeReflection(0));
    assert_eq!(p.matrix[(3, 5)], 1.0);
    assert_eq!(p.matrix[(4, 4)], 1.0);
    assert_eq!(p.matrix[(5, 3)], 1.0);
    assert_eq!(p.matrix[(3, 3)], 0.0);
}

#[test]
fn test_lagrange_face_rotation() {
    // Each face of a degree 4 tetrahedron has three interior points
    let e = build_element(
        ElementFamily::Lagrange,
        ReferenceCellType::Tetrahedron,
        4,
        Continuity::Continuous,
    )
    .unwrap();
    let rotation = e
        .base_permutations()
        .iter()
        .find(|p| p.generator == SymmetryGenerator::FaceRotation(0))
        .unwrap();
    let start = e.dual_matrix().rows(2, 0).start;
    // Lattice nodes (0, 0), (1, 0), (0, 1) are moved to (1, 0), (0, 1), (0, 0)
    assert_eq!(rotation.matrix[(start, start + 1)], 1.0);
    assert_eq!(rotation.matrix[(start + 1, start + 2)], 1.0);
    assert_eq!(rotation.matrix[(start + 2, start)], 1.0);
}

#[test]
fn test_face_permutations_match_reoriented_moments() {
    // Permuting the face 0 rows gives the moments taken with the face vertices reordered
    let e = build_element(
        ElementFamily::NedelecFirstKind,
        ReferenceCellType::Tetrahedron,
        3,
        Continuity::Continuous,
    )
    .unwrap();
    let dual = e.dual_matrix().matrix();
    let pdim = dual.ncols() / 3;
    let rows = e
        .dual_matrix()
        .rows_of_kind(2, 0, FunctionalKind::IntegralMoment)
        .unwrap();
    assert_eq!(rows.len(), 6);

    let face = reference_cell::sub_entity_geometry(ReferenceCellType::Tetrahedron, 2, 0).unwrap();
    let rule = make_quadrature(ReferenceCellType::Triangle, 6).unwrap();
    for (generator, order) in [
        (SymmetryGenerator::FaceRotation(0), [1, 2, 0]),
        (SymmetryGenerator::FaceReflection(0), [0, 2, 1]),
    ] {
        let v = |i: usize| [0, 1, 2].map(|c| face[(order[i], c)]);
        let origin = v(0);
        let axes = [1, 2].map(|i| [0, 1, 2].map(|c| v(i)[c] - origin[c]));
        let points = DMatrix::from_fn(rule.npoints(), 3, |q, c| {
            origin[c] + rule.points[(q, 0)] * axes[0][c] + rule.points[(q, 1)] * axes[1][c]
        });
        let table = polynomials::tabulate(ReferenceCellType::Tetrahedron, 3, 0, &points).unwrap();
        let expected = DMatrix::from_fn(6, dual.ncols(), |row, col| {
            let (j, d) = (row / 2, row % 2);
            let (c, k) = (col / pdim, col % pdim);
            (0..rule.npoints())
                .map(|q| {
                    let (s, t) = (rule.points[(q, 0)], rule.points[(q, 1)]);
                    let hat = [1.0 - s - t, s, t][j];
                    rule.weights[q] * hat * axes[d][c] * table[0][(k, q)]
                })
                .sum::<f64>()
        });

        let p = e
            .base_permutations()
            .iter()
            .find(|p| p.generator == generator)
            .unwrap();
        let permuted = &p.matrix * dual;
        for (i, row) in rows.clone().enumerate() {
            for col in 0..dual.ncols() {
                assert_relative_eq!(permuted[(row, col)], expected[(i, col)], epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn test_second_kind_face_moments_are_fixed() {
    // Dot moment DOFs on faces are left in place by face rotations and reflections
    let e = build_element(
        ElementFamily::NedelecSecondKind,
        ReferenceCellType::Tetrahedron,
        2,
        Continuity::Continuous,
    )
    .unwrap();
    for p in e.base_permutations() {
        if let SymmetryGenerator::FaceRotation(f) | SymmetryGenerator::FaceReflection(f) =
            p.generator
        {
            let rows = e
                .dual_matrix()
                .rows_of_kind(2, f, FunctionalKind::DotMoment)
                .unwrap();
            assert_eq!(rows.len(), 3);
            for row in rows {
                assert_eq!(p.matrix[(row, row)], 1.0);
            }
        }
    }
}

#[test]
fn test_discontinuous_permutations_are_trivial() {
    let e = build_element(
        ElementFamily::NedelecFirstKind,
        ReferenceCellType::Tetrahedron,
        2,
        Continuity::Discontinuous,
    )
    .unwrap();
    let identity = DMatrix::<f64>::identity(20, 20);
    assert_eq!(e.base_permutations().len(), 14);
    for p in e.base_permutations() {
        assert_eq!(p.matrix, identity);
    }
}
