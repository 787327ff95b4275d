//! Chaining the crate entry points: noding raw linework, then forming
//! polygons from it.

use approx::assert_relative_eq;

use geotopo::{line_merge, node_lines, polygonize, Geometry, GeometryFactory};

#[test]
fn overlapping_square_boundaries_node_into_three_faces() {
    let f = GeometryFactory::floating();
    let boundaries = f
        .multi_line_string(vec![
            vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)].into(),
            vec![(2.0, 2.0), (6.0, 2.0), (6.0, 6.0), (2.0, 6.0), (2.0, 2.0)].into(),
        ])
        .unwrap();

    // The raw boundaries cross at (4, 2) and (2, 4); polygonization needs
    // them split there first.
    let noded = node_lines(&boundaries);
    let polys = polygonize(&Geometry::MultiLineString(noded));

    let mut areas: Vec<f64> = polys.iter().map(|p| p.area()).collect();
    areas.sort_by(f64::total_cmp);
    assert_eq!(areas.len(), 3);
    assert_relative_eq!(areas[0], 4.0, epsilon = 1e-9);
    assert_relative_eq!(areas[1], 12.0, epsilon = 1e-9);
    assert_relative_eq!(areas[2], 12.0, epsilon = 1e-9);
}

#[test]
fn noded_pieces_merge_back_into_maximal_lines() {
    let f = GeometryFactory::floating();
    let lines = f
        .multi_line_string(vec![
            vec![(0.0, 0.0), (5.0, 0.0)].into(),
            vec![(5.0, 0.0), (10.0, 0.0), (10.0, 5.0)].into(),
            vec![(10.0, 5.0), (10.0, 10.0)].into(),
        ])
        .unwrap();
    let merged = line_merge(&lines);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].len(), 5);
}
