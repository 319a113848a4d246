use std::f64::consts::PI;

use super::super::*;

#[test]
fn test_dominant_edge_rect() {
    let r = Polygon::new(vec![
        R2::new(0., 0.),
        R2::new(100., 0.),
        R2::new(100., 50.),
        R2::new(0., 50.),
    ]);
    // Bottom and top edges tie; the first one wins
    assert_relative_eq!(r.dominant_edge_angle(), 0.);
}

#[test]
fn test_dominant_edge_inclined() {
    // Trapezoid whose long bottom edge falls 30° (canvas y grows downward)
    let p3 = R2::new(0., 0.);
    let p4 = R2::new(200. * (PI / 6.).cos(), -200. * (PI / 6.).sin());
    let poly = Polygon::new(vec![
        p3,
        p4,
        p4 + R2::new(-20., -80.),
        p3 + R2::new(10., -60.),
    ]);
    assert_relative_eq!(poly.dominant_edge_angle(), -PI / 6., epsilon = 1e-12);
}

#[test]
fn test_in_frame_aligns_dominant_edge() {
    let poly = Polygon::new(vec![
        R2::new(564.8, 864.0),
        R2::new(769.6, 744.6),
        R2::new(699.4, 487.3),
        R2::new(489.2, 608.8),
    ]);
    let frame = Frame::new(poly.dominant_edge_angle());
    let rotated = poly.in_frame(&frame);
    // Longest edge (v1 → v2 here) is parallel to the u axis once rotated
    let longest = poly
        .edges()
        .map(|(a, b)| (*b - *a).norm())
        .fold(0., f64::max);
    let flat = rotated
        .edges()
        .filter(|(a, b)| (a.y - b.y).abs() < 1e-9)
        .map(|(a, b)| (b.x - a.x).abs())
        .collect::<Vec<_>>();
    assert_eq!(flat.len(), 1);
    assert_relative_eq!(flat[0], longest, epsilon = 1e-9);
    assert_relative_eq!(rotated.area(), poly.area(), epsilon = 1e-6);
}

#[test]
fn test_dominant_edge_follows_vertex_order() {
    let from_origin = Polygon::new(vec![
        R2::new(0., 0.),
        R2::new(100., 0.),
        R2::new(100., 50.),
        R2::new(0., 50.),
    ]);
    let from_opposite = Polygon::new(vec![
        R2::new(100., 50.),
        R2::new(0., 50.),
        R2::new(0., 0.),
        R2::new(100., 0.),
    ]);
    assert_relative_eq!(from_origin.dominant_edge_angle(), 0.);
    assert_relative_eq!(from_opposite.dominant_edge_angle(), PI);

    // The flipped frame mirrors both axes
    let a = from_origin.in_frame(&Frame::new(0.)).bounds();
    let b = from_opposite.in_frame(&Frame::new(PI)).bounds();
    assert_relative_eq!(a.min_x, -b.max_x, epsilon = 1e-9);
    assert_relative_eq!(a.min_y, -b.max_y, epsilon = 1e-9);
}
