use super::super::*;

fn triangle() -> Polygon {
    Polygon::new(vec![
        R2 { x: 0., y: 0. },
        R2 { x: 1., y: 0. },
        R2 { x: 0.5, y: 1. },
    ])
}

fn rect() -> Polygon {
    Polygon::new(vec![
        R2 { x: 0., y: 0. },
        R2 { x: 100., y: 0. },
        R2 { x: 100., y: 50. },
        R2 { x: 0., y: 50. },
    ])
}

/// Rectangle with a triangular bite taken out of its top edge.
fn notched() -> Polygon {
    Polygon::new(vec![
        R2 { x: 0., y: 0. },
        R2 { x: 100., y: 0. },
        R2 { x: 100., y: 50. },
        R2 { x: 60., y: 50. },
        R2 { x: 50., y: 30. },
        R2 { x: 40., y: 50. },
        R2 { x: 0., y: 50. },
    ])
}

#[test]
fn test_area() {
    assert_relative_eq!(triangle().area(), 0.5, epsilon = 1e-10);
    assert_relative_eq!(rect().area(), 5000., epsilon = 1e-10);
    // Bite is a triangle with base 20 and height 20
    assert_relative_eq!(notched().area(), 4800., epsilon = 1e-10);
}

#[test]
fn test_winding_sign() {
    let ccw = rect();
    let cw = Polygon::new(ccw.vertices.iter().rev().cloned().collect());
    assert!(ccw.signed_area() > 0.);
    assert!(cw.signed_area() < 0.);
    assert_relative_eq!(cw.area(), ccw.area());
}

#[test]
fn test_bounds() {
    let b = notched().bounds();
    assert_eq!(b, Bounds { min_x: 0., max_x: 100., min_y: 0., max_y: 50. });
    assert_relative_eq!(b.width(), 100.);
    assert_relative_eq!(b.height(), 50.);
    assert_relative_eq!(b.center(), R2::new(50., 25.));
}

#[test]
fn test_contains() {
    let r = rect();
    assert!(r.contains(&R2::new(50., 25.)));
    assert!(r.contains(&R2::new(5., 12.5)));
    assert!(!r.contains(&R2::new(-1., 25.)));
    assert!(!r.contains(&R2::new(50., 51.)));

    let n = notched();
    assert!(n.contains(&R2::new(50., 20.)));
    // Inside the bite
    assert!(!n.contains(&R2::new(50., 40.)));
    assert!(!point_in_polygon(&R2::new(50., 45.), &n));
    // Either side of the bite
    assert!(point_in_polygon(&R2::new(30., 45.), &n));
    assert!(point_in_polygon(&R2::new(70., 45.), &n));
}

#[test]
fn test_at_y_rect() {
    let r = rect();

    let xs = r.at_y(25.);
    assert_eq!(xs.len(), 2);
    assert_relative_eq!(xs[0], 0., epsilon = 1e-10);
    assert_relative_eq!(xs[1], 100., epsilon = 1e-10);

    // Half-open [y_min, y_max): bottom included, top excluded
    assert_eq!(r.at_y(0.).len(), 2);
    assert_eq!(r.at_y(50.).len(), 0);
    assert_eq!(r.at_y(75.).len(), 0);
}

#[test]
fn test_at_y_notch() {
    let xs = notched().at_y(40.);
    assert_eq!(xs.len(), 4);
    assert_relative_eq!(xs[0], 0., epsilon = 1e-10);
    assert_relative_eq!(xs[1], 45., epsilon = 1e-10);
    assert_relative_eq!(xs[2], 55., epsilon = 1e-10);
    assert_relative_eq!(xs[3], 100., epsilon = 1e-10);

    // Below the bite's apex only the outer edges cross
    assert_eq!(notched().at_y(20.).len(), 2);
}

#[test]
fn test_centroid() {
    assert_relative_eq!(rect().centroid(), R2::new(50., 25.), epsilon = 1e-10);
    let t = triangle();
    assert_relative_eq!(t.centroid(), R2::new(0.5, 1. / 3.), epsilon = 1e-10);
    // Winding doesn't matter
    let rev = Polygon::new(t.vertices.iter().rev().cloned().collect());
    assert_relative_eq!(rev.centroid(), t.centroid(), epsilon = 1e-10);
}

#[test]
fn test_validate() {
    assert!(rect().validate().is_ok());

    let two = Polygon { vertices: vec![R2::new(0., 0.), R2::new(1., 1.)] };
    assert!(matches!(two.validate(), Err(LayoutError::InvalidGeometry(_))));

    let collinear = Polygon::new(vec![R2::new(0., 0.), R2::new(1., 1.), R2::new(2., 2.)]);
    assert!(matches!(collinear.validate(), Err(LayoutError::InvalidGeometry(_))));

    let nan = Polygon::new(vec![R2::new(0., 0.), R2::new(f64::NAN, 1.), R2::new(2., 0.)]);
    assert!(matches!(nan.validate(), Err(LayoutError::InvalidGeometry(_))));
}

#[test]
fn test_self_intersection() {
    assert!(!rect().is_self_intersecting());
    assert!(!notched().is_self_intersecting());
    let bowtie = Polygon::new(vec![
        R2::new(0., 0.),
        R2::new(10., 10.),
        R2::new(10., 0.),
        R2::new(0., 10.),
    ]);
    assert!(bowtie.is_self_intersecting());
}

#[test]
fn test_display() {
    assert_eq!(
        triangle().to_string(),
        "Polygon[(0.000, 0.000), (1.000, 0.000), (0.500, 1.000)]"
    );
}
