//! Tests for BoundingBox operations used by the tiling grid.

use tiles_common::bbox::BoundingBox;
use tiles_common::TilesError;

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
    assert_eq!(bbox.min_x, -180.0);
    assert_eq!(bbox.min_y, -90.0);
    assert_eq!(bbox.max_x, 180.0);
    assert_eq!(bbox.max_y, 90.0);
}

#[test]
fn test_bbox_from_array() {
    let bbox: BoundingBox = [-180.0, -90.0, 180.0, 90.0].into();
    assert_eq!(bbox, BoundingBox::new(-180.0, -90.0, 180.0, 90.0));
    assert_eq!(bbox.to_array(), [-180.0, -90.0, 180.0, 90.0]);
}

#[test]
fn test_bbox_from_corners_web_mercator() {
    let bbox = BoundingBox::from_corners(
        [-20037508.3427892, -20037508.3427892],
        [20037508.3427892, 20037508.3427892],
    )
    .unwrap();
    assert!((bbox.width() - 40075016.6855784).abs() < 0.001);
}

#[test]
fn test_bbox_from_corners_rejects_nan() {
    let result = BoundingBox::from_corners([f64::NAN, 0.0], [1.0, 1.0]);
    assert!(matches!(result, Err(TilesError::InvalidBbox(_))));
}

#[test]
fn test_bbox_from_corners_degenerate_point() {
    let bbox = BoundingBox::from_corners([0.0, 0.0], [0.0, 0.0]).unwrap();
    assert_eq!(bbox.width(), 0.0);
    assert_eq!(bbox.height(), 0.0);
}

// ============================================================================
// Dimension tests
// ============================================================================

#[test]
fn test_bbox_width_height_global() {
    let bbox = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
    assert_eq!(bbox.width(), 360.0);
    assert_eq!(bbox.height(), 180.0);
}

#[test]
fn test_bbox_swap_axes() {
    let bbox = BoundingBox::new(-90.0, -180.0, 90.0, 180.0);
    assert_eq!(bbox.swap_axes(), BoundingBox::new(-180.0, -90.0, 180.0, 90.0));
}

// ============================================================================
// Intersection / union tests
// ============================================================================

#[test]
fn test_bbox_intersects_overlapping() {
    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
}

#[test]
fn test_bbox_intersects_touching_edge_is_false() {
    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let b = BoundingBox::new(10.0, 0.0, 20.0, 10.0);
    assert!(!a.intersects(&b));
}

#[test]
fn test_bbox_intersection() {
    let a = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
    let b = BoundingBox::new(-10.0, -100.0, 200.0, 10.0);
    assert_eq!(
        a.intersection(&b),
        Some(BoundingBox::new(-10.0, -90.0, 180.0, 10.0))
    );
}

#[test]
fn test_bbox_intersection_disjoint() {
    let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
    let b = BoundingBox::new(5.0, 5.0, 6.0, 6.0);
    assert_eq!(a.intersection(&b), None);
}

#[test]
fn test_bbox_union_contains_both() {
    let a = BoundingBox::new(-180.0, 0.0, 0.0, 90.0);
    let b = BoundingBox::new(0.0, -90.0, 180.0, 0.0);
    let u = a.union(&b);
    assert_eq!(u, BoundingBox::new(-180.0, -90.0, 180.0, 90.0));
    assert!(u.contains_point(-180.0, -90.0));
    assert!(u.contains_point(180.0, 90.0));
    assert!(!u.contains_point(180.1, 0.0));
}
