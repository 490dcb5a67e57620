use super::*;
use crate::foundation::core::{Offset, Rect};

fn trimmed(frame: Rect, rotated: bool, offset: Offset, source: Size) -> FrameGeometry {
    FrameGeometry {
        frame,
        rotated,
        trimmed: true,
        sprite_source_size: Some(offset),
        source_size: Some(source),
    }
}

fn pad(edge: Edge, width: u32, height: u32) -> Op {
    Op::PadEdge {
        edge,
        background: Rgba8::TRANSPARENT,
        width,
        height,
    }
}

#[test]
fn plain_frame_is_single_crop() {
    for (x, y, w, h) in [(0, 0, 32, 48), (7, 3, 1, 1), (100, 200, 17, 5)] {
        let plan = plan_frame(&FrameGeometry::plain(Rect::new(x, y, w, h))).unwrap();
        assert_eq!(
            plan.ops,
            vec![Op::Crop {
                width: w,
                height: h,
                x,
                y
            }]
        );
        assert_eq!(plan.output_size(), Some(Size::new(w, h)));
    }
}

#[test]
fn rotated_frame_swaps_crop_and_rotates_back() {
    let mut g = FrameGeometry::plain(Rect::new(10, 20, 32, 48));
    g.rotated = true;

    let plan = plan_frame(&g).unwrap();
    assert_eq!(
        plan.ops,
        vec![
            Op::Crop {
                width: 48,
                height: 32,
                x: 10,
                y: 20
            },
            Op::RotateTransparent { degrees: -90 },
        ]
    );
    assert_eq!(plan.output_size(), Some(Size::new(32, 48)));
}

#[test]
fn trimmed_frame_pads_east_west_south_north() {
    let g = trimmed(
        Rect::new(0, 0, 32, 48),
        false,
        Offset { x: 4, y: 2 },
        Size::new(40, 52),
    );

    let plan = plan_frame(&g).unwrap();
    assert_eq!(
        plan.ops,
        vec![
            Op::Crop {
                width: 32,
                height: 48,
                x: 0,
                y: 0
            },
            pad(Edge::East, 36, 48),
            pad(Edge::West, 40, 48),
            pad(Edge::South, 40, 50),
            pad(Edge::North, 40, 52),
        ]
    );
    assert_eq!(plan.output_size(), Some(Size::new(40, 52)));
}

#[test]
fn rotated_and_trimmed_keeps_logical_pad_targets() {
    let g = trimmed(
        Rect::new(5, 6, 10, 20),
        true,
        Offset { x: 1, y: 3 },
        Size::new(12, 24),
    );

    let plan = plan_frame(&g).unwrap();
    assert_eq!(plan.len(), 6);
    assert_eq!(
        plan.ops[0],
        Op::Crop {
            width: 20,
            height: 10,
            x: 5,
            y: 6
        }
    );
    assert_eq!(plan.ops[1], Op::RotateTransparent { degrees: -90 });
    assert_eq!(&plan.ops[2..], &[
        pad(Edge::East, 11, 20),
        pad(Edge::West, 12, 20),
        pad(Edge::South, 12, 23),
        pad(Edge::North, 12, 24),
    ]);
}

#[test]
fn trimmed_without_records_is_rejected() {
    let mut g = FrameGeometry::plain(Rect::new(0, 0, 4, 4));
    g.trimmed = true;
    assert!(plan_frame(&g).is_err());
}

#[test]
fn empty_plan_has_no_size() {
    let plan = OperationPlan::default();
    assert!(plan.is_empty());
    assert_eq!(plan.output_size(), None);
}
