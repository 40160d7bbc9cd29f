#![no_main]
use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use platform_physics::{shape_vs_shape, Corner, Shape, V2f};

#[derive(Debug, Arbitrary)]
struct ShapeInput {
    /// 0 = circle, 1 = rect, 2 = triangle, 3 = line-only triangle
    kind: u8,
    /// Size in tenths of a unit
    w: u8,
    h: u8,
    corner: u8,
    /// Position in tenths of a unit
    x: i16,
    y: i16,
}

impl ShapeInput {
    fn build(&self) -> (V2f, Shape) {
        let w = (self.w as f32 + 1.0) * 0.1;
        let h = (self.h as f32 + 1.0) * 0.1;
        let corner = match self.corner % 4 {
            0 => Corner::UpLeft,
            1 => Corner::UpRight,
            2 => Corner::DownLeft,
            _ => Corner::DownRight,
        };
        let shape = match self.kind % 4 {
            0 => Shape::circle(w),
            1 => Shape::rect(w, h),
            2 => Shape::triangle(V2f::new(w, h), corner, false),
            _ => Shape::triangle(V2f::new(w, h), corner, true),
        };
        (V2f::new(self.x as f32, self.y as f32) * 0.1, shape)
    }
}

// Every shape pair, in both orders. Contacts must carry a finite unit normal
// and a finite non-negative depth, and swapping the pair must flip the normal.
fuzz_target!(|input: (ShapeInput, ShapeInput)| {
    let (a_pos, a) = input.0.build();
    let (b_pos, b) = input.1.build();

    let forward = shape_vs_shape(a_pos, &a, b_pos, &b);
    let backward = shape_vs_shape(b_pos, &b, a_pos, &a);

    if let Some(c) = forward {
        assert!(c.normal.is_finite() && c.penetration.is_finite());
        assert!(c.penetration >= 0.0);
        assert!((c.normal.length() - 1.0).abs() < 1e-3);
    }
    assert_eq!(forward.is_some(), backward.is_some());
});
