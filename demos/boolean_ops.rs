//! Combine two overlapping shapes with every boolean operation and report the results.
use bezier_area::{
    area::{BooleanOp, Body},
    core::math::vec2,
    path::Path,
};
use log::info;

fn main() {
    env_logger::init();

    let square = Body::from_source(&Path::rect(0.0, 0.0, 8.0, 8.0)).expect("valid square");
    let circle = Body::from_source(&Path::ellipse(8.0, 4.0, 3.0, 5.0)).expect("valid ellipse");
    let samples = [vec2(2.0, 2.0), vec2(7.0, 4.0), vec2(10.0, 4.0), vec2(12.0, 12.0)];

    for op in [
        BooleanOp::Add,
        BooleanOp::Subtract,
        BooleanOp::Intersect,
        BooleanOp::Xor,
    ] {
        let result = square.boolean(&circle, op);
        let valid = result.validate();
        info!("{:?} produced {} curves", op, valid.len());

        println!("{:?}:", op);
        println!("  contours: {}", valid.contour_starts().count());
        match result.bounds() {
            Some(b) => println!(
                "  bounds: ({:.3}, {:.3}) - ({:.3}, {:.3})",
                b.min_x, b.min_y, b.max_x, b.max_y
            ),
            None => println!("  bounds: empty"),
        }
        for p in samples {
            println!(
                "  contains ({}, {}): {}",
                p.x,
                p.y,
                result.contains_point(p)
            );
        }
    }
}
