//! Classify a handful of shapes against a body, reusing one spatial index for every query.
use bezier_area::{
    area::{Body, RelationshipOptions},
    core::math::Transform,
    path::Path,
};
use log::warn;

fn main() {
    env_logger::init();

    let frame = Body::from_source(&Path::rect(0.0, 0.0, 20.0, 20.0))
        .expect("valid frame")
        .subtract(&Body::from_source(&Path::ellipse(10.0, 10.0, 6.0, 6.0)).expect("valid hole"));

    let index = frame.create_aabb_index();
    let mut options = RelationshipOptions::new();
    options.lhs_aabb_index = Some(&index);

    let cover = Transform::scale(30.0, 30.0).then(&Transform::translate(-5.0, -5.0));
    let shapes = [
        ("corner square", Path::rect(1.0, 1.0, 2.0, 2.0), None),
        ("square in hole", Path::rect(9.0, 9.0, 2.0, 2.0), None),
        ("circle on rim", Path::ellipse(16.0, 10.0, 1.0, 1.0), None),
        ("cover", Path::rect(0.0, 0.0, 1.0, 1.0), Some(cover)),
        (
            "far away",
            Path::rect(0.0, 0.0, 1.0, 1.0),
            Some(Transform::translate(50.0, 0.0)),
        ),
    ];

    for (name, path, transform) in shapes.iter() {
        match frame.relationship_opt(path, transform.as_ref(), &options) {
            Ok(r) => println!(
                "{:>14}: {}",
                name,
                serde_json::to_string(&r).unwrap_or_else(|_| format!("{:?}", r))
            ),
            Err(e) => warn!("{name}: {e}"),
        }
    }
}
