//! Validate a self intersecting path and print the resolved outline as JSON path commands.
use bezier_area::{
    area::Body,
    core::math::Transform,
    path::{Path, WindingRule},
};
use log::{debug, error};

fn main() {
    env_logger::init();

    let mut bowtie = Path::new(WindingRule::EvenOdd);
    bowtie
        .move_to(0.0, 0.0)
        .line_to(10.0, 10.0)
        .line_to(10.0, 0.0)
        .line_to(0.0, 10.0)
        .close()
        .move_to(2.0, 4.0)
        .quad_to(5.0, -2.0, 8.0, 4.0)
        .close();

    let body = match Body::from_source(&bowtie) {
        Ok(b) => b,
        Err(e) => {
            error!("failed to ingest path: {e}");
            return;
        }
    };
    debug!("ingested {} raw curves", body.len());

    let outline = body.to_path();
    match serde_json::to_string_pretty(&outline) {
        Ok(json) => println!("{json}"),
        Err(e) => error!("failed to serialize outline: {e}"),
    }

    let turned = body.to_path_transformed(&Transform::rotate(std::f64::consts::FRAC_PI_2));
    println!("rotated outline has {} commands", turned.len());
}
