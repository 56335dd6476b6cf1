use bezier_area::{
    area::Body,
    core::traits::Real,
    path::{Path, WindingRule},
};

/// Self intersecting star with `point_count` points, every vertex joined to the one `step`
/// positions further around the circle.
pub fn star<T>(point_count: usize, step: usize) -> Path<T>
where
    T: Real,
{
    let radius = T::from(40.0).unwrap();
    let mut path = Path::with_capacity(point_count + 1, WindingRule::NonZero);
    for i in 0..point_count {
        let k = (i * step) % point_count;
        let angle = T::from(k).unwrap() * T::tau() / T::from(point_count).unwrap();
        let (s, c) = angle.sin_cos();
        if i == 0 {
            path.move_to(radius * c, radius * s);
        } else {
            path.line_to(radius * c, radius * s);
        }
    }
    path.close();
    path
}

/// `count` overlapping ellipses placed around a circle.
pub fn ellipse_ring<T>(count: usize) -> Vec<Body<T>>
where
    T: Real,
{
    let radius = T::from(30.0).unwrap();
    let (rx, ry) = (T::from(9.0).unwrap(), T::from(5.0).unwrap());
    (0..count)
        .map(|i| {
            let angle = T::from(i).unwrap() * T::tau() / T::from(count).unwrap();
            let (s, c) = angle.sin_cos();
            Body::from_source(&Path::ellipse(radius * c, radius * s, rx, ry)).unwrap()
        })
        .collect()
}

/// `n` by `n` grid of unit squares spaced so neighbors overlap by a quarter.
pub fn rect_grid<T>(n: usize) -> Vec<Body<T>>
where
    T: Real,
{
    let step = T::from(0.75).unwrap();
    let mut result = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            let x = T::from(i).unwrap() * step;
            let y = T::from(j).unwrap() * step;
            result.push(Body::from_source(&Path::rect(x, y, T::one(), T::one())).unwrap());
        }
    }
    result
}
