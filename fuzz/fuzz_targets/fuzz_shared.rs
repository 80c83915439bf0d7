use bowyer_watson::{validate_coordinate, Point2, Triangulation};

pub const SUPER_TRIANGLE_RADIUS: f32 = 100.0;

/// Points further away from the origin may lie outside of the super-triangle.
const MAX_COORDINATE: f64 = 20.0;

#[derive(Clone, Copy, arbitrary::Arbitrary)]
pub struct FuzzPoint<S> {
    pub x: S,
    pub y: S,
}

impl<S: Into<f64> + Copy> FuzzPoint<S> {
    pub fn is_usable(&self) -> bool {
        [self.x, self.y].iter().all(|&value| {
            let value: f64 = value.into();
            validate_coordinate(value).is_ok() && value.abs() <= MAX_COORDINATE
        })
    }
}

impl<S> From<FuzzPoint<S>> for Point2<S> {
    fn from(point: FuzzPoint<S>) -> Self {
        Point2::new(point.x, point.y)
    }
}

impl<S: core::fmt::Debug> core::fmt::Debug for FuzzPoint<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!("Point2::new({:?}, {:?})", self.x, self.y))
    }
}

/// Inserts all points, skipping duplicates, and checks the result after every insertion.
pub fn insert_and_check<S: bowyer_watson::MeshNum>(data: &[FuzzPoint<S>]) {
    let mut triangulation = Triangulation::<S>::new(SUPER_TRIANGLE_RADIUS.into()).unwrap();
    for point in data {
        let num_points = triangulation.num_points();
        let num_triangles = triangulation.num_triangles();
        if triangulation.insert(*point).is_err() {
            // Failed insertions must not change anything
            assert_eq!(triangulation.num_points(), num_points);
            assert_eq!(triangulation.num_triangles(), num_triangles);
        }
        triangulation.sanity_check();
    }
}
