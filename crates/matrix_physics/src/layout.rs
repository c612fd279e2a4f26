use matrix_core::layout::Layout;
use rand::Rng;

/// Sample a candidate spawn position under the given layout.
///
/// The four "spherical"/"cartesian-normalized" variants illustrate
/// uniform-on-sphere sampling versus naive-angle bias; the cube and
/// slice variants drive the two-color demo shader and are left
/// unnormalized, but always within `[MIN_COORD, MAX_COORD]^3`.
pub fn sample(layout: Layout, rng: &mut impl Rng) -> [f32; 3] {
    match layout {
        Layout::RandomCartesianNaive => normalize(cube(rng)),
        Layout::RandomCartesianDiscard => normalize(rejection_sample_ball(rng)),
        Layout::RandomSphericalNaive => normalize(spherical_naive(rng)),
        Layout::RandomSphericalLatitude => spherical_latitude(rng),
        Layout::RandomCartesianCube => cube(rng),
        Layout::DemoDualColorSlice => {
            let [x, y, _] = cube(rng);
            [x, y, 0.0]
        }
    }
}

fn cube(rng: &mut impl Rng) -> [f32; 3] {
    [
        rng.gen_range(-1.0..=1.0f32),
        rng.gen_range(-1.0..=1.0f32),
        rng.gen_range(-1.0..=1.0f32),
    ]
}

fn rejection_sample_ball(rng: &mut impl Rng) -> [f32; 3] {
    loop {
        let p = cube(rng);
        let len_sq = p[0] * p[0] + p[1] * p[1] + p[2] * p[2];
        if len_sq <= 1.0 {
            return p;
        }
    }
}

fn spherical_naive(rng: &mut impl Rng) -> [f32; 3] {
    let theta = rng.gen_range(0.0..std::f32::consts::TAU);
    let phi = rng.gen_range(0.0..std::f32::consts::PI);
    [
        theta.cos() * phi.sin(),
        theta.sin() * phi.sin(),
        phi.cos(),
    ]
}

/// Archimedes' "golden" latitude sampling: uniform on the sphere,
/// unlike `spherical_naive` which clusters samples at the poles.
fn spherical_latitude(rng: &mut impl Rng) -> [f32; 3] {
    let e0: f32 = rng.gen_range(0.0..1.0);
    let e1: f32 = rng.gen_range(0.0..1.0);
    let z = 1.0 - 2.0 * e0;
    let r = (1.0 - z * z).max(0.0).sqrt();
    let theta = std::f32::consts::TAU * e1;
    [r * theta.cos(), r * theta.sin(), z]
}

/// Normalize to the unit sphere; a position exactly at the origin
/// (vanishingly unlikely from any of these samplers) falls back to
/// `+X` rather than producing NaN.
fn normalize(p: [f32; 3]) -> [f32; 3] {
    let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
    if len < f32::EPSILON {
        return [1.0, 0.0, 0.0];
    }
    [p[0] / len, p[1] / len, p[2] / len]
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix_core::constants::{MAX_COORD, MIN_COORD};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn in_bounds(p: [f32; 3]) -> bool {
        p.iter().all(|&c| (MIN_COORD..=MAX_COORD).contains(&c))
    }

    #[test]
    fn normalizing_layouts_land_on_unit_sphere() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for layout in [
            Layout::RandomCartesianNaive,
            Layout::RandomCartesianDiscard,
            Layout::RandomSphericalNaive,
            Layout::RandomSphericalLatitude,
        ] {
            for _ in 0..200 {
                let p = sample(layout, &mut rng);
                let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
                assert!((len - 1.0).abs() < 1e-5, "layout {:?} len={}", layout, len);
                assert!(in_bounds(p));
            }
        }
    }

    #[test]
    fn cube_and_slice_layouts_stay_in_bounds_unnormalized() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let cube = sample(Layout::RandomCartesianCube, &mut rng);
            assert!(in_bounds(cube));

            let slice = sample(Layout::DemoDualColorSlice, &mut rng);
            assert!(in_bounds(slice));
            assert_eq!(slice[2], 0.0);
        }
    }
}
