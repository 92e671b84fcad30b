//! Random object fields

use expanse_core::Position2D;
use expanse_observe::SpaceObject;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::FieldConfig;

/// `num` objects with comoving positions uniform in `[-spread, spread]²`.
/// Same seed, same field.
pub fn random_space(num: usize, spread: f64, seed: u64) -> Vec<SpaceObject> {
    let mut rng = StdRng::seed_from_u64(seed);
    let spread = spread.abs();
    (0..num)
        .map(|_| {
            let x = uniform(&mut rng, spread);
            let y = uniform(&mut rng, spread);
            SpaceObject::new(Position2D::new(x, y))
        })
        .collect()
}

/// Field described by a configuration section
pub fn random_field(config: &FieldConfig) -> Vec<SpaceObject> {
    random_space(config.num, config.spread, config.seed)
}

fn uniform(rng: &mut StdRng, spread: f64) -> f64 {
    if spread == 0.0 {
        return 0.0;
    }
    rng.gen_range(-spread..=spread)
}
