use rand::rngs::StdRng;
use rand::SeedableRng;
use wengert_core::{Array, Tape, Tensor};

// Shared by several integration test crates; not every crate uses every helper.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn leaf(tape: &Tape<f64>, rows: usize, cols: usize, data: Vec<f64>) -> Tensor<f64> {
    let value = Array::from_vec(rows, cols, data).expect("Test array creation failed");
    Tensor::new(value, tape)
}

#[allow(dead_code)]
pub fn random_array(rng: &mut StdRng, rows: usize, cols: usize) -> Array<f64> {
    Array::random_uniform(rows, cols, -1.0, 1.0, rng).expect("Random array creation failed")
}

#[allow(dead_code)]
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
