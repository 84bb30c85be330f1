use std::time::Instant;

use tracing::warn;

use crate::simulation::engine::Engine;
use crate::simulation::forces::magnet_force;
use crate::simulation::params::FieldParams;
use crate::simulation::polarity::polarity_weights;
use crate::simulation::states::NVec3;

/// Helper to build a deterministic magnet/object pair of sizes `m` and `n`
/// The magnet sits above z = 0 so every polarity weight is finite
fn make_point_sets(m: usize, n: usize) -> (Vec<NVec3>, Vec<NVec3>) {
    let magnet = (0..m)
        .map(|i| {
            let i_f = i as f64;
            NVec3::new((i_f * 0.37).sin(), (i_f * 0.13).cos(), 1.0 + (i_f * 0.07).sin().abs())
        })
        .collect();

    let object = (0..n)
        .map(|j| {
            let j_f = j as f64;
            NVec3::new(
                6.0 + (j_f * 0.29).sin(),
                (j_f * 0.11).cos(),
                1.5 + (j_f * 0.05).cos() * 0.5,
            )
        })
        .collect();

    (magnet, object)
}

/// Time one kernel call in milliseconds, averaged over `reps`
fn time_kernel(magnet: &[NVec3], object: &[NVec3], polarity: &[f64], params: &FieldParams, engine: &Engine, reps: usize) -> f64 {
    // Warm up (also builds rayon's global pool on first use)
    let mut obj = object.to_vec();
    magnet_force(magnet, &mut obj, polarity, params, engine);

    let t0 = Instant::now();
    for _ in 0..reps {
        let mut obj = object.to_vec();
        magnet_force(magnet, &mut obj, polarity, params, engine);
    }
    t0.elapsed().as_secs_f64() * 1000.0 / reps as f64
}

/// Compare sequential, primary and offload execution for growing point sets
pub fn bench_kernel() {
    let sizes = [(100, 100), (200, 400), (400, 800), (800, 1600), (1600, 3200)];
    let reps = 3;

    let params = FieldParams::clamped(10.0, true, false);
    let offload_params = FieldParams { offload: true, ..params };

    let sequential = Engine::sequential();
    let engine = match Engine::new().with_offload_threads(2) {
        Ok(engine) => engine,
        Err(e) => {
            warn!(error = %e, "offload pool unavailable, benchmarking primary only");
            Engine::new()
        }
    };

    for (m, n) in sizes {
        let (magnet, object) = make_point_sets(m, n);
        let polarity = polarity_weights(&magnet);

        let seq_ms = time_kernel(&magnet, &object, &polarity, &params, &sequential, reps);
        let primary_ms = time_kernel(&magnet, &object, &polarity, &params, &engine, reps);
        let offload_ms = time_kernel(&magnet, &object, &polarity, &offload_params, &engine, reps);

        println!(
            "M = {m:5}, N = {n:5}, sequential = {seq_ms:9.3} ms, primary = {primary_ms:9.3} ms, offload = {offload_ms:9.3} ms"
        );
    }
}

/// Benchmark the kernel for a range of pair counts
/// Paste output directly into a spreadsheet to graph
pub fn bench_kernel_curve() {
    println!("pairs,sequential_ms,parallel_ms");

    let params = FieldParams::clamped(10.0, true, false);
    let sequential = Engine::sequential();
    let parallel = Engine::new().with_parallel_threshold(0);

    // Square point sets, steps of 100 points per side
    for side in (100..=2000).step_by(100) {
        // Small sets: average a few calls to smooth noise
        let reps = if side <= 600 { 5 } else { 1 };

        let (magnet, object) = make_point_sets(side, side);
        let polarity = polarity_weights(&magnet);

        let seq_ms = time_kernel(&magnet, &object, &polarity, &params, &sequential, reps);
        let par_ms = time_kernel(&magnet, &object, &polarity, &params, &parallel, reps);

        println!("{},{:.6},{:.6}", side * side, seq_ms, par_ms);
    }
}
