use std::time::Instant;

use crate::simulation::states::Body;
use crate::simulation::system::System;

/// Helper to build a gravitating System of size `n` on deterministic positions
fn make_system(n: usize) -> System {
    let mut system = System::new();

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = (i_f * 0.37).sin() * 500.0;
        let y = (i_f * 0.13).cos() * 500.0;

        if let Ok(body) = Body::new(x, y, 1.0) {
            system.add(body);
        }
    }

    system.set_timestep(0.001);
    system
}

/// Cost of the one-shot gravity wiring and of one tick afterwards
///
/// Both are O(n^2): n(n-1) forces are created, and all of them are
/// re-evaluated every tick.
pub fn bench_gravity() {
    let ns = [50, 100, 200, 400, 800];

    for n in ns {
        let mut system = make_system(n);

        let t0 = Instant::now();
        let forces = system.setup_gravity();
        let dt_setup = t0.elapsed().as_secs_f64();

        // Warm up
        system.update();

        let t1 = Instant::now();
        system.update();
        let dt_step = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, forces = {forces:7}, setup = {:8.6} s, step = {:8.6} s", dt_setup, dt_step);
    }
}

/// Sequential vs threaded tick for a range of n
/// Paste output directly into excel to graph
pub fn bench_threaded_curve(threads: usize) {
    println!("N,sequential_ms,threaded_ms");

    for n in (100..=1000).step_by(100) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 400 { 5 } else { 1 };

        let mut seq = make_system(n);
        seq.setup_gravity();

        let t0 = Instant::now();
        for _ in 0..steps {
            seq.update();
        }
        let ms_seq = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let mut par = make_system(n);
        par.setup_gravity();
        if par.split_for_threading(threads).is_err() {
            return;
        }

        let t1 = Instant::now();
        for _ in 0..steps {
            par.update_threaded();
        }
        let ms_par = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6}", n, ms_seq, ms_par);
    }
}
