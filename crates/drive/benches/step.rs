use criterion::{black_box, criterion_group, criterion_main, Criterion};
use drive::{Action, Simulation, Variant};

fn bench_step(c: &mut Criterion) {
    for variant in Variant::ALL {
        c.bench_function(&format!("step_{variant}"), |b| {
            let mut sim = Simulation::preset(variant).unwrap();
            sim.reset();
            let mut tick = 0_usize;
            b.iter(|| {
                let action = Action::ALL[tick % 2];
                tick += 1;
                match sim.step(black_box(action)) {
                    Ok(step) if step.terminal => {
                        sim.reset();
                    }
                    Ok(_) => {}
                    Err(_) => {
                        sim.reset();
                    }
                }
            });
        });
    }
}

fn bench_boundaries(c: &mut Criterion) {
    use drive::track::{TrackGeometry, TrackSpec};

    let track = TrackSpec::segmented_random(Some(1)).build().unwrap();
    c.bench_function("segmented_boundaries", |b| {
        let mut x = 0.0_f64;
        b.iter(|| {
            x = (x + 0.37) % 100.0;
            black_box(track.boundaries(black_box(x)))
        });
    });
}

criterion_group!(benches, bench_step, bench_boundaries);
criterion_main!(benches);
