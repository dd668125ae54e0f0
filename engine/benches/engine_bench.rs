use criterion::{black_box, criterion_group, criterion_main, Criterion};
use voiceguard_engine::{Engine, Policy};
use voiceguard_identity::{EnrollmentInfo, MemoryStore, EMBEDDING_DIM};

fn random_unit_vec(dim: usize, seed: u64) -> Vec<f32> {
    let mut v = Vec::with_capacity(dim);
    let mut state = seed;
    for _ in 0..dim {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        v.push(((state >> 33) as f32) / (u32::MAX as f32) - 0.5);
    }
    let norm: f64 = v.iter().map(|&x| (x as f64) * (x as f64)).sum::<f64>().sqrt();
    if norm > 0.0 {
        let s = (1.0 / norm) as f32;
        for x in &mut v {
            *x *= s;
        }
    }
    v
}

fn populated_engine(n: usize) -> Engine {
    let engine = Engine::new(Box::new(MemoryStore::new()));
    for i in 0..n {
        let info = EnrollmentInfo {
            first_name: format!("Speaker{i}"),
            last_name: "Bench".into(),
            date_of_birth: voiceguard_engine::parse_birth_date("1990-01-01").unwrap(),
        };
        let emb = random_unit_vec(EMBEDDING_DIM, 1000 + i as u64 * 997);
        engine.enroll(info, emb).unwrap();
    }
    engine
}

fn bench_verify(c: &mut Criterion) {
    let policy = Policy::default();

    for n in [10, 100, 1000] {
        let engine = populated_engine(n);
        let probe = random_unit_vec(EMBEDDING_DIM, 42);

        c.bench_function(&format!("verify_{n}_identities"), |b| {
            b.iter(|| {
                let res = engine.verify(black_box(&probe), policy).unwrap();
                black_box(res.score)
            })
        });
    }
}

criterion_group!(benches, bench_verify);
criterion_main!(benches);
