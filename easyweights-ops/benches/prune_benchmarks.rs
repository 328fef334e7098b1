use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use easyweights_core::{Point3f, WeightedMesh};
use easyweights_ops::delete_zero_weights;

const VERTEX_COUNTS: [usize; 4] = [1_000, 10_000, 50_000, 100_000];
const GROUP_COUNT: usize = 64;
const INFLUENCES_PER_VERTEX: usize = 4;

/// Every other group is assigned only with zero weights
fn create_skinned_mesh(vertex_count: usize) -> WeightedMesh {
    let positions = (0..vertex_count)
        .map(|i| Point3f::new(i as f32, 0.0, 0.0))
        .collect();
    let mut mesh = WeightedMesh::from_positions(positions);
    for g in 0..GROUP_COUNT {
        mesh.add_group(&format!("Bone{:02}", g));
    }
    for vertex in 0..vertex_count {
        for k in 0..INFLUENCES_PER_VERTEX {
            let group = (vertex + k * 7) % GROUP_COUNT;
            let weight = if group % 2 == 0 { 0.25 } else { 0.0 };
            mesh.assign(vertex, group, weight).unwrap();
        }
    }
    mesh
}

fn prune_zero_weights(c: &mut Criterion) {
    let mut g = c.benchmark_group("delete zero weights");
    g.sample_size(10);

    for count in VERTEX_COUNTS {
        let mesh = create_skinned_mesh(count);
        g.bench_with_input(BenchmarkId::from_parameter(count), &mesh, |b, mesh| {
            b.iter_batched(
                || mesh.clone(),
                |mut mesh| delete_zero_weights(std::hint::black_box(&mut mesh)),
                criterion::BatchSize::LargeInput,
            );
        });
    }

    g.finish();
}

criterion_group!(benches, prune_zero_weights);
criterion_main!(benches);
