use criterion::{black_box, criterion_group, criterion_main, Criterion};

use prism::mesh::{import, Mesh, MeshBuilder};

const PARTS: usize = 256;
const PART_GRID: usize = 16;

const TWO_PARTS: &[u8] = include_bytes!("../src/mesh/fixtures/two_parts.gltf");

/// Flat grid of `PART_GRID` x `PART_GRID` quads
fn grid() -> (Vec<[f32; 3]>, Vec<u32>) {
    let side = PART_GRID + 1;
    let positions = (0..side * side)
        .map(|i| [(i % side) as f32, (i / side) as f32, 0.0])
        .collect();

    let mut indices = Vec::with_capacity(PART_GRID * PART_GRID * 6);
    for y in 0..PART_GRID {
        for x in 0..PART_GRID {
            let i = (y * side + x) as u32;
            let s = side as u32;
            indices.extend_from_slice(&[i, i + 1, i + s + 1, i, i + s + 1, i + s]);
        }
    }

    (positions, indices)
}

fn build_mesh(positions: &[[f32; 3]], indices: &[u32]) -> Mesh {
    let mut builder = MeshBuilder::new();
    for _ in 0..PARTS {
        builder
            .push_part(positions, Some(indices), Mesh::WHITE)
            .unwrap();
    }
    builder.build().unwrap()
}

pub fn mesh_bench(c: &mut Criterion) {
    let (positions, indices) = grid();

    let mut group = c.benchmark_group("Mesh");

    group.bench_function("build", |b| {
        b.iter(|| build_mesh(black_box(&positions), black_box(&indices)))
    });

    let mesh = build_mesh(&positions, &indices);
    group.bench_function("normalize", |b| {
        b.iter_batched(
            || mesh.clone(),
            |mut mesh| mesh.normalize(),
            criterion::BatchSize::LargeInput,
        )
    });

    group.bench_function("import", |b| {
        b.iter(|| import::load_slice(black_box(TWO_PARTS)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, mesh_bench);
criterion_main!(benches);
