use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fb_detile::{allocate_align_64, detile_frame_bytes, FrameGeometry};
use safe_allocator_api::RawAlloc;
use std::hint::black_box;

// Helper to generate a tiled frame with a predictable pattern
fn generate_test_frame(geometry: FrameGeometry) -> RawAlloc {
    let mut data = allocate_align_64(geometry.frame_bytes()).unwrap();
    for (index, pixel) in data.as_mut_slice().chunks_exact_mut(4).enumerate() {
        pixel.copy_from_slice(&(index as u32).to_ne_bytes());
    }
    data
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Frame Detile");

    let geometries = [
        ("1280x768", FrameGeometry::DEFAULT),
        ("1920x1088", FrameGeometry::new(1920, 1088).unwrap()),
    ];

    for (name, geometry) in geometries {
        let input = generate_test_frame(geometry);
        let mut output = allocate_align_64(geometry.frame_bytes()).unwrap();
        group.throughput(Throughput::Bytes(geometry.frame_bytes() as u64));

        group.bench_with_input(BenchmarkId::new("sequential", name), &geometry, |b, &g| {
            b.iter(|| {
                detile_frame_bytes(
                    black_box(input.as_slice()),
                    black_box(output.as_mut_slice()),
                    g,
                )
                .unwrap()
            });
        });

        #[cfg(feature = "multithreaded")]
        group.bench_with_input(BenchmarkId::new("parallel", name), &geometry, |b, &g| {
            b.iter(|| {
                fb_detile::detile_frame_bytes_parallel(
                    black_box(input.as_slice()),
                    black_box(output.as_mut_slice()),
                    g,
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
