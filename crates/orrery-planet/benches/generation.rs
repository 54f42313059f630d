use criterion::{Criterion, black_box, criterion_group, criterion_main};
use orrery_mesh::GeodesicMesh;
use orrery_planet::Body;
use orrery_terrain::BodySetting;

fn bench_subdivide(c: &mut Criterion) {
    for levels in [2, 4] {
        c.bench_function(&format!("subdivide_level_{levels}"), |bencher| {
            bencher.iter(|| GeodesicMesh::build(black_box(375.0), black_box(levels)))
        });
    }
}

fn bench_generate_oceans(c: &mut Criterion) {
    c.bench_function("generate_terrestrial_oceans_3", |bencher| {
        bencher.iter(|| {
            Body::generate(
                "terra",
                BodySetting::terrestrial_oceans(black_box(375.0)),
                "planet sim 2017",
                3,
            )
        })
    });
}

fn bench_generate_moon(c: &mut Criterion) {
    c.bench_function("generate_classic_moon_3", |bencher| {
        bencher.iter(|| Body::generate("luna", BodySetting::classic_moon(black_box(75.0)), "moon", 3))
    });
}

criterion_group!(benches, bench_subdivide, bench_generate_oceans, bench_generate_moon);
criterion_main!(benches);
