//! Benchmark suite for ZSPR decoding and compositing
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use zspr_benches::{
	FULL_TILE_BLOCK, generate_palette_data, generate_test_zspr_data, generate_tile_data,
};
use zspr_types::file::zspr::{
	File, PreviewVariant, TILE_BYTES, decode_palettes, decode_tiles, render_tile_sheet,
};

/// Benchmark planar tile decoding at several sheet sizes
fn bench_tile_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("zspr_tiles");

	for tiles in [16usize, 256, FULL_TILE_BLOCK / TILE_BYTES] {
		let data = generate_tile_data(tiles * TILE_BYTES);
		group.throughput(Throughput::Elements(tiles as u64));
		group.bench_with_input(BenchmarkId::new("decode", tiles), &data, |b, data| {
			b.iter(|| black_box(decode_tiles(black_box(data))));
		});
	}

	group.finish();
}

/// Benchmark palette block decoding
fn bench_palette_decode(c: &mut Criterion) {
	let data = generate_palette_data();
	c.bench_function("zspr_palettes/decode", |b| {
		b.iter(|| black_box(decode_palettes(black_box(&data))));
	});
}

/// Benchmark a whole file: parse, then render every preview
fn bench_realistic_workload(c: &mut Criterion) {
	let mut group = c.benchmark_group("zspr_file");
	let data = generate_test_zspr_data(FULL_TILE_BLOCK);

	group.throughput(Throughput::Bytes(data.len() as u64));
	group.bench_function("parse", |b| {
		b.iter(|| black_box(File::from_bytes(black_box(&data))));
	});

	let zspr = File::from_bytes(&data).unwrap();
	group.bench_function("previews", |b| {
		b.iter(|| {
			for variant in PreviewVariant::ALL {
				black_box(zspr.render_preview(variant).unwrap().scale_nearest(4).unwrap());
			}
		});
	});
	group.bench_function("tile_sheet", |b| {
		b.iter(|| black_box(render_tile_sheet(&zspr.palettes()[0], zspr.tiles())));
	});

	group.finish();
}

criterion_group!(benches, bench_tile_decode, bench_palette_decode, bench_realistic_workload);
criterion_main!(benches);
