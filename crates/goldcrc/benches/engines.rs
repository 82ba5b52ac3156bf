//! Comparative benchmarks for every CRC-32C engine.
//!
//! Run: `cargo bench -p goldcrc`
//! Native: `RUSTFLAGS='-C target-cpu=native' cargo bench -p goldcrc`
//!
//! Groups mirror the engine ladder, slowest first:
//! - bit-serial step encodings (branch, multiply-mask, bit-mask, select)
//! - slice-by-1/2/4/8/16
//! - hardware accumulate, 1 and 8 bytes per instruction
//! - parallel fold, 2 and 3 lanes (hardware and emulated)

use core::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use goldcrc::{Backend, Crc32c, Engine, FoldParams, Lanes, Polynomial, Slice, bitwise, tables::CASTAGNOLI_TABLES};

/// Standard sizes; the last matches the 900 KiB buffer of the reference driver.
const SIZES: [usize; 4] = [256, 4096, 65536, 900 * 1024];

/// Smaller sizes for the bit-serial engines.
const BITWISE_SIZES: [usize; 3] = [64, 1024, 16384];

const P: u32 = 0x82F6_3B78;

fn gen_bytes(len: usize) -> Vec<u8> {
  let mut x = 5u64;
  (0..len)
    .map(|_| {
      x = x.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
      (x >> 56) as u8
    })
    .collect()
}

fn serial(data: &[u8], step: impl Fn(u32) -> u32) -> u32 {
  let mut crc = !0u32;
  for &b in data {
    crc ^= b as u32;
    for _ in 0..8 {
      crc = step(crc);
    }
  }
  !crc
}

fn bench_bitwise(c: &mut Criterion) {
  let mut group = c.benchmark_group("crc32c/bitwise");

  type Encoding = fn(u32) -> u32;
  let encodings: [(&str, Encoding); 4] = [
    ("branch", |r| if r & 1 != 0 { (r >> 1) ^ P } else { r >> 1 }),
    ("multiply-mask", |r| (r >> 1) ^ P.wrapping_mul(r & 1)),
    ("bit-mask", |r| (r >> 1) ^ (P & 0u32.wrapping_sub(r & 1))),
    ("select", |r| {
      let x = if r & 1 != 0 { P } else { 0 };
      (r >> 1) ^ x
    }),
  ];

  for size in BITWISE_SIZES {
    let data = gen_bytes(size);
    group.throughput(Throughput::Bytes(size as u64));

    for (name, step) in encodings {
      group.bench_with_input(BenchmarkId::new(name, size), &data, |b, data| {
        b.iter(|| black_box(serial(black_box(data), step)));
      });
    }
    group.bench_with_input(BenchmarkId::new("const-fn", size), &data, |b, data| {
      b.iter(|| black_box(bitwise::compute(Polynomial::CASTAGNOLI, !0, black_box(data))));
    });
  }

  group.finish();
}

fn bench_engine(c: &mut Criterion, group_name: &str, engines: &[Engine<'static>]) {
  if engines.is_empty() {
    eprintln!("Skipping {group_name}: backend not available on this CPU");
    return;
  }
  let mut group = c.benchmark_group(group_name);

  for size in SIZES {
    let data = gen_bytes(size);
    group.throughput(Throughput::Bytes(size as u64));

    for e in engines {
      group.bench_with_input(BenchmarkId::new(e.backend_name(), size), &data, |b, data| {
        b.iter(|| black_box(e.compute(black_box(data), 0)));
      });
    }
  }

  group.finish();
}

fn bench_tables(c: &mut Criterion) {
  let engines: Vec<_> = Slice::ALL
    .iter()
    .filter_map(|&s| Engine::with_backend(&CASTAGNOLI_TABLES, Backend::Table(s)).ok())
    .collect();
  bench_engine(c, "crc32c/table", &engines);
}

fn bench_hardware(c: &mut Criterion) {
  let engines: Vec<_> = [Backend::Hwcrc1, Backend::Hwcrc8]
    .iter()
    .filter_map(|&b| Engine::with_backend(&CASTAGNOLI_TABLES, b).ok())
    .collect();
  bench_engine(c, "crc32c/hwcrc", &engines);
}

fn bench_fold(c: &mut Criterion) {
  let mut engines = Vec::new();
  for backend in [Backend::Fold, Backend::EmulatedFold] {
    let Ok(e) = Engine::with_backend(&CASTAGNOLI_TABLES, backend) else { continue };
    // The 2-lane/112-byte and 3-lane/168-byte shapes of the reference driver.
    engines.push(e.with_fold_params(FoldParams::new(Lanes::Two, 7 * 16)));
    engines.push(e.with_fold_params(FoldParams::new(Lanes::Three, 7 * 24)));
  }
  bench_engine(c, "crc32c/fold", &engines);
}

fn bench_dispatch(c: &mut Criterion) {
  let mut group = c.benchmark_group("crc32c/dispatch");
  eprintln!("crc32c backend: {}", goldcrc::selected_backend());
  eprintln!("tuning preset: {}", platform::tune().name());

  for size in SIZES {
    let data = gen_bytes(size);
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
      b.iter(|| black_box(Crc32c::checksum(black_box(data))));
    });
  }

  group.finish();
}

criterion_group!(
  benches,
  bench_bitwise,
  bench_tables,
  bench_hardware,
  bench_fold,
  bench_dispatch
);
criterion_main!(benches);
