// Copyright (C) 2025 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: (Apache-2.0 OR MIT)

//! Benchmarks for octet throughput through a `RingBuf`.

use std::hint::black_box;

use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;

use octbuf::RingBuf;


fn bench_write_read(c: &mut Criterion) {
  let mut group = c.benchmark_group("write_read");

  for &chunk in &[16usize, 256, 4096] {
    let data = vec![0x11; chunk];
    let mut out = vec![0; chunk];
    // An odd capacity ensures that copies regularly wrap around.
    let mut buf = RingBuf::new(3 * chunk + 1);

    group.throughput(Throughput::Bytes(chunk as u64));
    group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, _| {
      b.iter(|| {
        let () = buf.write(black_box(&data)).unwrap();
        let () = buf.read(black_box(&mut out)).unwrap();
      })
    });
  }
  group.finish();
}

fn bench_peek_skip(c: &mut Criterion) {
  let mut buf = RingBuf::new(1021);
  let data = [0x22; 64];
  let mut header = [0; 8];

  c.bench_function("peek_skip_64b", |b| {
    b.iter(|| {
      let () = buf.write(black_box(&data)).unwrap();
      let () = buf.peek(black_box(&mut header)).unwrap();
      let () = buf.skip(data.len()).unwrap();
    })
  });
}

criterion_group!(benches, bench_write_read, bench_peek_skip);
criterion_main!(benches);
