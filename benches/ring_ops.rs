//! Ring buffer operation benchmarks
//!
//! Compares end pushes under both policies with middle edits and iteration.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ringdeque::{Growing, RingBuffer, Wrapping};

const SIZES: [usize; 3] = [16, 256, 4096];

fn wrapping_push_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrapping_push");

    for &cap in SIZES.iter() {
        group.bench_with_input(BenchmarkId::new("push_back_overwrite", cap), &cap, |b, &cap| {
            let mut buf: RingBuffer<u64, Wrapping> = RingBuffer::with_capacity(cap);
            let mut n = 0u64;
            b.iter(|| {
                n = n.wrapping_add(1);
                black_box(buf.push_back(black_box(n)))
            });
        });

        group.bench_with_input(BenchmarkId::new("push_pop_alternating", cap), &cap, |b, &cap| {
            let mut buf: RingBuffer<u64, Wrapping> = RingBuffer::with_capacity(cap);
            buf.extend(0..cap as u64 / 2);
            b.iter(|| {
                buf.push_front(black_box(1));
                black_box(buf.pop_back())
            });
        });
    }

    group.finish();
}

fn growing_push_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("growing_push");

    for &len in SIZES.iter() {
        group.bench_with_input(BenchmarkId::new("from_empty", len), &len, |b, &len| {
            b.iter(|| {
                let mut buf: RingBuffer<u64, Growing> = RingBuffer::new();
                for i in 0..len as u64 {
                    buf.push_back(i);
                }
                black_box(buf)
            });
        });

        group.bench_with_input(BenchmarkId::new("both_ends", len), &len, |b, &len| {
            b.iter(|| {
                let mut buf: RingBuffer<u64, Growing> = RingBuffer::new();
                for i in 0..len as u64 {
                    if i % 2 == 0 {
                        buf.push_back(i);
                    } else {
                        buf.push_front(i);
                    }
                }
                black_box(buf)
            });
        });
    }

    group.finish();
}

fn middle_edit_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("middle_edit");

    for &len in SIZES.iter() {
        let base: RingBuffer<u64, Growing> = (0..len as u64).collect();

        group.bench_with_input(BenchmarkId::new("insert_remove_near_front", len), &base, |b, base| {
            let mut buf = base.clone();
            b.iter(|| {
                let at = buf.handle_at(buf.len() / 8);
                buf.insert(at, black_box(7));
                black_box(buf.remove(buf.len() / 8))
            });
        });

        group.bench_with_input(BenchmarkId::new("insert_remove_centre", len), &base, |b, base| {
            let mut buf = base.clone();
            b.iter(|| {
                let at = buf.handle_at(buf.len() / 2);
                buf.insert(at, black_box(7));
                black_box(buf.remove(buf.len() / 2))
            });
        });
    }

    group.finish();
}

fn iteration_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration");

    for &len in SIZES.iter() {
        // half the elements sit before the physical end of the block
        let mut buf: RingBuffer<u64, Wrapping> = RingBuffer::with_capacity(len);
        buf.extend(0..(len + len / 2) as u64);

        group.bench_with_input(BenchmarkId::new("iter_sum", len), &buf, |b, buf| {
            b.iter(|| black_box(buf.iter().sum::<u64>()));
        });

        group.bench_with_input(BenchmarkId::new("index_sum", len), &buf, |b, buf| {
            b.iter(|| black_box((0..buf.len()).map(|i| buf[i]).sum::<u64>()));
        });

        group.bench_with_input(BenchmarkId::new("cursor_walk", len), &buf, |b, buf| {
            b.iter(|| {
                let mut it = buf.cbegin();
                let end = buf.cend();
                let mut sum = 0u64;
                while it != end {
                    sum += it.get().copied().unwrap_or(0);
                    it += 1;
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    wrapping_push_benchmark,
    growing_push_benchmark,
    middle_edit_benchmark,
    iteration_benchmark
);
criterion_main!(benches);
