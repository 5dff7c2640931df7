use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use snowgen::{Generator, IdGenStatus, SEQUENCE_MASK, SystemClock, TimeSource};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

struct FixedMockTime {
    millis: u64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded). One full sequence, so a fixed clock never exhausts it.
const TOTAL_IDS: usize = SEQUENCE_MASK as usize + 1;

/// Benchmarks the hot path where the clock never advances and every call is
/// served from the sequence.
fn bench_fixed_clock(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_clock");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("next_id/elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let generator =
                    Generator::with_time_source(0, 0, 0, FixedMockTime { millis: 1 }).unwrap();
                for _ in 0..TOTAL_IDS {
                    black_box(generator.next_id().unwrap());
                }
            }
            start.elapsed()
        });
    });

    group.bench_function(format!("try_poll_id/elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let generator =
                    Generator::with_time_source(0, 0, 0, FixedMockTime { millis: 1 }).unwrap();
                for _ in 0..TOTAL_IDS {
                    match generator.try_poll_id().unwrap() {
                        IdGenStatus::Ready { id } => {
                            black_box(id);
                        }
                        IdGenStatus::Pending { .. } => unreachable!(),
                    }
                }
            }
            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks the wall clock, including the spin on sequence exhaustion.
fn bench_system_clock(c: &mut Criterion) {
    let mut group = c.benchmark_group("system_clock");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("next_id/elems/{TOTAL_IDS}"), |b| {
        let generator = Generator::new(1, 1).unwrap();
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.next_id().unwrap());
            }
        });
    });

    group.bench_function("timestamp", |b| {
        b.iter(|| black_box(SystemClock.current_millis()));
    });

    group.finish();
}

/// Benchmarks a single generator contended by every core.
fn bench_contended(c: &mut Criterion) {
    let threads = num_cpus::get();
    let mut group = c.benchmark_group("contended");
    group.throughput(Throughput::Elements((TOTAL_IDS * threads) as u64));

    group.bench_function(
        format!("threads/{threads}/elems/{}", TOTAL_IDS * threads),
        |b| {
            b.iter_custom(|iters| {
                let generator = Arc::new(Generator::new(2, 2).unwrap());
                let barrier = Arc::new(Barrier::new(threads + 1));
                let mut elapsed = core::time::Duration::ZERO;

                for _ in 0..iters {
                    let start = scope(|s| {
                        for _ in 0..threads {
                            let generator = Arc::clone(&generator);
                            let barrier = Arc::clone(&barrier);
                            s.spawn(move || {
                                barrier.wait();
                                for _ in 0..TOTAL_IDS {
                                    black_box(generator.next_id().unwrap());
                                }
                            });
                        }
                        barrier.wait();
                        Instant::now()
                    });
                    elapsed += start.elapsed();
                }

                elapsed
            });
        },
    );

    group.finish();
}

criterion_group!(benches, bench_fixed_clock, bench_system_clock, bench_contended);
criterion_main!(benches);
