use byte_ring::{RingBuffer, StaticRing};
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("byte_ring");
    group.throughput(Throughput::Bytes(1));

    group.bench_function("write_read_roundtrip", |b| {
        let mut ring = StaticRing::<256>::new_static();
        b.iter(|| {
            ring.write(black_box(0x55));
            black_box(ring.read())
        })
    });

    group.bench_function("write_saturated", |b| {
        let mut storage = [0u8; 256];
        let mut ring = RingBuffer::new(&mut storage[..]).unwrap();
        ring.extend_from_slice(&[0xAA; 256]);
        b.iter(|| ring.write(black_box(0x55)))
    });

    group.bench_function("peek_last_two", |b| {
        let mut ring = StaticRing::<256>::new_static();
        ring.extend_from_slice(b"0123456789");
        b.iter(|| (black_box(ring.peek_last()), black_box(ring.peek_second_last())))
    });

    group.finish();

    let mut bulk = c.benchmark_group("byte_ring_bulk");
    bulk.throughput(Throughput::Bytes(4096));
    bulk.bench_function("extend_then_read_into_4k", |b| {
        let mut ring = StaticRing::<4096>::new_static();
        let data = [0x5Au8; 4096];
        let mut out = [0u8; 4096];
        b.iter(|| {
            ring.extend_from_slice(black_box(&data));
            black_box(ring.read_into(&mut out))
        })
    });
    bulk.finish();
}

criterion_group!(benches, bench_throughput);
criterion_main!(benches);
