use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pbits::{Alphabet, BitStore, PackedString};

fn bench_bitstore(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitstore");
    let bs = BitStore::from_fn(64_000, |i| (i as u32).wrapping_mul(0x9E37_79B9));

    group.bench_function("get", |b| {
        b.iter(|| {
            for i in 0..64_000 {
                black_box(bs.get(i).ok());
            }
        })
    });

    group.bench_function("to_int_w5", |b| {
        b.iter(|| {
            for slot in 0..12_800 {
                black_box(bs.to_int(slot * 5, slot * 5 + 5).ok());
            }
        })
    });
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    let text: String = "ACGTTGCAAGCTTAGC".repeat(1_000);
    let alphabet = Alphabet::from_text(&text);
    let packed = PackedString::new(&text).ok();

    group.bench_function("encode", |b| {
        b.iter(|| black_box(pbits::encode(&text, &alphabet).ok()))
    });

    group.bench_function("decode", |b| {
        b.iter(|| black_box(packed.as_ref().map(|p| p.decode())))
    });
}

criterion_group!(benches, bench_bitstore, bench_codec);
criterion_main!(benches);
