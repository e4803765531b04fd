use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use uhfrs_epc::{cipher, EpcCodec, EpcFormat};

fn barcode_epc(codec: &EpcCodec) -> String {
    let plain = b"\x10\x01BUNDLE-000123";
    let coded = cipher::encode(codec.key().as_bytes(), 2, plain, 0xC0);
    let mut epc = vec![((coded.len() / 2) << 3) as u8, 0x00];
    epc.extend(coded);
    hex::encode_upper(epc)
}

fn bench_decoders(c: &mut Criterion) {
    let codec = EpcCodec::default();
    let barcode = barcode_epc(&codec);
    let mut group = c.benchmark_group("decode");

    group.bench_function("barcode", |b| {
        b.iter(|| codec.to_barcode(black_box(&barcode)).text())
    });

    group.bench_function("sgtin96", |b| {
        b.iter(|| codec.parse_sgtin96(black_box("3074257BF7194E4000001A85")))
    });

    group.bench_function("ascii", |b| {
        b.iter(|| codec.decode(EpcFormat::Ascii, black_box("3000414243444546474849")))
    });

    group.finish();
}

criterion_group!(benches, bench_decoders);
criterion_main!(benches);
