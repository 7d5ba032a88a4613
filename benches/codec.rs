use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sawyer::checksum::rotate_checksum;
use sawyer::{checksum, read_chunk, write_chunk, ChunkHeader, CodecConfig, Encoding};

/// Synthetic park data: long zero runs mixed with repeating records
fn park_data() -> Vec<u8> {
    let mut data = Vec::with_capacity(256 * 1024);
    for i in 0..4096u32 {
        data.extend_from_slice(&[0u8; 32]);
        data.extend_from_slice(&i.to_le_bytes());
        data.extend_from_slice(b"ride entrance");
        data.extend((0..15u32).map(|j| ((i * 7 + j) % 256) as u8));
    }
    data
}

fn bench_encode(c: &mut Criterion) {
    let data = park_data();
    let config = CodecConfig::default();

    for encoding in Encoding::ALL {
        c.bench_function(&format!("encode_{encoding:?}"), |b| {
            b.iter(|| write_chunk(ChunkHeader::new(encoding, 0), black_box(&data), &config));
        });
    }
}

fn bench_decode(c: &mut Criterion) {
    let data = park_data();
    let config = CodecConfig::default();

    for encoding in Encoding::ALL {
        let (header, encoded) = write_chunk(ChunkHeader::new(encoding, 0), &data, &config);

        c.bench_function(&format!("decode_{encoding:?}"), |b| {
            b.iter(|| read_chunk(&header, black_box(&encoded), data.len()).unwrap());
        });
    }
}

fn bench_checksums(c: &mut Criterion) {
    let data = park_data();

    c.bench_function("checksum", |b| b.iter(|| checksum(black_box(&data))));
    c.bench_function("rotate_checksum", |b| {
        b.iter(|| rotate_checksum(black_box(&data)));
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_checksums);
criterion_main!(benches);
