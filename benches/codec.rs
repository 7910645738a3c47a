extern crate criterion;
extern crate dlzw;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dlzw::{decode, encode, Image};

fn gradient(rows: usize, columns: usize) -> Image {
    let mut data = Vec::with_capacity(rows * columns * 3);
    for row in 0..rows {
        for column in 0..columns {
            data.push((row + column) as u8);
            data.push((row * 3) as u8);
            data.push((column ^ row) as u8);
        }
    }
    Image::new(rows, columns, 3, data).expect("Benchmark image dimensions")
}

fn noise(rows: usize, columns: usize) -> Image {
    let mut state = 0x2545_f491u32;
    let data = (0..rows * columns)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect();
    Image::grayscale(rows, columns, data).expect("Benchmark image dimensions")
}

pub fn criterion_benchmark(c: &mut Criterion, name: &str, image: Image) {
    let compressed = encode(&image);
    let mut group = c.benchmark_group(name);
    group.throughput(Throughput::Bytes(image.len() as u64));

    let id = BenchmarkId::new("encode", image.len());
    group.bench_with_input(id, &image, |b, image| b.iter(|| black_box(encode(image))));

    let id = BenchmarkId::new("decode", compressed.len());
    group.bench_with_input(id, &compressed, |b, data| {
        b.iter(|| black_box(decode(data).expect("Error")))
    });
    group.finish();
}

pub fn bench_gradient(c: &mut Criterion) {
    criterion_benchmark(c, "gradient-rgb", gradient(256, 256));
}

pub fn bench_noise(c: &mut Criterion) {
    criterion_benchmark(c, "noise-gray", noise(512, 512));
}

criterion_group!(benches, bench_gradient, bench_noise);
criterion_main!(benches);
