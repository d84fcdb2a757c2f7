use criterion::{Criterion, black_box, criterion_group, criterion_main};
use scanform::filters::bilateral::{
    DEFAULT_DIAMETER, DEFAULT_SIGMA_COLOR, DEFAULT_SIGMA_SPACE, bilateral_filter,
    bilateral_filter_parallel,
};
use scanform::models::PixelBuffer;

fn test_buffer(width: usize, height: usize) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(width, height);
    for (i, px) in buffer.data_mut().chunks_exact_mut(4).enumerate() {
        px[0] = (i * 31 % 256) as u8;
        px[1] = (i * 17 % 256) as u8;
        px[2] = (i * 5 % 256) as u8;
        px[3] = 255;
    }
    buffer
}

fn bench_bilateral_small(c: &mut Criterion) {
    let image = test_buffer(64, 64);
    c.bench_function("bilateral_64x64", |b| {
        b.iter(|| {
            bilateral_filter(
                black_box(&image),
                DEFAULT_DIAMETER,
                DEFAULT_SIGMA_COLOR,
                DEFAULT_SIGMA_SPACE,
            )
        })
    });
}

fn bench_bilateral_medium(c: &mut Criterion) {
    let image = test_buffer(320, 240);
    c.bench_function("bilateral_320x240", |b| {
        b.iter(|| {
            bilateral_filter(
                black_box(&image),
                DEFAULT_DIAMETER,
                DEFAULT_SIGMA_COLOR,
                DEFAULT_SIGMA_SPACE,
            )
        })
    });
}

fn bench_bilateral_parallel_medium(c: &mut Criterion) {
    let image = test_buffer(320, 240);
    c.bench_function("bilateral_parallel_320x240", |b| {
        b.iter(|| {
            bilateral_filter_parallel(
                black_box(&image),
                DEFAULT_DIAMETER,
                DEFAULT_SIGMA_COLOR,
                DEFAULT_SIGMA_SPACE,
            )
        })
    });
}

fn bench_bilateral_small_window(c: &mut Criterion) {
    let image = test_buffer(320, 240);
    c.bench_function("bilateral_320x240_d5", |b| {
        b.iter(|| {
            bilateral_filter(
                black_box(&image),
                5,
                DEFAULT_SIGMA_COLOR,
                DEFAULT_SIGMA_SPACE,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_bilateral_small,
    bench_bilateral_medium,
    bench_bilateral_parallel_medium,
    bench_bilateral_small_window
);
criterion_main!(benches);
