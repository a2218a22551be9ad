use agroguard_ml::{EncoderConfig, ImageTensorEncoder, MetadataNormalizer, ResizeFilter};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{DynamicImage, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_photo(width: u32, height: u32, seed: u64) -> DynamicImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut buffer = RgbImage::new(width, height);
    for pixel in buffer.pixels_mut() {
        *pixel = Rgb([rng.gen(), rng.gen(), rng.gen()]);
    }
    DynamicImage::ImageRgb8(buffer)
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let cases = [(224u32, 224u32, 7u64), (640, 480, 42), (1920, 1080, 1337)];
    let filters = [ResizeFilter::Nearest, ResizeFilter::Triangle, ResizeFilter::Lanczos3];

    for &(width, height, seed) in &cases {
        let photo = random_photo(width, height, seed);
        for filter in filters {
            let encoder = ImageTensorEncoder::new(EncoderConfig::default().with_filter(filter));
            let label = format!("{width}x{height}/{filter:?}");
            group.bench_with_input(BenchmarkId::from_parameter(label), &photo, |b, photo| {
                b.iter(|| {
                    let tensor = encoder.encode(black_box(photo)).expect("encode succeeds");
                    black_box(tensor)
                })
            });
        }
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let normalizer = MetadataNormalizer::default();
    let mut rng = StdRng::seed_from_u64(99);
    let readings: Vec<(f32, f32, f32)> = (0..1024)
        .map(|_| {
            (
                rng.gen_range(0.0..50.0),
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
            )
        })
        .collect();

    c.bench_function("normalize_1024", |b| {
        b.iter(|| {
            for &(t, h, a) in &readings {
                black_box(normalizer.normalize(black_box(t), black_box(h), black_box(a)));
            }
        })
    });
}

criterion_group!(benches, bench_encode, bench_normalize);
criterion_main!(benches);
