use criterion::{criterion_group, criterion_main, Criterion};
use image::{DynamicImage, RgbImage};
use uvmerge::{ChannelOrder, MergeImage, MergeImageMut, RowShift, ThreadingPolicy};

fn synthetic_capture(width: usize, height: usize, seed: u8) -> Vec<u8> {
    (0..width * height * 3)
        .map(|i| (i as u8).wrapping_mul(13).wrapping_add(seed))
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut c = c.benchmark_group("Merge");
    c.sample_size(10);
    let width = 4096usize;
    let height = 3072usize;
    let white_bytes = synthetic_capture(width, height, 3);
    let uv_bytes = synthetic_capture(width, height, 101);
    let white = MergeImage::borrow(&white_bytes, width as u32, height as u32, ChannelOrder::Bgr);
    let uv = MergeImage::borrow(&uv_bytes, width as u32, height as u32, ChannelOrder::Bgr);

    c.bench_function("uvmerge: BGR merge single thread", |b| {
        let mut dst = MergeImageMut::default();
        b.iter(|| {
            uvmerge::merge_into(&white, &uv, &mut dst, RowShift(12), ThreadingPolicy::Single)
                .unwrap();
        })
    });

    c.bench_function("uvmerge: BGR merge adaptive", |b| {
        let mut dst = MergeImageMut::default();
        b.iter(|| {
            uvmerge::merge_into(&white, &uv, &mut dst, RowShift(12), ThreadingPolicy::Adaptive)
                .unwrap();
        })
    });

    c.bench_function("uvmerge: BGR merge borrowed destination", |b| {
        let mut dst_bytes = vec![0u8; width * height * 3];
        let mut dst =
            MergeImageMut::borrow(&mut dst_bytes, width as u32, height as u32, ChannelOrder::Bgr);
        b.iter(|| {
            uvmerge::merge_into(&white, &uv, &mut dst, RowShift(-12), ThreadingPolicy::Adaptive)
                .unwrap();
        })
    });

    let white_image = DynamicImage::ImageRgb8(
        RgbImage::from_raw(width as u32, height as u32, white_bytes.clone()).unwrap(),
    );
    let uv_image = DynamicImage::ImageRgb8(
        RgbImage::from_raw(width as u32, height as u32, uv_bytes.clone()).unwrap(),
    );
    c.bench_function("uvmerge: DynamicImage merge", |b| {
        b.iter(|| {
            uvmerge::merge_dynamic_images(
                &white_image,
                &uv_image,
                RowShift(12),
                ThreadingPolicy::Adaptive,
            )
            .unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
