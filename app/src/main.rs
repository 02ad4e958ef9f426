use image::{GenericImageView, ImageReader};
use std::time::Instant;
use uvmerge::{RowShift, ThreadingPolicy};

fn main() {
    let white = ImageReader::open("../assets/white.png")
        .unwrap()
        .decode()
        .unwrap();
    let uv = ImageReader::open("../assets/uv.png")
        .unwrap()
        .decode()
        .unwrap();
    println!("white dimensions {:?}", white.dimensions());
    println!("uv dimensions {:?}", uv.dimensions());

    let start_time = Instant::now();
    let composite =
        uvmerge::merge_dynamic_images(&white, &uv, RowShift(12), ThreadingPolicy::Adaptive)
            .unwrap();
    let elapsed_time = start_time.elapsed();
    println!("Elapsed time: {:.2?}", elapsed_time);

    composite.save("merged.png").unwrap();
}
