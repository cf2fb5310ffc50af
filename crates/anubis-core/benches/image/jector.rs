use std::io::Cursor;

use anubis_core::{Jector, JectorBuilder, JectorType};
use criterion::{criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, ImageFormat, Rgba};

fn carrier() -> Vec<u8> {
    let image = ImageBuffer::from_fn(256, 256, |x, y| {
        let i = (x ^ y) as u8;
        Rgba([i, i.wrapping_add(85), i.wrapping_add(170), 255])
    });
    let mut png = Cursor::new(Vec::new());
    image
        .write_to(&mut png, ImageFormat::Png)
        .expect("Cannot encode carrier image");
    png.into_inner()
}

pub fn image_jector(c: &mut Criterion) {
    let plain = carrier();
    let jector = JectorBuilder::new(JectorType::Raster)
        .build()
        .expect("Cannot build jector");
    let secret_message = b"Hello World!";
    let secret = jector
        .inject_to_vec(&plain, secret_message)
        .expect("Cannot inject secret message");

    c.bench_function("Image Inject", |b| {
        b.iter(|| {
            jector
                .inject_to_vec(&plain, secret_message)
                .expect("Cannot inject secret message")
        })
    });
    c.bench_function("Image Eject", |b| {
        b.iter(|| {
            jector
                .eject_to_vec(&secret)
                .expect("Cannot eject secret message")
        })
    });
}

criterion_group!(benches, image_jector);
criterion_main!(benches);
