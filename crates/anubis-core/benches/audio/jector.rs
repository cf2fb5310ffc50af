use std::io::Cursor;

use anubis_core::{Jector, JectorBuilder, JectorType};
use criterion::{criterion_group, criterion_main, Criterion};
use hound::{SampleFormat, WavSpec, WavWriter};

/// one second of 44.1 kHz stereo
fn carrier() -> Vec<u8> {
    let spec = WavSpec {
        channels: 2,
        sample_rate: 44_100,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut wav = Cursor::new(Vec::new());
    let mut writer = WavWriter::new(&mut wav, spec).expect("Cannot create writer");
    for i in 0..44_100 * 2 {
        writer
            .write_sample((i % 512 - 256) as i16)
            .expect("Cannot write sample");
    }
    writer.finalize().expect("Cannot finalize carrier");
    wav.into_inner()
}

pub fn audio_jector(c: &mut Criterion) {
    let plain = carrier();
    let jector = JectorBuilder::new(JectorType::Audio)
        .build()
        .expect("Cannot build jector");
    let secret_message = b"Hello World!";
    let secret = jector
        .inject_to_vec(&plain, secret_message)
        .expect("Cannot inject secret message");

    c.bench_function("Audio Inject", |b| {
        b.iter(|| {
            jector
                .inject_to_vec(&plain, secret_message)
                .expect("Cannot inject secret message")
        })
    });
    c.bench_function("Audio Eject", |b| {
        b.iter(|| {
            jector
                .eject_to_vec(&secret)
                .expect("Cannot eject secret message")
        })
    });
}

criterion_group!(benches, audio_jector);
criterion_main!(benches);
