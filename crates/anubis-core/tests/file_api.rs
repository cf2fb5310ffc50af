mod common;

use std::fs;

use anubis_core::api::{self, eject, inject};
use anubis_core::{AnubisError, JectorBuilder, JectorType};
use tempfile::TempDir;

#[test]
fn should_hide_a_file_in_an_image_and_recover_it() {
    let out_dir = TempDir::new().unwrap();
    let carrier = out_dir.path().join("carrier.png");
    let data = out_dir.path().join("data.bin");
    let secret = out_dir.path().join("secret.png");
    let recovered = out_dir.path().join("recovered.bin");
    fs::write(&carrier, common::png(32, 32)).unwrap();
    fs::write(&data, (0..=255).collect::<Vec<u8>>()).unwrap();

    inject::prepare()
        .with_carrier(&carrier)
        .with_payload_file(&data)
        .with_output(&secret)
        .execute()
        .expect("Failed to inject file");
    eject::prepare()
        .from_secret_file(&secret)
        .into_file(&recovered)
        .execute()
        .expect("Failed to eject file");

    assert_eq!(fs::read(recovered).unwrap(), fs::read(data).unwrap());
}

#[test]
fn should_hide_a_message_in_audio_with_custom_options() {
    let out_dir = TempDir::new().unwrap();
    let carrier = out_dir.path().join("carrier.wav");
    let secret = out_dir.path().join("secret.wav");
    let recovered = out_dir.path().join("message.txt");
    fs::write(&carrier, common::wav(common::spec(2, 16), 2_000)).unwrap();
    let options = || {
        JectorBuilder::default()
            .with_lsb_depth(4)
            .with_eof_marker("<<END>>")
            .with_required_success()
    };

    inject::prepare()
        .with_options(options())
        .with_carrier(&carrier)
        .with_message("Hello World")
        .with_output(&secret)
        .execute()
        .expect("Failed to inject message");
    eject::prepare()
        .with_options(options())
        .from_secret_file(&secret)
        .into_file(&recovered)
        .execute()
        .expect("Failed to eject message");

    assert_eq!(fs::read_to_string(recovered).unwrap(), "Hello World");
    assert_eq!(
        fs::metadata(&secret).unwrap().len(),
        fs::metadata(&carrier).unwrap().len()
    );
}

#[test]
fn should_use_the_explicit_type_for_unknown_extensions() {
    let out_dir = TempDir::new().unwrap();
    let carrier = out_dir.path().join("carrier.bin");
    let secret = out_dir.path().join("secret.bin");
    fs::write(&carrier, common::png(8, 8)).unwrap();

    let by_extension = inject::prepare()
        .with_carrier(&carrier)
        .with_message("x")
        .with_output(&secret)
        .execute();
    assert!(matches!(by_extension, Err(AnubisError::UnsupportedMedia)));

    inject::prepare()
        .with_options(JectorBuilder::new(JectorType::Raster))
        .with_carrier(&carrier)
        .with_message("x")
        .with_output(&secret)
        .execute()
        .expect("Failed to inject with explicit type");
    assert!(secret.exists());
}

#[test]
fn should_keep_an_existing_output_when_the_payload_does_not_fit() {
    let out_dir = TempDir::new().unwrap();
    let carrier = out_dir.path().join("carrier.png");
    let secret = out_dir.path().join("secret.png");
    fs::write(&carrier, common::png(8, 8)).unwrap();
    fs::write(&secret, "previous").unwrap();

    let result = inject::prepare()
        .with_options(JectorBuilder::default().with_lsb_depth(1).with_required_success())
        .with_carrier(&carrier)
        .with_payload(vec![0u8; 30])
        .with_output(&secret)
        .execute();

    assert!(matches!(
        result,
        Err(AnubisError::InsufficientCapacity { .. })
    ));
    assert_eq!(fs::read_to_string(&secret).unwrap(), "previous");
}

#[test]
fn should_report_read_errors_for_missing_files() {
    let out_dir = TempDir::new().unwrap();

    let result = eject::prepare()
        .from_secret_file(out_dir.path().join("missing.png"))
        .into_file(out_dir.path().join("out.bin"))
        .execute();

    assert!(matches!(result, Err(AnubisError::ReadError { .. })));
}

#[test]
fn should_report_the_capacity_of_a_file() {
    let out_dir = TempDir::new().unwrap();
    let carrier = out_dir.path().join("carrier.png");
    fs::write(&carrier, common::png(8, 8)).unwrap();

    let bits = api::capacity(&carrier, JectorBuilder::default().with_alpha_channel()).unwrap();

    assert_eq!(bits, 8 * 8 * 4 * 2);
}
