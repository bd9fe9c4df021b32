use super::*;
use crate::decode::decode_gif;
use image::{Rgba, RgbaImage};

fn solid(w: u32, h: u32, px: [u8; 4], delay_ms: u32) -> Frame {
    Frame::new(RgbaImage::from_pixel(w, h, Rgba(px)), delay_ms)
}

fn gradient(w: u32, h: u32, seed: u8, delay_ms: u32) -> Frame {
    let img = RgbaImage::from_fn(w, h, |x, y| {
        Rgba([
            (x as u8).wrapping_add(seed),
            (y as u8).wrapping_mul(3),
            seed,
            255,
        ])
    });
    Frame::new(img, delay_ms)
}

#[test]
fn delay_rounds_to_nearest_centisecond() {
    assert_eq!(delay_to_cs(0), 0);
    assert_eq!(delay_to_cs(4), 0);
    assert_eq!(delay_to_cs(5), 1);
    assert_eq!(delay_to_cs(100), 10);
    assert_eq!(delay_to_cs(u32::MAX), u16::MAX);
}

#[test]
fn options_validation() {
    assert!(EncoderOptions::default().validate().is_ok());

    let bad_quality = EncoderOptions {
        quality: 0,
        ..EncoderOptions::default()
    };
    assert!(matches!(
        GifEncoder::new(bad_quality),
        Err(GifCapError::Validation(_))
    ));

    let too_coarse = EncoderOptions {
        quality: 31,
        ..EncoderOptions::default()
    };
    assert!(too_coarse.validate().is_err());

    let no_workers = EncoderOptions {
        workers: 0,
        ..EncoderOptions::default()
    };
    assert!(no_workers.validate().is_err());

    let zero_width = EncoderOptions {
        width: Some(0),
        ..EncoderOptions::default()
    };
    assert!(zero_width.validate().is_err());
}

#[test]
fn options_deserialize_with_defaults() {
    let opts: EncoderOptions =
        serde_json::from_str(r#"{"quality":5,"size_budget":{"policy":"reject"}}"#).unwrap();
    assert_eq!(opts.quality, 5);
    assert_eq!(opts.workers, DEFAULT_WORKERS);
    assert_eq!(opts.size_budget.max_bytes, DEFAULT_MAX_BYTES);
    assert_eq!(opts.size_budget.policy, SizePolicy::Reject);
    assert_eq!(opts.repeat, Repeat::Infinite);
}

#[test]
fn oversized_dimensions_are_an_encode_failure() {
    assert!(matches!(
        gif_dimensions(70_000, 10),
        Err(GifCapError::EncodeFailure(_))
    ));
    assert!(matches!(
        gif_dimensions(10, 0),
        Err(GifCapError::EncodeFailure(_))
    ));
    assert_eq!(gif_dimensions(65_535, 1).unwrap(), (65_535, 1));
}

#[test]
fn empty_frame_list_fails() {
    let encoder = GifEncoder::default();
    let err = encoder.encode(&[], |_| {}).unwrap_err();
    assert!(matches!(err, GifCapError::EncodeFailure(_)));
}

#[test]
fn encodes_ten_frames_with_monotonic_progress() {
    let frames: Vec<Frame> = (0..10).map(|i| gradient(200, 200, i * 20, 100)).collect();
    let mut progress = Vec::new();
    let out = GifEncoder::default()
        .encode(&frames, |p| progress.push(p))
        .unwrap();

    assert!(!out.bytes.is_empty());
    assert!(out.bytes.starts_with(b"GIF89a"));
    assert_eq!(out.frame_count, 10);
    assert_eq!((out.width, out.height), (200, 200));
    assert_eq!(out.size_warning, None);

    assert_eq!(progress.len(), 10);
    assert!(progress.windows(2).all(|w| w[0] <= w[1]));
    assert!(progress.iter().all(|p| (0.0..=1.0).contains(p)));
    assert_eq!(progress.last().copied(), Some(1.0));
}

#[test]
fn output_decodes_back_with_delays_in_order() {
    let frames = vec![
        solid(16, 8, [255, 0, 0, 255], 50),
        solid(16, 8, [0, 255, 0, 255], 120),
        solid(16, 8, [0, 0, 255, 255], 30),
    ];
    let out = GifEncoder::new(EncoderOptions {
        workers: 3,
        ..EncoderOptions::default()
    })
    .unwrap()
    .encode(&frames, |_| {})
    .unwrap();

    let decoded = decode_gif(&out.bytes).unwrap();
    assert_eq!(decoded.frames.len(), 3);
    assert_eq!((decoded.width, decoded.height), (16, 8));
    let delays: Vec<u32> = decoded.frames.iter().map(|f| f.delay_ms).collect();
    assert_eq!(delays, vec![50, 120, 30]);

    let close = |a: u8, b: u8| a.abs_diff(b) <= 8;
    let p0 = decoded.frames[0].pixels.get_pixel(3, 3).0;
    let p1 = decoded.frames[1].pixels.get_pixel(3, 3).0;
    let p2 = decoded.frames[2].pixels.get_pixel(3, 3).0;
    assert!(close(p0[0], 255) && close(p0[1], 0) && close(p0[2], 0));
    assert!(close(p1[0], 0) && close(p1[1], 255) && close(p1[2], 0));
    assert!(close(p2[0], 0) && close(p2[1], 0) && close(p2[2], 255));
}

#[test]
fn frames_are_resized_to_target() {
    let frames = vec![gradient(100, 80, 1, 100), gradient(100, 80, 2, 100)];
    let out = GifEncoder::new(EncoderOptions {
        width: Some(50),
        height: Some(40),
        ..EncoderOptions::default()
    })
    .unwrap()
    .encode(&frames, |_| {})
    .unwrap();

    assert_eq!((out.width, out.height), (50, 40));
    let decoded = decode_gif(&out.bytes).unwrap();
    assert_eq!((decoded.width, decoded.height), (50, 40));
    assert_eq!(decoded.frames[1].pixels.dimensions(), (50, 40));
}

#[test]
fn over_budget_warns_by_default() {
    let frames: Vec<Frame> = (0..3).map(|i| gradient(64, 64, i * 40, 100)).collect();
    let out = GifEncoder::new(EncoderOptions {
        size_budget: SizeBudget {
            max_bytes: 16,
            policy: SizePolicy::Warn,
        },
        ..EncoderOptions::default()
    })
    .unwrap()
    .encode(&frames, |_| {})
    .unwrap();

    let warning = out.size_warning.expect("expected a size warning");
    assert_eq!(warning.size, out.bytes.len());
    assert_eq!(warning.budget, 16);
}

#[test]
fn over_budget_rejects_under_strict_policy() {
    let frames: Vec<Frame> = (0..3).map(|i| gradient(64, 64, i * 40, 100)).collect();
    let err = GifEncoder::new(EncoderOptions {
        size_budget: SizeBudget {
            max_bytes: 16,
            policy: SizePolicy::Reject,
        },
        ..EncoderOptions::default()
    })
    .unwrap()
    .encode(&frames, |_| {})
    .unwrap_err();

    assert!(matches!(err, GifCapError::SizeBudgetExceeded(e) if e.budget == 16));
}
