use super::*;
use image::Rgba;

fn sample(bytes: Vec<u8>) -> ProcessedGif {
    ProcessedGif::from_encoded(
        EncodedGif {
            bytes,
            width: 4,
            height: 2,
            frame_count: 3,
            size_warning: None,
        },
        300,
    )
}

#[test]
fn file_size_tracks_bytes() {
    let gif = sample(vec![0u8; 42]);
    assert_eq!(gif.file_size, 42);
    assert_eq!(gif.duration_ms, 300);
    assert_eq!(gif.frame_count, 3);
}

#[test]
fn data_uri_is_base64_gif() {
    let gif = sample(b"GIF89a".to_vec());
    assert_eq!(gif.data_uri(), "data:image/gif;base64,R0lGODlh");
}

#[test]
fn encode_png_produces_decodable_png() {
    let img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
    let png = encode_png(&img).unwrap();
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
    let back = image::load_from_memory_with_format(&png, ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    assert_eq!(back, img);
}
