use super::*;

fn mask_from(width: u32, height: u32, coverage: Vec<u8>) -> GlyphMask {
    GlyphMask {
        width,
        height,
        baseline: 0.0,
        coverage,
    }
}

#[test]
fn sigma_0_is_identity() {
    let src = mask_from(2, 2, vec![1, 2, 3, 4]);
    assert_eq!(blur_mask(&src, 0.0).unwrap(), src);
}

#[test]
fn constant_mask_is_identity() {
    let src = mask_from(4, 3, vec![77; 12]);
    assert_eq!(blur_mask(&src, 1.5).unwrap(), src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (9u32, 9u32);
    let mut coverage = vec![0u8; (w * h) as usize];
    coverage[(4 * w + 4) as usize] = 255;
    let out = blur_mask(&mask_from(w, h, coverage), 1.0).unwrap();

    let nonzero = out.coverage.iter().filter(|&&c| c != 0).count();
    assert!(nonzero > 1);
    let total: u32 = out.coverage.iter().map(|&c| u32::from(c)).sum();
    assert!((total as i32 - 255).abs() <= 16);
}

#[test]
fn radius_grows_with_sigma() {
    assert_eq!(blur_radius(0.0), 0);
    assert_eq!(blur_radius(f32::NAN), 0);
    assert_eq!(blur_radius(4.0), 12);
}
