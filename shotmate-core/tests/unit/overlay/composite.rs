use std::sync::Arc;

use super::*;

fn solid(width: u32, height: u32, px: [u8; 4]) -> PreparedImage {
    PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(px.repeat((width * height) as usize)),
    }
}

fn black_frame(w: u32, h: u32) -> FrameRGBA {
    FrameRGBA::filled(Canvas::new(w, h), [0, 0, 0, 255]).unwrap()
}

#[test]
fn contain_fit_centres_the_short_side() {
    let a = contain_fit(Canvas::new(400, 600), Canvas::new(300, 300));
    let [sx, _, _, sy, tx, ty] = a.as_coeffs();
    assert!((sx - 0.5).abs() < 1e-12 && (sy - 0.5).abs() < 1e-12);
    assert!((tx - 50.0).abs() < 1e-12 && ty.abs() < 1e-12);
    assert_eq!(
        contain_fit(Canvas::new(0, 5), Canvas::new(10, 10)),
        Affine::IDENTITY
    );
}

#[test]
fn half_opacity_blends_towards_overlay() {
    let img = solid(4, 4, [255, 255, 255, 255]);
    let mut frame = black_frame(20, 20);
    let layer = OverlayLayer {
        image: &img,
        transform: OverlayTransform::IDENTITY,
        opacity: 0.5,
    };
    composite_overlay(&mut frame, &layer).unwrap();
    let px = frame.pixel(10, 10).unwrap();
    assert_eq!(px[3], 255);
    assert!((120..=135).contains(&px[0]), "{px:?}");
}

#[test]
fn zero_opacity_and_empty_image_are_no_ops() {
    let img = solid(2, 2, [255, 0, 0, 255]);
    let mut frame = black_frame(8, 8);
    let before = frame.clone();
    let layer = OverlayLayer {
        image: &img,
        transform: OverlayTransform::IDENTITY,
        opacity: 0.0,
    };
    composite_overlay(&mut frame, &layer).unwrap();
    assert_eq!(frame, before);

    let empty = PreparedImage::empty(Canvas::new(0, 0));
    let layer = OverlayLayer {
        image: &empty,
        transform: OverlayTransform::IDENTITY,
        opacity: 1.0,
    };
    composite_overlay(&mut frame, &layer).unwrap();
    assert_eq!(frame, before);
}

#[test]
fn horizontal_flip_mirrors_about_the_frame_centre() {
    // left texel red, right texel blue; fits the 40x20 frame exactly
    let img = PreparedImage {
        width: 2,
        height: 1,
        rgba8_premul: Arc::new(vec![255, 0, 0, 255, 0, 0, 255, 255]),
    };
    let mut plain = black_frame(40, 20);
    let mut flipped = black_frame(40, 20);
    let mut layer = OverlayLayer {
        image: &img,
        transform: OverlayTransform::IDENTITY,
        opacity: 1.0,
    };
    composite_overlay(&mut plain, &layer).unwrap();
    layer.transform.flip_h = true;
    composite_overlay(&mut flipped, &layer).unwrap();

    let p = plain.pixel(3, 10).unwrap();
    assert!(p[0] > 200 && p[2] < 50, "{p:?}");
    let f = flipped.pixel(3, 10).unwrap();
    assert!(f[2] > 200 && f[0] < 50, "{f:?}");
}

#[test]
fn offset_and_scale_move_the_overlay() {
    let img = solid(1, 1, [255, 255, 255, 255]);
    let mut layer = OverlayLayer {
        image: &img,
        transform: OverlayTransform {
            scale: 0.5,
            ..OverlayTransform::IDENTITY
        },
        opacity: 1.0,
    };

    // scaled to the centre 15x15 square (7.5..22.5)
    let mut frame = black_frame(30, 30);
    composite_overlay(&mut frame, &layer).unwrap();
    assert!(frame.pixel(15, 15).unwrap()[0] > 250);
    assert!(frame.pixel(26, 15).unwrap()[0] < 5);

    layer.transform.offset_x = 10.0;
    let mut frame = black_frame(30, 30);
    composite_overlay(&mut frame, &layer).unwrap();
    assert!(frame.pixel(26, 15).unwrap()[0] > 250);
    assert!(frame.pixel(10, 15).unwrap()[0] < 5);
}

#[test]
fn mismatched_buffer_is_rejected() {
    let bad = PreparedImage {
        width: 4,
        height: 4,
        rgba8_premul: Arc::new(vec![0; 7]),
    };
    let mut frame = black_frame(4, 4);
    let layer = OverlayLayer {
        image: &bad,
        transform: OverlayTransform::IDENTITY,
        opacity: 1.0,
    };
    assert!(composite_overlay(&mut frame, &layer).is_err());
}
