//! Integration tests for ImageBuffer region operations.

use pixconv_core::{Color4d, DataType, Extent3D, Offset3D, PixelFormat};
use pixconv_image::{ImageBuffer, ImageView, ImageViewMut, ThreadCount};

/// R/UInt8 image whose bytes count up from zero.
fn sequential(extent: Extent3D) -> ImageBuffer {
    let data = (0..extent.pixel_count()).map(|i| i as u8).collect();
    ImageBuffer::from_data(extent, PixelFormat::R, DataType::UInt8, data).unwrap()
}

#[test]
fn negative_destination_offset_shifts_source() {
    let src = sequential(Extent3D::new(5, 5, 1));

    let mut clipped = ImageBuffer::new(Extent3D::new(4, 4, 1), PixelFormat::R, DataType::UInt8);
    clipped.blit(Offset3D::new(-2, 0, 0), &src, Offset3D::ORIGIN, src.extent()).unwrap();

    let mut shifted = ImageBuffer::new(Extent3D::new(4, 4, 1), PixelFormat::R, DataType::UInt8);
    shifted
        .blit(Offset3D::ORIGIN, &src, Offset3D::new(2, 0, 0), Extent3D::new(3, 4, 1))
        .unwrap();

    assert_eq!(clipped, shifted);
    for y in 0..4 {
        for x in 0..4 {
            let got = clipped.data()[y * 4 + x];
            let expected = if x < 3 { (y * 5 + x + 2) as u8 } else { 0 };
            assert_eq!(got, expected, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn blit_from_beyond_source_copies_nothing() {
    let src = sequential(Extent3D::new(5, 5, 1));
    let mut dst = ImageBuffer::new(Extent3D::new(4, 4, 1), PixelFormat::R, DataType::UInt8);
    dst.blit(Offset3D::ORIGIN, &src, Offset3D::new(0, 10, 0), Extent3D::new(5, 5, 1))
        .unwrap();
    assert!(dst.data().iter().all(|&b| b == 0));
}

#[test]
fn self_blit_matches_blit_from_copy() {
    let extent = Extent3D::new(6, 5, 2);
    let cases = [
        (Offset3D::new(1, 0, 0), Offset3D::ORIGIN, Extent3D::new(5, 5, 2)),
        (Offset3D::ORIGIN, Offset3D::new(1, 1, 0), Extent3D::new(5, 4, 2)),
        (Offset3D::new(2, 2, 1), Offset3D::new(0, 0, 0), Extent3D::new(4, 3, 1)),
        (Offset3D::new(3, 0, 0), Offset3D::ORIGIN, Extent3D::new(3, 5, 2)),
        (Offset3D::new(-2, -1, 0), Offset3D::new(1, 1, 0), Extent3D::new(6, 6, 6)),
        (Offset3D::new(0, 3, 0), Offset3D::ORIGIN, Extent3D::new(6, 2, 2)),
        (Offset3D::new(0, 0, 1), Offset3D::ORIGIN, Extent3D::new(6, 5, 1)),
    ];
    for (dst_offset, src_offset, src_extent) in cases {
        let mut in_place = sequential(extent);
        in_place.blit_within(dst_offset, src_offset, src_extent).unwrap();

        let mut expected = sequential(extent);
        let copy = expected.clone();
        expected.blit(dst_offset, &copy, src_offset, src_extent).unwrap();

        assert_eq!(in_place, expected, "dst {dst_offset} src {src_offset} extent {src_extent}");
    }
}

#[test]
fn region_read_and_write_outside_are_silent() {
    let mut img = sequential(Extent3D::new(3, 3, 1));
    let before = img.clone();

    let mut out = [0xEEu8; 9];
    img.read_pixels(
        Offset3D::new(2, 2, 0),
        Extent3D::new(2, 1, 1),
        &mut ImageViewMut::new(PixelFormat::R, DataType::UInt8, &mut out),
        ThreadCount::default(),
    )
    .unwrap();
    assert!(out.iter().all(|&b| b == 0xEE));

    img.write_pixels(
        Offset3D::new(0, 0, 1),
        Extent3D::new(1, 1, 1),
        &ImageView::new(PixelFormat::R, DataType::UInt8, &[1]),
        ThreadCount::default(),
    )
    .unwrap();
    assert_eq!(img, before);
}

#[test]
fn write_then_read_through_other_layout() {
    let mut img = ImageBuffer::new(Extent3D::new(8, 8, 2), PixelFormat::RGBA, DataType::UInt16);
    let region = Extent3D::new(3, 2, 2);
    let src: Vec<u8> = [255u8, 0, 0, 255].repeat(region.pixel_count());
    img.write_pixels(
        Offset3D::new(4, 5, 0),
        region,
        &ImageView::new(PixelFormat::BGRA, DataType::UInt8, &src),
        ThreadCount::Max,
    )
    .unwrap();

    let mut back = vec![0u8; src.len()];
    img.read_pixels(
        Offset3D::new(4, 5, 0),
        region,
        &mut ImageViewMut::new(PixelFormat::BGRA, DataType::UInt8, &mut back),
        ThreadCount::Max,
    )
    .unwrap();
    assert_eq!(back, src);

    // BGRA (255, 0, 0, 255) is blue.
    let pixel = img.bytes_per_pixel() * (5 * 8 + 4);
    let rgba: Vec<u16> = img.data()[pixel..pixel + 8]
        .chunks_exact(2)
        .map(|c| u16::from_ne_bytes([c[0], c[1]]))
        .collect();
    assert_eq!(rgba, vec![0, 0, u16::MAX, u16::MAX]);
}

#[test]
fn read_into_oversized_view_touches_only_region() {
    let img = sequential(Extent3D::new(2, 2, 1));
    let mut out = vec![0xAAu8; 8 * 4 + 3];
    img.read_pixels(
        Offset3D::ORIGIN,
        img.extent(),
        &mut ImageViewMut::new(PixelFormat::RG, DataType::Float32, &mut out),
        ThreadCount::default(),
    )
    .unwrap();
    assert!(out[32..].iter().all(|&b| b == 0xAA));
    let g = f32::from_ne_bytes([out[4], out[5], out[6], out[7]]);
    assert_eq!(g, 0.0);
}

#[test]
fn convert_round_trip_keeps_pixels() {
    let source = ImageBuffer::new_filled(
        Extent3D::new(17, 9, 3),
        PixelFormat::BGR,
        DataType::UInt8,
        Color4d::new(1.0, 0.0, 1.0, 1.0),
    )
    .unwrap();
    let mut img = source.clone();
    img.convert(PixelFormat::ABGR, DataType::Float64, ThreadCount::Max).unwrap();
    assert_eq!(img.data_size(), 17 * 9 * 3 * 4 * 8);
    img.convert(PixelFormat::BGR, DataType::UInt8, ThreadCount::Fixed(1)).unwrap();
    assert_eq!(img, source);
}

#[test]
fn resize_with_offset_into_volume() {
    let mut img = sequential(Extent3D::new(2, 2, 1));
    img.resize_with_offset(Extent3D::new(2, 2, 2), Color4d::WHITE, Offset3D::new(0, 0, 1))
        .unwrap();
    assert_eq!(img.data(), &[255, 255, 255, 255, 0, 1, 2, 3]);
}
