//! Validates the code examples from README.md compile and behave correctly.

#[test]
fn readme_core_api() {
    use pixlut::{LookupTable, lookup, lookup_si};

    let invert: Vec<u8> = (0..=255u8).map(|v| 255 - v).collect();
    let table = LookupTable::single(&invert);
    let mut out = [0u8; 5];
    lookup(&[10u8, 20, 30, 40, 50], &mut out, &table).unwrap();
    assert_eq!(out, [245, 235, 225, 215, 205]);

    let r = [0u8, 255];
    let g = [0u8, 128];
    let b = [0u8, 64];
    let palette = LookupTable::new(&[&r[..], &g[..], &b[..]]).unwrap();
    let mut rgb = [0u8; 6];
    lookup_si(&[1u8, 0], &mut rgb, &palette).unwrap();
    assert_eq!(rgb, [255, 128, 64, 0, 0, 0]);
}

#[test]
fn readme_signed_sources() {
    use pixlut::{LookupTable, lookup};

    // entry k holds the output for sample k - 32768
    let mut table = vec![0u16; 65536];
    table[32767] = 0x1234;
    let mut out = [0u16; 1];
    lookup(&[-1i16], &mut out, &LookupTable::single(&table)).unwrap();
    assert_eq!(out, [0x1234]);
}

#[test]
fn readme_windowed_32_bit() {
    use pixlut::{LookupTable, LutError, lookup};

    let table: Vec<f32> = (0..2001).map(|k| (k - 1000) as f32 / 1000.0).collect();
    let window = LookupTable::single(&table).starting_at_value(-1000i32);
    let mut out = [0f32; 3];
    lookup(&[-1000i32, 0, 500], &mut out, &window).unwrap();
    assert_eq!(out, [-1.0, 0.0, 0.5]);

    let err = lookup(&[1001i32, 0, 0], &mut out, &window).unwrap_err();
    assert!(matches!(err, LutError::IndexOutOfTable { channel: 0, .. }));
}

#[test]
fn readme_strided() {
    use pixlut::{LookupTable, lookup_inplace_strided};

    let gamma: Vec<u8> = (0..=255u8)
        .map(|v| ((v as f32 / 255.0).powf(0.5) * 255.0).round() as u8)
        .collect();
    let table = LookupTable::new(&[&gamma[..]; 4]).unwrap();
    let mut buf = vec![0u8; 256 * 100];
    lookup_inplace_strided(&mut buf, 60, 100, 256, &table).unwrap();
    assert!(buf.iter().all(|&v| v == 0));
}

#[test]
fn readme_tuning() {
    use pixlut::{LookupTable, Path, Tuning, lookup};

    let t: Vec<u16> = (0..256).map(|v| v * 4).collect();
    let table = LookupTable::new(&[&t[..]; 3]).unwrap().with_tuning(Tuning {
        path: Path::Fused,
        ..Tuning::default()
    });
    let mut out = [0u16; 3];
    lookup(&[1u8, 2, 3], &mut out, &table).unwrap();
    assert_eq!(out, [4, 8, 12]);
}

#[cfg(feature = "rgb")]
#[test]
fn readme_typed_rgb() {
    use pixlut::{LookupTable, typed_rgb};
    use rgb::Rgb;

    let dim: Vec<u8> = (0..=255u8).map(|v| v / 2).collect();
    let curves = LookupTable::new(&[&dim[..]; 3]).unwrap();
    let mut pixels = vec![Rgb::new(200u8, 100, 50); 100];
    typed_rgb::apply_rgb(&mut pixels, &curves).unwrap();
    assert_eq!(pixels[0], Rgb::new(100, 50, 25));
}

#[cfg(feature = "imgref")]
#[test]
fn readme_imgref() {
    use ::imgref::{ImgRefMut, ImgVec};
    use pixlut::{LookupTable, imgref};
    use rgb::Rgba;

    let keep: Vec<u8> = (0..=255u8).collect();
    let opaque = [255u8; 256];
    let curves = LookupTable::new(&[&keep[..], &keep[..], &keep[..], &opaque[..]]).unwrap();
    let src = ImgVec::new(vec![Rgba::new(1u8, 2, 3, 0); 640 * 480], 640, 480);
    let mut dst_buf = vec![Rgba::default(); 640 * 480];
    imgref::lookup_rgba(src.as_ref(), ImgRefMut::new(&mut dst_buf, 640, 480), &curves).unwrap();
    assert_eq!(dst_buf[640 * 480 - 1], Rgba::new(1, 2, 3, 255));
}
