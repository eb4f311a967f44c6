//! Image fixtures for tests, shared with the CLI's integration tests.

use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use image::{DynamicImage, ImageFormat, RgbImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;

pub fn jpeg_bytes(date_time_original: Option<&str>) -> Vec<u8> {
    let mut body = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(RgbImage::new(4, 4))
        .write_to(&mut body, ImageFormat::Jpeg)
        .expect("encode jpeg");
    let body = body.into_inner();

    let Some(date) = date_time_original else {
        return body;
    };

    let field = Field {
        tag: Tag::DateTimeOriginal,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![date.as_bytes().to_vec()]),
    };
    let mut writer = Writer::new();
    writer.push_field(&field);
    let mut tiff = Cursor::new(Vec::new());
    writer.write(&mut tiff, false).expect("encode exif");
    let tiff = tiff.into_inner();

    // APP1 goes right after SOI.
    let segment_len = u16::try_from(2 + 6 + tiff.len()).expect("exif fits in APP1");
    let mut out = Vec::with_capacity(body.len() + tiff.len() + 10);
    out.extend_from_slice(&body[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&body[2..]);
    out
}

pub fn write_jpeg_with_date(path: &Path, date_time_original: Option<&str>) {
    fs::write(path, jpeg_bytes(date_time_original)).expect("write jpeg");
}

pub fn write_png(path: &Path) {
    let mut body = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(RgbImage::new(4, 4))
        .write_to(&mut body, ImageFormat::Png)
        .expect("encode png");
    fs::write(path, body.into_inner()).expect("write png");
}
