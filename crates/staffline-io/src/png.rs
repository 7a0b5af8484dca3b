//! PNG image format support
//!
//! Every PNG color type is decoded to a single 8-bit luminance channel.
//! Alpha is composited over white paper. Output is always 8-bit grayscale.

use crate::{IoError, IoResult, composite_over_paper, luminance};
use png::{BitDepth, ColorType, Decoder, Encoder};
use staffline_core::Raster;
use std::io::{BufRead, Seek, Write};

/// Read a PNG image as grayscale
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bits = info.bit_depth as u8;
    let palette = info.palette.as_ref().map(|p| p.to_vec());

    let spp = match color_type {
        ColorType::Grayscale | ColorType::Indexed => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
    };
    if color_type == ColorType::Indexed && palette.is_none() {
        return Err(IoError::InvalidData(
            "indexed PNG without palette".to_string(),
        ));
    }

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let mut gray = Vec::with_capacity(width as usize * height as usize);

    for y in 0..height as usize {
        let row = &data[y * bytes_per_row..(y + 1) * bytes_per_row];
        for x in 0..width as usize {
            let s = |c: usize| raw_sample(row, x * spp + c, bits);
            let v = match color_type {
                ColorType::Grayscale => scale_to_u8(s(0), bits),
                ColorType::GrayscaleAlpha => {
                    composite_over_paper(scale_to_u8(s(0), bits), scale_to_u8(s(1), bits))
                }
                ColorType::Rgb => luminance(
                    scale_to_u8(s(0), bits),
                    scale_to_u8(s(1), bits),
                    scale_to_u8(s(2), bits),
                ),
                ColorType::Rgba => composite_over_paper(
                    luminance(
                        scale_to_u8(s(0), bits),
                        scale_to_u8(s(1), bits),
                        scale_to_u8(s(2), bits),
                    ),
                    scale_to_u8(s(3), bits),
                ),
                ColorType::Indexed => {
                    let idx = s(0) as usize * 3;
                    match palette.as_deref().and_then(|p| p.get(idx..idx + 3)) {
                        Some(rgb) => luminance(rgb[0], rgb[1], rgb[2]),
                        None => {
                            return Err(IoError::InvalidData(format!(
                                "palette index {} out of range",
                                s(0)
                            )));
                        }
                    }
                }
            };
            gray.push(v);
        }
    }

    Ok(Raster::from_vec(width, height, gray)?)
}

/// Unscaled sample `i` of a packed PNG row.
fn raw_sample(row: &[u8], i: usize, bits: u8) -> u16 {
    match bits {
        8 => u16::from(row[i]),
        16 => u16::from_be_bytes([row[2 * i], row[2 * i + 1]]),
        _ => {
            let per_byte = 8 / bits as usize;
            let byte = row[i / per_byte];
            let shift = 8 - bits as usize * (i % per_byte + 1);
            u16::from((byte >> shift) & ((1u8 << bits) - 1))
        }
    }
}

fn scale_to_u8(v: u16, bits: u8) -> u8 {
    match bits {
        1 => {
            if v != 0 {
                255
            } else {
                0
            }
        }
        2 => (v * 85) as u8,
        4 => (v * 17) as u8,
        16 => (v >> 8) as u8,
        _ => v as u8,
    }
}

/// Write a raster as an 8-bit grayscale PNG
pub fn write_png<W: Write>(raster: &Raster, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, raster.width(), raster.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(raster.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(width: u32, height: u32, color: ColorType, depth: BitDepth, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(depth);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn test_png_roundtrip_grayscale() {
        let data: Vec<u8> = (0..100).map(|i| (i * 2) as u8).collect();
        let raster = Raster::from_vec(10, 10, data).unwrap();

        let mut buffer = Vec::new();
        write_png(&raster, &mut buffer).unwrap();
        let raster2 = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(raster, raster2);
    }

    #[test]
    fn test_png_read_rgb_luminance() {
        let bytes = encode(3, 1, ColorType::Rgb, BitDepth::Eight, &[
            255, 255, 255, 0, 0, 0, 255, 0, 0,
        ]);
        let raster = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(raster.data(), &[255, 0, 76]);
    }

    #[test]
    fn test_png_read_1bit() {
        // 0b1010_0000: white, black, white, black
        let bytes = encode(4, 1, ColorType::Grayscale, BitDepth::One, &[0b1010_0000]);
        let raster = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(raster.data(), &[255, 0, 255, 0]);
    }

    #[test]
    fn test_png_read_transparent_is_paper() {
        let bytes = encode(2, 1, ColorType::GrayscaleAlpha, BitDepth::Eight, &[
            0, 0, 0, 255,
        ]);
        let raster = read_png(Cursor::new(bytes)).unwrap();
        assert_eq!(raster.data(), &[255, 0]);
    }

    #[test]
    fn test_png_read_garbage() {
        assert!(read_png(Cursor::new(b"not a png".to_vec())).is_err());
    }
}
