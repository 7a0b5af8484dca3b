//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate. Grayscale and RGB
//! scans are supported; RGB is reduced to luminance.
//!
//! JPEG *writing* is not supported: `jpeg-decoder` is decode-only, and
//! lossy output would corrupt binarized pages anyway.

use crate::{IoError, IoResult, luminance};
use jpeg_decoder::{Decoder, PixelFormat};
use staffline_core::Raster;
use std::io::Read;

/// Read a JPEG image from a reader positioned at the SOI marker.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;
    let width = u32::from(info.width);
    let height = u32::from(info.height);

    let gray = match info.pixel_format {
        PixelFormat::L8 => pixels,
        PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .map(|c| luminance(c[0], c[1], c[2]))
            .collect(),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "JPEG pixel format {:?}",
                other
            )));
        }
    };

    Ok(Raster::from_vec(width, height, gray)?)
}
