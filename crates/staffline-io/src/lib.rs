//! staffline-io - Image I/O for staffline
//!
//! Every reader decodes to a single-channel 8-bit [`Raster`]; color
//! inputs are reduced to luminance. Supported formats:
//!
//! - PNG (read/write, feature `png-format`)
//! - PNM P1-P6 (read) and P5 (write), feature `pnm`
//! - JPEG (read only, feature `jpeg`)

mod error;
mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use staffline_core::Raster;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// ITU-R BT.601 luma with integer weights summing to 256.
pub(crate) fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((77 * u32::from(r) + 150 * u32::from(g) + 29 * u32::from(b)) >> 8) as u8
}

/// Blend a gray value with alpha `a` over white paper.
#[cfg_attr(not(feature = "png-format"), allow(dead_code))]
pub(crate) fn composite_over_paper(v: u8, a: u8) -> u8 {
    let (v, a) = (u32::from(v), u32::from(a));
    ((v * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Read an image file as a grayscale raster.
///
/// The format is detected from the file contents, not its extension.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let format = detect_format(&path)?;
    let file = File::open(&path)?;
    read_image_format(BufReader::new(file), format)
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Raster> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

fn read_image_format<R: std::io::BufRead + std::io::Seek>(
    reader: R,
    format: ImageFormat,
) -> IoResult<Raster> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} reading not enabled",
            other
        ))),
    }
}

/// Write a raster to a file in the given format.
///
/// [`ImageFormat::Unknown`] picks the format from the path's extension,
/// falling back to PNG.
pub fn write_image<P: AsRef<Path>>(raster: &Raster, path: P, format: ImageFormat) -> IoResult<()> {
    let format = match format {
        ImageFormat::Unknown => match ImageFormat::from_path(&path) {
            ImageFormat::Unknown => ImageFormat::Png,
            f => f,
        },
        f => f,
    };
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_image_format(raster, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode a raster into an in-memory buffer.
pub fn write_image_mem(raster: &Raster, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_image_format(raster, &mut buf, format)?;
    Ok(buf)
}

fn write_image_format<W: Write>(raster: &Raster, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(raster, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(raster, writer),
        other => {
            let _ = writer;
            Err(IoError::UnsupportedFormat(format!(
                "{:?} writing not supported",
                other
            )))
        }
    }
}
