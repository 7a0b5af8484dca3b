//! PNM (Netpbm) image format support
//!
//! Reads P1-P6. Bitmaps map 1 to ink; color maps through luminance.
//! Writes binary PGM (P5).

use crate::{IoError, IoResult, luminance};
use staffline_core::{BACKGROUND, INK, Raster};
use std::io::{Read, Write};

/// Byte cursor over a PNM file with header tokenizing
struct Parser<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' {
                        break;
                    }
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn next_u32(&mut self) -> IoResult<u32> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        while self.data.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| IoError::InvalidData(format!("expected integer at byte {}", start)))
    }

    /// Next single ASCII bit, as used by P1 where digits need not be separated.
    fn next_bit(&mut self) -> IoResult<bool> {
        self.skip_whitespace_and_comments();
        match self.data.get(self.pos) {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(IoError::InvalidData(format!(
                "expected bit at byte {}",
                self.pos
            ))),
        }
    }

    /// Consume the single whitespace byte that ends a binary header.
    fn raster_start(&mut self) -> IoResult<&'a [u8]> {
        match self.data.get(self.pos) {
            Some(b) if b.is_ascii_whitespace() => Ok(&self.data[self.pos + 1..]),
            _ => Err(IoError::InvalidData("missing raster data".to_string())),
        }
    }
}

fn scale(v: u32, maxval: u32) -> u8 {
    if maxval == 255 {
        v.min(255) as u8
    } else {
        ((v.min(maxval) * 255 + maxval / 2) / maxval) as u8
    }
}

/// Read a PNM image as grayscale
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<Raster> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    if bytes.len() < 2 || bytes[0] != b'P' {
        return Err(IoError::InvalidData("not a PNM file".to_string()));
    }
    let kind = bytes[1];
    let mut p = Parser {
        data: &bytes,
        pos: 2,
    };
    let width = p.next_u32()?;
    let height = p.next_u32()?;
    let n = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| IoError::InvalidData(format!("image too large: {}x{}", width, height)))?;
    let maxval = match kind {
        b'1' | b'4' => 1,
        _ => p.next_u32()?,
    };
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("invalid maxval {}", maxval)));
    }

    // ASCII kinds grow with the samples actually present
    let mut gray = Vec::new();
    match kind {
        b'1' => {
            for _ in 0..n {
                gray.push(if p.next_bit()? { INK } else { BACKGROUND });
            }
        }
        b'2' => {
            for _ in 0..n {
                gray.push(scale(p.next_u32()?, maxval));
            }
        }
        b'3' => {
            for _ in 0..n {
                let r = scale(p.next_u32()?, maxval);
                let g = scale(p.next_u32()?, maxval);
                let b = scale(p.next_u32()?, maxval);
                gray.push(luminance(r, g, b));
            }
        }
        b'4' => {
            let body = p.raster_start()?;
            let row_bytes = (width as usize).div_ceil(8);
            if row_bytes > 0 && body.len() / row_bytes < height as usize {
                return Err(IoError::InvalidData("truncated PBM data".to_string()));
            }
            gray.reserve_exact(n);
            for y in 0..height as usize {
                let row = &body[y * row_bytes..(y + 1) * row_bytes];
                for x in 0..width as usize {
                    let bit = (row[x / 8] >> (7 - x % 8)) & 1;
                    gray.push(if bit == 1 { INK } else { BACKGROUND });
                }
            }
        }
        b'5' | b'6' => {
            let body = p.raster_start()?;
            let spp = if kind == b'5' { 1 } else { 3 };
            let bps = if maxval > 255 { 2 } else { 1 };
            if body.len() / (spp * bps) < n {
                return Err(IoError::InvalidData("truncated PNM data".to_string()));
            }
            gray.reserve_exact(n);
            let sample = |i: usize| -> u8 {
                let v = if bps == 2 {
                    u32::from(u16::from_be_bytes([body[2 * i], body[2 * i + 1]]))
                } else {
                    u32::from(body[i])
                };
                scale(v, maxval)
            };
            for i in 0..n {
                gray.push(if spp == 1 {
                    sample(i)
                } else {
                    luminance(sample(3 * i), sample(3 * i + 1), sample(3 * i + 2))
                });
            }
        }
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM variant P{}",
                kind as char
            )));
        }
    }

    Ok(Raster::from_vec(width, height, gray)?)
}

/// Write a raster as binary PGM (P5)
pub fn write_pnm<W: Write>(raster: &Raster, mut writer: W) -> IoResult<()> {
    write!(writer, "P5\n{} {}\n255\n", raster.width(), raster.height())?;
    writer.write_all(raster.data())?;
    Ok(())
}
