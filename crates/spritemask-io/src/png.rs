//! PNG image format support

use crate::{IoError, IoResult};
use log::debug;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use spritemask_core::{AlphaMode, Box, Pix, PixelDepth};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
///
/// Every PNG flavour is normalised to 8-bit channels: palettes and
/// transparency chunks are expanded, low bit depths widened and 16-bit
/// samples stripped to their high byte. Plain gray becomes an 8-bit
/// `Pix`; everything else becomes a 32-bit `Pix` with spp 3 (opaque) or
/// 4 (with alpha). The result has its origin at (0, 0).
///
/// Palette images with a transparency chunk and 16-bit images with alpha
/// are marked [`AlphaMode::Premultiply`], so gray conversion composites
/// their transparent pixels over black. 8-bit alpha is kept as stored and
/// ignored by gray conversion.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (width, height, alpha) = {
        let info = reader.info();
        let alpha = source_alpha_mode(info.color_type, info.bit_depth, info.trns.is_some());
        (info.width, info.height, alpha)
    };
    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::DecodeError(format!(
            "unexpected PNG output depth {:?}",
            bit_depth
        )));
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
    let rows = data.chunks_exact(bytes_per_row).take(height as usize);

    let (depth, spp, pixels) = match color_type {
        ColorType::Grayscale => (PixelDepth::Bit8, 1, data.to_vec()),
        ColorType::GrayscaleAlpha => {
            let mut out = Vec::with_capacity(width as usize * height as usize * 4);
            for row in rows {
                for ga in row.chunks_exact(2) {
                    out.extend_from_slice(&[ga[0], ga[0], ga[0], ga[1]]);
                }
            }
            (PixelDepth::Bit32, 4, out)
        }
        ColorType::Rgb => {
            let mut out = Vec::with_capacity(width as usize * height as usize * 4);
            for row in rows {
                for rgb in row.chunks_exact(3) {
                    out.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
                }
            }
            (PixelDepth::Bit32, 3, out)
        }
        ColorType::Rgba => (PixelDepth::Bit32, 4, data.to_vec()),
        ColorType::Indexed => {
            return Err(IoError::DecodeError(
                "palette was not expanded by the decoder".to_string(),
            ));
        }
    };

    let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
        return Err(IoError::InvalidData(format!(
            "PNG size {width}x{height} exceeds the coordinate range"
        )));
    };
    debug!(
        "decoded PNG {}x{} as {:?} spp {} ({:?})",
        width, height, color_type, spp, alpha
    );
    let mut pix = Pix::from_data(Box::from_size(w, h), depth, spp, pixels)?.into_mut();
    pix.set_alpha_mode(alpha);
    Ok(pix.into())
}

/// Alpha handling for a PNG, from its header before normalisation.
fn source_alpha_mode(color_type: ColorType, bit_depth: BitDepth, has_trns: bool) -> AlphaMode {
    let has_alpha =
        has_trns || matches!(color_type, ColorType::GrayscaleAlpha | ColorType::Rgba);
    match (color_type, bit_depth) {
        (ColorType::Indexed, _) if has_trns => AlphaMode::Premultiply,
        (_, BitDepth::Sixteen) if has_alpha => AlphaMode::Premultiply,
        _ => AlphaMode::Ignore,
    }
}

/// Write a PNG image
///
/// 8-bit images are written as gray, 32-bit images as RGB or RGBA
/// depending on their spp. An image with a non-zero origin is written
/// starting from the top-left corner of its bounds.
///
/// # Errors
///
/// Returns [`IoError::InvalidData`] for an empty image, which PNG cannot
/// represent.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    if pix.is_empty() {
        return Err(IoError::InvalidData(format!(
            "cannot encode empty image with bounds {:?}",
            pix.bounds()
        )));
    }
    let width = pix.width();
    let height = pix.height();

    let color_type = match (pix.depth(), pix.spp()) {
        (PixelDepth::Bit8, _) => ColorType::Grayscale,
        (PixelDepth::Bit32, 4) => ColorType::Rgba,
        (PixelDepth::Bit32, _) => ColorType::Rgb,
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let b = pix.bounds();
    let data = match color_type {
        ColorType::Rgb => {
            let mut out = Vec::with_capacity(width as usize * height as usize * 3);
            for y in b.y..b.bottom() {
                for rgba in pix.row_data(y).chunks_exact(4) {
                    out.extend_from_slice(&rgba[..3]);
                }
            }
            out
        }
        _ => pix.data().to_vec(),
    };

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    debug!("encoded PNG {}x{} as {:?}", width, height, color_type);
    Ok(())
}
