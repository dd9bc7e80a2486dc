//! Render backends: figure → PBM, SVG or PNG bytes.
//!
//! The raster formats draw the bitmap from [`crate::raster`]; SVG draws the
//! polyline directly as a vector path. All backends hand the caller an
//! owned buffer and never touch the filesystem.

use kurbo::BezPath;

use crate::error::SpiralError;
use crate::figure::Figure;
use crate::geom::{Bounds, Coord};
use crate::raster;

/// Render to a binary (P4) PBM image, one bit per unit cell.
pub fn to_pbm(figure: &Figure) -> Result<Vec<u8>, SpiralError> {
    let bitmap = raster::rasterise(figure)?;
    let bytes_per_row = (bitmap.width() as usize + 7) / 8;
    let header = format!("P4\n{}\n{}\n", bitmap.width(), bitmap.height());
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(header.len() + bytes_per_row * bitmap.height() as usize)?;
    buffer.extend_from_slice(header.as_bytes());
    // pack each row to the nearest byte, most significant bit first
    for y in 0..bitmap.height() {
        let row_start = buffer.len();
        buffer.resize(row_start + bytes_per_row, 0);
        for x in 0..bitmap.width() {
            if bitmap.get(x, y) {
                buffer[row_start + (x / 8) as usize] |= 1 << (7 - (x % 8) as u8);
            }
        }
    }
    Ok(buffer)
}

/// Render to an SVG document with the polyline as a single stroked path.
///
/// One SVG user unit per grid unit, with a one-unit border on every side.
pub fn to_svg(figure: &Figure) -> Result<String, SpiralError> {
    let bounds = figure.bounds();
    let width = bounds.width() + 2;
    let height = bounds.height() + 2;
    let mut path = BezPath::new();
    let mut current = Coord::default();
    path.move_to(svg_point(current, &bounds));
    for segment in figure.segments() {
        current = current.translated(segment.direction, segment.length);
        path.line_to(svg_point(current, &bounds));
    }
    Ok(format!(
        concat!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {w} {h}\">\n",
            "  <path d=\"{d}\" fill=\"none\" stroke=\"black\" stroke-width=\"1\" ",
            "stroke-linecap=\"square\" stroke-linejoin=\"miter\"/>\n",
            "</svg>\n"
        ),
        w = width,
        h = height,
        d = path.to_svg()
    ))
}

/// Translate into the SVG viewport: origin at the top-left, y down.
fn svg_point(point: Coord, bounds: &Bounds) -> kurbo::Point {
    kurbo::Point::new(
        (point.x - bounds.x_min + 1) as f64,
        (bounds.y_max - point.y + 1) as f64,
    )
}

/// Render to a PNG, `scale` image pixels per grid unit, with a one-cell
/// border. Black figure on a white background.
pub fn to_png(figure: &Figure, scale: u32) -> Result<Vec<u8>, SpiralError> {
    let bitmap = raster::rasterise(figure)?;
    let scale = scale.max(1);
    let out_width = (bitmap.width() + 2)
        .checked_mul(scale)
        .ok_or(SpiralError::Memory)?;
    let out_height = (bitmap.height() + 2)
        .checked_mul(scale)
        .ok_or(SpiralError::Memory)?;
    let mut pixmap = tiny_skia::Pixmap::new(out_width, out_height).ok_or(SpiralError::Memory)?;
    pixmap.fill(tiny_skia::Color::WHITE);
    let ink = tiny_skia::PremultipliedColorU8::from_rgba(0, 0, 0, 255).unwrap();
    for y in 0..bitmap.height() {
        for x in 0..bitmap.width() {
            if !bitmap.get(x, y) {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    let px = (x + 1) * scale + dx;
                    let py = (y + 1) * scale + dy;
                    pixmap.pixels_mut()[(py * out_width + px) as usize] = ink;
                }
            }
        }
    }
    let mut encoded = Vec::new();
    let mut encoder = png::Encoder::new(&mut encoded, out_width, out_height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(pixmap.data()).unwrap();
    writer.finish().unwrap();
    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pbm_packs_rows_to_whole_bytes() {
        let figure = Figure::begin(b"").unwrap();
        let pbm = to_pbm(&figure).unwrap();
        // 1x4 column: header plus one byte per row with the top bit set
        assert_eq!(&pbm[..8], b"P4\n1\n4\n\x80");
        assert_eq!(pbm.len(), 7 + 4);
        assert!(pbm[7..].iter().all(|byte| *byte == 0x80));
    }

    #[test]
    fn svg_wraps_the_polyline_in_a_path() {
        let figure = Figure::begin(b"").unwrap();
        let svg = to_svg(&figure).unwrap();
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains("viewBox=\"0 0 3 6\""));
        assert!(svg.contains("<path d=\"M1"));
        assert!(svg.contains("stroke=\"black\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn png_has_the_expected_dimensions() {
        let figure = Figure::begin(b"").unwrap();
        let data = to_png(&figure, 2).unwrap();
        assert_eq!(&data[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
        let decoder = png::Decoder::new(&data[..]);
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().width, 6);
        assert_eq!(reader.info().height, 12);
    }
}
