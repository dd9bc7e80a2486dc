//! Figure → bitmap rasterisation.

use std::fmt;

use crate::error::SpiralError;
use crate::figure::Figure;
use crate::geom::Coord;

/// A 1-bit image. Row 0 is the top row (highest y of the source figure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl Bitmap {
    fn new(width: u32, height: u32) -> Result<Bitmap, SpiralError> {
        let size = (width as usize)
            .checked_mul(height as usize)
            .ok_or(SpiralError::Memory)?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(size)?;
        pixels.resize(size, false);
        Ok(Bitmap {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    fn set(&mut self, x: u32, y: u32) {
        self.pixels[y as usize * self.width as usize + x as usize] = true;
    }

    /// Number of set pixels.
    pub fn set_count(&self) -> usize {
        self.pixels.iter().filter(|pixel| **pixel).count()
    }
}

/// Text dump, one block character per pixel. Handy for eyeballing small
/// figures in a terminal.
impl fmt::Display for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                f.write_str(if self.get(x, y) { "\u{2588}" } else { "\u{2591}" })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// Plot the figure onto a bitmap sized to its bounding box.
///
/// Every unit cell any segment traverses gets one set pixel; the figure is
/// translated so the bounding box's corner lands at the image origin, with
/// y flipped so the image reads top-down. Deterministic: equal figures
/// produce bit-identical bitmaps.
pub fn rasterise(figure: &Figure) -> Result<Bitmap, SpiralError> {
    let bounds = figure.bounds();
    let width = u32::try_from(bounds.width()).map_err(|_| SpiralError::Memory)?;
    let height = u32::try_from(bounds.height()).map_err(|_| SpiralError::Memory)?;
    let mut bitmap = Bitmap::new(width, height)?;
    let mut current = Coord::default();
    bitmap.set(
        (current.x - bounds.x_min) as u32,
        (bounds.y_max - current.y) as u32,
    );
    for segment in figure.segments() {
        for _ in 0..segment.length {
            current = current.step(segment.direction);
            bitmap.set(
                (current.x - bounds.x_min) as u32,
                (bounds.y_max - current.y) as u32,
            );
        }
    }
    Ok(bitmap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RefineConfig;
    use crate::refine::refine;

    #[test]
    fn anchor_segment_rasterises_to_a_column() {
        let figure = Figure::begin(b"").unwrap();
        let bitmap = rasterise(&figure).unwrap();
        assert_eq!(bitmap.width(), 1);
        assert_eq!(bitmap.height(), 4);
        assert_eq!(bitmap.set_count(), 4);
        assert_eq!(bitmap.to_string(), "\u{2588}\n\u{2588}\n\u{2588}\n\u{2588}\n");
    }

    #[test]
    fn every_unit_of_length_sets_a_pixel() {
        let mut figure = Figure::begin(b"SXBP").unwrap();
        refine(&mut figure, &RefineConfig::default(), None).unwrap();
        let bitmap = rasterise(&figure).unwrap();
        // a self-avoiding walk never revisits a point, so the pixel count
        // is the total length plus one for the origin
        let total: usize = figure
            .segments()
            .iter()
            .map(|segment| segment.length as usize)
            .sum();
        assert_eq!(bitmap.set_count(), total + 1);
        assert!(bitmap.set_count() >= figure.len());
    }

    #[test]
    fn equal_figures_rasterise_identically() {
        let mut first = Figure::begin(b"AB").unwrap();
        refine(&mut first, &RefineConfig::default(), None).unwrap();
        let second = first.clone();
        assert_eq!(
            rasterise(&first).unwrap(),
            rasterise(&second).unwrap()
        );
    }
}
