//! data2spiral: binary data → self-avoiding spiral polylines.
//!
//! Encodes the bits of an arbitrary byte string as the turn sequence of an
//! axis-aligned polyline on an integer grid, then refines segment lengths
//! until no segment touches or crosses another. The refined figure can be
//! rendered (PBM, SVG, PNG) or serialised to a compact binary form.
//!
//! # Example
//!
//! ```
//! use data2spiral::{generate, RefineConfig};
//!
//! let figure = generate(b"SXBP", &RefineConfig::default())?;
//! assert_eq!(figure.len(), 33);
//! assert_eq!(figure.solved_count(), 33);
//! # Ok::<(), data2spiral::SpiralError>(())
//! ```

#![forbid(unsafe_code)]

mod collide;
mod encode;

pub mod config;
pub mod error;
pub mod figure;
pub mod geom;
pub mod raster;
pub mod refine;
pub mod render;
pub mod serial;

pub use config::{RefineConfig, RefineMethod};
pub use error::SpiralError;
pub use figure::{Figure, Segment};
pub use geom::{Bounds, Coord, Direction, Rotation};
pub use raster::Bitmap;
pub use refine::{refine, Progress, ProgressCallback};

/// Full pipeline: input bytes → refined figure.
pub fn generate(data: &[u8], config: &RefineConfig) -> Result<Figure, SpiralError> {
    let mut figure = Figure::begin(data)?;
    refine::refine(&mut figure, config, None)?;
    Ok(figure)
}
