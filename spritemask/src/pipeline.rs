//! Mask extraction pipeline
//!
//! Chains the stages that turn a sprite into a binary mask:
//!
//! 1. grayscale conversion
//! 2. Otsu thresholding
//! 3. morphology with a disk structuring element
//!
//! # Example
//!
//! ```
//! use spritemask::pipeline::{MaskPipeline, PipelineConfig};
//! use spritemask::morph::MorphOp;
//! use spritemask::{Pix, PixelDepth};
//!
//! let config = PipelineConfig::default().with_diameter(5).with_op(MorphOp::Close);
//! let pipeline = MaskPipeline::new(config).unwrap();
//!
//! let pix = Pix::new(40, 30, PixelDepth::Bit8).unwrap();
//! let output = pipeline.run(&pix).unwrap();
//! assert_eq!(output.level, 0);
//! assert_eq!(output.cleaned.width(), 36);
//! ```

use log::{debug, info};
use spritemask_color::{ColorError, convert_to_gray, threshold_otsu};
use spritemask_core::Pix;
use spritemask_io::{IoError, write_image};
use spritemask_morph::{MorphError, MorphOp, Sel, close, open};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while running the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Grayscale conversion or thresholding failed
    #[error("color error: {0}")]
    Color(#[from] ColorError),

    /// Structuring element or morphology failed
    #[error("morphology error: {0}")]
    Morph(#[from] MorphError),

    /// Reading or writing an image failed
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Creating the output directory failed
    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Diameter of the disk structuring element (>= 1)
    pub diameter: u32,
    /// Composition producing the final mask
    pub op: MorphOp,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            diameter: 3,
            op: MorphOp::Cleanup,
        }
    }
}

impl PipelineConfig {
    /// Set the disk diameter
    pub fn with_diameter(mut self, diameter: u32) -> Self {
        self.diameter = diameter;
        self
    }

    /// Set the final composition
    pub fn with_op(mut self, op: MorphOp) -> Self {
        self.op = op;
        self
    }
}

/// Images produced by [`MaskPipeline::run`]
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Otsu level applied to the gray image
    pub level: u8,
    /// Thresholded mask
    pub binary: Pix,
    /// Opening of the mask
    pub opened: Pix,
    /// Closing of the mask
    pub closed: Pix,
    /// Result of the configured composition
    pub cleaned: Pix,
}

impl PipelineOutput {
    /// Write the four images as `threshold.png`, `opened.png`,
    /// `closed.png` and `final.png` into `dir`, creating it if needed.
    ///
    /// # Returns
    ///
    /// The paths written, in that order.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> PipelineResult<Vec<PathBuf>> {
        let dir = dir.as_ref();
        create_dir(dir)?;
        let mut written = Vec::with_capacity(4);
        for (name, pix) in [
            ("threshold.png", &self.binary),
            ("opened.png", &self.opened),
            ("closed.png", &self.closed),
            ("final.png", &self.cleaned),
        ] {
            written.push(write_named(pix, dir, name)?);
        }
        Ok(written)
    }
}

/// Binary mask pipeline with a fixed structuring element
#[derive(Debug, Clone)]
pub struct MaskPipeline {
    config: PipelineConfig,
    sel: Sel,
}

impl MaskPipeline {
    /// Create a pipeline, building the disk structuring element
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Morph`] if the diameter is 0.
    pub fn new(config: PipelineConfig) -> PipelineResult<Self> {
        let sel = Sel::create_disk(config.diameter)?;
        debug!(
            "disk sel: diameter {}, {} hits",
            config.diameter,
            sel.hit_count()
        );
        Ok(Self { config, sel })
    }

    /// Get the configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Get the structuring element
    pub fn sel(&self) -> &Sel {
        &self.sel
    }

    /// Convert to gray and binarize with Otsu's method
    ///
    /// # Returns
    ///
    /// The binary mask and the level applied.
    pub fn binarize(&self, pix: &Pix) -> PipelineResult<(Pix, u8)> {
        let gray = convert_to_gray(pix)?;
        let (binary, level) = threshold_otsu(&gray)?;
        debug!(
            "binarized {}x{} at level {}: {} foreground pixels",
            binary.width(),
            binary.height(),
            level,
            binary.count_set()
        );
        Ok((binary, level))
    }

    /// Run every stage
    ///
    /// The opening and closing are computed from the thresholded mask
    /// alongside the configured composition.
    pub fn run(&self, pix: &Pix) -> PipelineResult<PipelineOutput> {
        let (binary, level) = self.binarize(pix)?;
        let opened = open(&binary, &self.sel)?;
        debug!("opened: {} foreground pixels", opened.count_set());
        let closed = close(&binary, &self.sel)?;
        debug!("closed: {} foreground pixels", closed.count_set());
        let cleaned = self.config.op.apply(&binary, &self.sel)?;
        debug!("{}: {} foreground pixels", self.config.op, cleaned.count_set());
        Ok(PipelineOutput {
            level,
            binary,
            opened,
            closed,
            cleaned,
        })
    }

    /// Binarize and apply a single composition
    pub fn apply(&self, pix: &Pix, op: MorphOp) -> PipelineResult<Pix> {
        let (binary, _) = self.binarize(pix)?;
        let out = op.apply(&binary, &self.sel)?;
        debug!("{}: {} foreground pixels", op, out.count_set());
        Ok(out)
    }
}

/// Write `pix` as `dir/name`
pub fn write_named(pix: &Pix, dir: &Path, name: &str) -> PipelineResult<PathBuf> {
    let path = dir.join(name);
    write_image(pix, &path)?;
    info!("wrote {}", path.display());
    Ok(path)
}

fn create_dir(dir: &Path) -> PipelineResult<()> {
    std::fs::create_dir_all(dir).map_err(|source| PipelineError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use spritemask_core::{Box, PixMut, PixelDepth};

    fn two_tone() -> Pix {
        let mut m = PixMut::new_in(Box::from_size(24, 24), PixelDepth::Bit8);
        m.fill(30);
        for y in 6..18 {
            for x in 6..18 {
                m.set_pixel(x, y, 220).unwrap();
            }
        }
        m.into()
    }

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.diameter, 3);
        assert_eq!(config.op, MorphOp::Cleanup);
    }

    #[test]
    fn test_zero_diameter_rejected() {
        let config = PipelineConfig::default().with_diameter(0);
        assert!(matches!(
            MaskPipeline::new(config),
            Err(PipelineError::Morph(MorphError::InvalidSel(_)))
        ));
    }

    #[test]
    fn test_run_stages() {
        let pipeline = MaskPipeline::new(PipelineConfig::default()).unwrap();
        let out = pipeline.run(&two_tone()).unwrap();
        assert_eq!(out.level, 31);
        assert_eq!(out.binary.count_set(), 144);
        assert_eq!(out.opened.bounds(), Box::new_unchecked(1, 1, 22, 22));
        assert_eq!(out.closed.bounds(), Box::new_unchecked(1, 1, 22, 22));
        assert_eq!(out.cleaned.bounds(), Box::new_unchecked(3, 3, 18, 18));
        // the square loses its four corners to the disk
        assert_eq!(out.opened.count_set(), 140);
        assert_eq!(out.closed.count_set(), 144);
    }

    #[test]
    fn test_apply_matches_run() {
        let config = PipelineConfig::default().with_op(MorphOp::CloseInverse);
        let pipeline = MaskPipeline::new(config).unwrap();
        let pix = two_tone();
        let out = pipeline.run(&pix).unwrap();
        let single = pipeline.apply(&pix, MorphOp::CloseInverse).unwrap();
        assert!(single.equals(&out.cleaned));
    }

    #[test]
    fn test_rgb_input() {
        let mut m = PixMut::new_in(Box::from_size(10, 10), PixelDepth::Bit32);
        for y in 0..10 {
            for x in 0..10 {
                let v = if x < 5 { 10 } else { 240 };
                m.set_rgba(x, y, v, v, v, 255).unwrap();
            }
        }
        let pipeline = MaskPipeline::new(PipelineConfig::default().with_diameter(1)).unwrap();
        let out = pipeline.run(&m.into()).unwrap();
        assert_eq!(out.binary.count_set(), 50);
        assert!(out.cleaned.equals(&out.binary));
    }
}
