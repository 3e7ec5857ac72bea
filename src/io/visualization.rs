//! Animated GIF showing how the assembler built the stripe order

use crate::algorithm::assembly::Assembly;
use crate::io::configuration::{FINAL_FRAME_HOLD, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{Result, UnshredError};
use crate::spatial::raster::Raster;
use image::{Delay, Frame, Rgba, RgbaImage};
use std::path::Path;

/// Replays an assembly on top of its rendered result
///
/// Each frame reveals one more stripe at its final position, so the
/// animation ends on the reconstructed image.
pub struct AssemblyAnimation {
    restored: RgbaImage,
    stripe_width: usize,
    /// Final slot of each stripe, in the order the stripes were placed
    reveal_order: Vec<usize>,
    empty_color: Rgba<u8>,
}

impl AssemblyAnimation {
    /// Prepare an animation for `assembly`, whose rendering is `restored`
    ///
    /// # Errors
    ///
    /// Returns an error if a placement names a stripe missing from the
    /// final order
    pub fn new(restored: &Raster, assembly: &Assembly, stripe_width: usize) -> Result<Self> {
        let slot_of = |stripe: usize| {
            assembly
                .order
                .iter()
                .position(|placed| placed.index() == stripe)
                .ok_or_else(|| UnshredError::InvalidParameter {
                    parameter: "assembly",
                    value: stripe.to_string(),
                    reason: "placed stripe is missing from the final order".to_string(),
                })
        };

        let mut reveal_order = Vec::with_capacity(assembly.order.len());
        if !assembly.order.is_empty() {
            reveal_order.push(slot_of(assembly.seed)?);
        }
        for placement in &assembly.placements {
            reveal_order.push(slot_of(placement.stripe)?);
        }

        let restored = image::DynamicImage::ImageRgb8(restored.to_rgb8()).to_rgba8();

        Ok(Self {
            restored,
            stripe_width,
            reveal_order,
            empty_color: Rgba([128, 128, 128, 255]),
        })
    }

    /// Number of frames before the final hold frame
    pub fn frame_count(&self) -> usize {
        self.reveal_order.len()
    }

    /// Export the animation as a GIF with automatic frame skipping
    ///
    /// Requested delays below what viewers support are raised to the
    /// minimum and frames are dropped to keep the apparent speed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The assembly placed no stripes
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.reveal_order.is_empty() {
            return Err(UnshredError::InvalidParameter {
                parameter: "assembly",
                value: "0 stripes".to_string(),
                reason: "nothing to animate".to_string(),
            });
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };

        let frames = self.generate_frames(effective_delay_ms, skip_factor);

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| UnshredError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| UnshredError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| UnshredError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize) -> Vec<Frame> {
        let mut revealed = vec![false; self.reveal_order.len()];
        let mut frames = Vec::new();

        for (step, &slot) in self.reveal_order.iter().enumerate() {
            if let Some(flag) = revealed.get_mut(slot) {
                *flag = true;
            }
            if (step + 1) % skip_factor == 0 {
                frames.push(self.render_frame(&revealed, delay_ms));
            }
        }

        if self.reveal_order.len() % skip_factor != 0 {
            frames.push(self.render_frame(&revealed, delay_ms));
        }

        // Final frame displays longer for better visibility
        if let Some(last) = frames.last().map(|f| f.buffer().clone()) {
            frames.push(Frame::from_parts(
                last,
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms * FINAL_FRAME_HOLD, 1),
            ));
        }

        frames
    }

    fn render_frame(&self, revealed: &[bool], delay_ms: u32) -> Frame {
        let mut img = RgbaImage::from_pixel(
            self.restored.width(),
            self.restored.height(),
            self.empty_color,
        );

        for (x, y, pixel) in self.restored.enumerate_pixels() {
            let slot = x as usize / self.stripe_width.max(1);
            if revealed.get(slot).copied().unwrap_or(false) {
                img.put_pixel(x, y, *pixel);
            }
        }

        Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1))
    }
}
