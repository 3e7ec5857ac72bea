//! In-memory RGB raster used as the image adapter for reconstruction
//!
//! Pixels are stored as `(height, width, 3)` arrays of `f64` in `[0, 1]`,
//! the layout column extraction and horizontal composition both slice well.

use crate::io::error::{Result, UnshredError, invalid_parameter};
use crate::spatial::column::PixelColumn;
use image::{DynamicImage, Rgb, RgbImage};
use ndarray::{Array3, ArrayView3, Axis, Zip, aview1, s};

/// Decoded image held as normalized RGB samples
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pixels: Array3<f64>,
}

impl Raster {
    /// Wrap an existing `(height, width, 3)` array
    ///
    /// # Errors
    ///
    /// Returns an error if the last axis does not hold exactly three channels
    pub fn from_array(pixels: Array3<f64>) -> Result<Self> {
        let (_, _, channels) = pixels.dim();
        if channels != 3 {
            return Err(invalid_parameter(
                "pixels",
                &format!("{:?}", pixels.dim()),
                &"expected an RGB array with 3 channels",
            ));
        }
        Ok(Self { pixels })
    }

    /// Build a raster by evaluating `color(x, y)` at every pixel
    pub fn from_fn<F>(width: usize, height: usize, color: F) -> Self
    where
        F: Fn(usize, usize) -> [f64; 3],
    {
        let mut pixels = Array3::zeros((height, width, 3));
        Zip::indexed(pixels.lanes_mut(Axis(2))).for_each(|(y, x), mut lane| {
            lane.assign(&aview1(&color(x, y)));
        });
        Self { pixels }
    }

    /// Convert a decoded image, dropping any alpha channel
    pub fn from_dynamic_image(image: &DynamicImage) -> Self {
        let rgb = image.to_rgb8();
        let (width, height) = (rgb.width() as usize, rgb.height() as usize);
        let mut pixels = Array3::zeros((height, width, 3));

        for (x, y, pixel) in rgb.enumerate_pixels() {
            for (c, &value) in pixel.0.iter().enumerate() {
                if let Some(sample) = pixels.get_mut((y as usize, x as usize, c)) {
                    *sample = f64::from(value) / 255.0;
                }
            }
        }

        Self { pixels }
    }

    /// Quantize back to 8-bit RGB
    pub fn to_rgb8(&self) -> RgbImage {
        RgbImage::from_fn(self.width() as u32, self.height() as u32, |x, y| {
            let mut rgb = [0u8; 3];
            for (c, channel) in rgb.iter_mut().enumerate() {
                let value = self
                    .pixels
                    .get((y as usize, x as usize, c))
                    .copied()
                    .unwrap_or(0.0);
                *channel = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
            }
            Rgb(rgb)
        })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// Borrow the sample array
    pub fn pixels(&self) -> ArrayView3<'_, f64> {
        self.pixels.view()
    }

    /// RGB sample at `(x, y)`
    pub fn pixel(&self, x: usize, y: usize) -> Option<[f64; 3]> {
        let r = self.pixels.get((y, x, 0))?;
        let g = self.pixels.get((y, x, 1))?;
        let b = self.pixels.get((y, x, 2))?;
        Some([*r, *g, *b])
    }

    /// Copy column `index` out as a labelled pixel column
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is not a column of this raster
    pub fn column(&self, index: usize) -> Result<PixelColumn> {
        if index >= self.width() {
            return Err(self.out_of_bounds("column", (index, 0, 1, self.height())));
        }
        let samples = self.pixels.slice(s![.., index, ..]).to_owned();
        Ok(PixelColumn::new(samples, index))
    }

    /// Copy the `width` x `height` region whose top-left corner is `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns an error if the region reaches outside the raster
    pub fn extract_region(&self, x: usize, y: usize, width: usize, height: usize) -> Result<Self> {
        let fits_x = x.checked_add(width).is_some_and(|end| end <= self.width());
        let fits_y = y.checked_add(height).is_some_and(|end| end <= self.height());
        if !fits_x || !fits_y {
            return Err(self.out_of_bounds("region", (x, y, width, height)));
        }

        let pixels = self
            .pixels
            .slice(s![y..y + height, x..x + width, ..])
            .to_owned();
        Ok(Self { pixels })
    }

    /// Place rasters side by side, left to right
    ///
    /// # Errors
    ///
    /// Returns an error if no parts are given or their heights differ
    pub fn compose_horizontal(parts: &[Self]) -> Result<Self> {
        if parts.is_empty() {
            return Err(invalid_parameter(
                "parts",
                &0,
                &"at least one raster is required",
            ));
        }

        let views: Vec<ArrayView3<'_, f64>> = parts.iter().map(Self::pixels).collect();
        let pixels = ndarray::concatenate(Axis(1), &views).map_err(|e| {
            invalid_parameter("parts", &parts.len(), &format!("heights differ: {e}"))
        })?;
        Ok(Self { pixels })
    }

    fn out_of_bounds(
        &self,
        operation: &'static str,
        requested: (usize, usize, usize, usize),
    ) -> UnshredError {
        UnshredError::OutOfBounds {
            operation,
            requested,
            available: (self.width(), self.height()),
        }
    }
}
