//! Pixel canvas abstraction used by the metatile compositor.

use crate::file::zspr::Color;

/// Destination for decoded pixels.
///
/// The compositor only ever writes through this trait, so callers can render
/// straight into their own image type.
pub trait Canvas {
	/// Canvas width in pixels
	fn width(&self) -> u32;

	/// Canvas height in pixels
	fn height(&self) -> u32;

	/// Writes one pixel. Writes outside the canvas must be ignored.
	fn put_pixel(&mut self, x: u32, y: u32, color: Color);
}

/// In-memory RGB canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelCanvas {
	width: u32,
	height: u32,
	pixels: Vec<Color>,
}

impl PixelCanvas {
	/// Creates a canvas filled with `background`.
	pub fn new(width: u32, height: u32, background: Color) -> Self {
		Self {
			width,
			height,
			pixels: vec![background; width as usize * height as usize],
		}
	}

	#[inline]
	fn index(&self, x: u32, y: u32) -> Option<usize> {
		(x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
	}

	/// Returns the pixel at (`x`, `y`), or `None` outside the canvas.
	pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
		self.index(x, y).map(|i| self.pixels[i])
	}

	/// Returns all pixels in row-major order.
	pub fn pixels(&self) -> &[Color] {
		&self.pixels
	}

	/// Returns a copy scaled up by an integer factor using nearest neighbour.
	///
	/// A factor of 0 is treated as 1. Returns `None` if the scaled size does
	/// not fit in `u32` or in memory addressing.
	pub fn scale_nearest(&self, factor: u32) -> Option<Self> {
		let factor = factor.max(1);
		let width = self.width.checked_mul(factor)?;
		let height = self.height.checked_mul(factor)?;
		let len = (width as usize).checked_mul(height as usize)?;

		let mut pixels = Vec::with_capacity(len);
		for row in self.pixels.chunks_exact(self.width.max(1) as usize) {
			let mut scaled_row = Vec::with_capacity(width as usize);
			for &color in row {
				scaled_row.extend(std::iter::repeat_n(color, factor as usize));
			}
			for _ in 0..factor {
				pixels.extend_from_slice(&scaled_row);
			}
		}

		Some(Self {
			width,
			height,
			pixels,
		})
	}

	/// Returns the canvas as packed RGB bytes, row-major.
	pub fn to_rgb_bytes(&self) -> Vec<u8> {
		self.pixels.iter().flat_map(|c| c.to_array()).collect()
	}
}

impl Canvas for PixelCanvas {
	fn width(&self) -> u32 {
		self.width
	}

	fn height(&self) -> u32 {
		self.height
	}

	fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
		if let Some(i) = self.index(x, y) {
			self.pixels[i] = color;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_canvas_is_background() {
		let canvas = PixelCanvas::new(4, 3, Color::rgb(9, 9, 9));
		assert_eq!(canvas.pixels().len(), 12);
		assert!(canvas.pixels().iter().all(|&c| c == Color::rgb(9, 9, 9)));
	}

	#[test]
	fn test_put_get_pixel() {
		let mut canvas = PixelCanvas::new(4, 3, Color::BLACK);
		canvas.put_pixel(3, 2, Color::rgb(255, 0, 0));

		assert_eq!(canvas.get_pixel(3, 2), Some(Color::rgb(255, 0, 0)));
		assert_eq!(canvas.get_pixel(2, 2), Some(Color::BLACK));
		assert_eq!(canvas.get_pixel(4, 0), None);
	}

	#[test]
	fn test_out_of_bounds_write_ignored() {
		let mut canvas = PixelCanvas::new(2, 2, Color::BLACK);
		let before = canvas.clone();
		canvas.put_pixel(2, 0, Color::rgb(1, 1, 1));
		canvas.put_pixel(0, 2, Color::rgb(1, 1, 1));
		assert_eq!(canvas, before);
	}

	#[test]
	fn test_scale_nearest() {
		let mut canvas = PixelCanvas::new(2, 1, Color::BLACK);
		canvas.put_pixel(1, 0, Color::rgb(0, 0, 255));

		let scaled = canvas.scale_nearest(3).unwrap();
		assert_eq!(scaled.width(), 6);
		assert_eq!(scaled.height(), 3);
		for y in 0..3 {
			for x in 0..3 {
				assert_eq!(scaled.get_pixel(x, y), Some(Color::BLACK));
				assert_eq!(scaled.get_pixel(x + 3, y), Some(Color::rgb(0, 0, 255)));
			}
		}
	}

	#[test]
	fn test_scale_nearest_overflow() {
		let canvas = PixelCanvas::new(16, 24, Color::BLACK);
		assert!(canvas.scale_nearest(u32::MAX / 8).is_none());
		assert!(canvas.scale_nearest(u32::MAX).is_none());
		assert_eq!(canvas.scale_nearest(0), Some(canvas.clone()));
	}

	#[test]
	fn test_rgb_bytes() {
		let mut canvas = PixelCanvas::new(2, 1, Color::BLACK);
		canvas.put_pixel(0, 0, Color::rgb(1, 2, 3));
		assert_eq!(canvas.to_rgb_bytes(), vec![1, 2, 3, 0, 0, 0]);
	}
}
