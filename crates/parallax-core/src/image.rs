use crate::error::{ParallaxError, Result};

/// Size facts derived from a decoded color image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageDetails {
    pub width: u32,
    pub height: u32,
    /// height / width
    pub aspect_ratio: f32,
}

impl ImageDetails {
    pub fn from_dimensions(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ParallaxError::DegenerateImage { width, height });
        }
        Ok(Self {
            width,
            height,
            aspect_ratio: height as f32 / width as f32,
        })
    }
}

/// Tightly packed RGBA8 pixels as handed over by a texture provider.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(ParallaxError::DegenerateImage { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn details(&self) -> Result<ImageDetails> {
        ImageDetails::from_dimensions(self.width, self.height)
    }

    pub fn sampler(&self) -> crate::shader::Rgba8Sampler<'_> {
        crate::shader::Rgba8Sampler {
            width: self.width,
            height: self.height,
            pixels: &self.pixels,
        }
    }
}

/// A color image and its depth companion, decoded together.
#[derive(Clone, Debug)]
pub struct ImagePair {
    pub color: DecodedImage,
    pub depth: DecodedImage,
}
