// SampleField: an immutable 2D scalar grid scored from a raster image.
//
// One sample per pixel. The field is built once (optionally over a 1-pixel
// padded copy of the source so boundary cells are always classifiable) and
// read many times by the marching sweep. When padded, the `(-1,-1)` offset is
// recorded here and subtracted exactly once at segment emission, so all
// output stays in the caller's original pixel space.

use crate::im::{Lum8Im, RGBAIm};

/// Numeric sample types the field can store (byte grids, signed grids,
/// float grids).
pub trait Scalar: Copy {
    fn to_f32(self) -> f32;
}

impl Scalar for u8 {
    #[inline(always)]
    fn to_f32(self) -> f32 {
        self as f32
    }
}

impl Scalar for i32 {
    #[inline(always)]
    fn to_f32(self) -> f32 {
        self as f32
    }
}

impl Scalar for f32 {
    #[inline(always)]
    fn to_f32(self) -> f32 {
        self
    }
}

#[derive(Debug, Clone)]
pub struct SampleField<T> {
    w: usize,
    h: usize,
    arr: Vec<T>,
    /// 0 or 1. Nonzero when the field was built over a padded copy.
    pad: usize,
    /// Captured 8-bit channel for `InterpMode::ChannelRatio`, parallel to `arr`.
    ratio: Option<Vec<u8>>,
}

impl<T: Scalar> SampleField<T> {
    /// Wrap an already-scored buffer (row-major, one sample per pixel).
    pub fn from_scored(w: usize, h: usize, arr: Vec<T>) -> Self {
        assert_eq!(arr.len(), w * h, "scored buffer length must be w*h");
        Self {
            w,
            h,
            arr,
            pad: 0,
            ratio: None,
        }
    }

    /// Score a grayscale image. The raw byte is also captured as the ratio
    /// channel, so `InterpMode::ChannelRatio` works on grayscale sources.
    pub fn from_lum8(im: &Lum8Im, score: impl Fn(u8) -> T) -> Self {
        let mut arr = Vec::with_capacity(im.w * im.h);
        let mut ratio = Vec::with_capacity(im.w * im.h);
        for y in 0..im.h {
            for x in 0..im.w {
                let v = unsafe { *im.get_unchecked(x, y, 0) };
                arr.push(score(v));
                ratio.push(v);
            }
        }
        Self {
            w: im.w,
            h: im.h,
            arr,
            pad: 0,
            ratio: Some(ratio),
        }
    }

    /// Like `from_lum8`, but over a copy expanded by one `fill` pixel on every
    /// side, so every real pixel has all four neighbors defined.
    pub fn from_lum8_padded(im: &Lum8Im, fill: u8, score: impl Fn(u8) -> T) -> Self {
        let w = im.w + 2;
        let h = im.h + 2;
        let mut arr = Vec::with_capacity(w * h);
        let mut ratio = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                let v = if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                    fill
                } else {
                    unsafe { *im.get_unchecked(x - 1, y - 1, 0) }
                };
                arr.push(score(v));
                ratio.push(v);
            }
        }
        Self {
            w,
            h,
            arr,
            pad: 1,
            ratio: Some(ratio),
        }
    }

    /// Score an RGBA image. `ratio_ch`, when given, captures that channel for
    /// `InterpMode::ChannelRatio`.
    pub fn from_rgba8(im: &RGBAIm, ratio_ch: Option<usize>, score: impl Fn([u8; 4]) -> T) -> Self {
        if let Some(ch) = ratio_ch {
            assert!(ch < 4, "ratio channel out of range");
        }
        let mut arr = Vec::with_capacity(im.w * im.h);
        let mut ratio = ratio_ch.map(|_| Vec::with_capacity(im.w * im.h));
        for y in 0..im.h {
            for x in 0..im.w {
                let px = im.px(x, y);
                arr.push(score(px));
                if let (Some(r), Some(ch)) = (ratio.as_mut(), ratio_ch) {
                    r.push(px[ch]);
                }
            }
        }
        Self {
            w: im.w,
            h: im.h,
            arr,
            pad: 0,
            ratio,
        }
    }

    /// Padded RGBA variant; the border takes the `fill` color before scoring.
    pub fn from_rgba8_padded(
        im: &RGBAIm,
        fill: [u8; 4],
        ratio_ch: Option<usize>,
        score: impl Fn([u8; 4]) -> T,
    ) -> Self {
        if let Some(ch) = ratio_ch {
            assert!(ch < 4, "ratio channel out of range");
        }
        let w = im.w + 2;
        let h = im.h + 2;
        let mut arr = Vec::with_capacity(w * h);
        let mut ratio = ratio_ch.map(|_| Vec::with_capacity(w * h));
        for y in 0..h {
            for x in 0..w {
                let px = if x == 0 || y == 0 || x == w - 1 || y == h - 1 {
                    fill
                } else {
                    im.px(x - 1, y - 1)
                };
                arr.push(score(px));
                if let (Some(r), Some(ch)) = (ratio.as_mut(), ratio_ch) {
                    r.push(px[ch]);
                }
            }
        }
        Self {
            w,
            h,
            arr,
            pad: 1,
            ratio,
        }
    }

    #[inline(always)]
    pub fn w(&self) -> usize {
        self.w
    }

    #[inline(always)]
    pub fn h(&self) -> usize {
        self.h
    }

    /// Padding offset (0 or 1) to subtract from emitted coordinates.
    #[inline(always)]
    pub fn pad(&self) -> usize {
        self.pad
    }

    #[inline(always)]
    pub fn sample(&self, x: usize, y: usize) -> T {
        assert!(x < self.w && y < self.h, "sample out of bounds");
        self.arr[y * self.w + x]
    }

    #[inline(always)]
    pub fn sample_f32(&self, x: usize, y: usize) -> f32 {
        self.sample(x, y).to_f32()
    }

    pub fn has_ratio(&self) -> bool {
        self.ratio.is_some()
    }

    /// Ratio-channel byte at (x, y). Callers must check `has_ratio` first.
    #[inline(always)]
    pub fn ratio_at(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.w && y < self.h, "ratio sample out of bounds");
        let ratio = self
            .ratio
            .as_ref()
            .expect("field was built without a ratio channel");
        ratio[y * self.w + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::im::Lum8Im;

    #[test]
    fn from_scored_checks_length() {
        let f = SampleField::from_scored(2, 2, vec![0.0_f32, 1.0, 2.0, 3.0]);
        assert_eq!(f.w(), 2);
        assert_eq!(f.h(), 2);
        assert_eq!(f.pad(), 0);
        assert_eq!(f.sample(1, 1), 3.0);
    }

    #[test]
    #[should_panic(expected = "scored buffer length")]
    fn from_scored_rejects_mismatched_buffer() {
        let _ = SampleField::from_scored(2, 2, vec![0.0_f32; 3]);
    }

    #[test]
    fn from_lum8_scores_every_pixel() {
        let mut im = Lum8Im::new(3, 2);
        im.arr.copy_from_slice(&[0, 10, 20, 30, 40, 50]);

        let f = SampleField::from_lum8(&im, |v| v as f32 * 0.5);
        assert_eq!(f.sample(2, 1), 25.0);
        assert_eq!(f.ratio_at(2, 1), 50);
    }

    #[test]
    fn padded_field_grows_by_two_and_fills_border() {
        let mut im = Lum8Im::new(2, 2);
        im.arr.copy_from_slice(&[9, 9, 9, 9]);

        let f = SampleField::from_lum8_padded(&im, 0, |v| v as f32);
        assert_eq!(f.w(), 4);
        assert_eq!(f.h(), 4);
        assert_eq!(f.pad(), 1);

        // Border is fill, interior is the source.
        assert_eq!(f.sample(0, 0), 0.0);
        assert_eq!(f.sample(3, 3), 0.0);
        assert_eq!(f.sample(1, 1), 9.0);
        assert_eq!(f.sample(2, 2), 9.0);
    }

    #[test]
    fn padded_rgba_field_scores_the_fill_color_on_the_border() {
        let mut im = crate::im::RGBAIm::new(2, 2);
        #[rustfmt::skip]
        im.arr.copy_from_slice(&[
            10, 20, 30, 255,  40, 50, 60, 255,
            70, 80, 90, 255, 100, 110, 120, 255,
        ]);

        let fill = [1, 2, 3, 0];
        let f = SampleField::from_rgba8_padded(&im, fill, Some(1), |px| px[1] as f32);
        assert_eq!(f.w(), 4);
        assert_eq!(f.h(), 4);
        assert_eq!(f.pad(), 1);

        // Border samples come from scoring the fill color.
        assert_eq!(f.sample(0, 0), 2.0);
        assert_eq!(f.sample(3, 0), 2.0);
        assert_eq!(f.sample(0, 3), 2.0);
        assert_eq!(f.sample(3, 3), 2.0);

        // Interior is the source, shifted by one.
        assert_eq!(f.sample(1, 1), 20.0);
        assert_eq!(f.sample(2, 2), 110.0);

        // The ratio channel is captured across border and interior alike.
        assert!(f.has_ratio());
        assert_eq!(f.ratio_at(0, 0), 2);
        assert_eq!(f.ratio_at(1, 1), 20);
        assert_eq!(f.ratio_at(2, 1), 50);

        // No ratio channel requested: none captured.
        let f = SampleField::from_rgba8_padded(&im, fill, None, |px| px[0] as f32);
        assert!(!f.has_ratio());
    }

    #[test]
    fn rgba_ratio_channel_is_captured() {
        let mut im = crate::im::RGBAIm::new(1, 1);
        im.arr.copy_from_slice(&[10, 20, 30, 255]);

        let f = SampleField::from_rgba8(&im, Some(2), |px| px[2] as f32);
        assert!(f.has_ratio());
        assert_eq!(f.ratio_at(0, 0), 30);

        let f = SampleField::from_rgba8(&im, None, |px| px[0] as f32);
        assert!(!f.has_ratio());
    }
}
