#![allow(dead_code)]

#[derive(Debug, Clone)]
pub struct Im<T, const N_CH: usize> {
    pub w: usize,
    pub h: usize,
    pub s: usize, // stride in elements (w * N_CH)
    pub arr: Vec<T>,
}

// Constructor
// -----------------------------------------------------------------------------
impl<T: Copy + Default, const N_CH: usize> Im<T, N_CH> {
    pub fn new(w: usize, h: usize) -> Self {
        let s = w * N_CH;
        let arr = vec![T::default(); s * h];
        Self { w, h, s, arr }
    }
}

impl<T: Copy, const N_CH: usize> Im<T, N_CH> {
    #[inline(always)]
    pub fn get(&self, x: usize, y: usize, ch: usize) -> T {
        assert!(x < self.w && y < self.h && ch < N_CH, "pixel access out of bounds");
        self.arr[y * self.s + x * N_CH + ch]
    }

    /// All channels of one pixel.
    #[inline(always)]
    pub fn px(&self, x: usize, y: usize) -> [T; N_CH] {
        assert!(x < self.w && y < self.h, "pixel access out of bounds");
        let base = y * self.s + x * N_CH;
        std::array::from_fn(|ch| self.arr[base + ch])
    }
}

impl<T, const N_CH: usize> Im<T, N_CH> {
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, x: usize, y: usize, ch: usize) -> &T {
        unsafe { self.arr.get_unchecked(y * self.s + x * N_CH + ch) }
    }

    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, x: usize, y: usize, ch: usize) -> &mut T {
        unsafe { self.arr.get_unchecked_mut(y * self.s + x * N_CH + ch) }
    }
}

// Convenience APIs that don't depend on external crates.
// -----------------------------------------------------------------------------

impl Im<u8, 4> {
    /// Extract one channel as a single-channel image.
    pub fn to_lum8(&self, ch: usize) -> Im<u8, 1> {
        assert!(ch < 4, "channel out of range");
        let mut out = Im::<u8, 1>::new(self.w, self.h);
        for y in 0..self.h {
            for x in 0..self.w {
                let v = unsafe { *self.get_unchecked(x, y, ch) };
                unsafe {
                    *out.get_unchecked_mut(x, y, 0) = v;
                }
            }
        }
        out
    }
}

pub type RGBAIm = Im<u8, 4>;
pub type Lum8Im = Im<u8, 1>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lum8_is_zeroed() {
        let im = Im::<u8, 1>::new(3, 2);
        assert_eq!(im.w, 3);
        assert_eq!(im.h, 2);
        assert_eq!(im.s, 3);
        assert_eq!(im.arr.len(), 3 * 2);
        assert!(im.arr.iter().all(|&v| v == 0));
    }

    #[test]
    fn to_lum8_extracts_requested_channel() {
        let mut im = RGBAIm::new(2, 1);
        im.arr.copy_from_slice(&[10, 20, 30, 255, 40, 50, 60, 255]);

        let g = im.to_lum8(1);
        assert_eq!(g.arr, vec![20, 50]);
        assert_eq!(im.px(1, 0), [40, 50, 60, 255]);
    }
}
