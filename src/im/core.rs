#![allow(dead_code)]

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Im<T, const N_CH: usize> {
    pub w: usize,
    pub h: usize,
    pub s: usize, // stride in elements (w * N_CH)
    pub arr: Vec<T>,
}

// Constructors
// -----------------------------------------------------------------------------
impl<T: Copy + Default, const N_CH: usize> Im<T, N_CH> {
    pub fn new(w: usize, h: usize) -> Self {
        let s = w * N_CH;
        let arr = vec![T::default(); s * h];
        Self { w, h, s, arr }
    }
}

impl<T, const N_CH: usize> Im<T, N_CH> {
    /// Wrap a tightly packed buffer. Returns `None` when `arr` is not exactly `w * h * N_CH` long.
    pub fn from_raw(w: usize, h: usize, arr: Vec<T>) -> Option<Self> {
        let s = w * N_CH;
        if arr.len() != s * h {
            return None;
        }
        Some(Self { w, h, s, arr })
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// True when the buffer can hold every addressed pixel.
    pub fn is_consistent(&self) -> bool {
        self.s >= self.w * N_CH && self.arr.len() >= self.s * self.h
    }

    #[inline(always)]
    pub unsafe fn get_unchecked(&self, x: usize, y: usize, ch: usize) -> &T {
        unsafe { self.arr.get_unchecked(y * self.s + x * N_CH + ch) }
    }

    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, x: usize, y: usize, ch: usize) -> &mut T {
        unsafe { self.arr.get_unchecked_mut(y * self.s + x * N_CH + ch) }
    }
}

impl<T: Copy, const N_CH: usize> Im<T, N_CH> {
    /// Read pixel `(x, y)`, or `None` when outside the image.
    pub fn px(&self, x: i32, y: i32) -> Option<[T; N_CH]> {
        if x < 0 || y < 0 || x as usize >= self.w || y as usize >= self.h {
            return None;
        }
        let base = y as usize * self.s + x as usize * N_CH;
        let mut out = [self.arr[base]; N_CH];
        out.copy_from_slice(&self.arr[base..base + N_CH]);
        Some(out)
    }

    /// Write pixel `(x, y)`. Out of bounds writes are dropped so callers can draw clipped shapes.
    #[inline]
    pub fn set_px(&mut self, x: i32, y: i32, v: [T; N_CH]) {
        if x < 0 || y < 0 || x as usize >= self.w || y as usize >= self.h {
            return;
        }
        let base = y as usize * self.s + x as usize * N_CH;
        self.arr[base..base + N_CH].copy_from_slice(&v);
    }
}

// Intensity conversion
// -----------------------------------------------------------------------------

// BT.601 luma weights, 14-bit fixed point.
const LUMA_SHIFT: u32 = 14;
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;

impl Im<u8, 3> {
    pub fn to_lum8(&self) -> Im<u8, 1> {
        let mut lum_im = Im::<u8, 1>::new(self.w, self.h);
        for y in 0..self.h {
            for x in 0..self.w {
                let (r, g, b) = unsafe {
                    (
                        *self.get_unchecked(x, y, 0) as u32,
                        *self.get_unchecked(x, y, 1) as u32,
                        *self.get_unchecked(x, y, 2) as u32,
                    )
                };
                let l =
                    (r * LUMA_R + g * LUMA_G + b * LUMA_B + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT;
                unsafe {
                    *lum_im.get_unchecked_mut(x, y, 0) = l.min(255) as u8;
                }
            }
        }
        lum_im
    }
}

impl Im<u8, 1> {
    /// Replicate the single channel into RGB, handy for feeding masks into the pipeline.
    pub fn to_rgb(&self) -> Im<u8, 3> {
        let mut rgb_im = Im::<u8, 3>::new(self.w, self.h);
        for y in 0..self.h {
            for x in 0..self.w {
                let v = unsafe { *self.get_unchecked(x, y, 0) };
                for ch in 0..3 {
                    unsafe {
                        *rgb_im.get_unchecked_mut(x, y, ch) = v;
                    }
                }
            }
        }
        rgb_im
    }
}

pub type RGBIm = Im<u8, 3>;
pub type Lum8Im = Im<u8, 1>;
pub type MaskIm = Im<u8, 1>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_wrong_length() {
        assert!(RGBIm::from_raw(2, 2, vec![0; 11]).is_none());
        assert!(RGBIm::from_raw(2, 2, vec![0; 12]).is_some());
    }

    #[test]
    fn to_lum8_uses_luma_weights() {
        let mut im = RGBIm::new(4, 1);
        im.set_px(0, 0, [255, 255, 255]);
        im.set_px(1, 0, [255, 0, 0]);
        im.set_px(2, 0, [0, 255, 0]);
        im.set_px(3, 0, [0, 0, 255]);

        let lum = im.to_lum8();
        assert_eq!(lum.arr, vec![255, 76, 150, 29]);
    }

    #[test]
    fn set_px_drops_out_of_bounds_writes() {
        let mut im = Lum8Im::new(2, 2);
        im.set_px(-1, 0, [9]);
        im.set_px(0, 2, [9]);
        im.set_px(1, 1, [9]);
        assert_eq!(im.arr, vec![0, 0, 0, 9]);
        assert_eq!(im.px(1, 1), Some([9]));
        assert_eq!(im.px(2, 1), None);
    }
}
