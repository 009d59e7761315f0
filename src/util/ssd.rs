#[cfg(target_arch = "x86_64")]
mod avx2;
mod rust;


use std::num::NonZeroUsize;

use cfg_if::cfg_if;

/// Computes the sum of squared differences between two square 8-bit blocks,
/// giving up as soon as the running sum reaches `bound`.
///
/// Both blocks are `size`×`size` pixels. `src` and `ref_` must start at the
/// top-left pixel of their block and hold at least
/// `(size - 1) * pitch + size` pixels.
///
/// # Returns
/// `Some(ssd)` when the full sum stays strictly below `bound`, `None` otherwise.
/// Because partial sums never decrease, `None` means the exact SSD is at least
/// `bound`; it never carries a comparable value.
///
/// # Panics
/// Panics if `size` is not one of 1, 2, 4, 8, 16 or 32.
#[must_use]
pub fn get_ssd_bounded(
    size: NonZeroUsize,
    src: &[u8],
    src_pitch: NonZeroUsize,
    ref_: &[u8],
    ref_pitch: NonZeroUsize,
    bound: u64,
) -> Option<u64> {
    cfg_if! {
        if #[cfg(all(target_arch = "x86_64", not(feature = "no_simd")))] {
            if crate::util::has_avx2() {
                // SAFETY: We check for AVX2 first
                return unsafe { avx2::get_ssd_bounded(size, src, src_pitch, ref_, ref_pitch, bound) };
            }
        }
    }

    rust::get_ssd_bounded(size, src, src_pitch, ref_, ref_pitch, bound)
}
