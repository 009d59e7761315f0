#![allow(clippy::undocumented_unsafe_blocks)]
#![allow(unsafe_op_in_unsafe_fn)]

use std::{arch::x86_64::*, num::NonZeroUsize};

use crate::simd::_MM_SHUFFLE;

#[must_use]
#[target_feature(enable = "avx2")]
pub unsafe fn get_ssd_bounded(
    size: NonZeroUsize,
    src: &[u8],
    src_pitch: NonZeroUsize,
    ref_: &[u8],
    ref_pitch: NonZeroUsize,
    bound: u64,
) -> Option<u64> {
    match size.get() {
        8 => {
            check_bounds(8, src, src_pitch, ref_, ref_pitch);
            ssd_u8_8(src.as_ptr(), src_pitch, ref_.as_ptr(), ref_pitch, bound)
        }
        16 => {
            check_bounds(16, src, src_pitch, ref_, ref_pitch);
            ssd_u8_wide::<16>(src.as_ptr(), src_pitch, ref_.as_ptr(), ref_pitch, bound)
        }
        32 => {
            check_bounds(32, src, src_pitch, ref_, ref_pitch);
            ssd_u8_wide::<32>(src.as_ptr(), src_pitch, ref_.as_ptr(), ref_pitch, bound)
        }
        // Too narrow to be worth vectorizing.
        _ => super::rust::get_ssd_bounded(size, src, src_pitch, ref_, ref_pitch, bound),
    }
}

#[inline]
fn check_bounds(
    size: usize,
    src: &[u8],
    src_pitch: NonZeroUsize,
    ref_: &[u8],
    ref_pitch: NonZeroUsize,
) {
    assert!(src.len() >= (size - 1) * src_pitch.get() + size);
    assert!(ref_.len() >= (size - 1) * ref_pitch.get() + size);
}

#[must_use]
#[target_feature(enable = "avx2")]
unsafe fn ssd_u8_8(
    src: *const u8,
    src_pitch: NonZeroUsize,
    ref_: *const u8,
    ref_pitch: NonZeroUsize,
    bound: u64,
) -> Option<u64> {
    let mut acc = _mm_setzero_si128();

    for j in 0..8 {
        let a = _mm_cvtepu8_epi16(_mm_loadl_epi64(
            src.add(j * src_pitch.get()) as *const __m128i
        ));
        let b = _mm_cvtepu8_epi16(_mm_loadl_epi64(
            ref_.add(j * ref_pitch.get()) as *const __m128i
        ));
        let diff = _mm_sub_epi16(a, b);
        acc = _mm_add_epi32(acc, _mm_madd_epi16(diff, diff));

        if hsum_epi32(acc) >= bound {
            return None;
        }
    }

    Some(hsum_epi32(acc))
}

#[must_use]
#[target_feature(enable = "avx2")]
unsafe fn ssd_u8_wide<const SIZE: usize>(
    src: *const u8,
    src_pitch: NonZeroUsize,
    ref_: *const u8,
    ref_pitch: NonZeroUsize,
    bound: u64,
) -> Option<u64> {
    let mut acc = _mm256_setzero_si256();

    for j in 0..SIZE {
        let src_row = src.add(j * src_pitch.get());
        let ref_row = ref_.add(j * ref_pitch.get());
        let mut i = 0;

        while i + 16 <= SIZE {
            let a = _mm256_cvtepu8_epi16(_mm_loadu_si128(src_row.add(i) as *const __m128i));
            let b = _mm256_cvtepu8_epi16(_mm_loadu_si128(ref_row.add(i) as *const __m128i));
            let diff = _mm256_sub_epi16(a, b);
            // each i32 lane gets two squared 8-bit differences, at most 130050
            acc = _mm256_add_epi32(acc, _mm256_madd_epi16(diff, diff));
            i += 16;
        }

        let lo = _mm256_castsi256_si128(acc);
        let hi = _mm256_extracti128_si256(acc, 1);
        if hsum_epi32(_mm_add_epi32(lo, hi)) >= bound {
            return None;
        }
    }

    let lo = _mm256_castsi256_si128(acc);
    let hi = _mm256_extracti128_si256(acc, 1);
    Some(hsum_epi32(_mm_add_epi32(lo, hi)))
}

#[must_use]
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn hsum_epi32(v: __m128i) -> u64 {
    let sum2 = _mm_add_epi32(v, _mm_shuffle_epi32(v, _MM_SHUFFLE(1, 0, 3, 2)));
    let sum4 = _mm_add_epi32(sum2, _mm_shuffle_epi32(sum2, _MM_SHUFFLE(2, 3, 0, 1)));
    _mm_cvtsi128_si32(sum4) as u32 as u64
}
