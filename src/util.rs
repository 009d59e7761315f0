mod ssd;


use std::num::NonZeroUsize;

pub use ssd::get_ssd_bounded;

#[cfg(target_arch = "x86_64")]
cpufeatures::new!(cpuid_avx2, "avx2");

#[cfg(target_arch = "x86_64")]
pub use cpuid_avx2::get as has_avx2;

/// Performs a bit block transfer between two 8-bit pixel buffers.
///
/// Copies `height` rows of `row_size` pixels from `src` into `dest`, where each
/// buffer may have its own row stride. When both strides equal the row size the
/// whole region is copied in a single operation.
///
/// # Parameters
/// - `dest`: Destination buffer, starting at the first pixel to write
/// - `dest_stride`: Number of pixels per row in the destination buffer
/// - `src`: Source buffer, starting at the first pixel to read
/// - `src_stride`: Number of pixels per row in the source buffer
/// - `row_size`: Number of pixels to copy per row
/// - `height`: Number of rows to copy
pub fn blit(
    dest: &mut [u8],
    dest_stride: NonZeroUsize,
    src: &[u8],
    src_stride: NonZeroUsize,
    row_size: NonZeroUsize,
    height: NonZeroUsize,
) {
    let height = height.get();
    let row_size = row_size.get();
    let src_stride = src_stride.get();
    let dest_stride = dest_stride.get();

    if src_stride == dest_stride && src_stride == row_size {
        dest[..row_size * height].copy_from_slice(&src[..row_size * height]);
    } else {
        for i in 0..height {
            let src_start = i * src_stride;
            let dest_start = i * dest_stride;
            dest[dest_start..dest_start + row_size]
                .copy_from_slice(&src[src_start..src_start + row_size]);
        }
    }
}
