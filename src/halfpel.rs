
use std::num::NonZeroUsize;

/// Builds one half-pixel reference window from the original frame.
///
/// Arguments are the destination, the source, the row pitch shared by both,
/// and the frame width and height. Both slices start at pixel (0, 0).
pub type HalfPelFn = fn(&mut [u8], &[u8], NonZeroUsize, NonZeroUsize, NonZeroUsize);

#[inline]
fn average2(a: u8, b: u8) -> u8 {
    (u16::from(a) + u16::from(b)).div_ceil(2) as u8
}

#[inline]
fn average4(a: u8, b: u8, c: u8, d: u8) -> u8 {
    ((u16::from(a) + u16::from(b) + u16::from(c) + u16::from(d) + 2) / 4) as u8
}

/// Averages every pixel with the one directly above it.
///
/// The first row has nothing above it and is copied unchanged.
pub fn average_up(
    dest: &mut [u8],
    src: &[u8],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
) {
    let pitch = pitch.get();
    let width = width.get();

    dest[..width].copy_from_slice(&src[..width]);
    for row in 1..height.get() {
        let above = &src[(row - 1) * pitch..][..width];
        let current = &src[row * pitch..][..width];
        let dest_row = &mut dest[row * pitch..][..width];
        for ((d, &a), &c) in dest_row.iter_mut().zip(above).zip(current) {
            *d = average2(c, a);
        }
    }
}

/// Averages every pixel with the one directly to its left.
///
/// The first column has nothing to its left and is copied unchanged.
pub fn average_left(
    dest: &mut [u8],
    src: &[u8],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
) {
    let pitch = pitch.get();
    let width = width.get();

    for row in 0..height.get() {
        let src_row = &src[row * pitch..][..width];
        let dest_row = &mut dest[row * pitch..][..width];
        dest_row[0] = src_row[0];
        for col in 1..width {
            dest_row[col] = average2(src_row[col], src_row[col - 1]);
        }
    }
}

/// Averages every pixel with its left, upper and upper-left neighbours.
///
/// On the first row this is the left average, on the first column the up
/// average, and the top-left pixel is copied unchanged.
pub fn average_up_left(
    dest: &mut [u8],
    src: &[u8],
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
) {
    let pitch = pitch.get();
    let width = width.get();

    // first row
    dest[0] = src[0];
    for col in 1..width {
        dest[col] = average2(src[col], src[col - 1]);
    }

    for row in 1..height.get() {
        let above = &src[(row - 1) * pitch..][..width];
        let current = &src[row * pitch..][..width];
        let dest_row = &mut dest[row * pitch..][..width];
        // first column
        dest_row[0] = average2(current[0], above[0]);
        for col in 1..width {
            dest_row[col] = average4(current[col], current[col - 1], above[col], above[col - 1]);
        }
    }
}
