
use std::num::NonZeroUsize;

/// Default width of the replicated border around each reference window.
pub const BORDER_MARGIN: usize = 16;

/// Extends a frame's borders by replicating its edge pixels into a margin.
///
/// The frame's `width`×`height` pixels must already be stored with their
/// top-left corner at `offset + margin * pitch + margin`. Each row is first
/// extended to the left and right with its own first and last pixel, then the
/// first and last padded rows are copied outward into the top and bottom
/// margins, which also fills the four corners with the nearest corner pixel.
///
/// # Parameters
/// - `offset`: Index of the top-left corner of the padded area in `dest`
/// - `pitch`: Number of pixels per row in `dest`, at least `width + 2 * margin`
/// - `margin`: Number of pixels to add on every side
/// - `width`: Width of the frame without its margin
/// - `height`: Height of the frame without its margin
/// - `dest`: Buffer holding the frame and room for its margin
pub fn pad_reference_frame(
    offset: usize,
    pitch: NonZeroUsize,
    margin: usize,
    width: NonZeroUsize,
    height: NonZeroUsize,
    dest: &mut [u8],
) {
    if margin == 0 {
        return;
    }

    let pitch = pitch.get();
    let width = width.get();
    let height = height.get();
    let padded_width = width + 2 * margin;

    // Left and right
    for row in 0..height {
        let start = offset + (margin + row) * pitch;
        let left = dest[start + margin];
        let right = dest[start + margin + width - 1];
        dest[start..start + margin].fill(left);
        dest[start + margin + width..start + padded_width].fill(right);
    }

    // Up
    let first = offset + margin * pitch;
    for row in 0..margin {
        dest.copy_within(first..first + padded_width, offset + row * pitch);
    }

    // Down
    let last = offset + (margin + height - 1) * pitch;
    for row in 0..margin {
        let start = offset + (margin + height + row) * pitch;
        dest.copy_within(last..last + padded_width, start);
    }
}
