
use std::num::NonZeroUsize;

use anyhow::{Result, bail};

/// Read-only window over a grayscale 8-bit pixel buffer.
///
/// The window starts at `origin` in the backing buffer, so several views can
/// alias sub-regions of one larger allocation. A view may also expose a
/// `margin` of extra pixels on each side of the frame; coordinates are then
/// accepted in `-margin..height + margin` and `-margin..width + margin`.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    data: &'a [u8],
    origin: usize,
    pitch: NonZeroUsize,
    width: NonZeroUsize,
    height: NonZeroUsize,
    margin: usize,
}

impl<'a> FrameView<'a> {
    /// Wraps a tightly packed, row-major frame.
    pub fn new(data: &'a [u8], width: NonZeroUsize, height: NonZeroUsize) -> Result<Self> {
        Self::with_margin(data, 0, width, width, height, 0)
    }

    /// Wraps a frame embedded in a larger buffer.
    ///
    /// `origin` is the index of pixel (0, 0) and `pitch` the distance between
    /// rows. `margin` pixels around the frame must be present in `data` and
    /// become addressable.
    pub fn with_margin(
        data: &'a [u8],
        origin: usize,
        pitch: NonZeroUsize,
        width: NonZeroUsize,
        height: NonZeroUsize,
        margin: usize,
    ) -> Result<Self> {
        if pitch.get() < width.get() + 2 * margin {
            bail!(
                "FrameView: pitch {} is narrower than width {} plus margins",
                pitch,
                width
            );
        }
        if origin < margin * pitch.get() + margin {
            bail!("FrameView: origin {} leaves no room for margin {}", origin, margin);
        }
        let last_row = height.get() - 1 + margin;
        let end = origin + last_row * pitch.get() + width.get() + margin;
        if end > data.len() {
            bail!(
                "FrameView: buffer of {} pixels is too small for a {}x{} frame",
                data.len(),
                width,
                height
            );
        }

        Ok(Self {
            data,
            origin,
            pitch,
            width,
            height,
            margin,
        })
    }

    #[must_use]
    pub fn width(&self) -> NonZeroUsize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> NonZeroUsize {
        self.height
    }

    #[must_use]
    pub fn pitch(&self) -> NonZeroUsize {
        self.pitch
    }

    #[must_use]
    pub fn margin(&self) -> usize {
        self.margin
    }

    /// Reads the pixel at (`row`, `col`).
    pub fn get(&self, row: isize, col: isize) -> Result<u8> {
        if !self.contains(row, col, 1) {
            bail!(
                "FrameView: ({}, {}) is outside of the {}x{} frame",
                row,
                col,
                self.height,
                self.width
            );
        }
        Ok(self.data[self.index(row, col)])
    }

    /// Whether a `size`×`size` block at (`row`, `col`) lies entirely inside
    /// the addressable window.
    #[must_use]
    pub fn contains(&self, row: isize, col: isize, size: usize) -> bool {
        let margin = self.margin as isize;
        let size = size as isize;
        row >= -margin
            && col >= -margin
            && row + size <= self.height.get() as isize + margin
            && col + size <= self.width.get() as isize + margin
    }

    /// Slice starting at (`row`, `col`) and running to the end of the buffer.
    ///
    /// The caller must have checked the coordinates with [`FrameView::contains`].
    #[must_use]
    pub(crate) fn tail(&self, row: isize, col: isize) -> &'a [u8] {
        debug_assert!(self.contains(row, col, 1));
        &self.data[self.index(row, col)..]
    }

    /// Sub-window of this view with its own origin and size, sharing the
    /// backing buffer. The window must lie inside this view's frame area.
    pub fn window(
        &self,
        row: usize,
        col: usize,
        width: NonZeroUsize,
        height: NonZeroUsize,
    ) -> Result<FrameView<'a>> {
        if row + height.get() > self.height.get() || col + width.get() > self.width.get() {
            bail!(
                "FrameView: {}x{} window at ({}, {}) exceeds the {}x{} frame",
                height,
                width,
                row,
                col,
                self.height,
                self.width
            );
        }

        Ok(FrameView {
            data: self.data,
            origin: self.origin + row * self.pitch.get() + col,
            pitch: self.pitch,
            width,
            height,
            margin: 0,
        })
    }

    fn index(&self, row: isize, col: isize) -> usize {
        (self.origin as isize + row * self.pitch.get() as isize + col) as usize
    }
}
