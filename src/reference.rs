
use std::num::NonZeroUsize;

use anyhow::{Result, bail};
use smallvec::SmallVec;

use crate::{
    frame::FrameView,
    halfpel::{HalfPelFn, average_left, average_up, average_up_left},
    mv::RefVariant,
    pad::pad_reference_frame,
    util::blit,
};

/// Owned storage for every reference variant built from one previous frame.
///
/// All variants share one allocation. Each lives in its own window of
/// `pitch * padded_height` pixels, and each window keeps `margin` pixels of
/// border around its frame. The buffer is released when the plane is dropped.
#[derive(Debug, Clone)]
pub struct ReferencePlane {
    buffer: Vec<u8>,
    pub(crate) window_offsets: SmallVec<[usize; 4]>,
    pub(crate) width: NonZeroUsize,
    pub(crate) height: NonZeroUsize,
    pub(crate) pitch: NonZeroUsize,
    pub(crate) margin: usize,
    pub(crate) offset_padding: usize,
}

impl ReferencePlane {
    #[must_use]
    pub fn new(width: NonZeroUsize, height: NonZeroUsize, margin: usize, half_pel: bool) -> Self {
        let pitch = width.saturating_add(2 * margin);
        let padded_height = height.saturating_add(2 * margin);
        let offset_padding = pitch.get() * margin + margin;

        let windows = if half_pel { RefVariant::ALL.len() } else { 1 };
        let window_size = pitch.get() * padded_height.get();
        let window_offsets = (0..windows).map(|i| i * window_size).collect();

        Self {
            buffer: vec![0; windows * window_size],
            window_offsets,
            width,
            height,
            pitch,
            margin,
            offset_padding,
        }
    }

    /// Builds a plane from `previous`, with half-pixel variants when
    /// `half_pel` is set and a replicated border of `margin` pixels.
    pub fn build(previous: &FrameView<'_>, margin: usize, half_pel: bool) -> Result<Self> {
        let mut plane = Self::new(previous.width(), previous.height(), margin, half_pel);
        plane.fill(previous.tail(0, 0), previous.pitch())?;
        plane.refine();
        plane.pad();
        Ok(plane)
    }

    /// Copies the original frame into the first window.
    pub fn fill(&mut self, src: &[u8], src_pitch: NonZeroUsize) -> Result<()> {
        let needed = (self.height.get() - 1) * src_pitch.get() + self.width.get();
        if src.len() < needed {
            bail!(
                "ReferencePlane: source has {} pixels, a {}x{} frame needs {}",
                src.len(),
                self.width,
                self.height,
                needed
            );
        }

        let offset = self.window_offsets[0] + self.offset_padding;
        blit(
            &mut self.buffer[offset..],
            self.pitch,
            src,
            src_pitch,
            self.width,
            self.height,
        );
        Ok(())
    }

    /// Derives the half-pixel windows from the original one.
    ///
    /// Must run before [`ReferencePlane::pad`], since the averages only read
    /// the frame area.
    pub fn refine(&mut self) {
        let refine: [(RefVariant, HalfPelFn); 3] = [
            (RefVariant::Up, average_up),
            (RefVariant::Left, average_left),
            (RefVariant::UpLeft, average_up_left),
        ];
        let src_offset = self.window_offsets[0] + self.offset_padding;
        for (variant, refine_fn) in refine {
            let Some(&window) = self.window_offsets.get(variant.index()) else {
                continue;
            };
            Self::refine_with_split(
                &mut self.buffer,
                src_offset,
                window + self.offset_padding,
                refine_fn,
                self.pitch,
                self.width,
                self.height,
            );
        }
    }

    /// Replicates edge pixels into every window's margin.
    pub fn pad(&mut self) {
        for &offset in &self.window_offsets {
            pad_reference_frame(
                offset,
                self.pitch,
                self.margin,
                self.width,
                self.height,
                &mut self.buffer,
            );
        }
    }

    /// Variants present in this plane, in search order.
    #[must_use]
    pub fn variants(&self) -> &'static [RefVariant] {
        &RefVariant::ALL[..self.window_offsets.len()]
    }

    pub fn view(&self, variant: RefVariant) -> Result<FrameView<'_>> {
        let Some(&window) = self.window_offsets.get(variant.index()) else {
            bail!("ReferencePlane: {:?} variant was not generated", variant);
        };
        FrameView::with_margin(
            &self.buffer,
            window + self.offset_padding,
            self.pitch,
            self.width,
            self.height,
            self.margin,
        )
    }

    /// Runs `refine_fn` from one window into another without cloning, by
    /// splitting the buffer between the two.
    fn refine_with_split(
        buffer: &mut [u8],
        src_offset: usize,
        dest_offset: usize,
        refine_fn: HalfPelFn,
        pitch: NonZeroUsize,
        width: NonZeroUsize,
        height: NonZeroUsize,
    ) {
        if src_offset <= dest_offset {
            let (left, right) = buffer.split_at_mut(dest_offset);
            refine_fn(right, &left[src_offset..], pitch, width, height);
        } else {
            let (left, right) = buffer.split_at_mut(src_offset);
            refine_fn(&mut left[dest_offset..], right, pitch, width, height);
        }
    }
}
