
use bitflags::bitflags;
use std::num::NonZeroUsize;

use anyhow::{Result, bail};

use crate::pad::BORDER_MARGIN;

/// Side length of the blocks motion is estimated for.
pub const BLOCK_SIZE: usize = 16;

// SAFETY: BLOCK_SIZE is a non-zero constant
pub(crate) const BLOCK_SIZE_NZ: NonZeroUsize = unsafe { NonZeroUsize::new_unchecked(BLOCK_SIZE) };

/// Trade-off between residual error and the number of quad-tree splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Quality {
    Q20 = 20,
    Q40 = 40,
    Q60 = 60,
    Q80 = 80,
    Q100 = 100,
}

impl TryFrom<i64> for Quality {
    type Error = anyhow::Error;

    fn try_from(val: i64) -> Result<Self> {
        Ok(match val {
            100 => Self::Q100,
            80 => Self::Q80,
            60 => Self::Q60,
            40 => Self::Q40,
            20 => Self::Q20,
            _ => bail!("Invalid value for 'quality', must be 100, 80, 60, 40, or 20, got {val}."),
        })
    }
}

impl Quality {
    /// SSD of a 16×16 block above which a block is split into quadrants.
    #[must_use]
    pub fn split_threshold(self) -> u64 {
        let per_pixel = match self {
            Quality::Q100 => 4,
            Quality::Q80 => 16,
            Quality::Q60 => 36,
            Quality::Q40 => 64,
            Quality::Q20 => 100,
        };
        per_pixel * (BLOCK_SIZE * BLOCK_SIZE) as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchKind {
    BruteForce = 0,
    Cross = 1,
    ThreeStep = 2,
    Orthonormal = 3,
    #[default]
    Diamond = 4,
    Hexagon = 5,
    /// Randomized spatio-temporal search (3DRS).
    Rs3d = 6,
}

impl TryFrom<i64> for SearchKind {
    type Error = anyhow::Error;

    fn try_from(val: i64) -> Result<Self> {
        Ok(match val {
            0 => Self::BruteForce,
            1 => Self::Cross,
            2 => Self::ThreeStep,
            3 => Self::Orthonormal,
            4 => Self::Diamond,
            5 => Self::Hexagon,
            6 => Self::Rs3d,
            _ => bail!("Invalid value for 'search', must be 0-6, got {val}."),
        })
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct EstimatorFlags: u8 {
        /// Also search the three half-pixel averaged references.
        const HALF_PIXEL = (1 << 0);
        /// Let searches reach into a replicated border around the reference.
        const BORDER_EXTENSION = (1 << 1);
    }
}

/// Tunables shared by the search strategies.
///
/// Error thresholds are given for a 16×16 block. Searches on quadrants use
/// [`SearchParams::scaled`] to bring them to the quadrant's area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// Below this error the zero/predicted displacement is taken as is.
    pub static_threshold: u64,
    /// At or below this error a pattern search stops early.
    pub stop_threshold: u64,
    /// Below this error a predicted candidate is accepted without searching.
    pub candidate_threshold: u64,
    pub cross_side: usize,
    pub cross_threshold: u64,
    pub three_step_side: usize,
    pub orthonormal_step: usize,
    pub brute_force_radius: usize,
    /// Upper bound on large-pattern rounds per diamond or hexagon search.
    pub pattern_rounds: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            static_threshold: 256,
            stop_threshold: 128,
            candidate_threshold: 256,
            cross_side: 8,
            cross_threshold: 256,
            three_step_side: 4,
            orthonormal_step: 8,
            brute_force_radius: 16,
            pattern_rounds: 64,
        }
    }
}

impl SearchParams {
    /// Scales a threshold given for a 16×16 block to a `block_size` block.
    #[must_use]
    pub fn scaled(threshold: u64, block_size: usize) -> u64 {
        threshold * (block_size * block_size) as u64 / (BLOCK_SIZE * BLOCK_SIZE) as u64
    }
}

/// Immutable settings of one estimator instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimatorConfig {
    pub width: NonZeroUsize,
    pub height: NonZeroUsize,
    pub quality: Quality,
    pub flags: EstimatorFlags,
    pub search: SearchKind,
    pub params: SearchParams,
}

impl EstimatorConfig {
    pub fn new(width: usize, height: usize, quality: i64, use_half_pixel: bool) -> Result<Self> {
        let (Some(w), Some(h)) = (NonZeroUsize::new(width), NonZeroUsize::new(height)) else {
            bail!("EstimatorConfig: frame dimensions must be non-zero, got {width}x{height}");
        };
        if width < BLOCK_SIZE || height < BLOCK_SIZE {
            bail!(
                "EstimatorConfig: frame must be at least {BLOCK_SIZE}x{BLOCK_SIZE}, got {width}x{height}"
            );
        }
        let quality = Quality::try_from(quality)?;

        let mut flags = EstimatorFlags::empty();
        flags.set(EstimatorFlags::HALF_PIXEL, use_half_pixel);

        Ok(Self {
            width: w,
            height: h,
            quality,
            flags,
            search: SearchKind::default(),
            params: SearchParams::default(),
        })
    }

    #[must_use]
    pub fn blocks_x(&self) -> usize {
        self.width.get() / BLOCK_SIZE
    }

    #[must_use]
    pub fn blocks_y(&self) -> usize {
        self.height.get() / BLOCK_SIZE
    }

    #[must_use]
    pub fn frame_len(&self) -> usize {
        self.width.get() * self.height.get()
    }

    #[must_use]
    pub fn half_pixel(&self) -> bool {
        self.flags.contains(EstimatorFlags::HALF_PIXEL)
    }

    /// Width of the replicated border around each reference, 0 when border
    /// extension is off.
    #[must_use]
    pub fn margin(&self) -> usize {
        if self.flags.contains(EstimatorFlags::BORDER_EXTENSION) {
            BORDER_MARGIN
        } else {
            0
        }
    }

    #[must_use]
    pub fn split_threshold(&self) -> u64 {
        self.quality.split_threshold()
    }

    pub fn set_search_kind(&mut self, kind: i64) -> Result<()> {
        self.search = SearchKind::try_from(kind)?;
        Ok(())
    }

    pub fn set_cross_side(&mut self, side: usize) -> Result<()> {
        if side == 0 {
            bail!("Invalid value for 'cross_side', must be at least 1, got {side}.");
        }
        self.params.cross_side = side;
        Ok(())
    }

    pub fn set_cross_threshold(&mut self, threshold: u64) {
        self.params.cross_threshold = threshold;
    }

    pub fn set_border_extension(&mut self, enabled: bool) {
        self.flags.set(EstimatorFlags::BORDER_EXTENSION, enabled);
    }
}
