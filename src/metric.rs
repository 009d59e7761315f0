#[cfg(test)]
mod tests;

use std::num::NonZeroUsize;

use crate::{frame::FrameView, mv::UNATTAINABLE_ERROR, util::get_ssd_bounded};

/// Sum of squared differences between a `block_size` block of `domain` at
/// (`domain_row`, `domain_col`) and the block of `rank` at (`rank_row`, `rank_col`).
///
/// Returns [`UNATTAINABLE_ERROR`] without reading any pixel when the domain
/// block does not fit inside the domain view, and also as soon as the running
/// sum reaches `error_bound`. A finite result is therefore always strictly
/// below `error_bound`.
///
/// The rank block is the block being matched and is expected to be in bounds.
#[must_use]
pub fn block_ssd(
    domain: &FrameView<'_>,
    domain_row: isize,
    domain_col: isize,
    rank: &FrameView<'_>,
    rank_row: isize,
    rank_col: isize,
    block_size: NonZeroUsize,
    error_bound: u64,
) -> u64 {
    if !domain.contains(domain_row, domain_col, block_size.get()) {
        return UNATTAINABLE_ERROR;
    }
    debug_assert!(
        rank.contains(rank_row, rank_col, block_size.get()),
        "rank block ({rank_row}, {rank_col}) is out of bounds"
    );
    if !rank.contains(rank_row, rank_col, block_size.get()) {
        return UNATTAINABLE_ERROR;
    }

    get_ssd_bounded(
        block_size,
        domain.tail(domain_row, domain_col),
        domain.pitch(),
        rank.tail(rank_row, rank_col),
        rank.pitch(),
        error_bound.min(UNATTAINABLE_ERROR),
    )
    .unwrap_or(UNATTAINABLE_ERROR)
}
