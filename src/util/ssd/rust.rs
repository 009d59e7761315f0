use std::num::NonZeroUsize;

#[must_use]
pub(super) fn get_ssd_bounded(
    size: NonZeroUsize,
    src: &[u8],
    src_pitch: NonZeroUsize,
    ref_: &[u8],
    ref_pitch: NonZeroUsize,
    bound: u64,
) -> Option<u64> {
    match size.get() {
        1 => get_ssd_impl::<1>(src, src_pitch, ref_, ref_pitch, bound),
        2 => get_ssd_impl::<2>(src, src_pitch, ref_, ref_pitch, bound),
        4 => get_ssd_impl::<4>(src, src_pitch, ref_, ref_pitch, bound),
        8 => get_ssd_impl::<8>(src, src_pitch, ref_, ref_pitch, bound),
        16 => get_ssd_impl::<16>(src, src_pitch, ref_, ref_pitch, bound),
        32 => get_ssd_impl::<32>(src, src_pitch, ref_, ref_pitch, bound),
        _ => unimplemented!("Invalid block size for SSD"),
    }
}

#[must_use]
fn get_ssd_impl<const SIZE: usize>(
    src: &[u8],
    src_pitch: NonZeroUsize,
    ref_: &[u8],
    ref_pitch: NonZeroUsize,
    bound: u64,
) -> Option<u64> {
    let mut sum = 0u64;
    for y in 0..SIZE {
        let src_row = &src[y * src_pitch.get()..][..SIZE];
        let ref_row = &ref_[y * ref_pitch.get()..][..SIZE];
        sum += u64::from(src_row.iter().zip(ref_row.iter()).fold(0u32, |acc, (&s, &r)| {
            let diff = i32::from(s) - i32::from(r);
            acc + diff.unsigned_abs() * diff.unsigned_abs()
        }));
        if sum >= bound {
            return None;
        }
    }
    Some(sum)
}
