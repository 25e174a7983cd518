use super::model::SpectrumPoint;

/// Return the point with the maximum intensity.
///
/// When several points share the maximum, the first one in file order wins.
/// Returns `None` for an empty slice.
pub fn find_peak(points: &[SpectrumPoint]) -> Option<SpectrumPoint> {
    let mut iter = points.iter().copied();
    let first = iter.next()?;
    Some(iter.fold(first, |best, p| {
        if p.intensity > best.intensity {
            p
        } else {
            best
        }
    }))
}
