use crate::geo::LonLat;

/// Join two paired boundary lines into one ring enclosing the band between them.
///
/// `first` is walked forwards and `second` backwards, so lines drawn in the same
/// direction meet at both ends. The inputs are left as they are.
pub fn band_ring(first: &[LonLat], second: &[LonLat]) -> Vec<LonLat> {
    let mut ring = Vec::with_capacity(first.len() + second.len());
    ring.extend_from_slice(first);
    ring.extend(second.iter().rev());
    ring
}
