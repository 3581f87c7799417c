//! Containment test between two prefixes

use crate::prefix::Prefix;

/// Whether either prefix lies inside the other
///
/// Prefixes of different families never overlap. Because both operands are
/// CIDR-aligned, checking each network address against the other's span is
/// enough: two aligned blocks are either disjoint or nested.
pub fn overlaps(a: &Prefix, b: &Prefix) -> bool {
    if a.family() != b.family() {
        return false;
    }
    let span_a = a.span();
    let span_b = b.span();
    span_b.contains(&span_a.first) || span_a.contains(&span_b.first)
}

/// Whether `outer` covers every address of `inner`
pub fn subsumes(outer: &Prefix, inner: &Prefix) -> bool {
    outer.family() == inner.family()
        && outer.prefix_len() <= inner.prefix_len()
        && outer.contains(&inner.network())
}
