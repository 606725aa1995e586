use crate::structs::Sequence;

/// The 1-based positions in `s` at which the residues of `t` occur in order.
///
/// Each residue of `t` is matched to its leftmost occurrence after the
/// previous match. Returns `None` when `t` is not a subsequence of `s`.
pub fn subsequence_indices(s: &Sequence, t: &Sequence) -> Option<Vec<usize>> {
    let mut indices: Vec<usize> = Vec::with_capacity(t.length);
    let mut s_idx = 1;

    for &residue in t.residues() {
        let offset = s.utf8_bytes[s_idx..=s.length]
            .iter()
            .position(|&b| b == residue)?;
        s_idx += offset;
        indices.push(s_idx);
        s_idx += 1;
    }

    Some(indices)
}
