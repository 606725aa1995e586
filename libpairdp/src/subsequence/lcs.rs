use crate::structs::Sequence;

/// One longest common subsequence of `s` and `t`.
///
/// When two subproblems are equally long, the one that drops a residue
/// of `s` is preferred over the one that drops a residue of `t`.
pub fn longest_common_subsequence(s: &Sequence, t: &Sequence) -> String {
    let cols = t.length + 1;
    // lengths[i * cols + j] holds the LCS length of s[..i] and t[..j]
    let mut lengths: Vec<usize> = vec![0; (s.length + 1) * cols];

    for s_idx in 1..=s.length {
        for t_idx in 1..=t.length {
            lengths[s_idx * cols + t_idx] = if s.utf8_bytes[s_idx] == t.utf8_bytes[t_idx] {
                lengths[(s_idx - 1) * cols + t_idx - 1] + 1
            } else {
                lengths[(s_idx - 1) * cols + t_idx].max(lengths[s_idx * cols + t_idx - 1])
            };
        }
    }

    let mut s_idx = s.length;
    let mut t_idx = t.length;
    let mut reversed: Vec<u8> = Vec::with_capacity(lengths[s_idx * cols + t_idx]);

    while s_idx > 0 && t_idx > 0 {
        if s.utf8_bytes[s_idx] == t.utf8_bytes[t_idx] {
            reversed.push(s.utf8_bytes[s_idx]);
            s_idx -= 1;
            t_idx -= 1;
        } else if lengths[(s_idx - 1) * cols + t_idx] >= lengths[s_idx * cols + t_idx - 1] {
            s_idx -= 1;
        } else {
            t_idx -= 1;
        }
    }

    reversed.iter().rev().map(|&b| char::from(b)).collect()
}
