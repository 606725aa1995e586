/// One longest strictly increasing subsequence of `values`.
///
/// Among the subsequences of maximal length, the one returned ends at the
/// earliest possible position, and each element's predecessor is the
/// earliest element that extends to that length.
pub fn longest_increasing_subsequence(values: &[usize]) -> Vec<usize> {
    if values.is_empty() {
        return vec![];
    }

    // lengths[i] is the length of the longest subsequence ending at i
    let mut lengths: Vec<usize> = vec![1; values.len()];
    let mut predecessors: Vec<Option<usize>> = vec![None; values.len()];

    for i in 1..values.len() {
        for j in 0..i {
            if values[j] < values[i] && lengths[j] + 1 > lengths[i] {
                lengths[i] = lengths[j] + 1;
                predecessors[i] = Some(j);
            }
        }
    }

    let max_length = lengths.iter().copied().max().unwrap_or_default();
    let mut end = lengths.iter().position(|&l| l == max_length);

    let mut subsequence: Vec<usize> = Vec::with_capacity(max_length);
    while let Some(idx) = end {
        subsequence.push(values[idx]);
        end = predecessors[idx];
    }
    subsequence.reverse();

    subsequence
}

/// One longest strictly decreasing subsequence of `values`.
pub fn longest_decreasing_subsequence(values: &[usize]) -> Vec<usize> {
    let reversed: Vec<usize> = values.iter().rev().copied().collect();
    let mut subsequence = longest_increasing_subsequence(&reversed);
    subsequence.reverse();
    subsequence
}
