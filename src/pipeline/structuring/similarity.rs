//! Ratcliff/Obershelp string similarity.
//!
//! `ratio = 2 * M / T`, where `T` is the combined length of both strings and
//! `M` the number of characters covered by matching blocks. Blocks are found
//! by taking the longest common substring, then recursing into the unmatched
//! regions on either side of it. Ties between equally long blocks go to the
//! earliest position in `a`, then in `b`, which keeps scores identical to the
//! classic gestalt pattern matcher for the thresholds used by the fuzzy
//! medicine matcher.

/// Similarity in `[0.0, 1.0]`. Two empty strings are identical.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matching_characters(&a, &b);
    2.0 * matched as f64 / total as f64
}

/// Total length of all matching blocks between `a` and `b`.
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, len)`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let width = bhi - blo;
    let mut best = (alo, blo, 0);
    // run[jj] = length of the common run ending at a[i - 1], b[blo + jj - 1]
    let mut prev = vec![0usize; width + 1];
    let mut curr = vec![0usize; width + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let jj = j - blo + 1;
            if a[i] == b[j] {
                let k = prev[jj - 1] + 1;
                curr[jj] = k;
                if k > best.2 {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            } else {
                curr[jj] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    best
}
