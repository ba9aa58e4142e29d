//! Exhaustive subset search.
//!
//! For a fixed cardinality `k`, every k-combination of line indices is enumerated in
//! lexicographic order and the highest-scoring one is kept. Across all `k` this is 2ⁿ
//! evaluations, which is fine for resume items (a handful of bullets each) and keeps the
//! result exactly optimal under the scoring rule. No pruning is applied.

/// Lazily yields every `k`-subset of `0..n` in lexicographic order.
///
/// `k == 0` yields a single empty subset; `k > n` yields nothing.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    exhausted: bool,
}

pub fn combinations(n: usize, k: usize) -> Combinations {
    Combinations {
        n,
        indices: (0..k).collect(),
        exhausted: k > n,
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let current = self.indices.clone();

        // Advance: find the rightmost index that can still move right.
        let k = self.indices.len();
        let mut pos = k;
        while pos > 0 {
            pos -= 1;
            if self.indices[pos] < self.n - k + pos {
                self.indices[pos] += 1;
                for next in pos + 1..k {
                    self.indices[next] = self.indices[next - 1] + 1;
                }
                return Some(current);
            }
        }
        self.exhausted = true;
        Some(current)
    }
}

/// C(n, k), saturating at `u64::MAX`.
pub fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k) as u64;
    let n = n as u64;
    let mut result: u64 = 1;
    for i in 0..k {
        // Exact at every step: result * (n - i) is divisible by (i + 1).
        result = match result.checked_mul(n - i) {
            Some(v) => v / (i + 1),
            None => return u64::MAX,
        };
    }
    result
}

/// The winning subset for one cardinality.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub indices: Vec<usize>,
    pub score: f64,
}

impl Selection {
    pub fn empty() -> Self {
        Self {
            indices: Vec::new(),
            score: 0.0,
        }
    }
}

/// Best `k`-subset of `0..n` under `score`.
///
/// `k == 0` is the empty selection with score 0 and never calls `score`. Otherwise the
/// subset with the strictly greatest score wins; on ties the first one enumerated is kept.
/// Returns `None` only when `k > n`.
pub fn best_of_size<F>(n: usize, k: usize, mut score: F) -> Option<Selection>
where
    F: FnMut(&[usize]) -> f64,
{
    if k == 0 {
        return Some(Selection::empty());
    }
    let mut best: Option<Selection> = None;
    for indices in combinations(n, k) {
        let candidate = score(&indices);
        match &best {
            Some(current) if candidate <= current.score => {}
            _ => {
                best = Some(Selection {
                    indices,
                    score: candidate,
                })
            }
        }
    }
    best
}
