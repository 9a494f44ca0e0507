//! K-Fold cross-validation splitter

use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::Range;

/// One train/test split
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fold {
    /// Rows to train on
    pub train: Vec<usize>,
    /// Held-out rows to evaluate on
    pub test: Vec<usize>,
}

/// K-Fold cross-validation splitter
#[derive(Clone, Debug)]
pub struct KFold {
    n_splits: usize,
    shuffle: bool,
}

impl KFold {
    /// Create a new KFold splitter
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            shuffle: true,
        }
    }

    /// Disable shuffling
    pub fn without_shuffle(mut self) -> Self {
        self.shuffle = false;
        self
    }

    /// Number of folds
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Partition `0..n_samples` into disjoint test folds
    ///
    /// Fold sizes differ by at most one; the first `n_samples % n_splits`
    /// folds take the extra row.
    pub fn split<R: Rng + ?Sized>(&self, n_samples: usize, rng: &mut R) -> Vec<Fold> {
        let mut indices: Vec<usize> = (0..n_samples).collect();
        if self.shuffle {
            indices.shuffle(rng);
        }

        let mut assignment = vec![0; n_samples];
        for (fold, range) in chunk_bounds(n_samples, self.n_splits, false).into_iter().enumerate() {
            for &row in &indices[range] {
                assignment[row] = fold;
            }
        }
        self.folds_from_assignment(&assignment)
    }

    /// Partition rows so every fold keeps roughly the class balance of `labels`
    ///
    /// Positives and negatives are split separately. Positive remainders go to
    /// the first folds and negative remainders to the last, so overall fold
    /// sizes still differ by at most one.
    pub fn split_stratified<R: Rng + ?Sized>(&self, labels: &[bool], rng: &mut R) -> Vec<Fold> {
        let (mut positives, mut negatives): (Vec<usize>, Vec<usize>) =
            (0..labels.len()).partition(|&i| labels[i]);
        if self.shuffle {
            positives.shuffle(rng);
            negatives.shuffle(rng);
        }

        let mut assignment = vec![0; labels.len()];
        for (class_rows, from_end) in [(&positives, false), (&negatives, true)] {
            let bounds = chunk_bounds(class_rows.len(), self.n_splits, from_end);
            for (fold, range) in bounds.into_iter().enumerate() {
                for &row in &class_rows[range] {
                    assignment[row] = fold;
                }
            }
        }
        self.folds_from_assignment(&assignment)
    }

    fn folds_from_assignment(&self, assignment: &[usize]) -> Vec<Fold> {
        (0..self.n_splits)
            .map(|fold| {
                let (test, train) = (0..assignment.len()).partition(|&row| assignment[row] == fold);
                Fold { train, test }
            })
            .collect()
    }
}

/// Split `len` items into `k` contiguous ranges whose sizes differ by at most one
///
/// With `extra_at_end` the larger ranges are the last ones instead of the first.
fn chunk_bounds(len: usize, k: usize, extra_at_end: bool) -> Vec<Range<usize>> {
    let base = len / k;
    let remainder = len % k;

    let mut bounds = Vec::with_capacity(k);
    let mut start = 0;
    for i in 0..k {
        let gets_extra = if extra_at_end {
            i >= k - remainder
        } else {
            i < remainder
        };
        let end = start + base + usize::from(gets_extra);
        bounds.push(start..end);
        start = end;
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_folds_are_disjoint_and_cover_all_rows() {
        let folds = KFold::new(4).split(23, &mut rng());
        assert_eq!(folds.len(), 4);

        let mut seen: Vec<usize> = folds.iter().flat_map(|f| f.test.clone()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..23).collect::<Vec<_>>());

        for fold in &folds {
            assert_eq!(fold.train.len() + fold.test.len(), 23);
            assert!(fold.test.iter().all(|row| !fold.train.contains(row)));
        }
    }

    #[test]
    fn test_fold_sizes_differ_by_at_most_one() {
        let folds = KFold::new(10).split(105, &mut rng());
        let sizes: Vec<usize> = folds.iter().map(|f| f.test.len()).collect();
        assert_eq!(sizes.iter().sum::<usize>(), 105);
        assert!(sizes.iter().max().unwrap() - sizes.iter().min().unwrap() <= 1);
    }

    #[test]
    fn test_without_shuffle_is_contiguous() {
        let folds = KFold::new(3).without_shuffle().split(7, &mut rng());
        assert_eq!(folds[0].test, vec![0, 1, 2]);
        assert_eq!(folds[1].test, vec![3, 4]);
        assert_eq!(folds[2].test, vec![5, 6]);
        assert_eq!(folds[1].train, vec![0, 1, 2, 5, 6]);
    }

    #[test]
    fn test_same_seed_same_partition() {
        let a = KFold::new(5).split(50, &mut ChaCha8Rng::seed_from_u64(1));
        let b = KFold::new(5).split(50, &mut ChaCha8Rng::seed_from_u64(1));
        let c = KFold::new(5).split(50, &mut ChaCha8Rng::seed_from_u64(2));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_stratified_keeps_class_balance() {
        // 30 positives, 70 negatives
        let labels: Vec<bool> = (0..100).map(|i| i % 10 < 3).collect();
        let folds = KFold::new(10).split_stratified(&labels, &mut rng());

        for fold in &folds {
            assert_eq!(fold.test.len(), 10);
            let positives = fold.test.iter().filter(|&&i| labels[i]).count();
            assert_eq!(positives, 3);
        }
    }

    #[test]
    fn test_stratified_sizes_with_remainders() {
        // 7 positives, 6 negatives over 4 folds
        let labels: Vec<bool> = (0..13).map(|i| i < 7).collect();
        let folds = KFold::new(4).split_stratified(&labels, &mut rng());
        let sizes: Vec<usize> = folds.iter().map(|f| f.test.len()).collect();
        assert_eq!(sizes.iter().sum::<usize>(), 13);
        assert!(sizes.iter().max().unwrap() - sizes.iter().min().unwrap() <= 1);
    }

    #[test]
    fn test_chunk_bounds() {
        assert_eq!(chunk_bounds(7, 3, false), vec![0..3, 3..5, 5..7]);
        assert_eq!(chunk_bounds(7, 3, true), vec![0..2, 2..4, 4..7]);
        assert_eq!(chunk_bounds(2, 3, false), vec![0..1, 1..2, 2..2]);
    }
}
