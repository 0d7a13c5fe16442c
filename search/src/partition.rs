//! Splitting root moves across workers and merging their answers.

use crate::worker::SearchResult;

/// Splits `moves` into at most `workers` contiguous groups whose sizes differ by
/// at most one. Every move lands in exactly one group and order is preserved, so
/// concatenating the groups gives back the input. No group is empty.
pub fn partition<M>(moves: Vec<M>, workers: usize) -> Vec<Vec<M>> {
    let groups = workers.max(1).min(moves.len());
    if groups == 0 {
        return Vec::new();
    }

    let base = moves.len() / groups;
    let extra = moves.len() % groups;

    let mut remaining = moves.into_iter();
    (0..groups)
        .map(|i| {
            let size = base + usize::from(i < extra);
            remaining.by_ref().take(size).collect()
        })
        .collect()
}

/// Picks the best result for the side to move. Results are compared in the
/// order given and only a strictly better score replaces the current pick, so
/// ties go to the first one seen.
pub fn reduce<M, I>(results: I, maximizing: bool) -> Option<SearchResult<M>>
where
    I: IntoIterator<Item = SearchResult<M>>,
{
    results.into_iter().fold(None, |best, candidate| match best {
        None => Some(candidate),
        Some(b) => {
            let better = if maximizing {
                candidate.score > b.score
            } else {
                candidate.score < b.score
            };
            Some(if better { candidate } else { b })
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(mv: &'static str, score: i32) -> SearchResult<&'static str> {
        SearchResult { mv, score }
    }

    #[test]
    fn test_partition_is_complete_and_balanced() {
        for len in 0..24usize {
            for workers in 1..=(len + 3) {
                let moves: Vec<usize> = (0..len).collect();
                let groups = partition(moves.clone(), workers);

                assert_eq!(groups.len(), workers.min(len));
                assert!(groups.iter().all(|g| !g.is_empty()));

                let sizes: Vec<usize> = groups.iter().map(Vec::len).collect();
                if let (Some(min), Some(max)) = (sizes.iter().min(), sizes.iter().max()) {
                    assert!(max - min <= 1, "unbalanced {:?}", sizes);
                }

                let flattened: Vec<usize> = groups.into_iter().flatten().collect();
                assert_eq!(flattened, moves, "len {} workers {}", len, workers);
            }
        }
    }

    #[test]
    fn test_partition_zero_workers_behaves_as_one() {
        let groups = partition(vec![1, 2, 3], 0);
        assert_eq!(groups, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_reduce_picks_extreme_for_side() {
        let results = || vec![result("a", 10), result("b", 30), result("c", -5)];

        assert_eq!(reduce(results(), true), Some(result("b", 30)));
        assert_eq!(reduce(results(), false), Some(result("c", -5)));
    }

    #[test]
    fn test_reduce_ties_keep_first_seen() {
        for _ in 0..10 {
            let results = vec![result("first", 7), result("second", 7), result("third", 3)];
            assert_eq!(reduce(results.clone(), true), Some(result("first", 7)));

            let results = vec![result("x", 1), result("y", -2), result("z", -2)];
            assert_eq!(reduce(results, false), Some(result("y", -2)));
        }
    }

    #[test]
    fn test_reduce_empty() {
        assert_eq!(reduce(Vec::<SearchResult<u8>>::new(), true), None);
    }
}
