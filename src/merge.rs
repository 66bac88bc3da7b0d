//! Merging of collected integers into a sorted, duplicate-free sequence

/// Returns the distinct values of `numbers` in ascending order
///
/// The input is sorted in place, then compacted in a single linear pass that
/// keeps an element only when it differs from its predecessor. Equal values are
/// always adjacent after sorting, so no "already seen" lookup is needed.
///
/// # Examples
///
/// ```
/// use numbers_api::merge::merge_unique;
///
/// assert_eq!(merge_unique(vec![5, 1, 3, 1, 5]), vec![1, 3, 5]);
/// assert!(merge_unique(Vec::new()).is_empty());
/// ```
pub fn merge_unique(mut numbers: Vec<i64>) -> Vec<i64> {
    numbers.sort_unstable();
    numbers.dedup();
    numbers
}
