//! Classic comparison sorts over mutable slices.
//!
//! Each function sorts in place into ascending order. They are here for their algorithmic
//! value; for production use the standard library's `sort` and `sort_unstable` are the better
//! defaults.

/// Bubble sort. Stable, `O(n^2)` worst case, `O(n)` on already sorted input.
///
/// Each pass remembers the position of its last swap; everything past it is already in final
/// position, so the next pass stops there.
///
/// # Examples
///
/// ```
/// use classic_collections::sort::bubble_sort;
///
/// let mut items = vec![3, 1, 4, 1, 5];
/// bubble_sort(&mut items);
/// assert_eq!(items, vec![1, 1, 3, 4, 5]);
/// ```
pub fn bubble_sort<T: Ord>(items: &mut [T]) {
    let mut n = items.len();
    while n > 1 {
        let mut last_swap = 0;
        for i in 1..n {
            if items[i - 1] > items[i] {
                items.swap(i - 1, i);
                last_swap = i;
            }
        }
        n = last_swap;
    }
}

/// Insertion sort. Stable, `O(n^2)` worst case, `O(n)` on already sorted input; the usual
/// choice for small or nearly sorted slices.
///
/// # Examples
///
/// ```
/// use classic_collections::sort::insertion_sort;
///
/// let mut items = vec![3, 1, 4, 1, 5];
/// insertion_sort(&mut items);
/// assert_eq!(items, vec![1, 1, 3, 4, 5]);
/// ```
pub fn insertion_sort<T: Ord>(items: &mut [T]) {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && items[j - 1] > items[j] {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Quicksort with the first element as the pivot. Unstable, `O(n log n)` on average and
/// `O(n^2)` in the worst case (already sorted input is the classic offender for this pivot
/// choice).
///
/// # Examples
///
/// ```
/// use classic_collections::sort::quick_sort;
///
/// let mut items = vec![3, 1, 4, 1, 5];
/// quick_sort(&mut items);
/// assert_eq!(items, vec![1, 1, 3, 4, 5]);
/// ```
pub fn quick_sort<T: Ord>(items: &mut [T]) {
    if items.len() < 2 {
        return;
    }
    let pivot_index = partition(items);
    let (left, right) = items.split_at_mut(pivot_index);
    quick_sort(left);
    quick_sort(&mut right[1..]);
}

// Partitions around the first element and returns its final index.
fn partition<T: Ord>(items: &mut [T]) -> usize {
    // park the pivot at the end while partitioning
    let last = items.len() - 1;
    items.swap(0, last);
    let mut store = 0;
    for i in 0..last {
        if items[i] < items[last] {
            items.swap(i, store);
            store += 1;
        }
    }
    items.swap(store, last);
    store
}

/// Shell sort with gap halving. Unstable; the gap sequence gives roughly `O(n^1.5)` in
/// practice.
///
/// # Examples
///
/// ```
/// use classic_collections::sort::shell_sort;
///
/// let mut items = vec![3, 1, 4, 1, 5];
/// shell_sort(&mut items);
/// assert_eq!(items, vec![1, 1, 3, 4, 5]);
/// ```
pub fn shell_sort<T: Ord>(items: &mut [T]) {
    let mut gap = items.len() / 2;
    while gap > 0 {
        for i in gap..items.len() {
            let mut j = i;
            while j >= gap && items[j - gap] > items[j] {
                items.swap(j - gap, j);
                j -= gap;
            }
        }
        gap /= 2;
    }
}

/// Heap sort. Unstable, `O(n log n)` in every case: the slice is heapified into a max-heap,
/// then the root is repeatedly swapped behind the shrinking heap boundary and sifted down.
///
/// # Examples
///
/// ```
/// use classic_collections::sort::heap_sort;
///
/// let mut items = vec![3, 1, 4, 1, 5];
/// heap_sort(&mut items);
/// assert_eq!(items, vec![1, 1, 3, 4, 5]);
/// ```
pub fn heap_sort<T: Ord>(items: &mut [T]) {
    let len = items.len();
    if len < 2 {
        return;
    }
    for start in (0..len / 2).rev() {
        sift_down(items, start, len);
    }
    for end in (1..len).rev() {
        items.swap(0, end);
        sift_down(items, 0, end);
    }
}

// Restores the max-heap property for the subtree rooted at `start`, within the heap occupying
// `items[..end]`.
fn sift_down<T: Ord>(items: &mut [T], start: usize, end: usize) {
    let mut parent = start;
    loop {
        let mut child = 2 * parent + 1;
        if child >= end {
            return;
        }
        if child + 1 < end && items[child] < items[child + 1] {
            child += 1;
        }
        if items[parent] >= items[child] {
            return;
        }
        items.swap(parent, child);
        parent = child;
    }
}

/// Merge sort. Stable, `O(n log n)` in every case; the only sort here that allocates, which is
/// why it also asks for `Clone`.
///
/// # Examples
///
/// ```
/// use classic_collections::sort::merge_sort;
///
/// let mut items = vec![3, 1, 4, 1, 5];
/// merge_sort(&mut items);
/// assert_eq!(items, vec![1, 1, 3, 4, 5]);
/// ```
pub fn merge_sort<T: Ord + Clone>(items: &mut [T]) {
    if items.len() < 2 {
        return;
    }
    let mid = items.len() / 2;
    merge_sort(&mut items[..mid]);
    merge_sort(&mut items[mid..]);
    merge(items, mid);
}

// Merges the two sorted halves `items[..mid]` and `items[mid..]` through an auxiliary buffer.
// Ties take from the left half, which is what keeps the sort stable.
fn merge<T: Ord + Clone>(items: &mut [T], mid: usize) {
    let mut merged = Vec::with_capacity(items.len());
    {
        let (left, right) = items.split_at(mid);
        let mut i = 0;
        let mut j = 0;
        while i < left.len() && j < right.len() {
            if left[i] <= right[j] {
                merged.push(left[i].clone());
                i += 1;
            } else {
                merged.push(right[j].clone());
                j += 1;
            }
        }
        merged.extend_from_slice(&left[i..]);
        merged.extend_from_slice(&right[j..]);
    }
    items.clone_from_slice(&merged);
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::cmp::Ordering;

    macro_rules! sort_tests {
        ($($test_name:ident: $sort_fn:ident,)*) => {
            $(
                #[test]
                fn $test_name() {
                    let cases: Vec<Vec<i32>> = vec![
                        vec![],
                        vec![1],
                        vec![1, 2, 3, 4],
                        vec![4, 3, 2, 1],
                        vec![5, 1, 4, 2, 3],
                        vec![2, 2, 1, 1, 3, 3],
                    ];
                    for mut case in cases {
                        let mut expected = case.clone();
                        expected.sort();
                        super::$sort_fn(&mut case);
                        assert_eq!(case, expected);
                    }

                    let mut rng = StdRng::seed_from_u64(1);
                    let mut values: Vec<u32> = (0..1_000).map(|_| rng.gen_range(0..100)).collect();
                    let mut expected = values.clone();
                    expected.sort();
                    super::$sort_fn(&mut values);
                    assert_eq!(values, expected);
                }
            )*
        }
    }

    sort_tests! {
        test_bubble_sort: bubble_sort,
        test_insertion_sort: insertion_sort,
        test_quick_sort: quick_sort,
        test_shell_sort: shell_sort,
        test_heap_sort: heap_sort,
        test_merge_sort: merge_sort,
    }

    #[derive(Clone, Debug)]
    struct Record {
        key: u32,
        tag: u32,
    }

    impl Ord for Record {
        fn cmp(&self, other: &Self) -> Ordering {
            self.key.cmp(&other.key)
        }
    }

    impl PartialOrd for Record {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    impl PartialEq for Record {
        fn eq(&self, other: &Self) -> bool {
            self.key == other.key
        }
    }

    impl Eq for Record {}

    #[test]
    fn test_merge_sort_is_stable() {
        let mut records: Vec<Record> = [(2, 0), (1, 1), (2, 2), (1, 3), (2, 4)]
            .iter()
            .map(|&(key, tag)| Record { key, tag })
            .collect();

        super::merge_sort(&mut records);

        let tags: Vec<u32> = records.iter().map(|record| record.tag).collect();
        assert_eq!(tags, vec![1, 3, 0, 2, 4]);
    }
}
