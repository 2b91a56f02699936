//! Branchless binary search with insertion-point reporting.
//!
//! A conventional binary search picks the surviving half of the array with a
//! conditional branch. On unpredictable keys that branch is mispredicted
//! roughly half the time, and every miss flushes the pipeline. The search
//! here removes the data-dependent branches instead of trying to predict
//! them: each halving step computes both candidate windows and selects
//! between them with all-ones/all-zeros masks derived from the comparison
//! results, and the loop runs a fixed number of iterations derived from the
//! array length alone. For a given length, the executed instruction stream
//! is the same for every key.
//!
//! # Strategies
//!
//! | Function | Strategy | Best For |
//! |----------|----------|----------|
//! | [`search_std`] | Stdlib binary search | Baseline, clarity |
//! | [`search_branchless`] | Fixed-step masked narrowing | Random queries (fewer mispredicts) |
//! | [`search_branchless_encoded`] | Same, signed-integer result | C-style callers |
//!
//! All variants report misses as the insertion point that keeps the slice
//! sorted, and treat the empty slice as its own outcome.
//!
//! # References
//!
//! - [Binary search chapter](https://en.algorithmica.org/hpc/data-structures/binary-search/)

/// Outcome of a search over a sorted slice.
///
/// A miss carries the index at which the key could be inserted while keeping
/// the slice sorted. The empty slice is reported as [`Empty`] rather than as
/// a miss at index 0; the two collapse onto the same value only in the
/// [`encode`]d form.
///
/// [`Empty`]: SearchResult::Empty
/// [`encode`]: SearchResult::encode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchResult {
    /// The key is at this index. With duplicates, any matching index.
    Found(usize),
    /// The key is absent; inserting it here keeps the slice sorted.
    NotFound(usize),
    /// The slice had no elements.
    Empty,
}

impl SearchResult {
    /// Packs the result into the signed-integer convention of C-style search
    /// routines: a found index is returned as-is, a miss at insertion point
    /// `p` becomes `-(p + 1)`, and the empty slice becomes `-1`, the same
    /// value as a miss at index 0.
    pub fn encode(self) -> isize {
        match self {
            SearchResult::Found(index) => index as isize,
            SearchResult::NotFound(insert_at) => -(insert_at as isize) - 1,
            SearchResult::Empty => -1,
        }
    }
}

/// One branch-free halving of the search window `[start, end)`.
///
/// Compares the key against the median element and keeps the half that can
/// still contain the key. An exact hit collapses the window to
/// `[median, median + 1)` at once, which keeps the remaining iterations
/// pinned on the matching index. Both bounds are updated by mask selection,
/// so the instruction stream does not depend on the key or on the element
/// values.
#[inline(always)]
fn narrow_window(values: &[i32], start: usize, end: usize, key: i32) -> (usize, usize) {
    let median = (start + end) / 2;
    // SAFETY: the driver keeps start < values.len() and end <= values.len().
    // The median of such a window is at most max(start, end - 1), so it
    // stays in bounds even once the window has emptied.
    let value = unsafe { *values.get_unchecked(median) };

    // All-ones keeps the current bound, all-zeros pulls it to the median.
    // On an exact match both masks are zero and the trailing term closes
    // the window to width 1.
    let keep_start = ((key < value) as usize).wrapping_neg();
    let keep_end = ((key > value) as usize).wrapping_neg();

    let next_start = (median & !keep_start) | (start & keep_start);
    let next_end = ((median & !keep_end) | (end & keep_end)) + (!keep_start & !keep_end & 1);

    (next_start, next_end)
}

/// Branchless binary search returning the C-style signed encoding.
///
/// A hit returns the matching index. A miss returns `-(p + 1)` where `p` is
/// the insertion point, and the empty slice returns `-1`, which is also what
/// a miss at index 0 produces. Callers that need to tell those apart want
/// [`search_branchless`].
///
/// Past the length check, the routine narrows the window exactly
/// `bit_length(len)` times and decodes the final window, both by mask
/// selection: no branch depends on the key or the element values. The slice
/// must be sorted ascending; duplicates are fine. On unsorted input the
/// result is meaningless but the call is still memory safe.
pub fn search_branchless_encoded(values: &[i32], key: i32) -> isize {
    let len = values.len();
    if len == 0 {
        return -1;
    }

    // Halvings needed to guarantee a width-1 window: the bit length of
    // `len`. Derived from the length only, so the trip count carries no
    // information about the key.
    let steps = usize::BITS - len.leading_zeros();

    let mut start = 0usize;
    let mut end = len;
    for _ in 0..steps {
        (start, end) = narrow_window(values, start, end, key);
    }

    // SAFETY: `start` never reaches `len`; it only ever advances to a
    // window median, and medians stay at most max(start, end - 1) with
    // end <= len throughout.
    let low = unsafe { *values.get_unchecked(start) };

    // Masked decode of the surviving window. A window whose lowest element
    // sits below the key puts the insertion point at `end` (which is `len`
    // for keys above the whole slice); otherwise at `start`. The element
    // at `end` itself is never read: the only state it could distinguish
    // cannot arise from sorted input, and both readings of that state
    // decode to the same insertion point.
    let is_match = ((low == key) as isize).wrapping_neg();
    let is_low_side = ((low < key) as isize).wrapping_neg();

    let miss = (is_low_side & (-(end as isize) - 1)) | (!is_low_side & (-(start as isize) - 1));

    (is_match & (start as isize)) | (!is_match & miss)
}

/// Branchless binary search over a sorted slice.
///
/// Same routine as [`search_branchless_encoded`], unpacked into
/// [`SearchResult`] so the empty slice stays distinguishable from a miss at
/// index 0.
pub fn search_branchless(values: &[i32], key: i32) -> SearchResult {
    if values.is_empty() {
        return SearchResult::Empty;
    }

    match search_branchless_encoded(values, key) {
        index if index >= 0 => SearchResult::Found(index as usize),
        miss => SearchResult::NotFound((-miss - 1) as usize),
    }
}

/// Standard library binary search mapped onto [`SearchResult`].
///
/// Oracle and baseline for [`search_branchless`]. With duplicates the two
/// may report different matching indices for the same key.
pub fn search_std(values: &[i32], key: i32) -> SearchResult {
    if values.is_empty() {
        return SearchResult::Empty;
    }

    match values.binary_search(&key) {
        Ok(index) => SearchResult::Found(index),
        Err(insert_at) => SearchResult::NotFound(insert_at),
    }
}
