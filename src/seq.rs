//! Sequential transformations over finite slices.
//!
//! Every function borrows its input and returns a freshly allocated result,
//! so the caller's slice is never touched.

// =============================================================================
// Structural operations
// =============================================================================

pub fn reverse<T: Clone>(seq: &[T]) -> Vec<T> {
    seq.iter().rev().cloned().collect()
}

/// First `min(n, seq.len())` elements.
pub fn take<T: Clone>(n: usize, seq: &[T]) -> Vec<T> {
    seq.iter().take(n).cloned().collect()
}

/// Everything after the first `n` elements. `n == 0` copies the whole slice.
pub fn drop<T: Clone>(n: usize, seq: &[T]) -> Vec<T> {
    seq.iter().skip(n).cloned().collect()
}

// =============================================================================
// Element-wise operations
// =============================================================================

/// Applies `f` to each element strictly in index order.
pub fn map<T, U, F>(f: F, seq: &[T]) -> Vec<U>
where
    F: FnMut(&T) -> U,
{
    seq.iter().map(f).collect()
}

pub fn filter<T, P>(mut pred: P, seq: &[T]) -> Vec<T>
where
    T: Clone,
    P: FnMut(&T) -> bool,
{
    seq.iter().filter(|item| pred(item)).cloned().collect()
}

/// Complement of [`filter`]: keeps the elements `pred` rejects.
pub fn remove<T, P>(mut pred: P, seq: &[T]) -> Vec<T>
where
    T: Clone,
    P: FnMut(&T) -> bool,
{
    filter(|item| !pred(item), seq)
}

// =============================================================================
// Folds
// =============================================================================

/// Left fold: `f(...f(f(z, seq[0]), seq[1])..., seq[n-1])`.
///
/// The step receives the accumulator first.
pub fn foldl<T, A, F>(mut f: F, z: A, seq: &[T]) -> A
where
    F: FnMut(A, &T) -> A,
{
    let mut acc = z;
    for item in seq {
        acc = f(acc, item);
    }
    acc
}

/// Right fold: `f(seq[0], f(seq[1], ...f(seq[n-1], z)))`.
///
/// The step receives the element first. Evaluated from the back of the slice
/// so no recursion is needed.
pub fn foldr<T, A, F>(mut f: F, z: A, seq: &[T]) -> A
where
    F: FnMut(&T, A) -> A,
{
    let mut acc = z;
    for item in seq.iter().rev() {
        acc = f(item, acc);
    }
    acc
}
