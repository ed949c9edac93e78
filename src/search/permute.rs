//! Heap's algorithm.

/// Every ordering of `items`, generated by in-place swaps.
///
/// Produces `items.len()!` results; callers keep the input small.
#[must_use]
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    let mut scratch = items.to_vec();
    let mut out = Vec::new();
    heap(scratch.len(), &mut scratch, &mut out);
    out
}

fn heap<T: Clone>(k: usize, scratch: &mut [T], out: &mut Vec<Vec<T>>) {
    if k <= 1 {
        out.push(scratch.to_vec());
        return;
    }
    for i in 0..k - 1 {
        heap(k - 1, scratch, out);
        let j = if k % 2 == 0 { i } else { 0 };
        scratch.swap(j, k - 1);
    }
    heap(k - 1, scratch, out);
}
