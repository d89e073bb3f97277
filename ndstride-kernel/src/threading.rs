//! Rayon-based parallel execution for elementwise kernels.
//!
//! The output buffer is halved recursively with `rayon::join` until a piece is at most
//! [`MIN_THREAD_LENGTH`] elements long or the thread budget for the subtree is spent.
//! Each task writes only its own disjoint half, so no synchronization is needed.

use crate::MIN_THREAD_LENGTH;

/// Parallel `out[i] = f(a[i], b[i])`.
pub(crate) fn par_zip_slices<T, F>(a: &[T], b: &[T], f: F) -> Vec<T>
where
    T: Copy + Send + Sync,
    F: Fn(T, T) -> T + Send + Sync,
{
    let nthreads = rayon::current_num_threads();
    log::trace!(
        "parallel zip over {} elements on {} threads",
        a.len(),
        nthreads
    );
    let mut out = a.to_vec();
    zip_into_threaded(&mut out, b, &f, nthreads);
    out
}

fn zip_into_threaded<T, F>(dst: &mut [T], src: &[T], f: &F, nthreads: usize)
where
    T: Copy + Send + Sync,
    F: Fn(T, T) -> T + Send + Sync,
{
    if nthreads <= 1 || dst.len() <= MIN_THREAD_LENGTH {
        for (d, &s) in dst.iter_mut().zip(src.iter()) {
            *d = f(*d, s);
        }
        return;
    }

    let mid = dst.len() / 2;
    let nt_left = nthreads / 2;
    let nt_right = nthreads - nt_left;
    let (dst_left, dst_right) = dst.split_at_mut(mid);
    let (src_left, src_right) = src.split_at(mid);

    rayon::join(
        || zip_into_threaded(dst_left, src_left, f, nt_left),
        || zip_into_threaded(dst_right, src_right, f, nt_right),
    );
}
