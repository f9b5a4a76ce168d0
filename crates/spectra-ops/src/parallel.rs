//! Row-parallel iteration over output buffers.
//!
//! With the `parallel` feature the rows are handed to rayon, otherwise they
//! run in order on the calling thread. The per-row closure sees the same
//! arguments either way, so results are identical.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(row_index, row)` for every `cols`-wide row of `data`.
pub(crate) fn for_each_row<T, F>(data: &mut [T], cols: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    #[cfg(feature = "parallel")]
    data.par_chunks_mut(cols)
        .enumerate()
        .for_each(|(r, row)| f(r, row));

    #[cfg(not(feature = "parallel"))]
    data.chunks_mut(cols)
        .enumerate()
        .for_each(|(r, row)| f(r, row));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_indexed_in_place() {
        let mut data = vec![0usize; 12];
        for_each_row(&mut data, 4, |r, row| {
            for (c, v) in row.iter_mut().enumerate() {
                *v = r * 10 + c;
            }
        });
        assert_eq!(&data[4..8], &[10, 11, 12, 13]);
        assert_eq!(data[11], 23);
    }
}
