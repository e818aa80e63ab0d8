//! Reshaping between N-D tensors and the 2-D (signal, time) layout
//!
//! `to_2d` moves the time axis last, keeps the other axes in order and
//! collapses them into rows. `from_2d` undoes exactly that, optionally
//! splitting the rows into an extra leading block (the frequency axis) that
//! is placed anywhere in the output.

use ndarray::{Array2, ArrayD, ArrayView2, ArrayViewD, Axis, IxDyn};

use crate::error::{Result, WaveletError};

/// Resolve a possibly negative axis index against `rank`
pub fn normalize_axis(axis: isize, rank: usize) -> Result<usize> {
    let resolved = if axis < 0 { axis + rank as isize } else { axis };
    if resolved < 0 || resolved >= rank as isize {
        return Err(WaveletError::AxisOutOfRange { axis, rank });
    }
    Ok(resolved as usize)
}

/// Resolve where a new axis goes in a rank-`rank` shape
///
/// Follows list insertion: a negative position counts from `rank`, so `-1`
/// places the new axis before the current last one and `rank` appends it.
pub fn insert_position(axis: isize, rank: usize) -> Result<usize> {
    let resolved = if axis < 0 { axis + rank as isize } else { axis };
    if resolved < 0 || resolved > rank as isize {
        return Err(WaveletError::AxisOutOfRange {
            axis,
            rank: rank + 1,
        });
    }
    Ok(resolved as usize)
}

/// Flatten `data` to (signals, time) with `time_axis` as the second axis
///
/// Rows enumerate the remaining axes in row-major order. A rank-1 input
/// becomes a single row.
pub fn to_2d<T: Clone>(data: &ArrayViewD<T>, time_axis: isize) -> Result<Array2<T>> {
    let rank = data.ndim();
    let t = normalize_axis(time_axis, rank)?;
    let n_time = data.len_of(Axis(t));
    let n_rows = if n_time == 0 { 0 } else { data.len() / n_time };

    let mut order: Vec<usize> = (0..rank).filter(|&a| a != t).collect();
    order.push(t);

    let moved = data.view().permuted_axes(IxDyn(&order));
    let flat: Vec<T> = moved.iter().cloned().collect();
    Array2::from_shape_vec((n_rows, n_time), flat).map_err(|_| WaveletError::ShapeMismatch {
        expected: vec![n_rows, n_time],
        actual: data.shape().to_vec(),
    })
}

/// Restore 2-D rows produced by [`to_2d`] to an N-D tensor
///
/// # Arguments
/// * `data` - (blocks * signals, time) rows
/// * `time_axis` - Time axis of the tensor that was flattened
/// * `target_shape` - Shape of the result
/// * `freq_axis` - Position of the extra block axis in `target_shape`, or
///   `None` when `target_shape` is the shape that was flattened
///
/// With a block axis, row `b * signals + s` is block `b` of signal row `s`.
pub fn from_2d<T: Clone>(
    data: &ArrayView2<T>,
    time_axis: isize,
    target_shape: &[usize],
    freq_axis: Option<usize>,
) -> Result<ArrayD<T>> {
    let expected_len: usize = target_shape.iter().product();
    if data.len() != expected_len {
        return Err(WaveletError::ShapeMismatch {
            expected: target_shape.to_vec(),
            actual: data.shape().to_vec(),
        });
    }

    // Shape of the flattened tensor and, with a block axis, its size
    let (orig_shape, n_blocks) = match freq_axis {
        Some(k) => {
            if k >= target_shape.len() {
                return Err(WaveletError::AxisOutOfRange {
                    axis: k as isize,
                    rank: target_shape.len(),
                });
            }
            let mut shape = target_shape.to_vec();
            let n_blocks = shape.remove(k);
            (shape, Some(n_blocks))
        }
        None => (target_shape.to_vec(), None),
    };
    let rank = orig_shape.len();
    let t = normalize_axis(time_axis, rank)?;

    if data.ncols() != orig_shape[t] {
        return Err(WaveletError::ShapeMismatch {
            expected: target_shape.to_vec(),
            actual: data.shape().to_vec(),
        });
    }

    // Layout of the rows: [blocks?, other axes..., time]
    let offset = usize::from(n_blocks.is_some());
    let mut moved_shape: Vec<usize> = n_blocks.into_iter().collect();
    moved_shape.extend((0..rank).filter(|&a| a != t).map(|a| orig_shape[a]));
    moved_shape.push(orig_shape[t]);

    // For every original axis, its position within the moved layout
    let mut order: Vec<usize> = (0..rank)
        .map(|a| {
            if a == t {
                rank - 1 + offset
            } else if a < t {
                a + offset
            } else {
                a - 1 + offset
            }
        })
        .collect();
    if let Some(k) = freq_axis {
        order.insert(k, 0);
    }

    let flat: Vec<T> = data.iter().cloned().collect();
    let moved = ArrayD::from_shape_vec(IxDyn(&moved_shape), flat).map_err(|_| {
        WaveletError::ShapeMismatch {
            expected: moved_shape.clone(),
            actual: data.shape().to_vec(),
        }
    })?;

    let restored = moved.permuted_axes(IxDyn(&order));
    Ok(restored.as_standard_layout().into_owned())
}
