use crate::error::TapeGradError;
use crate::tensor::utils::calculate_strides;

/// Determines the output shape resulting from broadcasting two input shapes.
///
/// Follows NumPy/PyTorch broadcasting rules:
/// 1. If the shapes have different numbers of dimensions, prepend 1s to the shorter shape.
/// 2. Compare dimensions element-wise from right to left.
/// 3. Dimensions are compatible if they are equal, or one of them is 1.
pub fn broadcast_shapes(shape_a: &[usize], shape_b: &[usize]) -> Result<Vec<usize>, TapeGradError> {
    let rank_a = shape_a.len();
    let rank_b = shape_b.len();
    let max_rank = rank_a.max(rank_b);
    let mut result_shape = vec![0; max_rank];

    for i in 0..max_rank {
        let dim_a = if i < rank_a { shape_a[rank_a - 1 - i] } else { 1 };
        let dim_b = if i < rank_b { shape_b[rank_b - 1 - i] } else { 1 };

        result_shape[max_rank - 1 - i] = if dim_a == dim_b || dim_b == 1 {
            dim_a
        } else if dim_a == 1 {
            dim_b
        } else {
            return Err(TapeGradError::BroadcastError {
                shape1: shape_a.to_vec(),
                shape2: shape_b.to_vec(),
            });
        };
    }
    Ok(result_shape)
}

/// Strides that read `input_shape` as if it were expanded to `output_shape`.
///
/// Broadcast dimensions (missing on the left, or of size 1 against a larger
/// output dimension) get stride 0, so every output coordinate maps back to the
/// input element it was computed from.
pub(crate) fn broadcast_strides(input_shape: &[usize], output_shape: &[usize]) -> Vec<usize> {
    let input_strides = calculate_strides(input_shape);
    let rank_diff = output_shape.len() - input_shape.len();
    let mut strides = vec![0; output_shape.len()];
    for (i, (&dim, &stride)) in input_shape.iter().zip(input_strides.iter()).enumerate() {
        if dim == output_shape[rank_diff + i] {
            strides[rank_diff + i] = stride;
        }
    }
    strides
}

/// Walks an output shape in row-major order and yields, for each element, the
/// flat index of the input element it broadcasts from.
pub(crate) struct BroadcastIndexIter {
    shape: Vec<usize>,
    strides: Vec<usize>,
    coord: Vec<usize>,
    offset: usize,
    remaining: usize,
}

impl BroadcastIndexIter {
    pub(crate) fn new(input_shape: &[usize], output_shape: &[usize]) -> Self {
        BroadcastIndexIter {
            shape: output_shape.to_vec(),
            strides: broadcast_strides(input_shape, output_shape),
            coord: vec![0; output_shape.len()],
            offset: 0,
            remaining: output_shape.iter().product(),
        }
    }
}

impl Iterator for BroadcastIndexIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.offset;

        // Odometer increment, keeping `offset` in sync with `coord`.
        let mut dim = self.shape.len();
        while dim > 0 {
            dim -= 1;
            self.coord[dim] += 1;
            self.offset += self.strides[dim];
            if self.coord[dim] < self.shape[dim] {
                break;
            }
            self.offset -= self.strides[dim] * self.coord[dim];
            self.coord[dim] = 0;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_shapes() {
        assert_eq!(broadcast_shapes(&[2, 3], &[3]).unwrap(), vec![2, 3]);
        assert_eq!(broadcast_shapes(&[2, 1], &[1, 4]).unwrap(), vec![2, 4]);
        assert_eq!(broadcast_shapes(&[], &[5]).unwrap(), vec![5]);
        assert!(matches!(
            broadcast_shapes(&[2, 2], &[2, 3]),
            Err(TapeGradError::BroadcastError { .. })
        ));
    }

    #[test]
    fn test_broadcast_index_iter_row_vector() {
        // [3] broadcast against [2, 3]: rows repeat.
        let idx: Vec<usize> = BroadcastIndexIter::new(&[3], &[2, 3]).collect();
        assert_eq!(idx, vec![0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_broadcast_index_iter_column_vector() {
        // [2, 1] broadcast against [2, 3]: columns repeat.
        let idx: Vec<usize> = BroadcastIndexIter::new(&[2, 1], &[2, 3]).collect();
        assert_eq!(idx, vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_broadcast_index_iter_identity_and_scalar() {
        let idx: Vec<usize> = BroadcastIndexIter::new(&[2, 2], &[2, 2]).collect();
        assert_eq!(idx, vec![0, 1, 2, 3]);
        let idx: Vec<usize> = BroadcastIndexIter::new(&[], &[3]).collect();
        assert_eq!(idx, vec![0, 0, 0]);
        let idx: Vec<usize> = BroadcastIndexIter::new(&[], &[]).collect();
        assert_eq!(idx, vec![0]);
    }
}
