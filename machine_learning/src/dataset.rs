use ndarray::ArrayView1;

use crate::{MlErr, Result};

/// A fixed set of training examples, each one an input prefix of `x_size` values followed by an
/// expected output suffix of `y_size` values, stored contiguously.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x_size: usize,
    y_size: usize,
    data: Vec<f32>,
}

impl Dataset {
    /// Creates a new `Dataset` from a flat vec of examples.
    ///
    /// # Arguments
    /// * `data` - The examples one after the other.
    /// * `x_size` - The length of the input segment of each example.
    /// * `y_size` - The length of the expected segment of each example.
    ///
    /// # Returns
    /// A new `Dataset` or an error if the last example is incomplete.
    pub fn new(data: Vec<f32>, x_size: usize, y_size: usize) -> Result<Self> {
        Self::check_segments(x_size, y_size)?;

        let row_size = x_size + y_size;
        if data.len() % row_size != 0 {
            return Err(MlErr::ExampleLength {
                example: data.len() / row_size,
                got: data.len() % row_size,
                expected: row_size,
            });
        }

        Ok(Self {
            x_size,
            y_size,
            data,
        })
    }

    /// Creates a new `Dataset` from one vec per example.
    ///
    /// # Returns
    /// A new `Dataset` or `MlErr::ExampleLength` for the first example which isn't exactly
    /// `x_size + y_size` values long.
    pub fn from_rows<I>(rows: I, x_size: usize, y_size: usize) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<f32>>,
    {
        Self::check_segments(x_size, y_size)?;

        let row_size = x_size + y_size;
        let mut data = Vec::new();

        for (example, row) in rows.into_iter().enumerate() {
            if row.len() != row_size {
                return Err(MlErr::ExampleLength {
                    example,
                    got: row.len(),
                    expected: row_size,
                });
            }

            data.extend(row);
        }

        Ok(Self {
            x_size,
            y_size,
            data,
        })
    }

    fn check_segments(x_size: usize, y_size: usize) -> Result<()> {
        if x_size == 0 {
            return Err(MlErr::InvalidExampleSegment("input"));
        }

        if y_size == 0 {
            return Err(MlErr::InvalidExampleSegment("output"));
        }

        Ok(())
    }

    pub fn x_size(&self) -> usize {
        self.x_size
    }

    pub fn y_size(&self) -> usize {
        self.y_size
    }

    /// The amount of examples.
    pub fn len(&self) -> usize {
        self.data.len() / (self.x_size + self.y_size)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates the examples as `(input, expected)` pairs.
    pub fn examples(&self) -> impl Iterator<Item = (ArrayView1<'_, f32>, ArrayView1<'_, f32>)> {
        self.rows().map(|row| {
            let (x, y) = row.split_at(self.x_size);
            (ArrayView1::from(x), ArrayView1::from(y))
        })
    }

    /// Iterates the raw examples.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.x_size + self.y_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xor() -> Vec<Vec<f32>> {
        vec![
            vec![0., 0., 0.],
            vec![0., 1., 1.],
            vec![1., 0., 1.],
            vec![1., 1., 0.],
        ]
    }

    #[test]
    fn splits_inputs_and_outputs() {
        let dataset = Dataset::from_rows(xor(), 2, 1).unwrap();
        let examples: Vec<_> = dataset.examples().collect();

        assert_eq!(dataset.len(), 4);
        assert_eq!(examples[1].0.to_vec(), [0., 1.]);
        assert_eq!(examples[1].1.to_vec(), [1.]);
        assert_eq!(examples[3].0.to_vec(), [1., 1.]);
        assert_eq!(examples[3].1.to_vec(), [0.]);
    }

    #[test]
    fn rejects_malformed_rows() {
        let mut rows = xor();
        rows[2].push(1.);

        assert_eq!(
            Dataset::from_rows(rows, 2, 1).unwrap_err(),
            MlErr::ExampleLength {
                example: 2,
                got: 4,
                expected: 3
            }
        );
    }

    #[test]
    fn rejects_incomplete_flat_data() {
        let err = Dataset::new(vec![0., 0., 0., 1.], 2, 1).unwrap_err();

        assert_eq!(
            err,
            MlErr::ExampleLength {
                example: 1,
                got: 1,
                expected: 3
            }
        );
    }

    #[test]
    fn rejects_empty_segments() {
        assert!(Dataset::new(vec![], 0, 1).is_err());
        assert!(Dataset::from_rows(Vec::<Vec<f32>>::new(), 1, 0).is_err());
    }

    #[test]
    fn empty() {
        let dataset = Dataset::from_rows(Vec::<Vec<f32>>::new(), 2, 1).unwrap();

        assert!(dataset.is_empty());
        assert_eq!(dataset.examples().count(), 0);
    }

    #[test]
    fn rows_round_trip() {
        let dataset = Dataset::from_rows(xor(), 2, 1).unwrap();
        let rows: Vec<Vec<f32>> = dataset.rows().map(<[f32]>::to_vec).collect();

        assert_eq!(rows, xor());
    }
}
