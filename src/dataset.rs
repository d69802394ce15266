use ndarray::{Array1, Array2, ArrayView1, Axis};

/// A single supervised example: a dense feature vector and its target.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub x: Array1<f64>,
    pub y: f64,
}

impl Sample {
    pub fn new(x: impl Into<Array1<f64>>, y: f64) -> Self {
        Self { x: x.into(), y }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.x.len()
    }
}

/// A minimal in-memory dataset, one example per row of `xs`.
#[derive(Debug, Clone)]
pub struct InMemoryDataset {
    xs: Array2<f64>,
    ys: Array1<f64>,
}

impl InMemoryDataset {
    /// Creates a new dataset from owned buffers.
    ///
    /// # Panics
    /// - if `xs` and `ys` don't hold the same amount of examples
    /// - if `xs` is empty
    pub fn new(xs: Array2<f64>, ys: Array1<f64>) -> Self {
        assert_eq!(xs.nrows(), ys.len(), "xs and ys must have same length");
        assert!(xs.nrows() > 0, "dataset must be non-empty");
        Self { xs, ys }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ys.is_empty()
    }

    /// The amount of features per example.
    #[inline]
    pub fn dim(&self) -> usize {
        self.xs.ncols()
    }

    #[inline]
    pub fn features(&self, idx: usize) -> ArrayView1<'_, f64> {
        self.xs.row(idx)
    }

    /// Returns an owned copy of the example at `idx` (panics if out of bounds).
    pub fn sample(&self, idx: usize) -> Sample {
        Sample {
            x: self.xs.row(idx).to_owned(),
            y: self.ys[idx],
        }
    }

    /// Splits the dataset into owned examples, the form a `BatchDriver` shuffles.
    pub fn into_samples(self) -> Vec<Sample> {
        self.xs
            .axis_iter(Axis(0))
            .zip(self.ys.iter())
            .map(|(x, &y)| Sample { x: x.to_owned(), y })
            .collect()
    }
}
