use ndarray::Array2;

/// A point together with whichever quantities are currently valid for it.
///
/// `gradient` and `hessian` are `None` when the method does not use them.
/// Fields that are not valid for the current `x` hold `NaN`, so a method
/// that reads a quantity it never asked for sees an obviously bad value
/// instead of a stale one.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// The point.
    pub x: Vec<f64>,

    /// Function value at `x`.
    pub f: f64,

    /// Gradient at `x`, with the same length as `x`.
    pub gradient: Option<Vec<f64>>,

    /// Symmetric Hessian at `x`, of size `x.len()` by `x.len()`.
    pub hessian: Option<Array2<f64>>,
}

impl Location {
    /// Creates a location at `x` with no valid quantities.
    #[must_use]
    pub fn new(x: Vec<f64>) -> Self {
        Self {
            x,
            f: f64::NAN,
            gradient: None,
            hessian: None,
        }
    }

    /// Allocates a gradient buffer matching the dimension of `x`.
    #[must_use]
    pub fn with_gradient(mut self) -> Self {
        self.gradient = Some(vec![0.0; self.x.len()]);
        self
    }

    /// Allocates a Hessian buffer matching the dimension of `x`.
    #[must_use]
    pub fn with_hessian(mut self) -> Self {
        let dim = self.x.len();
        self.hessian = Some(Array2::zeros((dim, dim)));
        self
    }

    /// Returns the problem dimension.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.x.len()
    }

    /// Overwrites `self` with a deep copy of `src`, reusing existing buffers.
    pub fn copy_from(&mut self, src: &Location) {
        self.x.clone_from(&src.x);
        self.f = src.f;
        self.gradient.clone_from(&src.gradient);
        self.hessian.clone_from(&src.hessian);
    }

    /// Marks the selected quantities as invalid by filling them with `NaN`.
    ///
    /// Untracked quantities (`None`) are left alone.
    pub fn invalidate(&mut self, f: bool, gradient: bool, hessian: bool) {
        if f {
            self.f = f64::NAN;
        }
        if gradient {
            if let Some(g) = self.gradient.as_mut() {
                g.fill(f64::NAN);
            }
        }
        if hessian {
            if let Some(h) = self.hessian.as_mut() {
                h.fill(f64::NAN);
            }
        }
    }
}
