use ndarray::{Array1, Array2, ArrayView1, Zip};

use super::NextDirectioner;

/// Broyden–Fletcher–Goldfarb–Shanno quasi-Newton directions.
///
/// Keeps an estimate `H` of the inverse Hessian and proposes `d = -H·g`.
/// With `s` the last step and `y` the change in gradient, each major
/// iteration applies
///
/// ```text
/// H ← H + ρ(1 + ρ·yᵀHy)·ssᵀ - ρ(s(Hy)ᵀ + (Hy)sᵀ),   ρ = 1 / sᵀy
/// ```
///
/// The update is skipped when `sᵀy <= 0`, which keeps `H` positive
/// definite. Before the first update `H` is rescaled from the identity to
/// `(sᵀy / yᵀy)·I`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bfgs {
    x: Vec<f64>,
    gradient: Vec<f64>,
    inv_hess: Array2<f64>,
    scaled: bool,
}

impl Bfgs {
    /// Returns the current inverse Hessian estimate.
    #[must_use]
    pub fn inverse_hessian(&self) -> &Array2<f64> {
        &self.inv_hess
    }

    /// Writes `-H·g` into `dir`.
    fn descent(&self, gradient: &[f64], dir: &mut [f64]) {
        let hg = self.inv_hess.dot(&ArrayView1::from(gradient));
        for (d, hg) in dir.iter_mut().zip(&hg) {
            *d = -hg;
        }
    }
}

impl NextDirectioner for Bfgs {
    fn init_direction(&mut self, x: &[f64], gradient: &[f64], dir: &mut [f64]) -> f64 {
        self.x = x.to_vec();
        self.gradient = gradient.to_vec();
        self.inv_hess = Array2::eye(x.len());
        self.scaled = false;

        self.descent(gradient, dir);

        let norm = gradient.iter().map(|g| g * g).sum::<f64>().sqrt();
        (1.0 / norm).min(1.0)
    }

    fn next_direction(&mut self, x: &[f64], gradient: &[f64], dir: &mut [f64]) -> f64 {
        let s: Array1<f64> = x.iter().zip(&self.x).map(|(a, b)| a - b).collect();
        let y: Array1<f64> = gradient
            .iter()
            .zip(&self.gradient)
            .map(|(a, b)| a - b)
            .collect();
        let sy = s.dot(&y);

        if sy > 0.0 {
            if !self.scaled {
                self.inv_hess = Array2::eye(x.len()) * (sy / y.dot(&y));
                self.scaled = true;
            }

            let hy = self.inv_hess.dot(&y);
            let rho = 1.0 / sy;
            let c = rho * (1.0 + rho * y.dot(&hy));
            Zip::indexed(&mut self.inv_hess).for_each(|(i, j), h| {
                *h += c * s[i] * s[j] - rho * (s[i] * hy[j] + hy[i] * s[j]);
            });
        }

        self.x.copy_from_slice(x);
        self.gradient.copy_from_slice(gradient);

        self.descent(gradient, dir);
        1.0
    }
}
