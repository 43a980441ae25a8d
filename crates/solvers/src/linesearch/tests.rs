use approx::assert_relative_eq;
use minima_core::{Capabilities, EvaluationType, IterationType, Location, Method, Step};

use super::{
    Backtracking, Bfgs, ConfigError, Linesearch, LinesearchError, Linesearcher, MIN_STEP,
    NextDirectioner,
};

fn location(x: f64, f: f64, gradient: f64) -> Location {
    let mut loc = Location::new(vec![x]).with_gradient();
    loc.f = f;
    loc.gradient = Some(vec![gradient]);
    loc
}

fn linesearch_error(err: &minima_core::BoxError) -> LinesearchError {
    *err
        .downcast_ref::<LinesearchError>()
        .expect("error should be a line search error")
}

/// Always points uphill.
struct Ascent;

impl NextDirectioner for Ascent {
    fn init_direction(&mut self, _x: &[f64], gradient: &[f64], dir: &mut [f64]) -> f64 {
        dir.copy_from_slice(gradient);
        1.0
    }

    fn next_direction(&mut self, x: &[f64], gradient: &[f64], dir: &mut [f64]) -> f64 {
        self.init_direction(x, gradient, dir)
    }
}

#[test]
fn backtracking_rejects_parameters_outside_unit_interval() {
    assert_eq!(Backtracking::new(0.0, 1e-4), Err(ConfigError::Decrease));
    assert_eq!(Backtracking::new(1.0, 1e-4), Err(ConfigError::Decrease));
    assert_eq!(Backtracking::new(f64::NAN, 1e-4), Err(ConfigError::Decrease));
    assert_eq!(Backtracking::new(0.5, 0.0), Err(ConfigError::FunConst));
    assert_eq!(Backtracking::new(0.5, 1.5), Err(ConfigError::FunConst));

    let bt = Backtracking::new(0.25, 0.1).expect("valid parameters");
    assert_relative_eq!(bt.decrease(), 0.25);
    assert_relative_eq!(bt.fun_const(), 0.1);
}

#[test]
fn backtracking_applies_armijo_condition() {
    let mut bt = Backtracking::default();
    assert_eq!(bt.init(1.0, -2.0, 1.0), EvaluationType::FuncOnly);

    // Threshold is 1 + 1e-4 * 1 * (-2) = 0.9998.
    assert!(bt.finished(0.5, f64::NAN));
    assert!(bt.finished(0.9998, f64::NAN));
    assert!(!bt.finished(0.9999, f64::NAN));
    assert!(!bt.finished(f64::NAN, f64::NAN));

    let (step, evaluation) = bt.iterate(0.9999, f64::NAN).expect("step is large");
    assert_relative_eq!(step, 0.5);
    assert_eq!(evaluation, EvaluationType::FuncOnly);

    // A smaller step relaxes the required decrease.
    assert!(bt.finished(0.9999, f64::NAN));
}

#[test]
fn backtracking_fails_below_minimum_step() {
    let mut bt = Backtracking::default();
    bt.init(1.0, -1.0, 1.0);

    let mut shrinks = 0;
    let err = loop {
        match bt.iterate(2.0, f64::NAN) {
            Ok(_) => shrinks += 1,
            Err(err) => break err,
        }
    };

    assert!(matches!(err, LinesearchError::StepTooSmall { step } if step < MIN_STEP));
    assert_eq!(shrinks, 66);
}

#[test]
fn bfgs_starts_with_steepest_descent() {
    let mut bfgs = Bfgs::default();
    let mut dir = [0.0; 2];

    let step = bfgs.init_direction(&[0.0, 0.0], &[3.0, 4.0], &mut dir);
    assert_relative_eq!(dir.as_slice(), [-3.0, -4.0].as_slice());
    assert_relative_eq!(step, 0.2);

    let step = bfgs.init_direction(&[0.0, 0.0], &[0.3, 0.4], &mut dir);
    assert_relative_eq!(step, 1.0);
}

#[test]
fn bfgs_learns_quadratic_curvature() {
    // f(x) = x₀² + x₁², so the inverse Hessian is I / 2.
    let mut bfgs = Bfgs::default();
    let mut dir = [0.0; 2];

    bfgs.init_direction(&[1.0, 1.0], &[2.0, 2.0], &mut dir);
    let step = bfgs.next_direction(&[0.5, 0.5], &[1.0, 1.0], &mut dir);

    assert_relative_eq!(step, 1.0);
    assert_relative_eq!(dir.as_slice(), [-0.5, -0.5].as_slice(), epsilon = 1e-12);
    let h = bfgs.inverse_hessian();
    assert_relative_eq!(h[[0, 0]], 0.5, epsilon = 1e-12);
    assert_relative_eq!(h[[0, 1]], 0.0, epsilon = 1e-12);
    assert_relative_eq!(h[[1, 1]], 0.5, epsilon = 1e-12);
}

#[test]
fn bfgs_skips_update_without_positive_curvature() {
    let mut bfgs = Bfgs::default();
    let mut dir = [0.0];

    bfgs.init_direction(&[0.0], &[1.0], &mut dir);
    bfgs.next_direction(&[1.0], &[1.0], &mut dir);

    assert_relative_eq!(bfgs.inverse_hessian()[[0, 0]], 1.0);
    assert_relative_eq!(dir[0], -1.0);
}

#[test]
fn linesearch_steps_to_trial_then_accepts_as_major() {
    // f(x) = x² from x = 1.
    let mut method = Linesearch::new(Bfgs::default(), Backtracking::default());
    let mut x_next = [f64::NAN];

    let step = method
        .init(&location(1.0, 1.0, 2.0), &Capabilities::default(), &mut x_next)
        .expect("gradient points downhill");
    assert_eq!(
        step,
        Step::new(EvaluationType::FuncOnly, IterationType::MinorIteration)
    );
    assert_relative_eq!(x_next[0], 0.0);

    // Trial evaluated without a gradient.
    let step = method
        .iterate(&location(0.0, 0.0, f64::NAN), &mut x_next)
        .expect("trial is accepted");
    assert_eq!(
        step,
        Step::new(EvaluationType::GradOnly, IterationType::MajorIteration)
    );
    assert_relative_eq!(x_next[0], 0.0);
}

#[test]
fn linesearch_shrinks_rejected_trial() {
    let mut method = Linesearch::new(Bfgs::default(), Backtracking::default());
    let mut x_next = [f64::NAN];

    method
        .init(&location(1.0, 1.0, 2.0), &Capabilities::default(), &mut x_next)
        .expect("gradient points downhill");

    let step = method
        .iterate(&location(0.0, 2.0, f64::NAN), &mut x_next)
        .expect("step can shrink");
    assert_eq!(
        step,
        Step::new(EvaluationType::FuncOnly, IterationType::MinorIteration)
    );
    assert_relative_eq!(x_next[0], 0.5);
    assert_relative_eq!(method.searcher().step(), 0.25);
}

#[test]
fn linesearch_skips_evaluation_when_gradient_is_known() {
    let mut method = Linesearch::new(Bfgs::default(), Backtracking::default());
    let mut x_next = [f64::NAN];

    method
        .init(&location(1.0, 1.0, 2.0), &Capabilities::default(), &mut x_next)
        .expect("gradient points downhill");

    let step = method
        .iterate(&location(0.0, 0.0, 0.0), &mut x_next)
        .expect("trial is accepted");
    assert_eq!(
        step,
        Step::new(EvaluationType::NoEvaluation, IterationType::MajorIteration)
    );
}

#[test]
fn linesearch_requires_gradient() {
    let mut method = Linesearch::new(Bfgs::default(), Backtracking::default());
    let mut loc = Location::new(vec![1.0]);
    loc.f = 1.0;

    let err = method
        .init(&loc, &Capabilities::default(), &mut [0.0])
        .expect_err("no gradient");
    assert_eq!(linesearch_error(&err), LinesearchError::MissingGradient);
}

#[test]
fn linesearch_rejects_ascent_direction() {
    let mut method = Linesearch::new(Ascent, Backtracking::default());

    let err = method
        .init(&location(1.0, 1.0, 2.0), &Capabilities::default(), &mut [0.0])
        .expect_err("direction points uphill");
    assert_eq!(
        linesearch_error(&err),
        LinesearchError::NotDescent { projected: 4.0 }
    );
}
