//! Binary logistic regression on sparse features.

use super::tfidf::SparseVector;

/// Solver settings for [`LogisticRegression::fit`].
#[derive(Debug, Clone, Copy)]
pub struct SolverOptions {
    /// Inverse L2 regularization strength. The intercept is not penalized.
    pub c: f64,
    pub max_iterations: usize,
    /// Stop once every gradient component is at most this large.
    pub tolerance: f64,
}

/// L2-regularized logistic regression.
///
/// Minimizes `0.5·‖w‖² + C·Σ log(1 + exp(-sᵢ(w·xᵢ + b)))` with Nesterov
/// accelerated gradient descent (adaptive restart) from a zero start, so a
/// fit is a pure function of its inputs. Running out of iterations is not an
/// error; the last iterate is kept.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    intercept: f64,
    iterations: usize,
    converged: bool,
}

impl LogisticRegression {
    /// Fit on `rows` with 0/1 `targets`. Feature indices must be below
    /// `n_features`.
    pub fn fit(rows: &[SparseVector], targets: &[f64], n_features: usize, options: SolverOptions) -> Self {
        let dim = n_features + 1;
        let lipschitz = 1.0
            + 0.25 * options.c * rows.iter().map(|r| squared_norm(r) + 1.0).sum::<f64>();
        let step = 1.0 / lipschitz;

        let mut theta = vec![0.0; dim];
        let mut lookahead = theta.clone();
        let mut iterations = 0;
        let mut converged = false;
        let mut momentum_steps = 0usize;

        for k in 1..=options.max_iterations {
            iterations = k;
            let grad = gradient(&lookahead, rows, targets, options.c);
            if grad.iter().all(|g| g.abs() <= options.tolerance) {
                theta = lookahead;
                converged = true;
                break;
            }

            let next: Vec<f64> = lookahead
                .iter()
                .zip(&grad)
                .map(|(p, g)| p - step * g)
                .collect();
            // Restart the momentum whenever it points uphill.
            let uphill = grad
                .iter()
                .zip(next.iter().zip(&theta))
                .map(|(g, (n, prev))| g * (n - prev))
                .sum::<f64>()
                > 0.0;
            momentum_steps = if uphill { 0 } else { momentum_steps + 1 };
            let momentum = momentum_steps as f64 / (momentum_steps + 3) as f64;
            lookahead = next
                .iter()
                .zip(&theta)
                .map(|(n, prev)| n + momentum * (n - prev))
                .collect();
            theta = next;
        }

        let intercept = theta.pop().unwrap_or(0.0);
        Self {
            weights: theta,
            intercept,
            iterations,
            converged,
        }
    }

    /// Probability of the positive class.
    pub fn predict_proba(&self, row: &SparseVector) -> f64 {
        sigmoid(decision(&self.weights, self.intercept, row))
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn converged(&self) -> bool {
        self.converged
    }
}

/// Gradient of the objective; the last component is the intercept.
fn gradient(theta: &[f64], rows: &[SparseVector], targets: &[f64], c: f64) -> Vec<f64> {
    let bias = theta.len() - 1;
    let mut grad = theta.to_vec();
    grad[bias] = 0.0;

    for (row, &y) in rows.iter().zip(targets) {
        let residual = c * (sigmoid(decision(&theta[..bias], theta[bias], row)) - y);
        for &(j, v) in row {
            grad[j] += residual * v;
        }
        grad[bias] += residual;
    }
    grad
}

fn decision(weights: &[f64], intercept: f64, row: &SparseVector) -> f64 {
    row.iter().map(|&(j, v)| weights[j] * v).sum::<f64>() + intercept
}

fn squared_norm(row: &SparseVector) -> f64 {
    row.iter().map(|(_, v)| v * v).sum()
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> SolverOptions {
        SolverOptions {
            c: 1.0,
            max_iterations: 1000,
            tolerance: 1e-4,
        }
    }

    #[test]
    fn sigmoid_is_stable_at_extremes() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(800.0) <= 1.0);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(!sigmoid(-800.0).is_nan());
    }

    #[test]
    fn separates_disjoint_features() {
        let rows = vec![
            vec![(0, 1.0)],
            vec![(0, 0.6), (1, 0.8)],
            vec![(2, 1.0)],
            vec![(2, 0.6), (3, 0.8)],
        ];
        let targets = [1.0, 1.0, 0.0, 0.0];
        let model = LogisticRegression::fit(&rows, &targets, 4, options());

        assert!(model.predict_proba(&vec![(0, 1.0)]) > 0.5);
        assert!(model.predict_proba(&vec![(2, 1.0)]) < 0.5);
    }

    #[test]
    fn intercept_tracks_class_balance() {
        // No informative features: only the intercept can move.
        let rows = vec![Vec::new(); 4];
        let targets = [1.0, 1.0, 1.0, 0.0];
        let model = LogisticRegression::fit(&rows, &targets, 1, options());
        let p = model.predict_proba(&Vec::new());
        assert!((p - 0.75).abs() < 1e-3, "p = {p}");
    }

    #[test]
    fn iteration_cap_is_respected() {
        let rows = vec![vec![(0, 1.0)], vec![(1, 1.0)]];
        let capped = SolverOptions {
            max_iterations: 3,
            tolerance: 0.0,
            ..options()
        };
        let model = LogisticRegression::fit(&rows, &[1.0, 0.0], 2, capped);
        assert_eq!(model.iterations(), 3);
        assert!(!model.converged());
    }

    #[test]
    fn fitting_is_deterministic() {
        let rows = vec![vec![(0, 0.3), (1, 0.9)], vec![(1, 1.0)], vec![(0, 1.0)]];
        let targets = [1.0, 0.0, 1.0];
        let a = LogisticRegression::fit(&rows, &targets, 2, options());
        let b = LogisticRegression::fit(&rows, &targets, 2, options());
        for row in &rows {
            assert_eq!(a.predict_proba(row), b.predict_proba(row));
        }
    }
}
