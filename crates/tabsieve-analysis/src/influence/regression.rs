//! Ordinary least squares with leverage, and Cook's distance.
//!
//! D_i = e_i² / (p · MSE) · h_ii / (1 − h_ii)²
//! where p is the rank of the design, MSE = SSE / (n − p) and h_ii is the
//! i-th diagonal of the hat matrix.

use nalgebra::{DMatrix, DVector, SVD};
use thiserror::Error;

use tabsieve_core::types::FeatureMatrix;

/// Singular values at or below this fraction of the largest are treated as zero.
const RANK_TOLERANCE: f64 = 1e-10;
/// Residual variance at or below this fraction of the mean squared response is a perfect fit.
const RESIDUAL_TOLERANCE: f64 = 1e-12;
/// Leverage this close to 1 yields a zero distance instead of a division blow-up.
const LEVERAGE_TOLERANCE: f64 = 1e-12;

/// Why a single regression could not be used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("design matrix has no usable rank")]
    Singular,

    #[error("regression fits exactly; residual variance is zero")]
    PerfectFit,

    #[error("{n_records} records cannot fit {n_params} parameters")]
    Underdetermined { n_records: usize, n_params: usize },
}

/// Residuals and leverage of a fitted linear model.
///
/// `n_params` is the numerical rank of the design, which is below the column
/// count when predictors are constant or collinear.
#[derive(Debug, Clone)]
pub struct RegressionFit {
    pub coefficients: Vec<f64>,
    pub residuals: Vec<f64>,
    pub leverage: Vec<f64>,
    pub mse: f64,
    pub n_params: usize,
}

impl RegressionFit {
    /// Cook's distance of every observation.
    pub fn cooks_distance(&self) -> Vec<f64> {
        let scale = self.n_params as f64 * self.mse;
        self.residuals
            .iter()
            .zip(&self.leverage)
            .map(|(&e, &h)| {
                let complement = 1.0 - h;
                if complement < LEVERAGE_TOLERANCE {
                    return 0.0;
                }
                (e * e / scale) * h / (complement * complement)
            })
            .collect()
    }
}

/// Design matrix regressing column `target` on every other column plus an intercept.
pub fn design_for(matrix: &FeatureMatrix, target: usize) -> (DMatrix<f64>, DVector<f64>) {
    let n = matrix.n_rows();
    let p = matrix.n_cols();
    let design = DMatrix::from_fn(n, p, |i, j| {
        if j == 0 {
            1.0
        } else {
            // skip the target column
            let col = if j <= target { j - 1 } else { j };
            matrix.value(i, col)
        }
    });
    let response = DVector::from_fn(n, |i, _| matrix.value(i, target));
    (design, response)
}

/// Minimum-norm least squares fit of `response ~ design` through a thin SVD.
///
/// Directions with negligible singular values are dropped, so constant or
/// collinear predictors reduce the rank instead of failing the fit.
pub fn fit_ols(design: &DMatrix<f64>, response: &DVector<f64>) -> Result<RegressionFit, FitError> {
    let (n, p) = design.shape();
    if n <= p {
        return Err(FitError::Underdetermined {
            n_records: n,
            n_params: p,
        });
    }

    let svd = SVD::try_new(design.clone(), true, true, f64::EPSILON, 0).ok_or(FitError::Singular)?;
    let (u, v_t) = match (&svd.u, &svd.v_t) {
        (Some(u), Some(v_t)) => (u, v_t),
        _ => return Err(FitError::Singular),
    };
    let sigma = &svd.singular_values;
    let largest = sigma.iter().copied().fold(0.0_f64, f64::max);
    let retained: Vec<usize> = (0..sigma.len())
        .filter(|&j| sigma[j] > RANK_TOLERANCE * largest)
        .collect();
    if retained.is_empty() {
        return Err(FitError::Singular);
    }
    let rank = retained.len();

    // beta = Σ_j v_j (u_jᵀ y) / σ_j over the retained directions.
    let mut beta = DVector::<f64>::zeros(p);
    for &j in &retained {
        let weight = u.column(j).dot(response) / sigma[j];
        beta.axpy(weight, &v_t.row(j).transpose(), 1.0);
    }

    let fitted = design * &beta;
    let residuals: Vec<f64> = (response - fitted).iter().copied().collect();

    let sse: f64 = residuals.iter().map(|e| e * e).sum();
    let mse = sse / (n - rank) as f64;
    let scale = response.norm_squared() / n as f64;
    if !mse.is_finite() || mse <= RESIDUAL_TOLERANCE * scale.max(f64::MIN_POSITIVE) {
        return Err(FitError::PerfectFit);
    }

    // h_ii = Σ_j U_ij² over the retained left singular vectors.
    let leverage = (0..n)
        .map(|i| retained.iter().map(|&j| u[(i, j)] * u[(i, j)]).sum())
        .collect();

    Ok(RegressionFit {
        coefficients: beta.iter().copied().collect(),
        residuals,
        leverage,
        mse,
        n_params: rank,
    })
}
