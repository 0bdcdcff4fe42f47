//! Sample statistics for per-iteration scores.

use serde::{Deserialize, Serialize};

/// Summary of one benchmark's samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub stddev: f64,
    /// Half-width of the 99.9% confidence interval around `mean`.
    /// `None` with fewer than two samples.
    pub error: Option<f64>,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    /// Summarise `samples`. Returns `None` when there are none.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        let count = samples.len();
        if count == 0 {
            return None;
        }
        let n = count as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let (stddev, error) = if count > 1 {
            let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n - 1.0);
            let sd = var.sqrt();
            (sd, Some(t_critical_999(count - 1) * sd / n.sqrt()))
        } else {
            (0.0, None)
        };

        Some(Self {
            count,
            mean,
            stddev,
            error,
            min,
            max,
        })
    }
}

/// Two-sided 99.9% Student t critical value for `df` degrees of freedom.
pub fn t_critical_999(df: usize) -> f64 {
    const TABLE: [f64; 30] = [
        636.619, 31.599, 12.924, 8.610, 6.869, 5.959, 5.408, 5.041, 4.781, 4.587, 4.437, 4.318,
        4.221, 4.140, 4.073, 4.015, 3.965, 3.922, 3.883, 3.850, 3.819, 3.792, 3.768, 3.745, 3.725,
        3.707, 3.690, 3.674, 3.659, 3.646,
    ];
    match df {
        0 => f64::NAN,
        1..=30 => TABLE[df - 1],
        31..=40 => 3.551,
        41..=60 => 3.460,
        61..=120 => 3.373,
        _ => 3.291,
    }
}
