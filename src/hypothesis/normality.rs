// Shapiro-Wilk normality test, Royston's approximation (AS R94).
//
// W = (sum a_i * x_(i))^2 / sum (x_i - mean)^2 with coefficients derived
// from expected normal order statistics (Blom), then a log-normal
// transformation of 1 - W to a z-score for the p-value. Valid for
// n = 3..=5000, which covers the group sizes this crate accepts.
//
// References:
// - Shapiro & Wilk (1965), Biometrika 52.
// - Royston (1992), Statistics and Computing 2; Royston (1995), AS R94.

use super::{check_finite, standard_normal_cdf, StatError};
use statrs::function::erf::erf_inv;

/// W statistic and p-value of a Shapiro-Wilk test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapiroWilk {
    /// 0 < W <= 1; values close to 1 are consistent with normality.
    pub w: f64,
    /// Small values reject the null hypothesis of normality.
    pub p_value: f64,
}

const MIN_N: usize = 3;
const MAX_N: usize = 5000;

// Royston polynomial coefficients, low order first.
const C1: [f64; 6] = [0.0, 0.221_157, -0.147_981, -2.071_19, 4.434_685, -2.706_056];
const C2: [f64; 6] = [0.0, 0.042_981, -0.293_762, -1.752_461, 5.682_633, -3.582_633];
const C3: [f64; 4] = [0.544, -0.399_78, 0.025_054, -6.714e-4];
const C4: [f64; 4] = [1.382_2, -0.778_57, 0.062_767, -0.002_032_2];
const C5: [f64; 4] = [-1.586_1, -0.310_82, -0.083_751, 0.003_891_5];
const C6: [f64; 3] = [-0.480_3, -0.082_676, 0.003_030_2];
const G: [f64; 2] = [-2.273, 0.459];

/// Test a sample against the null hypothesis of normality.
///
/// Returns `StatError` for n outside 3..=5000, non-finite values, or an
/// all-identical sample (the statistic is undefined without spread).
pub fn shapiro_wilk(values: &[f64]) -> Result<ShapiroWilk, StatError> {
    let n = values.len();
    if n < MIN_N {
        return Err(StatError::TooFewValues { min: MIN_N, got: n });
    }
    if n > MAX_N {
        return Err(StatError::TooManyValues { max: MAX_N, got: n });
    }
    check_finite(values)?;

    let mut x = values.to_vec();
    x.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    if x[n - 1] - x[0] < 1e-300 {
        return Err(StatError::Degenerate("all values identical".into()));
    }

    if n == 3 {
        return exact_n3(&x);
    }

    let half = n / 2;
    let a = coefficients(n, half)?;
    let w = w_statistic(&x, &a, n, half)?;
    let p_value = p_value_from_w(w, n);

    Ok(ShapiroWilk {
        w,
        p_value: p_value.clamp(0.0, 1.0),
    })
}

// n = 3 has a closed form: a = (1/sqrt(2), 0, -1/sqrt(2)) and
// p = 1 - (6/pi) * arccos(sqrt(W)).
fn exact_n3(x: &[f64]) -> Result<ShapiroWilk, StatError> {
    let mean = (x[0] + x[1] + x[2]) / 3.0;
    let ss: f64 = x.iter().map(|&v| (v - mean).powi(2)).sum();
    if ss < 1e-300 {
        return Err(StatError::Degenerate("zero sum of squares".into()));
    }

    let numerator = std::f64::consts::FRAC_1_SQRT_2 * (x[2] - x[0]);
    let w = ((numerator * numerator) / ss).clamp(0.75, 1.0);
    let p = 1.0 - (6.0 / std::f64::consts::PI) * w.sqrt().acos();

    Ok(ShapiroWilk {
        w,
        p_value: p.clamp(0.0, 1.0),
    })
}

// Horner evaluation, coefficients ordered constant-term first.
fn poly(c: &[f64], x: f64) -> f64 {
    let mut acc = c[c.len() - 1];
    for &coef in c[..c.len() - 1].iter().rev() {
        acc = acc * x + coef;
    }
    acc
}

fn inverse_normal_cdf(p: f64) -> f64 {
    std::f64::consts::SQRT_2 * erf_inv(2.0 * p - 1.0)
}

// Blom-approximated expected order statistics, polynomial-corrected for
// the one (n <= 5) or two (n > 5) extreme coefficients.
fn coefficients(n: usize, half: usize) -> Result<Vec<f64>, StatError> {
    let nf = n as f64;
    let mut m = vec![0.0; half];
    let mut sum_m2 = 0.0;
    for (i, mi) in m.iter_mut().enumerate() {
        let p = (i as f64 + 1.0 - 0.375) / (nf + 0.25);
        *mi = inverse_normal_cdf(p);
        sum_m2 += *mi * *mi;
    }
    sum_m2 *= 2.0;
    let root_sum = sum_m2.sqrt();
    let rsn = 1.0 / nf.sqrt();

    let mut a = vec![0.0; half];
    let a1 = poly(&C1, rsn) - m[0] / root_sum;

    if n <= 5 {
        let numerator = sum_m2 - 2.0 * m[0] * m[0];
        let denominator = 1.0 - 2.0 * a1 * a1;
        if numerator <= 0.0 || denominator <= 0.0 {
            return Err(StatError::Distribution(
                "Shapiro-Wilk coefficient normalization failed".into(),
            ));
        }
        let scale = (numerator / denominator).sqrt();
        a[0] = a1;
        for i in 1..half {
            a[i] = -m[i] / scale;
        }
    } else {
        let a2 = poly(&C2, rsn) - m[1] / root_sum;
        let numerator = sum_m2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1];
        let denominator = 1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2;
        if numerator <= 0.0 || denominator <= 0.0 {
            return Err(StatError::Distribution(
                "Shapiro-Wilk coefficient normalization failed".into(),
            ));
        }
        let scale = (numerator / denominator).sqrt();
        a[0] = a1;
        a[1] = a2;
        for i in 2..half {
            a[i] = -m[i] / scale;
        }
    }

    Ok(a)
}

fn w_statistic(x: &[f64], a: &[f64], n: usize, half: usize) -> Result<f64, StatError> {
    let mut weighted_range = 0.0;
    for i in 0..half {
        weighted_range += a[i] * (x[n - 1 - i] - x[i]);
    }

    let mean = x.iter().sum::<f64>() / n as f64;
    let ss: f64 = x.iter().map(|&v| (v - mean).powi(2)).sum();
    if ss < 1e-300 {
        return Err(StatError::Degenerate("zero sum of squares".into()));
    }

    let w = (weighted_range * weighted_range) / ss;
    if !(0.0..=1.0 + 1e-10).contains(&w) {
        return Err(StatError::Distribution(format!(
            "W statistic out of range: {w}"
        )));
    }
    Ok(w.min(1.0))
}

// Royston's transformation of W to an upper-tail z-score.
fn p_value_from_w(w: f64, n: usize) -> f64 {
    let nf = n as f64;
    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return 1.0;
    }
    let y = w1.ln();

    if n <= 11 {
        let gamma = poly(&G, nf);
        if y >= gamma {
            return 0.0;
        }
        let y2 = -(gamma - y).ln();
        let location = poly(&C3, nf);
        let scale = poly(&C4, nf).exp();
        if scale < 1e-300 {
            return 0.0;
        }
        1.0 - standard_normal_cdf((y2 - location) / scale)
    } else {
        let log_n = nf.ln();
        let location = poly(&C5, log_n);
        let scale = poly(&C6, log_n).exp();
        if scale < 1e-300 {
            return 0.0;
        }
        1.0 - standard_normal_cdf((y - location) / scale)
    }
}
