//! The MOEX G-curve formula.
//!
//! The exchange models the continuously compounded zero-coupon yield, in
//! basis points, as a Nelson-Siegel base plus nine Gaussian bumps:
//!
//! ```text
//! G(t) = b1 + (b2 + b3) * (τ/t) * (1 - e^(-t/τ)) - b3 * e^(-t/τ) + s(t)
//! s(t) = Σ g_i * exp(-(t - a_i)² / b_i²)        i = 1..9
//! Y(t) = 10000 * (exp(G(t) / 10000) - 1)
//! ```
//!
//! where `τ = t1`. The bump centres `a_i` and widths `b_i` are fixed by the
//! exchange and do not depend on market data:
//!
//! ```text
//! a_1 = 0, a_2 = 0.6, a_n = a_{n-1} + a_2 * k^(n-2)
//! b_1 = a_2,          b_n = b_{n-1} * k                 k = 1.6
//! ```
//!
//! `Y(t)` is the annually compounded equivalent of `G(t)`, still in basis
//! points.

use once_cell::sync::Lazy;

use crate::parameters::CurveParameters;

/// Number of Gaussian bumps in the spline term.
pub const TERM_COUNT: usize = 9;

const A1: f64 = 0.0;
const A2: f64 = 0.6;
const K: f64 = 1.6;

/// Basis points per unit.
const BPS: f64 = 10_000.0;

static TERM_CENTRES: Lazy<[f64; TERM_COUNT]> = Lazy::new(|| {
    let mut a = [0.0; TERM_COUNT];
    a[0] = A1;
    a[1] = A2;
    let mut power = 1.0;
    for i in 2..TERM_COUNT {
        a[i] = a[i - 1] + a[1] * K.powf(power);
        power += 1.0;
    }
    a
});

static TERM_WIDTHS: Lazy<[f64; TERM_COUNT]> = Lazy::new(|| {
    let mut b = [0.0; TERM_COUNT];
    b[0] = A2;
    for i in 1..TERM_COUNT {
        b[i] = b[i - 1] * K;
    }
    b
});

/// Bump centres `a_1..a_9`, in years.
pub fn term_centres() -> &'static [f64; TERM_COUNT] {
    &TERM_CENTRES
}

/// Bump widths `b_1..b_9`, in years.
pub fn term_widths() -> &'static [f64; TERM_COUNT] {
    &TERM_WIDTHS
}

/// Spline correction `s(t)`.
pub fn spline(params: &CurveParameters, t: f64) -> f64 {
    params
        .spline_weights()
        .iter()
        .zip(TERM_CENTRES.iter())
        .zip(TERM_WIDTHS.iter())
        .map(|((g, a), b)| g * (-(t - a).powi(2) / b.powi(2)).exp())
        .sum()
}

/// Continuously compounded yield `G(t)` in basis points.
///
/// `t` must be non-zero; callers validate it.
pub fn continuous_yield(params: &CurveParameters, t: f64) -> f64 {
    let tau = params.t1();
    let decay = (-t / tau).exp();

    params.b1() + (params.b2() + params.b3()) * (tau / t) * (1.0 - decay)
        - params.b3() * decay
        + spline(params, t)
}

/// Annually compounded yield `Y(t)` in basis points.
pub fn annual_yield(params: &CurveParameters, t: f64) -> f64 {
    BPS * ((continuous_yield(params, t) / BPS).exp() - 1.0)
}
