//! Bremsstrahlung spectral shape of the central X-ray source.

use crate::constants::{BOLTZMANN, KEV, PLANCK};

/// Integration limits for the bolometric luminosity, in units of kT/h.
const TOTAL_BAND_KT: (f64, f64) = (1.0e-4, 100.0);

const SIMPSON_INTERVALS: usize = 2000;

/// Unnormalised spectral shape `freq^alpha * exp(-h freq / k T)`.
pub fn brem(freq: f64, t_x: f64, alpha: f64) -> f64 {
    freq.powf(alpha) * (-PLANCK * freq / BOLTZMANN / t_x).exp()
}

/// Composite Simpson rule in log space; `f` must be smooth in ln(x).
fn integrate_log(f: impl Fn(f64) -> f64, lo: f64, hi: f64) -> f64 {
    let (a, b) = (lo.ln(), hi.ln());
    let h = (b - a) / SIMPSON_INTERVALS as f64;
    let g = |u: f64| {
        let x = u.exp();
        f(x) * x
    };

    let mut sum = g(a) + g(b);
    for k in 1..SIMPSON_INTERVALS {
        let weight = if k % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * g(a + k as f64 * h);
    }
    sum * h / 3.0
}

/// Fraction of the bremsstrahlung luminosity emitted between two photon
/// energies given in keV.
pub fn band_fraction(t_x: f64, alpha: f64, lo_kev: f64, hi_kev: f64) -> f64 {
    let kt_over_h = BOLTZMANN * t_x / PLANCK;
    let spectrum = |freq: f64| brem(freq, t_x, alpha);

    let total = integrate_log(
        spectrum,
        TOTAL_BAND_KT.0 * kt_over_h,
        TOTAL_BAND_KT.1 * kt_over_h,
    );
    let band = integrate_log(spectrum, lo_kev * KEV / PLANCK, hi_kev * KEV / PLANCK);
    band / total
}

/// 2-10 keV luminosity of a source with bolometric luminosity `l_x`.
pub fn luminosity_2_10(l_x: f64, t_x: f64, alpha: f64) -> f64 {
    l_x * band_fraction(t_x, alpha, 2.0, 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brem_shape() {
        let t_x = 5.6e7;
        let freq = BOLTZMANN * t_x / PLANCK;
        assert!((brem(freq, t_x, 0.0) - (-1.0f64).exp()).abs() < 1e-12);
        assert!(brem(2.0 * freq, t_x, 0.0) < brem(freq, t_x, 0.0));
    }

    #[test]
    fn test_flat_spectrum_band_fraction_matches_analytic() {
        let t_x = 5.6e7;
        let kt_kev = BOLTZMANN * t_x / KEV;
        let expected = (-2.0 / kt_kev).exp() - (-10.0 / kt_kev).exp();
        let fraction = band_fraction(t_x, 0.0, 2.0, 10.0);
        assert!((fraction - expected).abs() < 1e-4, "{} vs {}", fraction, expected);
    }

    #[test]
    fn test_luminosity_scales_linearly() {
        let l1 = luminosity_2_10(1.0e43, 5.6e7, -0.5);
        let l2 = luminosity_2_10(2.0e43, 5.6e7, -0.5);
        assert!(l1 > 0.0 && l1 < 1.0e43);
        assert!((l2 / l1 - 2.0).abs() < 1e-12);
    }
}
