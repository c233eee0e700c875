// Maximum-likelihood fits of candidate families, ranked by KS p-value
//
// Parameters come from the u-analytics MLE fits; goodness of fit is a
// one-sample Kolmogorov-Smirnov test against the fitted CDF. Unlike scipy's
// `dist.fit`, no location parameter is estimated, so positive-support
// families are skipped for series with non-positive values.

use serde::Serialize;
use u_analytics::distribution::{
    fit_exponential, fit_gamma, fit_lognormal, fit_normal, fit_weibull, FitResult,
};
use u_numflow::distributions::{Exponential, GammaDistribution, LogNormal, Normal, Weibull};

/// One named parameter of a fitted family
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitParameter {
    pub name: String,
    pub value: f64,
}

/// A fitted family and how well it matches the series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionFit {
    pub distribution: String,
    pub parameters: Vec<FitParameter>,
    pub aic: f64,
    /// Largest distance between the empirical and fitted CDFs
    pub ks_statistic: f64,
    pub p_value: f64,
}

type Cdf = Box<dyn Fn(f64) -> f64>;

/// Fit every candidate family, best KS p-value first.
///
/// Families whose fit is undefined for the series (non-positive values,
/// no spread) are left out, so the result may be empty.
pub fn fit_distributions(values: &[f64]) -> Vec<DistributionFit> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    if sorted.first() == sorted.last() {
        tracing::debug!("Series has no spread, skipping distribution fits");
        return Vec::new();
    }

    let candidates = [
        fit_normal(values),
        fit_lognormal(values),
        fit_exponential(values),
        fit_gamma(values),
        fit_weibull(values),
    ];

    let mut fits: Vec<DistributionFit> = candidates
        .into_iter()
        .flatten()
        .filter_map(|fit| {
            let Some(cdf) = fitted_cdf(&fit) else {
                tracing::debug!("No CDF for fitted {} parameters", fit.distribution);
                return None;
            };
            let ks_statistic = ks_statistic(&sorted, &*cdf);
            Some(DistributionFit {
                p_value: kolmogorov_p_value(ks_statistic, sorted.len()),
                ks_statistic,
                aic: fit.aic,
                parameters: fit
                    .parameters
                    .into_iter()
                    .map(|(name, value)| FitParameter { name, value })
                    .collect(),
                distribution: fit.distribution,
            })
        })
        .collect();

    fits.sort_by(|a, b| b.p_value.total_cmp(&a.p_value));
    fits
}

fn parameter(fit: &FitResult, name: &str) -> Option<f64> {
    fit.parameters
        .iter()
        .find(|(n, _)| n == name)
        .map(|&(_, v)| v)
}

fn fitted_cdf(fit: &FitResult) -> Option<Cdf> {
    let p = |name| parameter(fit, name);
    let cdf: Cdf = match fit.distribution.as_str() {
        "Normal" => {
            let d = Normal::new(p("mu")?, p("sigma")?).ok()?;
            Box::new(move |x| d.cdf(x))
        }
        "LogNormal" => {
            let d = LogNormal::new(p("mu")?, p("sigma")?).ok()?;
            Box::new(move |x| d.cdf(x))
        }
        "Exponential" => {
            let d = Exponential::new(p("lambda")?).ok()?;
            Box::new(move |x| d.cdf(x))
        }
        "Gamma" => {
            let d = GammaDistribution::new(p("alpha")?, p("beta")?).ok()?;
            Box::new(move |x| d.cdf(x))
        }
        "Weibull" => {
            let d = Weibull::new(p("shape")?, p("scale")?).ok()?;
            Box::new(move |x| d.cdf(x))
        }
        _ => return None,
    };
    Some(cdf)
}

/// D = sup |F_n(x) - F(x)| over a sorted sample
fn ks_statistic(sorted: &[f64], cdf: &dyn Fn(f64) -> f64) -> f64 {
    let n = sorted.len() as f64;
    sorted.iter().enumerate().fold(0.0_f64, |d, (i, &x)| {
        let f = cdf(x);
        d.max(((i + 1) as f64 / n - f).abs())
            .max((i as f64 / n - f).abs())
    })
}

/// Asymptotic Kolmogorov p-value with the Stephens small-sample correction
fn kolmogorov_p_value(d: f64, n: usize) -> f64 {
    let sqrt_n = (n as f64).sqrt();
    let lambda = (sqrt_n + 0.12 + 0.11 / sqrt_n) * d;
    // the alternating series stalls near zero, where Q(λ) rounds to 1
    if lambda < 0.2 {
        return 1.0;
    }

    let mut p = 0.0;
    for k in 1..=100u32 {
        let sign = if k % 2 == 1 { 1.0 } else { -1.0 };
        let k = f64::from(k);
        let term = sign * (-2.0 * k * k * lambda * lambda).exp();
        p += term;
        if term.abs() < 1e-15 {
            break;
        }
    }
    (2.0 * p).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lognormal_sample() -> Vec<f64> {
        // exp of evenly spread normal scores around ln 20
        (1..=60)
            .map(|i| {
                let p = i as f64 / 61.0;
                let z = Normal::new(0.0, 1.0).unwrap().quantile(p).unwrap();
                (20.0_f64.ln() + 0.6 * z).exp()
            })
            .collect()
    }

    #[test]
    fn test_fits_ranked_by_p_value() {
        let fits = fit_distributions(&lognormal_sample());
        assert_eq!(fits.len(), 5);
        assert!(fits.windows(2).all(|w| w[0].p_value >= w[1].p_value));
        assert_eq!(fits[0].distribution, "LogNormal");
        assert!(fits[0].ks_statistic < 0.05);
        assert!(fits.iter().all(|f| (0.0..=1.0).contains(&f.p_value)));
    }

    #[test]
    fn test_lognormal_parameters_recovered() {
        let fits = fit_distributions(&lognormal_sample());
        let lognormal = fits
            .iter()
            .find(|f| f.distribution == "LogNormal")
            .unwrap();
        assert_eq!(lognormal.parameters[0].name, "mu");
        assert!((lognormal.parameters[0].value - 20.0_f64.ln()).abs() < 0.05);
        assert!((lognormal.parameters[1].value - 0.6).abs() < 0.05);
    }

    #[test]
    fn test_non_positive_series_keeps_normal_only() {
        let fits = fit_distributions(&[-3.0, -1.0, 0.0, 1.0, 2.5, 4.0, 5.0]);
        assert_eq!(fits.len(), 1);
        assert_eq!(fits[0].distribution, "Normal");
    }

    #[test]
    fn test_constant_series_has_no_fits() {
        assert!(fit_distributions(&[7.0; 12]).is_empty());
    }

    #[test]
    fn test_ks_statistic_exact_cdf() {
        // uniform points at (i + 0.5) / n against the uniform CDF
        let sorted: Vec<f64> = (0..10).map(|i| (i as f64 + 0.5) / 10.0).collect();
        let d = ks_statistic(&sorted, &|x: f64| x.clamp(0.0, 1.0));
        assert!((d - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_kolmogorov_p_value_bounds() {
        assert_eq!(kolmogorov_p_value(0.0, 50), 1.0);
        assert!(kolmogorov_p_value(0.5, 50) < 1e-6);
        assert!(kolmogorov_p_value(0.1, 50) > kolmogorov_p_value(0.2, 50));
    }
}
