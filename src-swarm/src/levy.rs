//! Heavy-tailed step sampler for global pollination (Mantegna's algorithm)

use std::f64::consts::PI;

use ndarray::Array1;
use rand::Rng;
use rand_distr::{Distribution, Normal, NormalError};

use crate::{Result, SwarmError};

/// Gamma function via the Lanczos approximation (g = 7, n = 9)
pub(crate) fn gamma(z: f64) -> f64 {
    const G: f64 = 7.0;
    const COEF: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];
    if z < 0.5 {
        // reflection: Γ(z) Γ(1 - z) = π / sin(πz)
        PI / ((PI * z).sin() * gamma(1.0 - z))
    } else {
        let z = z - 1.0;
        let mut x = COEF[0];
        for (i, &c) in COEF.iter().enumerate().skip(1) {
            x += c / (z + i as f64);
        }
        let t = z + G + 0.5;
        (2.0 * PI).sqrt() * t.powf(z + 0.5) * (-t).exp() * x
    }
}

/// Draws `scale * u / |v|^(1/λ)` with `u ~ N(0, σ_u²)`, `v ~ N(0, 1)`
#[derive(Debug, Clone)]
pub struct LevySampler {
    exponent: f64,
    scale: f64,
    sigma_u: f64,
    u: Normal<f64>,
    v: Normal<f64>,
}

impl LevySampler {
    pub fn new(exponent: f64, scale: f64) -> Result<Self> {
        if !(exponent > 0.0 && exponent <= 2.0) {
            return Err(SwarmError::InvalidCoefficient { name: "levy_exponent", value: exponent });
        }
        let sigma_u = Self::mantegna_sigma(exponent);
        let invalid = |_: NormalError| SwarmError::InvalidCoefficient {
            name: "levy_exponent",
            value: exponent,
        };
        let u = Normal::new(0.0, sigma_u).map_err(invalid)?;
        let v = Normal::new(0.0, 1.0).map_err(invalid)?;
        Ok(Self { exponent, scale, sigma_u, u, v })
    }

    /// `σ_u = (Γ(1+λ) sin(πλ/2) / (Γ((1+λ)/2) λ 2^((λ-1)/2)))^(1/λ)`
    pub fn mantegna_sigma(lambda: f64) -> f64 {
        let num = gamma(1.0 + lambda) * (PI * lambda / 2.0).sin();
        let den = gamma((1.0 + lambda) / 2.0) * lambda * 2f64.powf((lambda - 1.0) / 2.0);
        (num / den).powf(1.0 / lambda)
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    pub fn sigma_u(&self) -> f64 {
        self.sigma_u
    }

    /// One scalar step
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u = self.u.sample(rng);
        let v = self.v.sample(rng);
        self.scale * u / v.abs().powf(1.0 / self.exponent)
    }

    /// One independent step per component
    pub fn sample_vec<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array1<f64> {
        Array1::from_iter((0..n).map(|_| self.sample(rng)))
    }
}
