//! The λ(η) transformation and the ε₁, ε₂, ε₃ correction terms of the
//! uniform asymptotic inversion for large shape parameters.
//!
//! With x = aλ, the incomplete gamma ratios satisfy
//! Q(a, x) ≈ ½ erfc(η √(a/2)) where η²/2 = λ − 1 − ln λ.
//! Inverting erfc gives η₀; the εₖ terms correct η₀ in powers of 1/a.

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Relative tolerance of the fixed-point refinement in [`lambdaeta`].
const LAMBDA_TOL: f64 = 1e-8;

/// Cap on fixed-point rounds; convergence normally takes a handful.
const LAMBDA_MAX_ITER: usize = 100;

/// Solve η²/2 = λ − 1 − ln λ for the positive λ with sign(λ − 1) = sign(η).
///
/// Seeds λ from a series in e^{−1−η²/2} (η < −1), a Taylor series about
/// λ = 1 (|η| < 1), or an asymptotic expansion in ln(1 + η²/2) (η ≥ 1), then
/// refines by λ ← λ(s + ln λ)/(λ − 1) for η in (−3.5, −0.03) ∪ (0.03, 40).
/// Outside those intervals the expansions are already accurate.
///
/// # Example
///
/// ```
/// use gammaincinv::inverse::lambdaeta;
///
/// let eta = 1.5_f64;
/// let la = lambdaeta(eta);
/// assert!((la - 1.0 - la.ln() - 0.5 * eta * eta).abs() < 1e-12);
/// ```
pub fn lambdaeta(eta: f64) -> f64 {
    let s = eta * eta * 0.5;

    let mut la = if eta == 0.0 {
        1.0
    } else if eta < -1.0 {
        let r = (-1.0 - s).exp();
        const AK: [f64; 6] = [
            1.0,
            1.0,
            1.5,
            2.66666666666666666666666666667,
            5.20833333333333333333333333333,
            10.8,
        ];
        r * (AK[0] + r * (AK[1] + r * (AK[2] + r * (AK[3] + r * (AK[4] + r * AK[5])))))
    } else if eta < 1.0 {
        const AK: [f64; 6] = [
            1.0,
            0.333333333333333333333333333333,
            0.0277777777777777777777777777778,
            -0.00370370370370370370370370370370,
            0.000231481481481481481481481481481,
            0.0000587889476778365667254556143445,
        ];
        let r = eta;
        1.0 + r * (AK[0] + r * (AK[1] + r * (AK[2] + r * (AK[3] + r * (AK[4] + r * AK[5])))))
    } else {
        // λ − ln λ = 1 + s, expanded in r = 1 + s
        let r = 1.0 + s;
        let l = r.ln();
        let l2 = l * l;
        let l3 = l2 * l;
        let l4 = l3 * l;
        let l5 = l4 * l;
        let ak = [
            1.0,
            (2.0 - l) * 0.5,
            (-9.0 * l + 6.0 + 2.0 * l2) / 6.0,
            -(3.0 * l3 + 36.0 * l - 22.0 * l2 - 12.0) / 12.0,
            (60.0 + 350.0 * l2 - 300.0 * l - 125.0 * l3 + 12.0 * l4) / 60.0,
            -(-120.0 - 274.0 * l4 + 900.0 * l - 1700.0 * l2 + 1125.0 * l3 + 20.0 * l5) / 120.0,
        ];
        let r = 1.0 / r;
        (1.0 + s + l)
            + l * r * (ak[0] + r * (ak[1] + r * (ak[2] + r * (ak[3] + r * (ak[4] + r * ak[5])))))
    };

    if (eta > -3.5 && eta < -0.03) || (eta > 0.03 && eta < 40.0) {
        for _ in 0..LAMBDA_MAX_ITER {
            let prev = la;
            la = prev * (s + prev.ln()) / (prev - 1.0);
            if (prev / la - 1.0).abs() <= LAMBDA_TOL {
                break;
            }
        }
    }
    la
}

/// (a₀ + a₁x + … + a₄x⁴) / (b₀ + b₁x + … + b₄x⁴)
#[inline]
fn ratfun(x: f64, ak: &[f64; 5], bk: &[f64; 5]) -> f64 {
    let p = ak[0] + x * (ak[1] + x * (ak[2] + x * (ak[3] + x * ak[4])));
    let q = bk[0] + x * (bk[1] + x * (bk[2] + x * (bk[3] + x * bk[4])));
    p / q
}

/// First-order correction ε₁(η) = ln(η / (λ − 1)) / η.
pub(crate) fn eps1(eta: f64) -> f64 {
    if eta.abs() < 1.0 {
        const AK: [f64; 5] = [
            -3.333333333438e-1,
            -2.070740359969e-1,
            -5.041806657154e-2,
            -4.923635739372e-3,
            -4.293658292782e-5,
        ];
        const BK: [f64; 5] = [
            1.000000000000e+0,
            7.045554412463e-1,
            2.118190062224e-1,
            3.048648397436e-2,
            1.605037988091e-3,
        ];
        ratfun(eta, &AK, &BK)
    } else {
        let la = lambdaeta(eta);
        (eta / (la - 1.0)).ln() / eta
    }
}

/// Second-order correction ε₂(η).
pub(crate) fn eps2(eta: f64) -> f64 {
    if eta < -5.0 {
        let x = eta * eta;
        let lnmeta = (-eta).ln();
        (12.0 - x - 6.0 * (lnmeta * lnmeta)) / (12.0 * x * eta)
    } else if eta < -2.0 {
        const AK: [f64; 5] = [
            -1.72847633523e-2,
            -1.59372646475e-2,
            -4.64910887221e-3,
            -6.06834887760e-4,
            -6.14830384279e-6,
        ];
        const BK: [f64; 5] = [
            1.00000000000e+0,
            7.64050615669e-1,
            2.97143406325e-1,
            5.79490176079e-2,
            5.74558524851e-3,
        ];
        ratfun(eta, &AK, &BK)
    } else if eta < 2.0 {
        const AK: [f64; 5] = [
            -1.72839517431e-2,
            -1.46362417966e-2,
            -3.57406772616e-3,
            -3.91032032692e-4,
            2.49634036069e-6,
        ];
        const BK: [f64; 5] = [
            1.00000000000e+0,
            6.90560400696e-1,
            2.49962384741e-1,
            4.43843438769e-2,
            4.24073217211e-3,
        ];
        ratfun(eta, &AK, &BK)
    } else if eta < 1000.0 {
        const AK: [f64; 5] = [
            9.99944669480e-1,
            1.04649839762e+2,
            8.57204033806e+2,
            7.31901559577e+2,
            4.55174411671e+1,
        ];
        const BK: [f64; 5] = [
            1.00000000000e+0,
            1.04526456943e+2,
            8.23313447808e+2,
            3.11993802124e+3,
            3.97003311219e+3,
        ];
        ratfun(1.0 / eta, &AK, &BK) / (-12.0 * eta)
    } else {
        -1.0 / (12.0 * eta)
    }
}

/// Third-order correction ε₃(η).
pub(crate) fn eps3(eta: f64) -> f64 {
    if eta < -8.0 {
        let x = eta * eta;
        let y = (-eta).ln() / eta;
        (-30.0 + eta * y * (6.0 * x * y * y - 12.0 + x)) / (12.0 * eta * x * x)
    } else if eta < -4.0 {
        const AK: [f64; 5] = [
            4.95346498136e-2,
            2.99521337141e-2,
            6.88296911516e-3,
            5.12634846317e-4,
            -2.01411722031e-5,
        ];
        const BK: [f64; 5] = [
            1.00000000000e+0,
            7.59803615283e-1,
            2.61547111595e-1,
            4.64854522477e-2,
            4.03751193496e-3,
        ];
        ratfun(eta, &AK, &BK) / (eta * eta)
    } else if eta < -2.0 {
        const AK: [f64; 5] = [
            4.52313583942e-3,
            1.20744920113e-3,
            -7.89724156582e-5,
            -5.04476066942e-5,
            -5.35770949796e-6,
        ];
        const BK: [f64; 5] = [
            1.00000000000e+0,
            9.12203410349e-1,
            4.05368773071e-1,
            9.01638932349e-2,
            9.48935714996e-3,
        ];
        ratfun(eta, &AK, &BK)
    } else if eta < 2.0 {
        const AK: [f64; 5] = [
            4.39937562904e-3,
            4.87225670639e-4,
            -1.28470657374e-4,
            5.29110969589e-6,
            1.57166771750e-7,
        ];
        const BK: [f64; 5] = [
            1.00000000000e+0,
            7.94435257415e-1,
            3.33094721709e-1,
            7.03527806143e-2,
            8.06110846078e-3,
        ];
        ratfun(eta, &AK, &BK)
    } else if eta < 10.0 {
        const AK: [f64; 5] = [
            -1.14811912320e-3,
            -1.12850923276e-1,
            1.51623048511e+0,
            -2.18472031183e-1,
            7.30002451555e-2,
        ];
        const BK: [f64; 5] = [
            1.00000000000e+0,
            1.42482206905e+1,
            6.97360396285e+1,
            2.18938950816e+2,
            2.77067027185e+2,
        ];
        ratfun(1.0 / eta, &AK, &BK) / (eta * eta)
    } else if eta < 100.0 {
        const AK: [f64; 5] = [
            -1.45727889667e-4,
            -2.90806748131e-1,
            -1.33085045450e+1,
            1.99722374056e+2,
            -1.14311378756e+1,
        ];
        const BK: [f64; 5] = [
            1.00000000000e+0,
            1.39612587808e+2,
            2.18901116348e+3,
            7.11524019009e+3,
            4.55746081453e+4,
        ];
        ratfun(1.0 / eta, &AK, &BK) / (eta * eta)
    } else {
        -eta.ln() / (12.0 * eta * eta * eta)
    }
}
