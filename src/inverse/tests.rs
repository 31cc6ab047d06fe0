#[cfg(test)]
mod tests {
    use super::super::lambdaeta::{eps1, eps2, eps3};
    use super::super::regime::{self, Step};
    use super::super::*;
    use crate::special::{gamma_inc, gamma_inc_upper, SpecialError};

    fn approx_eq(a: f64, b: f64, tol: f64) {
        assert!(
            (a - b).abs() < tol,
            "approx_eq failed: {a} vs {b}, diff = {}, tol = {tol}",
            (a - b).abs()
        );
    }

    fn rel_eq(a: f64, b: f64, tol: f64) {
        let rel = (a / b - 1.0).abs();
        assert!(rel < tol, "rel_eq failed: {a} vs {b}, rel = {rel}, tol = {tol}");
    }

    fn detailed(p: f64, a: f64, tail: Tail) -> Inversion {
        solve_with(p, a, tail, &InverseSettings::default()).unwrap()
    }

    // =====================================================================
    // Endpoints and invalid input
    // =====================================================================

    #[test]
    fn lower_endpoints() {
        assert_eq!(lower(0.0, 3.0), 0.0);
        assert_eq!(lower(1.0, 3.0), f64::INFINITY);
    }

    #[test]
    fn upper_endpoints() {
        assert_eq!(upper(0.0, 3.0), f64::INFINITY);
        assert_eq!(upper(1.0, 3.0), 0.0);
    }

    #[test]
    fn endpoints_report_no_regime() {
        let inv = detailed(0.0, 2.0, Tail::Upper);
        assert_eq!(inv.regime, None);
        assert_eq!(inv.iterations, 0);
        assert_eq!(inv.exit, Exit::Exact);
    }

    #[test]
    fn invalid_probability_is_nan() {
        for &p in &[-0.1, 1.1, f64::NAN] {
            assert!(lower(p, 2.0).is_nan());
            assert!(upper(p, 2.0).is_nan());
        }
    }

    #[test]
    fn invalid_shape_is_nan() {
        for &a in &[0.0, -1.0, 1e-39, f64::NAN, f64::INFINITY] {
            assert!(lower(0.5, a).is_nan(), "a = {a}");
            assert!(upper(0.5, a).is_nan(), "a = {a}");
        }
    }

    #[test]
    fn invalid_input_is_domain_error() {
        let settings = InverseSettings::default();
        assert_eq!(
            solve_with(2.0, 1.0, Tail::Lower, &settings),
            Err(SpecialError::DomainError)
        );
        assert_eq!(
            solve_with(0.5, -2.0, Tail::Upper, &settings),
            Err(SpecialError::DomainError)
        );
    }

    // =====================================================================
    // Known roots
    // =====================================================================

    #[test]
    fn shape_ten_both_tails() {
        approx_eq(lower(0.3, 10.0), 8.132928242506392, 1e-12);
        approx_eq(lower(0.7, 10.0), 11.387272536823216, 1e-12);
        approx_eq(upper(0.3, 10.0), 11.387272536823216, 1e-12);
        approx_eq(upper(0.7, 10.0), 8.132928242506392, 1e-12);
    }

    #[test]
    fn shape_two_hundred() {
        rel_eq(lower(0.8, 200.0), 211.79475336207375, 1e-13);
        rel_eq(upper(0.8, 200.0), 188.01091541157214, 1e-13);
        rel_eq(lower(0.5, 200.0), 199.6667656124657, 1e-13);
    }

    #[test]
    fn very_large_shape() {
        let x = lower(0.3, 1.0e5);
        rel_eq(x, 99833.92863928514, 1e-12);
        rel_eq(gamma_inc(1.0e5, x).unwrap(), 0.3, 1e-12);
    }

    #[test]
    fn generic_solve_matches_entry_points() {
        assert_eq!(solve(0.25, 4.0, Tail::Lower), lower(0.25, 4.0));
        assert_eq!(solve(0.25, 4.0, Tail::Upper), upper(0.25, 4.0));
        assert_eq!(solve(0.25, 4.0, Tail::default()), lower(0.25, 4.0));
    }

    // =====================================================================
    // Regimes
    // =====================================================================

    #[test]
    fn unit_shape_is_exact() {
        let inv = detailed(0.3, 1.0, Tail::Lower);
        assert_eq!(inv.regime, Some(Regime::NearUnitShape));
        assert_eq!(inv.exit, Exit::Exact);
        assert_eq!(inv.iterations, 0);
        approx_eq(inv.x, -(0.7_f64.ln()), 1e-15);

        // upper tail: x = −ln q
        let inv = detailed(0.25, 1.0, Tail::Upper);
        assert_eq!(inv.exit, Exit::Exact);
        approx_eq(inv.x, -(0.25_f64.ln()), 1e-15);
    }

    #[test]
    fn near_unit_shape_is_refined() {
        let inv = detailed(1e-4, 1.0001, Tail::Lower);
        assert_eq!(inv.regime, Some(Regime::NearUnitShape));
        assert_eq!(inv.exit, Exit::Converged);
        rel_eq(inv.x, 1.0010137806711247e-4, 1e-12);

        let inv = detailed(0.999, 1.00005, Tail::Lower);
        assert_eq!(inv.regime, Some(Regime::NearUnitShape));
        rel_eq(gamma_inc(1.00005, inv.x).unwrap(), 0.999, 1e-13);
    }

    #[test]
    fn deep_upper_tail() {
        let inv = detailed(1e-35, 0.3, Tail::Upper);
        assert_eq!(inv.regime, Some(Regime::DeepUpperTail));
        assert_eq!(inv.exit, Exit::Converged);
        rel_eq(inv.x, 76.45003415288382, 1e-13);
        rel_eq(gamma_inc_upper(0.3, inv.x).unwrap(), 1e-35, 1e-12);
    }

    #[test]
    fn deep_upper_tail_overflow_returns_seed() {
        // 1/density at the seed exceeds the f32 range
        let inv = detailed(1e-300, 0.1, Tail::Upper);
        assert_eq!(inv.regime, Some(Regime::DeepUpperTail));
        assert_eq!(inv.exit, Exit::ExponentOverflow);
        assert_eq!(inv.iterations, 0);
        rel_eq(gamma_inc_upper(0.1, inv.x).unwrap(), 1e-300, 0.05);
    }

    #[test]
    fn deep_lower_tail() {
        let inv = detailed(1e-82, 100.0, Tail::Lower);
        assert_eq!(inv.regime, Some(Regime::DeepLowerTail));
        assert_eq!(inv.exit, Exit::ExponentOverflow);
        assert!(inv.warning().is_some());
        rel_eq(inv.x, 6.108852889569568, 1e-6);

        let inv = detailed(1e-200, 3.0, Tail::Lower);
        assert_eq!(inv.regime, Some(Regime::DeepLowerTail));
        rel_eq(gamma_inc(3.0, inv.x).unwrap(), 1e-200, 1e-10);
    }

    #[test]
    fn small_ratio() {
        let inv = detailed(0.01, 2.0, Tail::Lower);
        assert_eq!(inv.regime, Some(Regime::SmallRatio));
        assert_eq!(inv.exit, Exit::Converged);
        rel_eq(inv.x, 0.14855474025326595, 1e-13);
        rel_eq(gamma_inc(2.0, inv.x).unwrap(), 0.01, 1e-13);
    }

    #[test]
    fn tiny_shape_tiny_root() {
        // root near 5e-302: the third-order correction is not representable
        let inv = detailed(0.5, 1e-3, Tail::Lower);
        assert_eq!(inv.regime, Some(Regime::SmallRatio));
        assert_eq!(inv.exit, Exit::Converged);
        rel_eq(inv.x, 5.244206408272835e-302, 1e-10);
    }

    #[test]
    fn small_shape_upper_tail() {
        let inv = detailed(1e-4, 2.0, Tail::Upper);
        assert_eq!(inv.regime, Some(Regime::SmallShapeUpperTail));
        assert_eq!(inv.exit, Exit::Converged);
        approx_eq(inv.x, 11.756371222495419, 1e-11);
        rel_eq(gamma_inc_upper(2.0, inv.x).unwrap(), 1e-4, 1e-12);
    }

    #[test]
    fn near_median() {
        let inv = detailed(0.5, 20.0, Tail::Lower);
        assert_eq!(inv.regime, Some(Regime::NearMedian));
        approx_eq(inv.x, 19.667672423305667, 1e-11);

        let inv = detailed(0.5, 200.0, Tail::Upper);
        assert_eq!(inv.regime, Some(Regime::NearMedian));
        approx_eq(inv.x, 199.6667656124657, 1e-10);
    }

    #[test]
    fn small_shape() {
        let inv = detailed(0.9, 0.5, Tail::Lower);
        assert_eq!(inv.regime, Some(Regime::SmallShape));
        assert_eq!(inv.exit, Exit::Converged);
        approx_eq(inv.x, 1.3527717270477075, 1e-12);
    }

    #[test]
    fn asymptotic() {
        for &(p, a, tail) in &[
            (0.8, 20.0, Tail::Lower),
            (0.8, 20.0, Tail::Upper),
            (0.3, 10.0, Tail::Lower),
            (1e-4, 20.0, Tail::Lower),
            (1e-12, 50.0, Tail::Upper),
        ] {
            let inv = detailed(p, a, tail);
            assert_eq!(inv.regime, Some(Regime::Asymptotic), "p = {p}, a = {a}, {tail}");
            assert_eq!(inv.exit, Exit::Converged);
            let back = match tail {
                Tail::Lower => gamma_inc(a, inv.x).unwrap(),
                Tail::Upper => gamma_inc_upper(a, inv.x).unwrap(),
            };
            rel_eq(back, p, 1e-12);
        }
        approx_eq(lower(0.8, 20.0), 23.634268854580323, 1e-11);
        approx_eq(upper(0.8, 20.0), 16.172476318029467, 1e-11);
        approx_eq(lower(1e-4, 20.0), 7.441530325311766, 1e-11);
    }

    #[test]
    fn selector_order() {
        // both the deep-lower-tail and near-unit conditions hold
        let seed = regime::select(1.00005, 1e-90, 1.0).unwrap();
        assert_eq!(seed.regime, Regime::DeepLowerTail);
        let seed = regime::select(1.0, 1e-90, 1.0).unwrap();
        assert_eq!(seed.regime, Regime::NearUnitShape);
        assert_eq!(seed.step, Step::Exact);

        // a half-way probability with tiny a is still a small ratio
        let seed = regime::select(1e-3, 0.5, 0.5).unwrap();
        assert_eq!(seed.regime, Regime::SmallRatio);

        let seed = regime::select(2.0, 1.0 - 1e-4, 1e-4).unwrap();
        assert_eq!(seed.regime, Regime::SmallShapeUpperTail);
    }

    #[test]
    fn asymptotic_seed_is_close() {
        let seed = regime::select(10.0, 0.3, 0.7).unwrap();
        assert_eq!(seed.regime, Regime::Asymptotic);
        assert!(matches!(seed.step, Step::Derivative { .. }));
        rel_eq(seed.x0, 8.132928242506392, 1e-5);
    }

    // =====================================================================
    // Newton refinement
    // =====================================================================

    #[test]
    fn iteration_cap() {
        let settings = InverseSettings { tol: 2e-14, max_iter: 2 };
        let inv = solve_with(0.3, 10.0, Tail::Lower, &settings).unwrap();
        assert_eq!(inv.exit, Exit::MaxIterations);
        assert_eq!(inv.iterations, 1);
        // one third-order step is already close
        rel_eq(inv.x, 8.132928242506392, 1e-10);
        assert_eq!(inv.warning(), Some(Exit::MaxIterations));
    }

    #[test]
    fn negative_iterate_returns_seed() {
        // Q(1e-30, x) is flat in x, so the first step overshoots below 0
        let inv = detailed(1e-20, 1e-30, Tail::Upper);
        assert_eq!(inv.regime, Some(Regime::SmallShape));
        assert_eq!(inv.exit, Exit::NegativeIterate);
        assert_eq!(inv.iterations, 1);
        let seed = regime::select(1e-30, 1.0, 1e-20).unwrap();
        assert_eq!(seed.x0, 1.0);
        assert_eq!(inv.x, seed.x0);
        assert_eq!(inv.warning(), Some(Exit::NegativeIterate));
    }

    #[test]
    fn underflowed_root_is_converged() {
        for &(p, a) in &[(0.1, 1e-3), (0.2, 0.002)] {
            let inv = detailed(p, a, Tail::Lower);
            assert_eq!(inv.x, 0.0, "p = {p}, a = {a}");
            assert_eq!(inv.exit, Exit::Converged, "p = {p}, a = {a}");
            assert_eq!(inv.iterations, 1);
            assert_eq!(inv.warning(), None);
        }
    }

    #[test]
    fn converges_in_few_steps() {
        for &(p, a) in &[(0.3, 10.0), (0.01, 2.0), (0.9, 0.5), (0.5, 20.0)] {
            let inv = detailed(p, a, Tail::Lower);
            assert_eq!(inv.exit, Exit::Converged);
            assert!(inv.iterations <= 5, "p = {p}, a = {a}: {} steps", inv.iterations);
        }
    }

    #[test]
    fn loose_tolerance_stops_early() {
        let loose = InverseSettings { tol: 1e-6, max_iter: 35 };
        let inv = solve_with(0.9, 0.5, Tail::Lower, &loose).unwrap();
        let tight = detailed(0.9, 0.5, Tail::Lower);
        assert_eq!(inv.exit, Exit::Converged);
        assert!(inv.iterations <= tight.iterations);
    }

    // =====================================================================
    // Tail / Exit
    // =====================================================================

    #[test]
    fn tail_parse_and_display() {
        assert_eq!("lower".parse::<Tail>(), Ok(Tail::Lower));
        assert_eq!("upper".parse::<Tail>(), Ok(Tail::Upper));
        assert_eq!("Upper".parse::<Tail>(), Err(ParseTailError));
        assert_eq!("".parse::<Tail>(), Err(ParseTailError));

        for tail in [Tail::Lower, Tail::Upper] {
            assert_eq!(tail.to_string().parse::<Tail>(), Ok(tail));
        }
    }

    #[test]
    fn exit_warnings() {
        assert!(!Exit::Exact.is_warning());
        assert!(!Exit::Converged.is_warning());
        for exit in [
            Exit::MaxIterations,
            Exit::NegativeIterate,
            Exit::ExponentOverflow,
            Exit::SeedOverflow,
            Exit::NonFinite,
        ] {
            assert!(exit.is_warning());
            assert!(!exit.to_string().is_empty());
        }
    }

    // =====================================================================
    // lambdaeta / eps
    // =====================================================================

    #[test]
    fn lambdaeta_at_zero() {
        assert_eq!(lambdaeta(0.0), 1.0);
    }

    #[test]
    fn lambdaeta_solves_its_equation() {
        for &eta in &[-30.0, -5.0, -3.5, -1.0, -0.5, -0.03, 0.01, 0.5, 1.0, 3.0, 39.0, 40.0, 80.0, 200.0] {
            let la: f64 = lambdaeta(eta);
            let s = 0.5 * eta * eta;
            let residual = (la - 1.0 - la.ln() - s) / s;
            assert!(residual.abs() < 1e-10, "eta = {eta}: residual {residual}");
            assert_eq!(la > 1.0, eta > 0.0, "eta = {eta}: lambda {la}");
        }
    }

    #[test]
    fn eps_corrections_are_piecewise_continuous() {
        let h = 1e-9;
        for &eta in &[-1.0, 1.0] {
            approx_eq(eps1(eta - h), eps1(eta + h), 1e-9);
        }
        for &eta in &[-5.0, -2.0, 2.0, 1000.0] {
            approx_eq(eps2(eta - h), eps2(eta + h), 1e-6);
        }
        for &eta in &[-8.0, -4.0, -2.0, 2.0, 10.0] {
            approx_eq(eps3(eta - h), eps3(eta + h), 1e-7);
        }
    }

    #[test]
    fn eps1_at_zero() {
        approx_eq(eps1(0.0), -1.0 / 3.0, 1e-10);
    }
}
