//! End-to-end scenarios driving [`PortfolioEngine`] directly, one per
//! documented case.

use brownian_portfolio::{AllocationPolicy, DecisionMethod, EngineConfig, PortfolioEngine};

fn engine(cfg: EngineConfig) -> PortfolioEngine {
    PortfolioEngine::new(cfg).unwrap()
}

#[test]
fn two_constant_price_equities_never_invest() {
    let mut cfg = EngineConfig::default();
    cfg.decision_method = DecisionMethod::AvgRms;
    cfg.allocation_policy = AllocationPolicy::Equal;
    cfg.minimum_concurrent = 2;
    cfg.maximum_concurrent = 2;
    let mut engine = engine(cfg);

    for _ in 0..5 {
        engine.observe("A", 100.0);
        engine.observe("B", 100.0);
        let record = engine.end_interval("t".to_string());
        assert_eq!(record.portfolio_value, 1000.0);
        assert!(record.holdings.is_empty());
    }

    for eq in engine.registry().equities() {
        assert_eq!(eq.rms, 0.0);
        // A flat price series makes the decision formula saturate at 1.0
        // regardless of p, which sits right at (not above) the admission
        // threshold, so the equity is still never admitted.
        assert_eq!(eq.decision, 1.0);
    }
    assert!(engine.portfolio().held.is_empty());
    assert_eq!(engine.portfolio().portfolio_value, 1000.0);
}

#[test]
fn single_growing_equity_is_admitted_and_compounds() {
    let mut cfg = EngineConfig::default();
    cfg.minimum_concurrent = 1;
    cfg.maximum_concurrent = 1;
    let mut engine = engine(cfg);

    let prices = [100.0, 110.0, 121.0, 133.1, 146.41];
    let mut held_after_interval_2 = false;
    let mut decision_after_interval_2 = 0.0;
    for (i, &price) in prices.iter().enumerate() {
        engine.observe("ABC", price);
        engine.end_interval("t".to_string());
        if i == 1 {
            held_after_interval_2 = !engine.portfolio().held.is_empty();
            decision_after_interval_2 = engine.registry().get(0).decision;
        }
    }

    assert!(held_after_interval_2, "ABC should be admitted by interval 2");
    assert!(decision_after_interval_2 > 1.0);
    assert_eq!(engine.portfolio().held.len(), 1);

    let portfolio_value = engine.portfolio().portfolio_value;
    assert!((portfolio_value / 1000.0 - (1.1_f64).powi(3)).abs() < 1e-6);
}

#[test]
fn three_oscillating_equities_under_persistence_bound_streak_at_two() {
    let mut cfg = EngineConfig::default();
    cfg.decision_method = DecisionMethod::Persistence;
    let mut engine = engine(cfg);

    // A two-up/two-down zigzag around 100, phase-offset per ticker so none
    // of them move in lockstep. Each leg is exactly two steps long, so the
    // marginal-fraction sign never runs more than two intervals before
    // reversing.
    let signs = [1.0, 1.0, -1.0, -1.0];
    let tickers = ["X", "Y", "Z"];
    let mut prices = [100.0_f64; 3];
    let mut max_streak = [0u64; 3];
    for t in 0..100 {
        for (i, ticker) in tickers.iter().enumerate() {
            let phase = i; // rotates each ticker's zigzag out of lockstep
            let sign = signs[(t + phase) % signs.len()];
            prices[i] += sign;
            engine.observe(ticker, prices[i]);
        }
        engine.end_interval(t.to_string());
        for (i, streak) in max_streak.iter_mut().enumerate() {
            let eq = engine.registry().get(i);
            *streak = (*streak).max(eq.positive_streak.max(eq.negative_streak));
        }
    }

    for &m in &max_streak {
        assert!(m <= 2, "positive/negative streak exceeded 2: {m}");
    }

    for eq in engine.registry().equities() {
        // Exactly one of the two streak counters is active at a time.
        assert!(eq.positive_streak == 0 || eq.negative_streak == 0);
        let total_positive: u64 = eq.positive_histogram.iter().map(|b| b.count).sum();
        let total_negative: u64 = eq.negative_histogram.iter().map(|b| b.count).sum();
        assert!(total_positive > 0 && total_negative > 0);
        assert!(eq.decision.is_finite() && eq.decision >= 0.0);
    }
}

#[test]
fn random_method_holds_exactly_three_and_is_deterministic_given_seed() {
    let cfg = || {
        let mut cfg = EngineConfig::default();
        cfg.decision_method = DecisionMethod::Random;
        cfg.minimum_concurrent = 3;
        cfg.maximum_concurrent = 3;
        cfg.random_seed = 7;
        cfg
    };

    let run = |cfg: EngineConfig| {
        let mut engine = engine(cfg);
        let mut held_each_interval = Vec::new();
        for t in 0..50 {
            for n in 0..20 {
                let ticker = format!("T{n}");
                let price = 100.0 + (t * n) as f64 % 7.0;
                engine.observe(&ticker, price);
            }
            engine.end_interval(t.to_string());
            held_each_interval.push(engine.portfolio().held.clone());
        }
        held_each_interval
    };

    let first = run(cfg());
    let second = run(cfg());

    // The first interval can never admit anything: every equity still has
    // only one transaction at that point.
    for held in &first[1..] {
        assert_eq!(held.len(), 3);
    }
    assert_eq!(first, second);
}

#[test]
fn avg_rms_confidence_converges_toward_true_probability() {
    // A synthetic ±rms walk with a slight upward bias: true Shannon
    // probability ~0.51, rms ~0.02.
    let mut cfg = EngineConfig::default();
    cfg.decision_method = DecisionMethod::AvgRms;
    let mut engine = engine(cfg);

    let mut price = 100.0_f64;
    let mut state = 0x2545F4914F6CDD1Du64;
    let mut next_unit = || {
        // xorshift64*, deterministic and dependency-free.
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as f64 / (1u64 << 53) as f64
    };

    for t in 0..10_000 {
        let up = next_unit() < 0.51;
        price *= if up { 1.02 } else { 1.0 / 1.02 };
        engine.observe("ABC", price);
        engine.end_interval(t.to_string());
    }

    let eq = engine.registry().get(0);
    assert!(
        (eq.p_eff_ar - 0.51).abs() < 0.01,
        "p_eff_ar={}",
        eq.p_eff_ar
    );
}

#[test]
fn min_risk_favors_the_positive_drift_equity() {
    let mut cfg = EngineConfig::default();
    cfg.allocation_policy = AllocationPolicy::MinRisk;
    cfg.minimum_concurrent = 0;
    cfg.maximum_concurrent = 2;
    let mut engine = engine(cfg);

    let mut up_price = 100.0_f64;
    let mut down_price = 100.0_f64;
    for _ in 0..40 {
        up_price *= 1.05;
        down_price *= 0.999;
        engine.observe("UP", up_price);
        engine.observe("DOWN", down_price);
        engine.end_interval("t".to_string());
    }

    let held = &engine.portfolio().held;
    assert!(!held.is_empty());

    let up_idx = engine
        .registry()
        .equities()
        .iter()
        .position(|eq| eq.ticker == "UP")
        .unwrap();
    let down_idx = engine
        .registry()
        .equities()
        .iter()
        .position(|eq| eq.ticker == "DOWN")
        .unwrap();

    let up_capital = engine.registry().get(up_idx).capital;
    let down_capital = engine.registry().get(down_idx).capital;
    assert!(up_capital > down_capital);

    let total: f64 = held.iter().map(|&i| engine.registry().get(i).capital).sum();
    assert!((total - engine.portfolio().portfolio_value).abs() < 1e-6);
}
