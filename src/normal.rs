//! Cumulative standard-normal lookup table.
//!
//! Built once per process by Riemann integration of the standard-normal
//! density, then used read-only by the confidence solvers and the
//! per-equity statistics engine.

/// Half-width of the table, in standard deviations.
pub const SIGMAS: usize = 3;

/// Table resolution: entries per standard deviation.
pub const STEPS_PER_SIGMA: usize = 1000;

const TABLE_LEN: usize = SIGMAS * STEPS_PER_SIGMA;

/// Precomputed cumulative standard-normal distribution over `[0, SIGMAS]`.
///
/// `table[i]` holds `Φ(i / STEPS_PER_SIGMA)`. The negative half-line is
/// never stored; [`NormalTable::cdf`] reflects it through `1 − Φ(−x)`.
#[derive(Debug)]
pub struct NormalTable {
    table: Vec<f64>,
}

impl NormalTable {
    /// Build the table by cumulative Riemann integration of the standard
    /// normal density, starting from `Φ(0) = 0.5`.
    pub fn build() -> Self {
        let step = 1.0 / STEPS_PER_SIGMA as f64;
        let mut table = Vec::with_capacity(TABLE_LEN);
        let mut cumulative = 0.5;
        table.push(cumulative);
        for i in 1..TABLE_LEN {
            let x = (i as f64 - 0.5) * step;
            let density = standard_normal_density(x);
            cumulative += density * step;
            table.push(cumulative.min(1.0));
        }
        Self { table }
    }

    /// Cumulative standard-normal `Φ(x)`, saturating to `1.0` for
    /// `x ≥ SIGMAS` (and to `0.0` for `x ≤ -SIGMAS`).
    pub fn cdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 1.0 - self.cdf(-x);
        }
        if x >= SIGMAS as f64 {
            return 1.0;
        }
        let idx = (x * STEPS_PER_SIGMA as f64) as usize;
        self.table[idx.min(TABLE_LEN - 1)]
    }

    /// `Φ` sampled at a table index directly, used by the bisection solvers
    /// to avoid repeated float-to-index conversion.
    pub fn cdf_at(&self, index: usize) -> f64 {
        self.table[index.min(TABLE_LEN - 1)]
    }

    /// Number of entries in the table (`SIGMAS * STEPS_PER_SIGMA`).
    pub fn len(&self) -> usize {
        TABLE_LEN
    }

    /// Always `false`: the table is a fixed-size lookup built at construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Error function via the identity `erf(n) = 2·(Φ(n·√2) − 0.5)`.
    pub fn erf(&self, n: f64) -> f64 {
        2.0 * (self.cdf(n * std::f64::consts::SQRT_2) - 0.5)
    }
}

/// Returns the process-wide shared table, built on first access.
pub fn shared() -> &'static NormalTable {
    static TABLE: std::sync::OnceLock<NormalTable> = std::sync::OnceLock::new();
    TABLE.get_or_init(NormalTable::build)
}

fn standard_normal_density(x: f64) -> f64 {
    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}
