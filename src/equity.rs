//! Per-equity streaming statistics: running sums, persistence histograms,
//! and the mean-reversion void counter.

use crate::normal::NormalTable;
use crate::solvers::{solve_avg, solve_avg_rms, solve_rms};

/// One bucket of a persistence histogram, indexed by `streak_length - 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistogramBucket {
    /// Number of times a streak reached this length.
    pub count: u64,
    /// Running sum of `|fraction|^(1/P_p_previous)` contributed at this length.
    pub sum_fraction_pow: f64,
}

/// Streaming state for a single tracked ticker.
#[derive(Debug, Clone)]
pub struct EquityState {
    /// Ticker symbol, fixed at construction.
    pub ticker: String,

    /// Most recently observed price.
    pub current_value: f64,
    /// Price at the previous accepted update, used to compute the next marginal fraction.
    pub last_value: f64,
    /// Price at construction time.
    pub start_value: f64,

    /// Number of price observations seen, including the seeding one.
    pub transactions: u64,
    /// Number of accepted marginal-increment updates.
    pub samples: u64,
    /// Signed mean-reversion counter: positive runs of above-model gains, negative of below.
    pub void_count: i64,

    /// Running sum of marginal fractions.
    pub sum_fraction: f64,
    /// Running sum of squared marginal fractions.
    pub sum_square_fraction: f64,
    /// Mean marginal fraction, clamped above at 1.0.
    pub avg: f64,
    /// Root-mean-square marginal fraction, clamped to `[0, 1]`.
    pub rms: f64,
    /// The marginal increment computed on the most recent accepted update;
    /// read by the index tracker, which runs after `last_value` has
    /// already rolled forward.
    pub last_fraction: f64,

    /// Length of the current run of positive marginal fractions.
    pub positive_streak: u64,
    /// Length of the current run of negative marginal fractions.
    pub negative_streak: u64,
    /// Price at the start of the current streak.
    pub streak_start_value: f64,
    /// Histogram of positive-streak lengths, indexed by `length - 1`.
    pub positive_histogram: Vec<HistogramBucket>,
    /// Histogram of negative-streak lengths, indexed by `length - 1`.
    pub negative_histogram: Vec<HistogramBucket>,

    /// Confidence from the combined avg/rms solver.
    pub p_ar: f64,
    /// Confidence from the avg-only solver.
    pub p_a: f64,
    /// Confidence from the rms-only solver.
    pub p_r: f64,
    /// Confidence from the void-count mean-reversion model.
    pub p_t: f64,
    /// Persistence confidence derived from the streak histograms.
    pub p_p: f64,
    /// Table index backing `p_ar`.
    pub c_ar: f64,
    /// Table index backing `p_a`.
    pub c_a: f64,
    /// Table index backing `p_r`.
    pub c_r: f64,
    /// Dataset-size-compensated `p_ar`.
    pub p_eff_ar: f64,
    /// Dataset-size-compensated `p_a`.
    pub p_eff_a: f64,
    /// Dataset-size-compensated `p_r`.
    pub p_eff_r: f64,
    /// Dataset-size compensation factor applied to raw confidences.
    pub p_comp: f64,
    /// Magnitude-rescaled root mean used by the persistence histogram.
    pub rootmean: f64,

    /// Decision score produced by the configured scoring method.
    pub decision: f64,
    /// Fraction of capital the configured allocation policy assigns to this equity.
    pub allocation_fraction: f64,

    /// Capital currently allocated to this equity.
    pub capital: f64,
    /// Cumulative growth relative to `start_value`.
    pub normalized_growth: f64,

    /// Whether a new price was observed during the current interval.
    pub current_interval_updated: bool,
    /// Number of consecutive intervals with an observed update.
    pub consecutive_updated_intervals: u64,
}

impl EquityState {
    /// Creates a new equity state seeded with its first observed price.
    pub fn new(ticker: impl Into<String>, price: f64) -> Self {
        Self {
            ticker: ticker.into(),
            current_value: price,
            last_value: price,
            start_value: price,
            transactions: 0,
            samples: 0,
            void_count: 0,
            sum_fraction: 0.0,
            sum_square_fraction: 0.0,
            avg: 0.0,
            rms: 0.0,
            last_fraction: 0.0,
            positive_streak: 0,
            negative_streak: 0,
            streak_start_value: price,
            positive_histogram: Vec::new(),
            negative_histogram: Vec::new(),
            p_ar: 0.5,
            p_a: 0.5,
            p_r: 0.5,
            p_t: 0.5,
            p_p: 0.5,
            c_ar: 0.5,
            c_a: 0.5,
            c_r: 0.5,
            p_eff_ar: 0.25,
            p_eff_a: 0.25,
            p_eff_r: 0.25,
            p_comp: 1.0,
            rootmean: 0.0,
            decision: 0.0,
            allocation_fraction: 0.0,
            capital: 0.0,
            normalized_growth: 1.0,
            current_interval_updated: true,
            consecutive_updated_intervals: 0,
        }
    }

    /// Records a within-interval price observation. Last price wins.
    pub fn observe_price(&mut self, price: f64) {
        self.current_value = price;
        self.current_interval_updated = true;
    }

    /// Runs the interval-end bookkeeping and statistics update for this
    /// equity, then rolls `current_value` into `last_value` for the next
    /// interval. Returns the clamped marginal increment, or `None` if the
    /// gating condition (§4.3) did not admit a statistics update this
    /// interval.
    pub fn update_statistics(
        &mut self,
        table: &NormalTable,
        max_marginal_increment: f64,
        stats_only_if_updated: bool,
    ) -> Option<f64> {
        self.transactions += 1;
        if self.current_interval_updated {
            self.consecutive_updated_intervals += 1;
        } else {
            self.consecutive_updated_intervals = 0;
        }

        let gated = self.transactions > 1
            && (!stats_only_if_updated
                || (self.current_interval_updated && self.consecutive_updated_intervals > 0));

        let result = if gated {
            let fraction = (self.current_value - self.last_value) / self.last_value;
            if fraction >= max_marginal_increment {
                None
            } else {
                self.apply_increment(table, fraction);
                Some(fraction)
            }
        } else {
            None
        };

        self.last_value = self.current_value;
        self.current_interval_updated = false;
        result
    }

    fn apply_increment(&mut self, table: &NormalTable, fraction: f64) {
        self.samples += 1;
        self.sum_fraction += fraction;
        self.sum_square_fraction += fraction * fraction;
        self.last_fraction = fraction;
        let samples = self.samples as f64;

        self.avg = (self.sum_fraction / samples).min(1.0);
        self.rms = (self.sum_square_fraction / samples).sqrt().clamp(0.0, 1.0);
        self.normalized_growth *= 1.0 + fraction;

        self.p_comp = 1.0 - 2.0 * (table.cdf(std::f64::consts::SQRT_2 / samples.sqrt()) - 0.5);

        let rms_out = solve_rms(table, self.rms, samples);
        let avg_out = solve_avg(table, self.avg, self.rms, samples);
        let avg_rms_out = solve_avg_rms(table, self.avg, self.rms, samples);
        self.p_r = rms_out.p;
        self.c_r = rms_out.c;
        self.p_eff_r = rms_out.p_eff;
        self.p_a = avg_out.p;
        self.c_a = avg_out.c;
        self.p_eff_a = avg_out.p_eff;
        self.p_ar = avg_rms_out.p;
        self.c_ar = avg_rms_out.c;
        self.p_eff_ar = avg_rms_out.p_eff;

        self.update_void_counter(table, samples);
        self.update_persistence(fraction);
    }

    fn update_void_counter(&mut self, table: &NormalTable, samples: f64) {
        let modeled_gain =
            ((1.0 + self.rms).powf(self.p_ar) * (1.0 - self.rms).powf(1.0 - self.p_ar))
                .powf(samples);

        let above = self.normalized_growth >= modeled_gain;
        if above {
            self.void_count = if self.void_count >= 0 {
                self.void_count + 1
            } else {
                1
            };
        } else {
            self.void_count = if self.void_count <= 0 {
                self.void_count - 1
            } else {
                -1
            };
        }

        let magnitude = (2.0 / (self.void_count.unsigned_abs() as f64 + 1.0)).sqrt();
        let base = 2.0 * (table.cdf(magnitude) - 0.5);
        self.p_t = if above { base } else { 1.0 - base }.clamp(0.0, 1.0);
    }

    fn update_persistence(&mut self, fraction: f64) {
        let previous_p_p = self.p_p;

        if fraction > 0.0 {
            self.positive_streak += 1;
            self.negative_streak = 0;
            if self.positive_streak == 1 {
                self.streak_start_value = self.last_value;
            }
        } else if fraction < 0.0 {
            self.negative_streak += 1;
            self.positive_streak = 0;
            if self.negative_streak == 1 {
                self.streak_start_value = self.last_value;
            }
        } else if self.positive_streak > 0 {
            self.positive_streak += 1;
        } else if self.negative_streak > 0 {
            self.negative_streak += 1;
        } else {
            return;
        }

        let is_positive_streak = self.positive_streak > 0;
        let length = if is_positive_streak {
            self.positive_streak
        } else {
            self.negative_streak
        } as usize;
        let histogram = if is_positive_streak {
            &mut self.positive_histogram
        } else {
            &mut self.negative_histogram
        };

        if histogram.len() < length {
            histogram.resize(length, HistogramBucket::default());
        }
        histogram[length - 1].count += 1;
        if length > 1 {
            let denom = if previous_p_p.abs() < f64::EPSILON {
                f64::EPSILON
            } else {
                previous_p_p
            };
            histogram[length - 1].sum_fraction_pow += fraction.abs().powf(1.0 / denom);
        }

        if histogram.len() > length {
            let next = histogram[length];
            let current_count = histogram[length - 1].count;
            let p_p = if current_count > 0 {
                (next.count as f64 / current_count as f64).clamp(0.0, 1.0)
            } else {
                0.0
            };
            self.rootmean = if next.count > 0 {
                (next.sum_fraction_pow / next.count as f64).powf(p_p)
            } else {
                0.0
            };
            self.p_p = p_p;
        } else {
            // Documented asymmetry: the not-yet-observed next bucket defaults
            // to 0 for an up-streak and 1 for a down-streak, not a shared
            // neutral value.
            self.p_p = if is_positive_streak { 0.0 } else { 1.0 };
            self.rootmean = 0.0;
        }
    }
}
