//! Tick dispatcher: coalesces multiple updates per equity per interval,
//! detects interval boundaries by timestamp change, and drives
//! update → score → assemble → emit.

use tracing::{debug, warn};

use crate::engine::PortfolioEngine;

/// One input observation: an opaque timestamp, a ticker, and a price.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Interval timestamp, compared for equality to detect interval boundaries.
    pub timestamp: String,
    /// Ticker symbol.
    pub ticker: String,
    /// Observed price.
    pub price: f64,
}

/// One (ticker, allocation fraction) pair in an emitted output record,
/// printed in ascending desirability order.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    /// Ticker symbol.
    pub ticker: String,
    /// Allocation fraction, `None` if not held this interval.
    pub allocation: Option<f64>,
}

/// The per-interval snapshot handed to an [`OutputSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    /// Timestamp of the completed interval.
    pub timestamp: String,
    /// Compounding average-index value for the interval.
    pub index: f64,
    /// Average raw equity value across tracked equities.
    pub average_value: f64,
    /// Total portfolio value (capital plus holdings) at the end of the interval.
    pub portfolio_value: f64,
    /// Margin fraction in effect, if any equities are admitted.
    pub margin_fraction: Option<f64>,
    /// Per-ticker holdings, in ascending desirability order.
    pub holdings: Vec<Holding>,
}

/// Abstract output destination. The core library never opens a file or
/// parses a command line; framing and destination are entirely the CLI
/// crate's concern.
pub trait OutputSink {
    /// Consumes one completed interval's snapshot.
    fn emit(&mut self, record: &OutputRecord) -> std::io::Result<()>;
}

/// Drives `engine` over every record in `records`, emitting one
/// [`OutputRecord`] per completed interval via `sink`.
pub fn dispatch<I>(
    records: I,
    engine: &mut PortfolioEngine,
    sink: &mut impl OutputSink,
) -> std::io::Result<()>
where
    I: IntoIterator<Item = Record>,
{
    let mut current_timestamp: Option<String> = None;

    for record in records {
        if record.price <= 0.0 {
            warn!(ticker = %record.ticker, price = record.price, "rejecting non-positive price");
            continue;
        }

        match &current_timestamp {
            None => current_timestamp = Some(record.timestamp.clone()),
            Some(ts) if ts != &record.timestamp => {
                debug!(from = %ts, to = %record.timestamp, "interval boundary");
                let output = engine.end_interval(ts.clone());
                sink.emit(&output)?;
                current_timestamp = Some(record.timestamp.clone());
            }
            Some(_) => {}
        }

        engine.observe(&record.ticker, record.price);
    }

    if let Some(ts) = current_timestamp {
        let output = engine.end_interval(ts);
        sink.emit(&output)?;
    }

    Ok(())
}

/// Parses one line of the input record grammar: whitespace/comma
/// delimited, `#`-prefixed comments after leading whitespace, blank
/// lines ignored. Returns `None` for comments, blank lines, or lines
/// that don't carry exactly three fields.
pub fn parse_line(line: &str) -> Option<Record> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let fields: Vec<&str> = trimmed
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .collect();
    if fields.len() != 3 {
        debug!(line, "ignoring record with unexpected field count");
        return None;
    }
    let price: f64 = match fields[2].parse() {
        Ok(p) => p,
        Err(_) => {
            debug!(line, "ignoring record with non-numeric price");
            return None;
        }
    };
    Some(Record {
        timestamp: fields[0].to_string(),
        ticker: fields[1].to_string(),
        price,
    })
}
