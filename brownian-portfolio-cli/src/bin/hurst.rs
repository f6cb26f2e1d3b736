//! Hurst exponent of a time series via rescaled-range (R/S) analysis.
//! Reads one value per line from stdin, prints the estimated exponent.

use std::io::{self, BufRead};

fn read_series() -> Vec<f64> {
    io::stdin()
        .lock()
        .lines()
        .map_while(|line| line.ok())
        .filter_map(|line| line.trim().parse::<f64>().ok())
        .collect()
}

/// Rescaled range for one contiguous chunk: `(max - min of cumulative
/// deviation) / sample standard deviation`.
fn rescaled_range(chunk: &[f64]) -> Option<f64> {
    let n = chunk.len() as f64;
    if chunk.len() < 2 {
        return None;
    }
    let mean = chunk.iter().sum::<f64>() / n;
    let variance = chunk.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    if std_dev == 0.0 {
        return None;
    }

    let mut cumulative = 0.0;
    let mut max_dev = f64::MIN;
    let mut min_dev = f64::MAX;
    for &x in chunk {
        cumulative += x - mean;
        max_dev = max_dev.max(cumulative);
        min_dev = min_dev.min(cumulative);
    }
    Some((max_dev - min_dev) / std_dev)
}

/// Estimates the Hurst exponent as the slope of `log(R/S)` against
/// `log(chunk_size)` across a range of chunk sizes, via least squares.
fn hurst_exponent(series: &[f64]) -> Option<f64> {
    let n = series.len();
    if n < 8 {
        return None;
    }
    let mut points = Vec::new();
    let mut size = 8usize;
    while size <= n {
        let chunks = n / size;
        let mut rs_sum = 0.0;
        let mut rs_count = 0;
        for c in 0..chunks {
            let chunk = &series[c * size..(c + 1) * size];
            if let Some(rs) = rescaled_range(chunk) {
                rs_sum += rs;
                rs_count += 1;
            }
        }
        if rs_count > 0 {
            points.push(((size as f64).ln(), (rs_sum / rs_count as f64).ln()));
        }
        size *= 2;
    }
    if points.len() < 2 {
        return None;
    }

    let n_pts = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n_pts;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n_pts;
    let numerator: f64 = points
        .iter()
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();
    let denominator: f64 = points.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

fn main() {
    let series = read_series();
    match hurst_exponent(&series) {
        Some(h) => println!("{h}"),
        None => eprintln!("hurst: insufficient or degenerate data"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_walk_exceeds_pure_noise() {
        // A pure sine (highly persistent) should score well above a
        // synthetic alternating series (anti-persistent).
        let persistent: Vec<f64> = (0..256)
            .map(|t| (t as f64 * 0.02).sin() + t as f64 * 0.01)
            .collect();
        let anti_persistent: Vec<f64> = (0..256)
            .map(|t| if t % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let h_persistent = hurst_exponent(&persistent).unwrap();
        let h_anti = hurst_exponent(&anti_persistent).unwrap();
        assert!(h_persistent > h_anti);
    }

    #[test]
    fn too_short_series_returns_none() {
        assert!(hurst_exponent(&[1.0, 2.0, 3.0]).is_none());
    }
}
