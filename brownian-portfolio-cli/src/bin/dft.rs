//! Discrete Fourier transform of a time series read one value per line
//! from stdin. Prints `frequency_index\tmagnitude` pairs for the first
//! half of the spectrum (the Nyquist-redundant half is omitted).

use std::io::{self, BufRead};

fn read_series() -> Vec<f64> {
    io::stdin()
        .lock()
        .lines()
        .map_while(|line| line.ok())
        .filter_map(|line| line.trim().parse::<f64>().ok())
        .collect()
}

fn dft_magnitudes(series: &[f64]) -> Vec<f64> {
    let n = series.len();
    let mut magnitudes = Vec::with_capacity(n / 2 + 1);
    for k in 0..=(n / 2) {
        let mut real = 0.0;
        let mut imag = 0.0;
        for (t, &x) in series.iter().enumerate() {
            let angle = -2.0 * std::f64::consts::PI * (k as f64) * (t as f64) / (n as f64);
            real += x * angle.cos();
            imag += x * angle.sin();
        }
        magnitudes.push((real * real + imag * imag).sqrt());
    }
    magnitudes
}

fn main() {
    let series = read_series();
    if series.is_empty() {
        return;
    }
    for (k, magnitude) in dft_magnitudes(&series).into_iter().enumerate() {
        println!("{k}\t{magnitude}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_series_has_energy_only_at_dc() {
        let series = vec![1.0; 8];
        let magnitudes = dft_magnitudes(&series);
        assert!((magnitudes[0] - 8.0).abs() < 1e-9);
        for &m in &magnitudes[1..] {
            assert!(m < 1e-9);
        }
    }

    #[test]
    fn single_cycle_sine_peaks_at_its_frequency() {
        let n = 16;
        let series: Vec<f64> = (0..n)
            .map(|t| (2.0 * std::f64::consts::PI * t as f64 / n as f64).sin())
            .collect();
        let magnitudes = dft_magnitudes(&series);
        let peak = magnitudes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap()
            .0;
        assert_eq!(peak, 1);
    }
}
