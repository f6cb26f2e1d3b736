//! Run-magnitude scaling: rescales each value in a series by
//! `sign(x) * |x|^exponent`, the same magnitude-rescaling idiom the
//! persistence histogram's `rootmean` field uses internally.

use std::io::{self, BufRead};

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "magnitude_scale", about = "Rescale a series by |x|^exponent")]
struct Cli {
    #[arg(long, default_value_t = 1.0)]
    exponent: f64,
}

fn read_series() -> Vec<f64> {
    io::stdin()
        .lock()
        .lines()
        .map_while(|line| line.ok())
        .filter_map(|line| line.trim().parse::<f64>().ok())
        .collect()
}

fn scale(series: &[f64], exponent: f64) -> Vec<f64> {
    series
        .iter()
        .map(|&x| x.signum() * x.abs().powf(exponent))
        .collect()
}

fn main() {
    let cli = Cli::parse();
    for value in scale(&read_series(), cli.exponent) {
        println!("{value}");
    }
}
