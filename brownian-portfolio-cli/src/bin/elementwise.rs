//! Per-element arithmetic on two equal-length series read from two files,
//! one value per line.

use std::fmt;
use std::fs;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Op::Add => a + b,
            Op::Sub => a - b,
            Op::Mul => a * b,
            Op::Div => a / b,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "elementwise", about = "Per-element arithmetic on two series")]
struct Cli {
    left: String,
    right: String,
    #[arg(long, value_enum, default_value = "add")]
    op: Op,
}

#[derive(Debug)]
enum ElementwiseError {
    LengthMismatch { left: usize, right: usize },
    Io(std::io::Error),
}

impl fmt::Display for ElementwiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementwiseError::LengthMismatch { left, right } => {
                write!(f, "series length mismatch: left={left} right={right}")
            }
            ElementwiseError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl From<std::io::Error> for ElementwiseError {
    fn from(value: std::io::Error) -> Self {
        ElementwiseError::Io(value)
    }
}

fn read_series(path: &str) -> Result<Vec<f64>, ElementwiseError> {
    Ok(fs::read_to_string(path)?
        .lines()
        .filter_map(|line| line.trim().parse::<f64>().ok())
        .collect())
}

fn elementwise(a: &[f64], b: &[f64], op: Op) -> Result<Vec<f64>, ElementwiseError> {
    if a.len() != b.len() {
        return Err(ElementwiseError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(&x, &y)| op.apply(x, y)).collect())
}

fn main() -> Result<(), ElementwiseError> {
    let cli = Cli::parse();
    let left = read_series(&cli.left)?;
    let right = read_series(&cli.right)?;
    for value in elementwise(&left, &right, cli.op)? {
        println!("{value}");
    }
    Ok(())
}
