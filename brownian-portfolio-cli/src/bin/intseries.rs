//! Generates an integer series (arithmetic or geometric progression) to
//! stdout, one value per line.

use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Kind {
    /// `start, start+step, start+2*step, ...`
    Arithmetic {
        #[arg(long, default_value_t = 0)]
        start: i64,
        #[arg(long, default_value_t = 1)]
        step: i64,
    },
    /// `start, start*ratio, start*ratio^2, ...`
    Geometric {
        #[arg(long, default_value_t = 1)]
        start: i64,
        #[arg(long, default_value_t = 2)]
        ratio: i64,
    },
}

#[derive(Debug, Parser)]
#[command(name = "intseries", about = "Generate an integer series")]
struct Cli {
    #[arg(long)]
    count: usize,
    #[command(subcommand)]
    kind: Kind,
}

fn generate(kind: &Kind, count: usize) -> Vec<i64> {
    match *kind {
        Kind::Arithmetic { start, step } => (0..count as i64).map(|i| start + i * step).collect(),
        Kind::Geometric { start, ratio } => {
            let mut values = Vec::with_capacity(count);
            let mut current = start;
            for _ in 0..count {
                values.push(current);
                current *= ratio;
            }
            values
        }
    }
}

fn main() {
    let cli = Cli::parse();
    for value in generate(&cli.kind, cli.count) {
        println!("{value}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_series_steps_correctly() {
        let values = generate(&Kind::Arithmetic { start: 3, step: 2 }, 4);
        assert_eq!(values, vec![3, 5, 7, 9]);
    }

    #[test]
    fn geometric_series_multiplies_correctly() {
        let values = generate(
            &Kind::Geometric {
                start: 1,
                ratio: 3,
            },
            4,
        );
        assert_eq!(values, vec![1, 3, 9, 27]);
    }
}
