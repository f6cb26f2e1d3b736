//! Generates a binomial random walk (each step +1 or -1 with probability
//! `p`) to stdout, one cumulative value per line.

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Parser)]
#[command(name = "binomial_walk", about = "Generate a binomial random walk")]
struct Cli {
    #[arg(long)]
    steps: usize,
    /// Probability of an up-step.
    #[arg(long, default_value_t = 0.5)]
    p: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 0.0)]
    start: f64,
}

fn walk(steps: usize, p: f64, start: f64, rng: &mut impl Rng) -> Vec<f64> {
    let mut values = Vec::with_capacity(steps);
    let mut current = start;
    for _ in 0..steps {
        current += if rng.gen_bool(p) { 1.0 } else { -1.0 };
        values.push(current);
    }
    values
}

fn main() {
    let cli = Cli::parse();
    let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);
    for value in walk(cli.steps, cli.p, cli.start, &mut rng) {
        println!("{value}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certain_up_walk_is_strictly_increasing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let values = walk(10, 1.0, 0.0, &mut rng);
        assert_eq!(values, (1..=10).map(|n| n as f64).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_reproduces_walk() {
        let mut rng_a = ChaCha8Rng::seed_from_u64(7);
        let mut rng_b = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(
            walk(50, 0.5, 0.0, &mut rng_a),
            walk(50, 0.5, 0.0, &mut rng_b)
        );
    }
}
