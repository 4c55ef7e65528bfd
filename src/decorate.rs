//! Presentation Decorator
//!
//! Turns raw benchmark records into display records carrying a label and a
//! pair of chart colors. Colors come from a [`ColorSampler`], so production
//! code gets fresh random colors on every fetch while tests can seed them.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Mutex;

use crate::color::Color;
use crate::model::{Benchmark, DisplayRecord};

/// Source of base colors for decorated records
pub trait ColorSampler {
    fn sample(&self) -> Color;
}

/// Thread-local RNG; colors differ on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomColors;

impl ColorSampler for RandomColors {
    fn sample(&self) -> Color {
        Color::random(&mut rand::thread_rng())
    }
}

/// Seeded RNG for reproducible colors
#[derive(Debug)]
pub struct SeededColors {
    rng: Mutex<StdRng>,
}

impl SeededColors {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ColorSampler for SeededColors {
    fn sample(&self) -> Color {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Color::random(&mut *rng)
    }
}

impl<C: ColorSampler + ?Sized> ColorSampler for Box<C> {
    fn sample(&self) -> Color {
        (**self).sample()
    }
}

/// Chart label for a record: "label (version)"
pub fn label_for(benchmark: &Benchmark) -> String {
    format!(
        "{} ({})",
        benchmark.framework.label, benchmark.framework.version
    )
}

/// Decorate a single record with a freshly sampled color
pub fn decorate_one<C: ColorSampler + ?Sized>(benchmark: &Benchmark, colors: &C) -> DisplayRecord {
    let base = colors.sample();
    DisplayRecord {
        benchmark: benchmark.clone(),
        label: label_for(benchmark),
        color: base.darken(1.0).hex(),
        background_color: base.brighten(0.5).hex(),
    }
}

/// Decorate every record, preserving count and order
pub fn decorate<C: ColorSampler + ?Sized>(benchmarks: &[Benchmark], colors: &C) -> Vec<DisplayRecord> {
    benchmarks
        .iter()
        .map(|benchmark| decorate_one(benchmark, colors))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Framework;

    struct Fixed(Color);

    impl ColorSampler for Fixed {
        fn sample(&self) -> Color {
            self.0
        }
    }

    fn sample_benchmarks() -> Vec<Benchmark> {
        vec![
            Benchmark::new(Framework::new("actix", "4.4")).result("rps", 1000),
            Benchmark::new(Framework::new("axum", "0.7")).result("rps", 950),
            Benchmark::new(Framework::new("rocket", "0.5")),
        ]
    }

    #[test]
    fn test_label_format() {
        let b = Benchmark::new(Framework::new("express", "4.18.2"));
        assert_eq!(label_for(&b), "express (4.18.2)");
    }

    #[test]
    fn test_decorate_preserves_count_and_order() {
        let input = sample_benchmarks();
        let out = decorate(&input, &RandomColors);

        assert_eq!(out.len(), input.len());
        for (raw, shown) in input.iter().zip(&out) {
            assert_eq!(&shown.benchmark, raw);
        }
        assert_eq!(out[1].label, "axum (0.7)");
    }

    #[test]
    fn test_decorate_empty() {
        assert!(decorate(&[], &RandomColors).is_empty());
    }

    #[test]
    fn test_colors_derive_from_sample() {
        let base = Color::rgb(40, 120, 200);
        let out = decorate(&sample_benchmarks(), &Fixed(base));

        for record in &out {
            assert_eq!(record.color, base.darken(1.0).hex());
            assert_eq!(record.background_color, base.brighten(0.5).hex());
            assert_eq!(record.color.len(), 7);
            assert!(record.color[1..].chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_seeded_colors_are_reproducible() {
        let input = sample_benchmarks();
        let a = decorate(&input, &SeededColors::new(7));
        let b = decorate(&input, &SeededColors::new(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_input_not_mutated() {
        let input = sample_benchmarks();
        let snapshot = input.clone();
        let _ = decorate(&input, &SeededColors::new(1));
        assert_eq!(input, snapshot);
    }
}
