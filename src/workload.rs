use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::os::raw::c_int;

use crate::config::LaunchConfig;
use crate::error::*;

/// Host-side input and output sequences of one run
#[derive(Debug, Clone, PartialEq)]
pub struct Workload {
    pub a: Vec<i32>,
    pub b: Vec<i32>,
    pub c: Vec<i32>,
}

impl Workload {
    /// Fill `a` and `b` from a PRNG seeded with `seed`, uniform in `[low, high]`
    ///
    /// Values are drawn per index, `a[i]` then `b[i]`. `c` starts zeroed.
    pub fn generate(size: usize, seed: u64, low: i32, high: i32) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let dist = Uniform::new_inclusive(low, high);
        let mut a = Vec::with_capacity(size);
        let mut b = Vec::with_capacity(size);
        for _ in 0..size {
            a.push(dist.sample(&mut rng));
            b.push(dist.sample(&mut rng));
        }
        debug!("Generated {} inputs (seed = {}, range = [{}, {}])", size, seed, low, high);
        Workload {
            a,
            b,
            c: vec![0; size],
        }
    }

    pub fn from_config(size: usize, cfg: &LaunchConfig) -> Self {
        Self::generate(size, cfg.seed, cfg.low, cfg.high)
    }

    pub fn len(&self) -> usize {
        self.c.len()
    }

    pub fn is_empty(&self) -> bool {
        self.c.is_empty()
    }

    /// Length as passed to the kernel's `size` argument
    pub fn size_arg(&self) -> c_int {
        self.len() as c_int
    }
}

/// Parse the size argument; `None` falls back to `default`
///
/// Non-numeric text is a usage error. Values `<= 0` or beyond the kernel's
/// 32-bit `size` argument are rejected rather than truncated.
pub fn parse_size(arg: Option<&str>, default: i64) -> Result<usize> {
    let size = match arg {
        Some(text) => text
            .trim()
            .parse::<i64>()
            .log(Step::Size, &format!("Size must be an integer, got {:?}", text))?,
        None => default,
    };
    let max = i64::from(c_int::max_value());
    if size <= 0 || size > max {
        return Err(LaunchError::InvalidSize { size, max });
    }
    Ok(size as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let w1 = Workload::generate(64, 42, -1000, 1000);
        let w2 = Workload::generate(64, 42, -1000, 1000);
        assert_eq!(w1, w2);
        let w3 = Workload::generate(64, 43, -1000, 1000);
        assert_ne!(w1.a, w3.a);
    }

    #[test]
    fn prefix_stable_across_sizes() {
        let small = Workload::generate(5, 42, -1000, 1000);
        let large = Workload::generate(1024, 42, -1000, 1000);
        assert_eq!(small.a[..], large.a[..5]);
        assert_eq!(small.b[..], large.b[..5]);
    }

    #[test]
    fn within_range_and_zeroed_output() {
        let w = Workload::generate(1000, 42, -1000, 1000);
        assert_eq!(w.len(), 1000);
        assert!(w.a.iter().chain(&w.b).all(|v| *v >= -1000 && *v <= 1000));
        assert!(w.c.iter().all(|v| *v == 0));
    }

    #[test]
    fn size_parsing() {
        assert_eq!(parse_size(None, 1024).unwrap(), 1024);
        assert_eq!(parse_size(Some("5"), 1024).unwrap(), 5);
        assert_eq!(parse_size(Some(" 17 "), 1024).unwrap(), 17);
    }

    #[test]
    fn size_rejects_non_positive() {
        for arg in &["0", "-1", "-1024"] {
            match parse_size(Some(arg), 1024) {
                Err(LaunchError::InvalidSize { .. }) => {}
                other => panic!("Unexpected: {:?}", other),
            }
        }
    }

    #[test]
    fn size_rejects_overflow() {
        match parse_size(Some("4294967296"), 1024) {
            Err(LaunchError::InvalidSize { size, .. }) => assert_eq!(size, 4_294_967_296),
            other => panic!("Unexpected: {:?}", other),
        }
    }

    #[test]
    fn size_rejects_text() {
        let err = parse_size(Some("many"), 1024).unwrap_err();
        assert_eq!(err.step(), Step::Usage);
    }
}
