use serde::Serialize;
use std::fmt;

use crate::workload::Workload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub index: usize,
    pub actual: i32,
    pub expected: i32,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Mismatch at index {}: got {}, expected {}",
            self.index, self.actual, self.expected
        )
    }
}

/// Outcome of comparing the kernel output against a host reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verification {
    pub mismatches: usize,
    /// At most `limit` leading mismatches
    pub first: Vec<Mismatch>,
}

impl Verification {
    pub fn passed(&self) -> bool {
        self.mismatches == 0
    }
}

/// Recompute `a[i] + b[i]` (wrapping) and compare with `c[i]`
pub fn verify(workload: &Workload, limit: usize) -> Verification {
    let mut mismatches = 0;
    let mut first = Vec::new();
    let rows = workload.a.iter().zip(&workload.b).zip(&workload.c);
    for (index, ((a, b), c)) in rows.enumerate() {
        let expected = a.wrapping_add(*b);
        if *c != expected {
            if first.len() < limit {
                first.push(Mismatch {
                    index,
                    actual: *c,
                    expected,
                });
            }
            mismatches += 1;
        }
    }
    Verification { mismatches, first }
}
