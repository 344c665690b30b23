use super::Backend;
use crate::error::Result;
use crate::workload::Workload;

/// Calls the kernel as a plain host function
#[derive(Debug, Default, Clone, Copy)]
pub struct Simulator;

impl Simulator {
    pub fn new() -> Self {
        Simulator
    }
}

impl Backend for Simulator {
    fn describe(&self) -> String {
        "host simulation".into()
    }

    fn execute(&mut self, workload: &mut Workload) -> Result<Option<f64>> {
        let size = workload.size_arg();
        debug!("Calling adder in-process (size = {})", size);
        adder_kernel::add(&workload.a, &workload.b, &mut workload.c, size);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulate() {
        let mut w = Workload::generate(16, 42, -1000, 1000);
        let time = Simulator::new().execute(&mut w).unwrap();
        assert!(time.is_none());
        for i in 0..16 {
            assert_eq!(w.c[i], w.a[i] + w.b[i]);
        }
    }
}
