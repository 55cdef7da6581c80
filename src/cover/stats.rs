//! Compute cube list statistics
//!
//! ```
//! # use cubemin::ProblemInfo;
//! # let pi = ProblemInfo::new(3, 2);
//! # let list = pi.parse_list(&["01- 10", "1-- 11"]).unwrap();
//! use cubemin::cover::stats::stats;
//! let stats = stats(&list);
//!
//! assert_eq!(stats.nb_cubes, 2);
//! assert_eq!(stats.nb_literals, 3);
//!
//! // Show the statistics
//! println!("{}", stats);
//! ```

use std::fmt;

use crate::cover::CubeList;

/// Size of a cube list
#[derive(Clone, Debug)]
pub struct CoverStats {
    /// Number of inputs
    pub nb_inputs: usize,
    /// Number of outputs
    pub nb_outputs: usize,
    /// Number of cubes
    pub nb_cubes: usize,
    /// Number of cubes that represent no point
    pub nb_void: usize,
    /// Number of input literals
    pub nb_literals: usize,
    /// Number of output bits set
    pub nb_output_bits: usize,
    /// Number of cubes asserting each output
    pub output_cubes: Vec<usize>,
    /// Number of cubes by number of literals
    pub literal_histogram: Vec<usize>,
}

impl CoverStats {
    /// Fraction of the input positions that are don't-care
    pub fn dont_care_density(&self) -> f64 {
        let positions = (self.nb_cubes - self.nb_void) * self.nb_inputs;
        if positions == 0 {
            0.0
        } else {
            1.0 - self.nb_literals as f64 / positions as f64
        }
    }

    /// Record a cube with the given number of literals
    fn add_cube(&mut self, nb_literals: usize) {
        while self.literal_histogram.len() <= nb_literals {
            self.literal_histogram.push(0);
        }
        self.literal_histogram[nb_literals] += 1;
    }
}

impl fmt::Display for CoverStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stats:")?;
        writeln!(f, "  Inputs: {}", self.nb_inputs)?;
        writeln!(f, "  Outputs: {}", self.nb_outputs)?;
        writeln!(f, "  Cubes: {}", self.nb_cubes)?;
        if self.nb_void != 0 {
            writeln!(f, "      void: {}", self.nb_void)?;
        }
        writeln!(f, "  Literals: {}", self.nb_literals)?;
        writeln!(f, "  Output bits: {}", self.nb_output_bits)?;
        writeln!(f, "  Don't-care density: {:.3}", self.dont_care_density())?;
        if self.nb_cubes != 0 {
            writeln!(f, "  Literals per cube:")?;
            for (i, nb) in self.literal_histogram.iter().enumerate() {
                if *nb != 0 {
                    writeln!(f, "      {}: {}", i, nb)?;
                }
            }
        }
        fmt::Result::Ok(())
    }
}

/// Compute the statistics of the cube list
pub fn stats(list: &CubeList) -> CoverStats {
    let shape = list.shape();
    let mut ret = CoverStats {
        nb_inputs: shape.nb_inputs(),
        nb_outputs: shape.nb_outputs(),
        nb_cubes: list.len(),
        nb_void: 0,
        nb_literals: 0,
        nb_output_bits: 0,
        output_cubes: vec![0; shape.nb_outputs()],
        literal_histogram: Vec::new(),
    };
    for c in list {
        if c.is_void() {
            ret.nb_void += 1;
            continue;
        }
        let nb = c.literal_count();
        ret.nb_literals += nb;
        ret.nb_output_bits += c.output_count();
        ret.add_cube(nb);
        for (o, cnt) in ret.output_cubes.iter_mut().enumerate() {
            if c.out(o) {
                *cnt += 1;
            }
        }
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProblemInfo;

    #[test]
    fn test_stats() {
        let pi = ProblemInfo::new(3, 2);
        let l = pi
            .parse_list(&["01- 10", "1-- 11", "0x1 10", "--- 01"])
            .unwrap();
        let s = stats(&l);
        assert_eq!(s.nb_cubes, 4);
        assert_eq!(s.nb_void, 1);
        assert_eq!(s.nb_literals, 3);
        assert_eq!(s.nb_output_bits, 4);
        assert_eq!(s.output_cubes, vec![2, 2]);
        assert_eq!(s.literal_histogram, vec![1, 1, 1]);
        assert!((s.dont_care_density() - 2.0 / 3.0).abs() < 1e-9);
        let text = s.to_string();
        assert!(text.contains("  Cubes: 4\n      void: 1\n"));
        assert!(text.contains("  Literals: 3\n"));
    }

    #[test]
    fn test_empty() {
        let pi = ProblemInfo::new(3, 2);
        let s = stats(&pi.new_list());
        assert_eq!(s.nb_cubes, 0);
        assert_eq!(s.dont_care_density(), 0.0);
        assert!(!s.to_string().contains("per cube"));
    }
}
