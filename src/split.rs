//! Choice of the input variable or output group on which recursive algorithms split
//!
//! The choice only affects performance: any split yields correct results.
//! Input variables are preferred when they appear in both polarities with few
//! don't-cares; output groups are balanced partitions of the asserted outputs
//! that duplicate as few cubes as possible.

use std::cmp::Reverse;

use crate::cover::CubeList;
use crate::cube::{Cube, Shape, Value, INPUTS_PER_WORD, OUTPUTS_PER_WORD};
use crate::error::Result;
use crate::problem::ProblemInfo;

/// Maximum number of output partitions evaluated for a split
pub const OUTPUT_CANDIDATES: usize = 5;

/// Which input variables may be chosen for a split
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitMode {
    /// Only variables appearing in both polarities
    Binate,
    /// Any variable appearing as a literal, binate ones first
    AnyLiteral,
}

/// A set of outputs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputGroup {
    shape: Shape,
    words: Box<[u64]>,
}

impl OutputGroup {
    /// Create a group from a membership vector
    pub fn from_members(shape: Shape, members: &[bool]) -> OutputGroup {
        let mut words = vec![0u64; shape.out_words()];
        for (o, m) in members.iter().enumerate().take(shape.nb_outputs()) {
            if *m {
                words[o / OUTPUTS_PER_WORD] |= 1 << (o % OUTPUTS_PER_WORD);
            }
        }
        OutputGroup {
            shape,
            words: words.into(),
        }
    }

    /// Returns true if the output belongs to the group
    pub fn contains(&self, output: usize) -> bool {
        output < self.shape.nb_outputs()
            && (self.words[output / OUTPUTS_PER_WORD] >> (output % OUTPUTS_PER_WORD)) & 1 != 0
    }

    /// Outputs in the group, in increasing order
    pub fn outputs(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.shape.nb_outputs()).filter(|o| self.contains(*o))
    }

    /// Number of outputs in the group
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if the group has no output
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Outputs not in the group
    pub fn complement(&self) -> OutputGroup {
        let words = self
            .words
            .iter()
            .enumerate()
            .map(|(w, x)| !x & self.shape.out_mask(w))
            .collect();
        OutputGroup {
            shape: self.shape,
            words,
        }
    }

    /// Cube with all inputs don't-care and exactly the outputs of the group
    pub(crate) fn cube(&self) -> Cube {
        let mut ret = Cube::new(self.shape);
        ret.set_out_words(&self.words);
        ret
    }
}

/// Where to split a cube list
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Split {
    /// Cofactor on both polarities of an input variable
    Input(usize),
    /// Cofactor on a group of outputs and on the remaining outputs
    Output(OutputGroup),
}

impl Split {
    /// The two cubes to cofactor on; together they cover the whole space
    pub(crate) fn sides(&self, shape: Shape) -> [Cube; 2] {
        match self {
            Split::Input(var) => {
                let mut zero = Cube::universe(shape);
                zero.put(*var, Value::Zero);
                let mut one = Cube::universe(shape);
                one.put(*var, Value::One);
                [zero, one]
            }
            Split::Output(g) => [g.cube(), g.complement().cube()],
        }
    }
}

/// Per-variable and per-output histograms of a cube list
///
/// The buffers are kept by the [`ProblemInfo`] between calls.
#[derive(Clone, Debug)]
pub(crate) struct SplitCounts {
    shape: Shape,
    zeros: Vec<usize>,
    ones: Vec<usize>,
    dont_cares: Vec<usize>,
    outputs: Vec<usize>,
}

impl SplitCounts {
    pub fn new(shape: Shape) -> SplitCounts {
        SplitCounts {
            shape,
            zeros: vec![0; shape.nb_inputs()],
            ones: vec![0; shape.nb_inputs()],
            dont_cares: vec![0; shape.nb_inputs()],
            outputs: vec![0; shape.nb_outputs()],
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Count literals and outputs over the cubes
    fn fill(&mut self, cubes: &[Cube]) {
        self.zeros.fill(0);
        self.ones.fill(0);
        self.dont_cares.fill(0);
        self.outputs.fill(0);
        let nb_inputs = self.shape.nb_inputs();
        let nb_outputs = self.shape.nb_outputs();
        for c in cubes {
            for (w, x) in c.in_words().iter().enumerate() {
                let base = w * INPUTS_PER_WORD;
                for i in 0..INPUTS_PER_WORD.min(nb_inputs - base) {
                    match (x >> (2 * i)) & 3 {
                        1 => self.zeros[base + i] += 1,
                        2 => self.ones[base + i] += 1,
                        3 => self.dont_cares[base + i] += 1,
                        _ => (),
                    }
                }
            }
            for (w, x) in c.out_words().iter().enumerate() {
                let mut bits = *x;
                while bits != 0 {
                    let b = bits.trailing_zeros() as usize;
                    let o = w * OUTPUTS_PER_WORD + b;
                    if o < nb_outputs {
                        self.outputs[o] += 1;
                    }
                    bits &= bits - 1;
                }
            }
        }
    }

    fn is_binate(&self, var: usize) -> bool {
        self.zeros[var] > 0 && self.ones[var] > 0
    }

    fn has_literal(&self, var: usize) -> bool {
        self.zeros[var] > 0 || self.ones[var] > 0
    }

    /// Variable with the fewest don't-cares, and the number of cubes duplicated by splitting on it
    fn best_input(&self, mode: SplitMode) -> Option<(usize, usize)> {
        let pick = |pred: &dyn Fn(usize) -> bool| {
            (0..self.shape.nb_inputs())
                .filter(|v| pred(*v))
                .min_by_key(|v| self.dont_cares[*v])
                .map(|v| (v, self.dont_cares[v]))
        };
        let binate = pick(&|v| self.is_binate(v));
        match mode {
            SplitMode::Binate => binate,
            SplitMode::AnyLiteral => binate.or_else(|| pick(&|v| self.has_literal(v))),
        }
    }

    /// Balanced partition of the asserted outputs, and the number of cubes it duplicates
    fn best_output_group(&self, cubes: &[Cube]) -> Option<(usize, OutputGroup)> {
        let active: Vec<usize> = (0..self.shape.nb_outputs())
            .filter(|o| self.outputs[*o] > 0)
            .collect();
        if active.len() < 2 {
            return None;
        }

        // Largest first, each output to the lighter group
        let mut order = active.clone();
        order.sort_by_key(|o| Reverse(self.outputs[*o]));
        let mut members = vec![false; self.shape.nb_outputs()];
        let (mut wg, mut wh) = (0, 0);
        for &o in &order {
            if wg <= wh {
                members[o] = true;
                wg += self.outputs[o];
            } else {
                wh += self.outputs[o];
            }
        }

        let mut candidates = Candidates::default();
        candidates.offer(wg.abs_diff(wh), members.clone());
        for &o in &active {
            let w = self.outputs[o];
            let (g, h) = if members[o] {
                (wg - w, wh + w)
            } else {
                (wg + w, wh - w)
            };
            let mut moved = members.clone();
            moved[o] = !moved[o];
            let nb_in_g = active.iter().filter(|a| moved[**a]).count();
            if nb_in_g == 0 || nb_in_g == active.len() {
                continue;
            }
            candidates.offer(g.abs_diff(h), moved);
        }

        let mut best: Option<(usize, OutputGroup)> = None;
        for (_, m) in candidates.list {
            let group = OutputGroup::from_members(self.shape, &m);
            if let Some(cost) = output_split_cost(&group, cubes) {
                if best.as_ref().map_or(true, |(c, _)| cost < *c) {
                    best = Some((cost, group));
                }
            }
        }
        best
    }
}

/// Bounded set of the most balanced output partitions seen so far
#[derive(Default)]
struct Candidates {
    list: Vec<(usize, Vec<bool>)>,
}

impl Candidates {
    /// Keep the partition if there is room or if it beats the worst one
    fn offer(&mut self, imbalance: usize, members: Vec<bool>) {
        if self.list.contains(&(imbalance, members.clone())) {
            return;
        }
        if self.list.len() < OUTPUT_CANDIDATES {
            self.list.push((imbalance, members));
            return;
        }
        let mut worst = 0;
        for (i, (imb, _)) in self.list.iter().enumerate() {
            if *imb >= self.list[worst].0 {
                worst = i;
            }
        }
        if imbalance < self.list[worst].0 {
            self.list[worst] = (imbalance, members);
        }
    }
}

/// Number of cubes asserting outputs on both sides, or None if the split would not
/// simplify both sides
fn output_split_cost(group: &OutputGroup, cubes: &[Cube]) -> Option<usize> {
    let rest = group.complement();
    let mut cost = 0;
    let mut separated = false;
    for c in cubes {
        let in_g = c
            .out_words()
            .iter()
            .zip(group.words.iter())
            .any(|(a, b)| a & b != 0);
        let in_h = c
            .out_words()
            .iter()
            .zip(rest.words.iter())
            .any(|(a, b)| a & b != 0);
        if in_g && in_h {
            cost += 1;
        } else if in_g || in_h {
            separated = true;
        }
    }
    if separated {
        Some(cost)
    } else {
        None
    }
}

/// Choose a split for the cubes, reusing the histogram buffers of the problem
pub(crate) fn select(pi: &ProblemInfo, cubes: &[Cube], mode: SplitMode) -> Option<Split> {
    let mut counts = pi.take_split_counts();
    counts.fill(cubes);
    let input = counts.best_input(mode);
    let output = counts.best_output_group(cubes);
    pi.give_split_counts(counts);
    match (input, output) {
        (Some((var, var_cost)), Some((out_cost, group))) => {
            if var_cost <= out_cost {
                Some(Split::Input(var))
            } else {
                Some(Split::Output(group))
            }
        }
        (Some((var, _)), None) => Some(Split::Input(var)),
        (None, Some((_, group))) => Some(Split::Output(group)),
        (None, None) => None,
    }
}

/// Choose where to split a cube list, or None if no split simplifies it
pub fn select_split(pi: &ProblemInfo, list: &CubeList, mode: SplitMode) -> Result<Option<Split>> {
    pi.check_list(list)?;
    Ok(select(pi, list.cubes(), mode))
}

/// Returns true if no input variable appears in both polarities
pub(crate) fn is_unate(cubes: &[Cube]) -> bool {
    let nb_words = match cubes.first() {
        Some(c) => c.in_words().len(),
        None => return true,
    };
    // A variable is binate if some cube allows only 0 and another only 1
    for w in 0..nb_words {
        let mut only_zero = 0u64;
        let mut only_one = 0u64;
        for c in cubes {
            let x = c.in_words()[w];
            let lo = x & 0x5555_5555_5555_5555;
            let hi = (x >> 1) & 0x5555_5555_5555_5555;
            only_zero |= lo & !hi;
            only_one |= hi & !lo;
        }
        if only_zero & only_one != 0 {
            return false;
        }
    }
    true
}
