//! Description of a logic problem: shape, labels and shared algorithm state

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use fxhash::FxHashMap;

use crate::cover::CubeList;
use crate::cube::{Cube, Shape};
use crate::error::Result;
use crate::progress::{Progress, Task};
use crate::split::SplitCounts;

/// Ordered names with a fast lookup
#[derive(Clone, Debug, Default)]
struct Labels {
    names: Vec<String>,
    lookup: FxHashMap<String, usize>,
    prefix: char,
    case_insensitive: bool,
}

impl Labels {
    fn new(prefix: char, case_insensitive: bool) -> Labels {
        Labels {
            prefix,
            case_insensitive,
            ..Default::default()
        }
    }

    fn key(&self, name: &str) -> String {
        if self.case_insensitive {
            name.to_lowercase()
        } else {
            name.to_string()
        }
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.lookup.get(&self.key(name)).copied()
    }

    fn get(&self, i: usize) -> String {
        match self.names.get(i) {
            Some(n) => n.clone(),
            None => format!("{}{}", self.prefix, i),
        }
    }

    /// Reserve room for `count` names in total
    fn reserve_to(&mut self, count: usize) -> Result<()> {
        let extra = count.saturating_sub(self.names.len());
        self.names.try_reserve(extra)?;
        self.lookup.try_reserve(extra)?;
        Ok(())
    }

    fn push(&mut self, name: &str) -> usize {
        let i = self.names.len();
        self.names.push(name.to_string());
        self.lookup.insert(self.key(name), i);
        i
    }

    /// Give default names to unlabeled positions, skipping names already taken
    fn backfill_to(&mut self, count: usize) {
        while self.names.len() < count {
            let mut n = self.names.len();
            let mut name = format!("{}{}", self.prefix, n);
            while self.find(&name).is_some() {
                n += 1;
                name = format!("{}{}", self.prefix, n);
            }
            self.push(&name);
        }
    }

    fn truncate(&mut self, count: usize) {
        if self.names.len() > count {
            for n in self.names.drain(count..) {
                let key = if self.case_insensitive {
                    n.to_lowercase()
                } else {
                    n
                };
                self.lookup.remove(&key);
            }
        }
    }
}

/// Shape of a logic problem, with the state shared by the algorithms working on it
///
/// All cubes and cube lists used with a `ProblemInfo` must have its shape.
/// Changing the number of inputs or outputs invalidates existing lists, which
/// must then be widened with [`CubeList::adjust_shape`].
///
/// A `ProblemInfo` keeps reusable scratch buffers and is not meant to be shared
/// between threads: concurrent minimizations each use their own instance.
pub struct ProblemInfo {
    shape: Shape,
    input_labels: Labels,
    output_labels: Labels,
    universe: CubeList,
    split: RefCell<Option<SplitCounts>>,
    progress: Option<Rc<dyn Progress>>,
}

impl ProblemInfo {
    /// Create a problem with the given number of inputs and outputs
    pub fn new(nb_inputs: usize, nb_outputs: usize) -> ProblemInfo {
        let shape = Shape::new(nb_inputs, nb_outputs);
        ProblemInfo {
            shape,
            input_labels: Labels::new('x', true),
            output_labels: Labels::new('y', false),
            universe: CubeList::universe(shape),
            split: RefCell::new(None),
            progress: None,
        }
    }

    /// Create a problem from input and output names
    pub fn with_labels<S: AsRef<str>>(inputs: &[S], outputs: &[S]) -> Result<ProblemInfo> {
        let mut ret = ProblemInfo::new(0, 0);
        for s in inputs {
            ret.add_input_label(s.as_ref())?;
        }
        for s in outputs {
            ret.add_output_label(s.as_ref())?;
        }
        Ok(ret)
    }

    /// Return the shape of the problem
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Return the number of inputs
    pub fn nb_inputs(&self) -> usize {
        self.shape.nb_inputs()
    }

    /// Return the number of outputs
    pub fn nb_outputs(&self) -> usize {
        self.shape.nb_outputs()
    }

    /// Change the number of inputs
    pub fn set_input_count(&mut self, nb_inputs: usize) -> Result<()> {
        self.reshape(Shape::new(nb_inputs, self.nb_outputs()))
    }

    /// Change the number of outputs
    pub fn set_output_count(&mut self, nb_outputs: usize) -> Result<()> {
        self.reshape(Shape::new(self.nb_inputs(), nb_outputs))
    }

    fn reshape(&mut self, shape: Shape) -> Result<()> {
        let universe = CubeList::try_universe(shape)?;
        self.commit_shape(shape, universe);
        Ok(())
    }

    /// Switch to a new shape whose universe is already built; cannot fail
    fn commit_shape(&mut self, shape: Shape, universe: CubeList) {
        self.shape = shape;
        self.universe = universe;
        self.input_labels.truncate(shape.nb_inputs());
        self.output_labels.truncate(shape.nb_outputs());
        self.split.replace(None);
    }

    /// Add an input by name, or return the index of the existing input with this name
    ///
    /// Input names are case-insensitive. On failure, the labels and the shape are unchanged.
    pub fn add_input_label(&mut self, name: &str) -> Result<usize> {
        let n = self.nb_inputs();
        self.input_labels.reserve_to(n + 1)?;
        self.input_labels.backfill_to(n);
        if let Some(i) = self.input_labels.find(name) {
            return Ok(i);
        }
        let shape = Shape::new(n + 1, self.nb_outputs());
        let universe = CubeList::try_universe(shape)?;
        let i = self.input_labels.push(name);
        self.commit_shape(shape, universe);
        Ok(i)
    }

    /// Add an output by name, or return the index of the existing output with this name
    ///
    /// On failure, the labels and the shape are unchanged.
    pub fn add_output_label(&mut self, name: &str) -> Result<usize> {
        let n = self.nb_outputs();
        self.output_labels.reserve_to(n + 1)?;
        self.output_labels.backfill_to(n);
        if let Some(i) = self.output_labels.find(name) {
            return Ok(i);
        }
        let shape = Shape::new(self.nb_inputs(), n + 1);
        let universe = CubeList::try_universe(shape)?;
        let i = self.output_labels.push(name);
        self.commit_shape(shape, universe);
        Ok(i)
    }

    /// Find an input by name, case-insensitive
    pub fn find_input_label(&self, name: &str) -> Option<usize> {
        self.input_labels.find(name)
    }

    /// Find an output by name
    pub fn find_output_label(&self, name: &str) -> Option<usize> {
        self.output_labels.find(name)
    }

    /// Name of an input; unnamed inputs are called x0, x1, ...
    pub fn input_label(&self, i: usize) -> String {
        self.input_labels.get(i)
    }

    /// Name of an output; unnamed outputs are called y0, y1, ...
    pub fn output_label(&self, i: usize) -> String {
        self.output_labels.get(i)
    }

    /// The list holding the single universal cube
    pub fn universe(&self) -> &CubeList {
        &self.universe
    }

    /// A new universal cube
    pub fn tautology_cube(&self) -> Cube {
        Cube::universe(self.shape)
    }

    /// A new cube with all inputs don't-care and no output
    pub fn new_cube(&self) -> Cube {
        Cube::new(self.shape)
    }

    /// A new cube with all bits cleared
    pub fn empty_cube(&self) -> Cube {
        Cube::empty(self.shape)
    }

    /// A new empty cube list
    pub fn new_list(&self) -> CubeList {
        CubeList::new(self.shape)
    }

    /// Parse a cube string for this problem
    pub fn parse_cube(&self, text: &str) -> Result<Cube> {
        Cube::parse(self.shape, text)
    }

    /// Build a cube list from cube strings
    pub fn parse_list<S: AsRef<str>>(&self, lines: &[S]) -> Result<CubeList> {
        let mut ret = self.new_list();
        for l in lines {
            ret.push(self.parse_cube(l.as_ref())?)?;
        }
        Ok(ret)
    }

    /// Cube string of a cube of this problem
    pub fn cube_to_string(&self, c: &Cube) -> Result<String> {
        self.check_cube(c)?;
        Ok(c.to_string())
    }

    /// Fail if the cube was not built for this problem's shape
    pub fn check_cube(&self, c: &Cube) -> Result<()> {
        self.shape.check(c.shape())
    }

    /// Fail if the list was not built for this problem's shape
    pub fn check_list(&self, l: &CubeList) -> Result<()> {
        self.shape.check(l.shape())
    }

    /// Install a progress observer
    pub fn set_progress(&mut self, progress: Rc<dyn Progress>) {
        self.progress = Some(progress);
    }

    /// Remove the progress observer
    pub fn clear_progress(&mut self) {
        self.progress = None;
    }

    /// Run a notification on the observer, if any
    pub(crate) fn notify<F: FnOnce(&dyn Progress)>(&self, f: F) {
        if let Some(p) = &self.progress {
            f(p.as_ref());
        }
    }

    /// Run a task between start and finish notifications; finish is sent even on error
    pub(crate) fn run_task<T, F: FnOnce() -> Result<T>>(
        &self,
        task: Task,
        total: usize,
        f: F,
    ) -> Result<T> {
        self.notify(|p| p.start(task, total));
        let ret = f();
        self.notify(|p| p.finish(task));
        ret
    }

    /// Borrow the split histogram buffers, allocating them if needed
    pub(crate) fn take_split_counts(&self) -> SplitCounts {
        self.split
            .borrow_mut()
            .take()
            .unwrap_or_else(|| SplitCounts::new(self.shape))
    }

    /// Give back the split histogram buffers for reuse
    pub(crate) fn give_split_counts(&self, counts: SplitCounts) {
        if counts.shape() == self.shape {
            self.split.replace(Some(counts));
        }
    }

    /// Returns true if split buffers are currently kept for reuse
    #[cfg(test)]
    pub(crate) fn has_split_counts(&self) -> bool {
        self.split.borrow().is_some()
    }
}

impl fmt::Debug for ProblemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProblemInfo")
            .field("shape", &self.shape)
            .field("input_labels", &self.input_labels.names)
            .field("output_labels", &self.output_labels.names)
            .finish()
    }
}

impl fmt::Display for ProblemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Problem with {}:", self.shape)?;
        write!(f, "\n\tinputs:")?;
        for i in 0..self.nb_inputs() {
            write!(f, " {}", self.input_label(i))?;
        }
        write!(f, "\n\toutputs:")?;
        for i in 0..self.nb_outputs() {
            write!(f, " {}", self.output_label(i))?;
        }
        Ok(())
    }
}
