//! Progress reporting for long-running cube list algorithms
//!
//! Algorithms notify an optional observer installed on the
//! [`ProblemInfo`](crate::ProblemInfo); they never print themselves.

use std::cell::RefCell;
use std::fmt;

use kdam::{tqdm, Bar, BarExt};

/// Phase of an algorithm that reports progress
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Task {
    /// Complementation of a cube list
    Complement,
    /// Expansion of cubes to primes
    Primes,
    /// Removal of redundant cubes
    Irredundant,
    /// Reduction of cubes
    Reduce,
    /// Iterations of the heuristic minimizer
    Minimize,
    /// Exact covering
    ExactCover,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Task::Complement => "Complement",
            Task::Primes => "Primes",
            Task::Irredundant => "Irredundant",
            Task::Reduce => "Reduce",
            Task::Minimize => "Minimize",
            Task::ExactCover => "Exact cover",
        };
        write!(f, "{s}")
    }
}

/// Observer notified at well-defined points of the algorithms
///
/// Calls may be nested: a task can start while another is running.
pub trait Progress {
    /// A task starts, with the given number of steps (0 if unknown)
    fn start(&self, task: Task, total: usize);

    /// A task reached the given step
    fn advance(&self, task: Task, done: usize);

    /// A task finished
    fn finish(&self, task: Task);

    /// Free-form status message
    fn message(&self, text: &str);
}

/// Progress bar on the terminal
///
/// Only the outermost running task is displayed.
#[derive(Default)]
pub struct ProgressBar {
    state: RefCell<BarState>,
}

#[derive(Default)]
struct BarState {
    bar: Option<Bar>,
    task: Option<Task>,
    depth: usize,
}

impl ProgressBar {
    /// Create a progress bar; nothing is displayed until a task starts
    pub fn new() -> ProgressBar {
        ProgressBar::default()
    }
}

impl Progress for ProgressBar {
    fn start(&self, task: Task, total: usize) {
        let mut st = self.state.borrow_mut();
        st.depth += 1;
        if st.bar.is_none() {
            let mut bar = tqdm!(total = total);
            bar.set_description(task.to_string());
            st.bar = Some(bar);
            st.task = Some(task);
        }
    }

    fn advance(&self, task: Task, done: usize) {
        let mut st = self.state.borrow_mut();
        if st.task == Some(task) {
            if let Some(bar) = st.bar.as_mut() {
                // Display failures are not worth interrupting the computation
                let _ = bar.update_to(done);
            }
        }
    }

    fn finish(&self, task: Task) {
        let mut st = self.state.borrow_mut();
        st.depth = st.depth.saturating_sub(1);
        if st.task == Some(task) && st.depth == 0 {
            if let Some(mut bar) = st.bar.take() {
                let _ = bar.write(format!("{task} done"));
            }
            st.task = None;
        }
    }

    fn message(&self, text: &str) {
        let mut st = self.state.borrow_mut();
        match st.bar.as_mut() {
            Some(bar) => {
                let _ = bar.write(text.to_string());
            }
            None => eprintln!("{text}"),
        }
    }
}

/// Progress observer that records every notification, for tests
#[cfg(test)]
#[derive(Default)]
pub(crate) struct Recorder {
    pub events: RefCell<Vec<String>>,
}

#[cfg(test)]
impl Progress for Recorder {
    fn start(&self, task: Task, total: usize) {
        self.events.borrow_mut().push(format!("start {task} {total}"));
    }

    fn advance(&self, task: Task, done: usize) {
        self.events.borrow_mut().push(format!("advance {task} {done}"));
    }

    fn finish(&self, task: Task) {
        self.events.borrow_mut().push(format!("finish {task}"));
    }

    fn message(&self, text: &str) {
        self.events.borrow_mut().push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_names() {
        assert_eq!(Task::ExactCover.to_string(), "Exact cover");
        assert_eq!(Task::Primes.to_string(), "Primes");
    }

    #[test]
    fn test_recorder() {
        let r = Recorder::default();
        r.start(Task::Primes, 3);
        r.advance(Task::Primes, 1);
        r.finish(Task::Primes);
        assert_eq!(
            *r.events.borrow(),
            vec!["start Primes 3", "advance Primes 1", "finish Primes"]
        );
    }
}
