//! Two-level logic minimization on cube lists
//!
//! This crate provides the core of a two-level logic minimizer: packed ternary cubes, sum of
//! products cube lists with their set algebra, and heuristic and exact minimization on top.
//!
//! # Usage
//!
//! Cubemin features [tautology checking](https://en.wikipedia.org/wiki/Tautology_(logic)),
//! complementation, prime implicant generation and
//! [two-level minimization](https://en.wikipedia.org/wiki/Espresso_heuristic_logic_minimizer),
//! both heuristic and exact with a SAT solver.
//!
//! ```bash
//! # Show available commands
//! cubemin help
//! # Generate a random function with 8 inputs and 2 outputs
//! cubemin random -i 8 -o 2 -c 40 -O random.cubes
//! # Minimize it
//! cubemin minimize random.cubes --greedy -o minimized.cubes
//! # Check equivalence between the two
//! cubemin equiv random.cubes minimized.cubes
//! ```
//!
//! Cube lists are stored as text, with one cube per line: a character per input
//! (`0`, `1`, `-` for don't-care), then a character per output.
//!
//! # Development
//!
//! ## Datastructures
//!
//! A [`Cube`] is a product term over a fixed [`Shape`]: each input takes two bits
//! (01 for 0, 10 for 1, 11 for don't-care, 00 for an empty cube), each output one bit.
//! Inputs are packed 32 per 64-bit word and outputs 64 per word, so that most operations
//! are a few bitwise instructions per word.
//!
//! A [`CubeList`] is a sum of cubes of the same shape. The [`ProblemInfo`] holds the
//! shape, the input and output names, and buffers shared by the recursive algorithms.
//! Cubes and lists remember their shape, and mixing shapes is reported as an error.
//!
//! Most algorithms follow the unate recursive paradigm: a list is split on a variable or a
//! group of outputs chosen by the [`split`] heuristic, and the results on both cofactors
//! are merged.
//!
//! For example, here is a two-input function simplified to a single cube:
//! ```
//! # use cubemin::ProblemInfo;
//! # use cubemin::minimize::minimize;
//! let pi = ProblemInfo::new(2, 1);
//! let mut on = pi.parse_list(&["01 1", "11 1"]).unwrap();
//! minimize(&pi, &mut on, &pi.new_list(), false, false).unwrap();
//! assert_eq!(on.to_string(), "-1 1\n");
//! ```
//!
//! ## Library and documentation
//!
//! Cubemin is distributed as a library as well as a binary program.
//! The library is not stable, and the datastructures may change between versions.

#![warn(missing_docs)]

pub mod cmd;
pub mod cover;
pub mod cube;
pub mod equiv;
pub mod error;
pub mod generators;
pub mod io;
pub mod minimize;
pub mod problem;
pub mod progress;
pub mod split;
pub mod truth_table;

pub use cover::CubeList;
pub use cube::{Cube, Shape, Value};
pub use error::{Error, Result};
pub use problem::ProblemInfo;
pub use progress::{Progress, ProgressBar, Task};
pub use split::{Split, SplitMode};
