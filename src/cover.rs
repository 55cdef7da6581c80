//! Cube lists and their set algebra
//!
//! A [`CubeList`] is a sum of products over the shape of a [`ProblemInfo`](crate::ProblemInfo).
//! Operations that recurse on the list (tautology, complement, containment) take the
//! problem as a parameter, to share its split buffers and report progress.
//!
//! ```
//! use cubemin::ProblemInfo;
//!
//! let pi = ProblemInfo::new(1, 1);
//! let f = pi.parse_list(&["0 1", "1 1"]).unwrap();
//! assert!(f.is_tautology(&pi).unwrap());
//!
//! let g = pi.parse_list(&["0 1"]).unwrap();
//! assert_eq!(g.complement(&pi).unwrap().to_string(), "1 1\n");
//! ```

mod algebra;
mod complement;
mod list;
pub mod stats;
mod tautology;

pub use list::CubeList;

pub(crate) use algebra::{cofactor_cubes, merge_same_inputs, scc_cubes};
pub(crate) use complement::complement;
pub(crate) use tautology::{covers_cube, tautology};
