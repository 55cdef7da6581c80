//! Read and write cube lists as text
//!
//! The format has one cube string per line, inputs then outputs:
//! ```text
//!     # Comments start with '#'
//!     01- 10
//!     1-0 11
//! ```
//! Empty lines are ignored. A `# N inputs, M outputs` comment, as written by [`write_cubes`],
//! gives the shape of the problem. Without it, the first whitespace-separated token
//! of the first cube gives the number of inputs and the rest of the line the outputs.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::cover::CubeList;
use crate::cube::{Cube, Shape};
use crate::error::{Error, Result};
use crate::problem::ProblemInfo;

/// Strip the comment and surrounding whitespace from a line
fn content(line: &str) -> &str {
    let end = line.find('#').unwrap_or(line.len());
    line[..end].trim()
}

/// Shape of a cube line: inputs in the first token, outputs in the others
fn line_shape(text: &str) -> Shape {
    let mut tokens = text.split_whitespace();
    let nb_inputs = tokens.next().map_or(0, |t| t.chars().count());
    let nb_outputs = tokens.map(|t| t.chars().count()).sum();
    Shape::new(nb_inputs, nb_outputs)
}

/// Shape announced by a `# N inputs, M outputs` comment line
fn header_shape(line: &str) -> Option<Shape> {
    let comment = line.trim_start().strip_prefix('#')?;
    let mut parts = comment.split(',');
    let mut count = |unit: &str| -> Option<usize> {
        let mut tokens = parts.next()?.split_whitespace();
        let n = tokens.next()?.parse().ok()?;
        (tokens.next()? == unit && tokens.next().is_none()).then_some(n)
    };
    let nb_inputs = count("inputs")?;
    let nb_outputs = count("outputs")?;
    Some(Shape::new(nb_inputs, nb_outputs))
}

fn parse_line(shape: Shape, text: &str, line: usize) -> Result<Cube> {
    Cube::parse(shape, text).map_err(|e| match e {
        Error::Parse { message, .. } => Error::Parse { line, message },
        e => e,
    })
}

/// Cube lines with their line number, and the shape of the first header if any
fn read_lines<R: Read>(r: R) -> Result<(Option<Shape>, Vec<(usize, String)>)> {
    let mut header = None;
    let mut ret = Vec::new();
    for (i, l) in BufReader::new(r).lines().enumerate() {
        let l = l?;
        let t = content(&l);
        if !t.is_empty() {
            ret.push((i + 1, t.to_owned()));
        } else if header.is_none() {
            header = header_shape(&l);
        }
    }
    Ok((header, ret))
}

/// Read a cube list, deducing the problem shape from the header or the first cube
///
/// An input with no header and no cube gives a problem with no input and no output.
pub fn read_cubes<R: Read>(r: R) -> Result<(ProblemInfo, CubeList)> {
    let (header, lines) = read_lines(r)?;
    let shape = match (header, lines.first()) {
        (Some(s), _) => s,
        (None, Some((_, t))) => line_shape(t),
        (None, None) => Shape::new(0, 0),
    };
    let pi = ProblemInfo::new(shape.nb_inputs(), shape.nb_outputs());
    let list = parse_lines(&pi, &lines)?;
    Ok((pi, list))
}

/// Read a cube list for an existing problem
///
/// A header announcing another shape is an error.
pub fn read_cubes_for<R: Read>(r: R, pi: &ProblemInfo) -> Result<CubeList> {
    let (header, lines) = read_lines(r)?;
    if let Some(s) = header {
        if s != pi.shape() {
            return Err(Error::ShapeMismatch {
                expected: pi.shape(),
                found: s,
            });
        }
    }
    parse_lines(pi, &lines)
}

fn parse_lines(pi: &ProblemInfo, lines: &[(usize, String)]) -> Result<CubeList> {
    let mut ret = pi.new_list();
    for (line, t) in lines {
        ret.push(parse_line(pi.shape(), t, *line)?)?;
    }
    Ok(ret)
}

/// Write a cube list, one cube string per line
pub fn write_cubes<W: Write>(w: &mut W, pi: &ProblemInfo, list: &CubeList) -> Result<()> {
    pi.check_list(list)?;
    writeln!(
        w,
        "# {} inputs, {} outputs, {} cubes",
        pi.nb_inputs(),
        pi.nb_outputs(),
        list.len()
    )?;
    for c in list {
        writeln!(w, "{}", c)?;
    }
    Ok(())
}

/// Read a cube list from a file
pub fn read_cube_file(path: &Path) -> Result<(ProblemInfo, CubeList)> {
    read_cubes(File::open(path)?)
}

/// Read a cube list for an existing problem from a file
pub fn read_cube_file_for(path: &Path, pi: &ProblemInfo) -> Result<CubeList> {
    read_cubes_for(File::open(path)?, pi)
}

/// Write a cube list to a file
pub fn write_cube_file(path: &Path, pi: &ProblemInfo, list: &CubeList) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    write_cubes(&mut w, pi, list)?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_read() {
        let example = "# A comment\n\n01- 10\n  1-0 11   # trailing comment\n-x1 01\n";
        let (pi, l) = read_cubes(example.as_bytes()).unwrap();
        assert_eq!(pi.nb_inputs(), 3);
        assert_eq!(pi.nb_outputs(), 2);
        assert_eq!(l.len(), 3);
        assert_eq!(l.get(1).unwrap().to_string(), "1-0 11");
        assert!(l.get(2).unwrap().is_illegal());
    }

    #[test]
    fn test_no_outputs() {
        let (pi, l) = read_cubes("01-\n1--\n".as_bytes()).unwrap();
        assert_eq!(pi.nb_inputs(), 3);
        assert_eq!(pi.nb_outputs(), 0);
        assert_eq!(l.len(), 2);
    }

    #[test]
    fn test_empty() {
        let (pi, l) = read_cubes("# nothing\n\n".as_bytes()).unwrap();
        assert_eq!(pi.shape(), Shape::new(0, 0));
        assert!(l.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        match read_cubes("01 1\n\n012 1\n".as_bytes()) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 3),
            _ => panic!("expected a parse error"),
        }
        match read_cubes("01 1\n0a 1\n".as_bytes()) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 2),
            _ => panic!("expected a parse error"),
        }
    }

    #[test]
    fn test_read_for_problem() {
        let pi = ProblemInfo::new(2, 1);
        let l = read_cubes_for("0- 1\n-1 1\n".as_bytes(), &pi).unwrap();
        assert_eq!(l.len(), 2);
        assert!(read_cubes_for("0-1 1\n".as_bytes(), &pi).is_err());
        assert!(read_cubes_for("".as_bytes(), &pi).unwrap().is_empty());
    }

    #[test]
    fn test_write_read() {
        let pi = ProblemInfo::new(4, 2);
        let l = pi.parse_list(&["01-- 10", "1--0 11", "---- 01"]).unwrap();
        let mut buf = Vec::new();
        write_cubes(&mut buf, &pi, &l).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("# 4 inputs, 2 outputs, 3 cubes\n"));
        let (pi2, l2) = read_cubes(text.as_bytes()).unwrap();
        assert_eq!(pi2.shape(), pi.shape());
        assert_eq!(l2, l);
    }

    fn write_then_read(pi: &ProblemInfo, l: &CubeList) -> (ProblemInfo, CubeList) {
        let mut buf = Vec::new();
        write_cubes(&mut buf, pi, l).unwrap();
        read_cubes(buf.as_slice()).unwrap()
    }

    #[test]
    fn test_write_read_no_inputs() {
        let pi = ProblemInfo::new(0, 2);
        let l = pi.parse_list(&["10", "11"]).unwrap();
        let (pi2, l2) = write_then_read(&pi, &l);
        assert_eq!(pi2.shape(), Shape::new(0, 2));
        assert_eq!(l2, l);
        let (pi3, l3) = write_then_read(&pi, &pi.new_list());
        assert_eq!(pi3.shape(), Shape::new(0, 2));
        assert!(l3.is_empty());
    }

    #[test]
    fn test_write_read_no_outputs() {
        let pi = ProblemInfo::new(3, 0);
        let l = pi.parse_list(&["01-", "1--"]).unwrap();
        let (pi2, l2) = write_then_read(&pi, &l);
        assert_eq!(pi2.shape(), Shape::new(3, 0));
        assert_eq!(l2, l);
        let (pi3, _) = write_then_read(&pi, &pi.new_list());
        assert_eq!(pi3.shape(), Shape::new(3, 0));
    }

    #[test]
    fn test_header() {
        assert_eq!(
            header_shape("# 4 inputs, 2 outputs, 3 cubes"),
            Some(Shape::new(4, 2))
        );
        assert_eq!(header_shape("#0 inputs,1 outputs"), Some(Shape::new(0, 1)));
        assert_eq!(header_shape("# A comment"), None);
        assert_eq!(header_shape("# 4 inputs"), None);
        assert_eq!(header_shape("01 1 # 2 inputs, 1 outputs"), None);
        // Only the first header counts
        let (pi, _) = read_cubes("# 2 inputs, 1 outputs\n# 5 inputs, 1 outputs\n".as_bytes())
            .unwrap();
        assert_eq!(pi.shape(), Shape::new(2, 1));
        assert!(read_cubes("# 2 inputs, 1 outputs\n011 1\n".as_bytes()).is_err());
    }

    #[test]
    fn test_read_for_header_mismatch() {
        let pi = ProblemInfo::new(2, 1);
        let text = "# 3 inputs, 1 outputs\n";
        assert!(matches!(
            read_cubes_for(text.as_bytes(), &pi),
            Err(Error::ShapeMismatch { .. })
        ));
        let l = read_cubes_for("# 2 inputs, 1 outputs\n0- 1\n".as_bytes(), &pi).unwrap();
        assert_eq!(l.len(), 1);
    }

    #[test]
    fn test_write_shape_mismatch() {
        let pi = ProblemInfo::new(4, 2);
        let other = ProblemInfo::new(3, 2).new_list();
        assert!(write_cubes(&mut Vec::new(), &pi, &other).is_err());
    }
}
