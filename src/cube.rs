//! Representation of a single cube (product term) as packed ternary words
//!
//! Each input variable occupies 2 bits, each output 1 bit, in 64-bit words.
//! Unused high bits of the last word are always kept at zero, so that whole
//! words can be compared and hashed directly.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

/// Number of input variables packed in a word
pub const INPUTS_PER_WORD: usize = 32;

/// Number of outputs packed in a word
pub const OUTPUTS_PER_WORD: usize = 64;

/// Low bit of every 2-bit input field
const LOW_BITS: u64 = 0x5555_5555_5555_5555;

/// Dimensions of a cube space: number of inputs and outputs
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Default)]
pub struct Shape {
    nb_inputs: usize,
    nb_outputs: usize,
}

impl Shape {
    /// Create a shape with the given number of inputs and outputs
    pub fn new(nb_inputs: usize, nb_outputs: usize) -> Shape {
        Shape {
            nb_inputs,
            nb_outputs,
        }
    }

    /// Return the number of input variables
    pub fn nb_inputs(&self) -> usize {
        self.nb_inputs
    }

    /// Return the number of outputs
    pub fn nb_outputs(&self) -> usize {
        self.nb_outputs
    }

    /// Number of words used by the inputs
    pub fn in_words(&self) -> usize {
        self.nb_inputs.div_ceil(INPUTS_PER_WORD)
    }

    /// Number of words used by the outputs
    pub fn out_words(&self) -> usize {
        self.nb_outputs.div_ceil(OUTPUTS_PER_WORD)
    }

    /// Valid bits of an input word
    pub(crate) fn in_mask(&self, word: usize) -> u64 {
        let fields = self.nb_inputs - word * INPUTS_PER_WORD;
        if fields >= INPUTS_PER_WORD {
            !0
        } else {
            (1u64 << (2 * fields)) - 1
        }
    }

    /// Valid bits of an output word
    pub(crate) fn out_mask(&self, word: usize) -> u64 {
        let bits = self.nb_outputs - word * OUTPUTS_PER_WORD;
        if bits >= OUTPUTS_PER_WORD {
            !0
        } else {
            (1u64 << bits) - 1
        }
    }

    /// Fail with a shape mismatch if the other shape is different
    pub(crate) fn check(&self, found: Shape) -> Result<()> {
        if *self == found {
            Ok(())
        } else {
            Err(Error::ShapeMismatch {
                expected: *self,
                found,
            })
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} inputs/{} outputs", self.nb_inputs, self.nb_outputs)
    }
}

/// Value of an input variable in a cube
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub enum Value {
    /// No value allowed: the cube is illegal
    Empty = 0,
    /// Variable forced to 0 (negative literal)
    Zero = 1,
    /// Variable forced to 1 (positive literal)
    One = 2,
    /// Unconstrained variable
    DontCare = 3,
}

impl Value {
    /// Decode a value from the two low bits
    pub(crate) fn from_bits(b: u64) -> Value {
        match b & 3 {
            0 => Value::Empty,
            1 => Value::Zero,
            2 => Value::One,
            _ => Value::DontCare,
        }
    }

    /// Encode the value in two bits
    pub(crate) fn bits(self) -> u64 {
        self as u64
    }

    /// Returns true for Zero and One
    pub fn is_literal(self) -> bool {
        matches!(self, Value::Zero | Value::One)
    }

    /// Character used in cube strings
    pub fn to_char(self) -> char {
        match self {
            Value::Empty => 'x',
            Value::Zero => '0',
            Value::One => '1',
            Value::DontCare => '-',
        }
    }

    /// Parse a character of a cube string
    pub fn from_char(c: char) -> Option<Value> {
        match c {
            'x' | 'X' => Some(Value::Empty),
            '0' => Some(Value::Zero),
            '1' => Some(Value::One),
            '-' => Some(Value::DontCare),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        if b {
            Value::One
        } else {
            Value::Zero
        }
    }
}

/// A ternary vector over the inputs with a bit vector over the outputs
///
/// The cube records its shape; binary operations between cubes of different
/// shapes fail with [`Error::ShapeMismatch`].
/// The tag is a scratch slot for algorithms; it is ignored by comparisons.
#[derive(Clone, Debug)]
pub struct Cube {
    shape: Shape,
    inputs: Box<[u64]>,
    outputs: Box<[u64]>,
    tag: i32,
}

impl Cube {
    /// Create a cube with all inputs don't-care and all outputs cleared
    pub fn new(shape: Shape) -> Cube {
        let mut ret = Cube::empty(shape);
        for w in 0..shape.in_words() {
            ret.inputs[w] = shape.in_mask(w);
        }
        ret
    }

    /// Create a cube with all bits cleared; it is illegal if there is any input
    pub fn empty(shape: Shape) -> Cube {
        Cube {
            shape,
            inputs: vec![0; shape.in_words()].into(),
            outputs: vec![0; shape.out_words()].into(),
            tag: 0,
        }
    }

    /// Create a cube with all bits cleared, reporting allocation failures
    pub(crate) fn try_empty(shape: Shape) -> Result<Cube> {
        let mut inputs = Vec::new();
        inputs.try_reserve_exact(shape.in_words())?;
        inputs.resize(shape.in_words(), 0);
        let mut outputs = Vec::new();
        outputs.try_reserve_exact(shape.out_words())?;
        outputs.resize(shape.out_words(), 0);
        Ok(Cube {
            shape,
            inputs: inputs.into_boxed_slice(),
            outputs: outputs.into_boxed_slice(),
            tag: 0,
        })
    }

    /// Create the universal cube: all inputs don't-care, all outputs set
    pub fn universe(shape: Shape) -> Cube {
        let mut ret = Cube::empty(shape);
        ret.set_tautology();
        ret
    }

    /// Create a cube from input values and output bits
    pub fn from_values(shape: Shape, inputs: &[Value], outputs: &[bool]) -> Result<Cube> {
        if inputs.len() != shape.nb_inputs() {
            return Err(Error::ShapeMismatch {
                expected: shape,
                found: Shape::new(inputs.len(), outputs.len()),
            });
        }
        if outputs.len() != shape.nb_outputs() {
            return Err(Error::ShapeMismatch {
                expected: shape,
                found: Shape::new(inputs.len(), outputs.len()),
            });
        }
        let mut ret = Cube::empty(shape);
        for (i, v) in inputs.iter().enumerate() {
            ret.put(i, *v);
        }
        for (i, b) in outputs.iter().enumerate() {
            ret.put_out(i, *b);
        }
        Ok(ret)
    }

    /// Parse a cube string: one character per input, then one per output
    ///
    /// Inputs use `0`, `1`, `-` (don't-care) and `x` (empty); outputs use `1`
    /// for a set bit and `0`, `-` or `~` for a cleared bit. Whitespace is ignored.
    pub fn parse(shape: Shape, text: &str) -> Result<Cube> {
        let mut ret = Cube::empty(shape);
        let mut pos = 0;
        for c in text.chars() {
            if c.is_whitespace() {
                continue;
            }
            if pos < shape.nb_inputs() {
                let v = Value::from_char(c).ok_or_else(|| Error::Parse {
                    line: 0,
                    message: format!("invalid input character '{c}' in \"{text}\""),
                })?;
                ret.put(pos, v);
            } else if pos < shape.nb_inputs() + shape.nb_outputs() {
                let b = match c {
                    '1' => true,
                    '0' | '-' | '~' => false,
                    _ => {
                        return Err(Error::Parse {
                            line: 0,
                            message: format!("invalid output character '{c}' in \"{text}\""),
                        })
                    }
                };
                ret.put_out(pos - shape.nb_inputs(), b);
            } else {
                pos += 1;
                break;
            }
            pos += 1;
        }
        if pos != shape.nb_inputs() + shape.nb_outputs() {
            return Err(Error::Parse {
                line: 0,
                message: format!(
                    "\"{text}\" does not match {shape} ({} positions expected)",
                    shape.nb_inputs() + shape.nb_outputs()
                ),
            });
        }
        Ok(ret)
    }

    /// Return the shape of the cube
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

    /// Get the value of an input variable
    pub fn input(&self, var: usize) -> Result<Value> {
        self.check_input(var)?;
        Ok(self.value(var))
    }

    /// Set the value of an input variable
    pub fn set_input(&mut self, var: usize, value: Value) -> Result<()> {
        self.check_input(var)?;
        self.put(var, value);
        Ok(())
    }

    /// Get an output bit
    pub fn output(&self, idx: usize) -> Result<bool> {
        self.check_output(idx)?;
        Ok(self.out(idx))
    }

    /// Set an output bit
    pub fn set_output(&mut self, idx: usize, bit: bool) -> Result<()> {
        self.check_output(idx)?;
        self.put_out(idx, bit);
        Ok(())
    }

    /// Swap the polarity of a literal; don't-care and empty are unchanged
    pub fn invert_input(&mut self, var: usize) -> Result<()> {
        let v = self.input(var)?;
        let inv = match v {
            Value::Zero => Value::One,
            Value::One => Value::Zero,
            v => v,
        };
        self.put(var, inv);
        Ok(())
    }

    /// Scratch value attached to the cube by algorithms
    pub fn tag(&self) -> i32 {
        self.tag
    }

    /// Set the scratch value
    pub fn set_tag(&mut self, tag: i32) {
        self.tag = tag;
    }

    /// Make this the universal cube: all inputs don't-care, all outputs set
    pub fn set_tautology(&mut self) {
        for w in 0..self.inputs.len() {
            self.inputs[w] = self.shape.in_mask(w);
        }
        for w in 0..self.outputs.len() {
            self.outputs[w] = self.shape.out_mask(w);
        }
    }

    /// Returns true if some input has no allowed value
    pub fn is_illegal(&self) -> bool {
        self.inputs.iter().enumerate().any(|(w, x)| {
            let low = self.shape.in_mask(w) & LOW_BITS;
            (x | (x >> 1)) & low != low
        })
    }

    /// Returns true if there are outputs and none is set
    pub fn is_out_empty(&self) -> bool {
        self.shape.nb_outputs() != 0 && self.outputs.iter().all(|w| *w == 0)
    }

    /// Returns true if the cube represents no point at all
    pub fn is_void(&self) -> bool {
        self.is_illegal() || self.is_out_empty()
    }

    /// Returns true if all inputs are don't-care
    pub fn is_input_universe(&self) -> bool {
        self.inputs
            .iter()
            .enumerate()
            .all(|(w, x)| *x == self.shape.in_mask(w))
    }

    /// Returns true if all outputs are set
    pub fn is_output_full(&self) -> bool {
        self.outputs
            .iter()
            .enumerate()
            .all(|(w, x)| *x == self.shape.out_mask(w))
    }

    /// Returns true for the universal cube
    pub fn is_tautology(&self) -> bool {
        self.is_input_universe() && self.is_output_full()
    }

    /// Number of inputs fixed to 0 or 1
    pub fn literal_count(&self) -> usize {
        self.inputs
            .iter()
            .map(|x| ((x ^ (x >> 1)) & LOW_BITS).count_ones() as usize)
            .sum()
    }

    /// Number of don't-care inputs
    pub fn dont_care_count(&self) -> usize {
        self.inputs
            .iter()
            .map(|x| (x & (x >> 1) & LOW_BITS).count_ones() as usize)
            .sum()
    }

    /// Number of inputs with the given value
    pub fn input_count(&self, value: Value) -> usize {
        match value {
            Value::DontCare => self.dont_care_count(),
            _ => self.values().filter(|v| *v == value).count(),
        }
    }

    /// Number of outputs set
    pub fn output_count(&self) -> usize {
        self.outputs.iter().map(|x| x.count_ones() as usize).sum()
    }

    /// Returns true if the cube contains the given input point
    ///
    /// The point must give a value for each input.
    pub fn contains_point(&self, point: &[bool]) -> Result<bool> {
        if point.len() != self.nb_inputs() {
            return Err(Error::ShapeMismatch {
                expected: self.shape,
                found: Shape::new(point.len(), self.nb_outputs()),
            });
        }
        Ok(point
            .iter()
            .enumerate()
            .all(|(i, b)| self.value(i).bits() & Value::from(*b).bits() != 0))
    }

    /// Iterate over the input values
    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.nb_inputs()).map(|i| self.value(i))
    }

    /// Compute the intersection of two cubes; the result may be illegal
    pub fn intersection(&self, other: &Cube) -> Result<Cube> {
        self.shape.check(other.shape)?;
        Ok(self.meet(other))
    }

    /// Returns true if `other` is a subset of `self`
    pub fn contains(&self, other: &Cube) -> Result<bool> {
        self.shape.check(other.shape)?;
        Ok(self.covers(other))
    }

    /// Number of input variables where the two cubes have disjoint values
    pub fn delta_in(&self, other: &Cube) -> Result<usize> {
        self.shape.check(other.shape)?;
        Ok(self.distance(other))
    }

    /// Consensus of two cubes, if they are at distance at most one
    pub fn consensus(&self, other: &Cube) -> Result<Option<Cube>> {
        self.shape.check(other.shape)?;
        Ok(self.consensus_with(other))
    }

    /// Cofactor of the cube with respect to `p`, or None if they do not intersect
    pub fn cofactor(&self, p: &Cube) -> Result<Option<Cube>> {
        self.shape.check(p.shape)?;
        Ok(self.cofactor_by(p))
    }

    /// Points of `self` outside `other`, as a list of possibly overlapping cubes
    pub fn sharp(&self, other: &Cube) -> Result<Vec<Cube>> {
        self.shape.check(other.shape)?;
        Ok(self.sharp_by(other))
    }

    /// Points of `self` outside `other`, as a list of disjoint cubes
    pub fn disjoint_sharp(&self, other: &Cube) -> Result<Vec<Cube>> {
        self.shape.check(other.shape)?;
        Ok(self.disjoint_sharp_by(other))
    }

    /// Smallest cube containing both cubes
    pub fn supercube(&self, other: &Cube) -> Result<Cube> {
        self.shape.check(other.shape)?;
        Ok(self.join(other))
    }

    /// Complement of the cube, one cube per literal plus one for the outputs
    pub fn complement(&self) -> Vec<Cube> {
        Cube::universe(self.shape).sharp_by(self)
    }

    /// Cube string, with a separator between inputs and outputs
    pub fn to_string_with(&self, separator: &str) -> String {
        let mut ret = String::with_capacity(self.nb_inputs() + self.nb_outputs() + 1);
        for v in self.values() {
            ret.push(v.to_char());
        }
        if self.nb_outputs() != 0 {
            ret.push_str(separator);
            for o in 0..self.nb_outputs() {
                ret.push(if self.out(o) { '1' } else { '0' });
            }
        }
        ret
    }

    // Unchecked operations, for use once shapes are known to match

    pub(crate) fn in_words(&self) -> &[u64] {
        &self.inputs
    }

    pub(crate) fn out_words(&self) -> &[u64] {
        &self.outputs
    }

    pub(crate) fn out_words_mut(&mut self) -> &mut [u64] {
        &mut self.outputs
    }

    /// Value of an input; panics if out of range
    pub(crate) fn value(&self, var: usize) -> Value {
        let w = self.inputs[var / INPUTS_PER_WORD];
        Value::from_bits(w >> (2 * (var % INPUTS_PER_WORD)))
    }

    /// Set the value of an input; panics if out of range
    pub(crate) fn put(&mut self, var: usize, value: Value) {
        let shift = 2 * (var % INPUTS_PER_WORD);
        let w = &mut self.inputs[var / INPUTS_PER_WORD];
        *w = (*w & !(3u64 << shift)) | (value.bits() << shift);
    }

    /// Output bit; panics if out of range
    pub(crate) fn out(&self, idx: usize) -> bool {
        (self.outputs[idx / OUTPUTS_PER_WORD] >> (idx % OUTPUTS_PER_WORD)) & 1 != 0
    }

    /// Set an output bit; panics if out of range
    pub(crate) fn put_out(&mut self, idx: usize, bit: bool) {
        let mask = 1u64 << (idx % OUTPUTS_PER_WORD);
        let w = &mut self.outputs[idx / OUTPUTS_PER_WORD];
        if bit {
            *w |= mask;
        } else {
            *w &= !mask;
        }
    }

    /// Replace the outputs by the given words
    pub(crate) fn set_out_words(&mut self, words: &[u64]) {
        self.outputs.copy_from_slice(words);
    }

    pub(crate) fn meet(&self, other: &Cube) -> Cube {
        debug_assert_eq!(self.shape, other.shape);
        let mut ret = self.clone();
        ret.meet_assign(other);
        ret
    }

    pub(crate) fn meet_assign(&mut self, other: &Cube) {
        for (a, b) in self.inputs.iter_mut().zip(other.inputs.iter()) {
            *a &= b;
        }
        for (a, b) in self.outputs.iter_mut().zip(other.outputs.iter()) {
            *a &= b;
        }
    }

    pub(crate) fn join(&self, other: &Cube) -> Cube {
        debug_assert_eq!(self.shape, other.shape);
        let mut ret = self.clone();
        for (a, b) in ret.inputs.iter_mut().zip(other.inputs.iter()) {
            *a |= b;
        }
        for (a, b) in ret.outputs.iter_mut().zip(other.outputs.iter()) {
            *a |= b;
        }
        ret
    }

    /// Returns true if `other` is a subset of `self`
    pub(crate) fn covers(&self, other: &Cube) -> bool {
        debug_assert_eq!(self.shape, other.shape);
        self.inputs
            .iter()
            .zip(other.inputs.iter())
            .all(|(a, b)| b & !a == 0)
            && self
                .outputs
                .iter()
                .zip(other.outputs.iter())
                .all(|(a, b)| b & !a == 0)
    }

    pub(crate) fn distance(&self, other: &Cube) -> usize {
        debug_assert_eq!(self.shape, other.shape);
        self.inputs
            .iter()
            .zip(other.inputs.iter())
            .enumerate()
            .map(|(w, (a, b))| {
                let x = a & b;
                (!(x | (x >> 1)) & self.shape.in_mask(w) & LOW_BITS).count_ones() as usize
            })
            .sum()
    }

    /// Returns true if the outputs share a bit, or if there are no outputs
    pub(crate) fn outputs_overlap(&self, other: &Cube) -> bool {
        self.shape.nb_outputs() == 0
            || self
                .outputs
                .iter()
                .zip(other.outputs.iter())
                .any(|(a, b)| a & b != 0)
    }

    /// Returns true if the two cubes share a point
    pub(crate) fn intersects(&self, other: &Cube) -> bool {
        self.distance(other) == 0 && self.outputs_overlap(other)
    }

    pub(crate) fn consensus_with(&self, other: &Cube) -> Option<Cube> {
        debug_assert_eq!(self.shape, other.shape);
        match self.distance(other) {
            0 => {
                if self.shape.nb_outputs() == 0 {
                    return None;
                }
                let mut ret = self.meet(other);
                for (o, (a, b)) in ret
                    .outputs
                    .iter_mut()
                    .zip(self.outputs.iter().zip(other.outputs.iter()))
                {
                    *o = a | b;
                }
                Some(ret)
            }
            1 => {
                if !self.outputs_overlap(other) {
                    return None;
                }
                let mut ret = self.meet(other);
                for w in 0..ret.inputs.len() {
                    let x = ret.inputs[w];
                    let low = self.shape.in_mask(w) & LOW_BITS;
                    let empty = !(x | (x >> 1)) & low;
                    ret.inputs[w] = x | empty | (empty << 1);
                }
                Some(ret)
            }
            _ => None,
        }
    }

    pub(crate) fn cofactor_by(&self, p: &Cube) -> Option<Cube> {
        debug_assert_eq!(self.shape, p.shape);
        if !self.intersects(p) {
            return None;
        }
        let mut ret = self.clone();
        for (w, (a, b)) in ret.inputs.iter_mut().zip(p.inputs.iter()).enumerate() {
            *a |= !b & self.shape.in_mask(w);
        }
        for (w, (a, b)) in ret.outputs.iter_mut().zip(p.outputs.iter()).enumerate() {
            *a |= !b & self.shape.out_mask(w);
        }
        Some(ret)
    }

    pub(crate) fn sharp_by(&self, other: &Cube) -> Vec<Cube> {
        debug_assert_eq!(self.shape, other.shape);
        if !self.intersects(other) {
            return vec![self.clone()];
        }
        let mut ret = Vec::new();
        for var in 0..self.nb_inputs() {
            let rest = self.value(var).bits() & !other.value(var).bits() & 3;
            if rest != 0 {
                let mut c = self.clone();
                c.put(var, Value::from_bits(rest));
                ret.push(c);
            }
        }
        let mut c = self.clone();
        let mut any = false;
        for (a, b) in c.outputs.iter_mut().zip(other.outputs.iter()) {
            *a &= !b;
            any |= *a != 0;
        }
        if any {
            ret.push(c);
        }
        ret
    }

    pub(crate) fn disjoint_sharp_by(&self, other: &Cube) -> Vec<Cube> {
        debug_assert_eq!(self.shape, other.shape);
        if !self.intersects(other) {
            return vec![self.clone()];
        }
        let mut ret = Vec::new();
        let mut current = self.clone();
        for var in 0..self.nb_inputs() {
            let a = self.value(var).bits();
            let b = other.value(var).bits();
            let rest = a & !b & 3;
            if rest != 0 {
                let mut c = current.clone();
                c.put(var, Value::from_bits(rest));
                ret.push(c);
                current.put(var, Value::from_bits(a & b));
            }
        }
        let mut any = false;
        for (a, b) in current.outputs.iter_mut().zip(other.outputs.iter()) {
            *a &= !b;
            any |= *a != 0;
        }
        if any {
            ret.push(current);
        }
        ret
    }

    fn check_input(&self, var: usize) -> Result<()> {
        if var < self.nb_inputs() {
            Ok(())
        } else {
            Err(Error::IndexError {
                what: "input",
                index: var,
                count: self.nb_inputs(),
            })
        }
    }

    fn check_output(&self, idx: usize) -> Result<()> {
        if idx < self.nb_outputs() {
            Ok(())
        } else {
            Err(Error::IndexError {
                what: "output",
                index: idx,
                count: self.nb_outputs(),
            })
        }
    }
}

impl PartialEq for Cube {
    fn eq(&self, other: &Cube) -> bool {
        self.shape == other.shape && self.inputs == other.inputs && self.outputs == other.outputs
    }
}

impl Eq for Cube {}

impl Hash for Cube {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shape.hash(state);
        self.inputs.hash(state);
        self.outputs.hash(state);
    }
}

impl PartialOrd for Cube {
    fn partial_cmp(&self, other: &Cube) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cube {
    fn cmp(&self, other: &Cube) -> Ordering {
        self.shape
            .cmp(&other.shape)
            .then_with(|| self.inputs.cmp(&other.inputs))
            .then_with(|| self.outputs.cmp(&other.outputs))
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(shape: Shape, s: &str) -> Cube {
        Cube::parse(shape, s).unwrap()
    }

    #[test]
    fn test_shape() {
        let s = Shape::new(33, 65);
        assert_eq!(s.in_words(), 2);
        assert_eq!(s.out_words(), 2);
        assert_eq!(s.in_mask(0), !0);
        assert_eq!(s.in_mask(1), 0b11);
        assert_eq!(s.out_mask(0), !0);
        assert_eq!(s.out_mask(1), 0b1);
        assert_eq!(Shape::new(0, 0).in_words(), 0);
        assert!(Shape::new(2, 1).check(Shape::new(2, 2)).is_err());
    }

    #[test]
    fn test_values() {
        let s = Shape::new(40, 3);
        let mut c = Cube::new(s);
        for i in 0..40 {
            assert_eq!(c.input(i).unwrap(), Value::DontCare);
        }
        c.set_input(35, Value::One).unwrap();
        c.set_input(3, Value::Zero).unwrap();
        c.set_output(2, true).unwrap();
        assert_eq!(c.input(35).unwrap(), Value::One);
        assert_eq!(c.input(3).unwrap(), Value::Zero);
        assert_eq!(c.input(34).unwrap(), Value::DontCare);
        assert!(c.output(2).unwrap());
        assert!(!c.output(0).unwrap());
        assert_eq!(c.literal_count(), 2);
        assert_eq!(c.dont_care_count(), 38);
        assert_eq!(c.input_count(Value::One), 1);
        assert_eq!(c.input_count(Value::Empty), 0);
        c.invert_input(35).unwrap();
        assert_eq!(c.input(35).unwrap(), Value::Zero);
    }

    #[test]
    fn test_index_errors() {
        let mut c = Cube::new(Shape::new(2, 1));
        assert!(matches!(
            c.input(2),
            Err(Error::IndexError {
                what: "input",
                index: 2,
                count: 2
            })
        ));
        assert!(c.set_input(5, Value::One).is_err());
        assert!(c.output(1).is_err());
        assert!(c.set_output(1, true).is_err());
    }

    #[test]
    fn test_string() {
        let s = Shape::new(4, 2);
        let c = cube(s, "01-x 10");
        assert_eq!(c.to_string(), "01-x 10");
        assert_eq!(c.to_string_with("|"), "01-x|10");
        assert!(c.is_illegal());
        let d = cube(s, "1--0~1");
        assert_eq!(d.to_string(), "1--0 01");
        assert!(Cube::parse(s, "01- 10").is_err());
        assert!(Cube::parse(s, "01-0 10 1").is_err());
        assert!(Cube::parse(s, "01-2 10").is_err());
        assert!(Cube::parse(s, "01-0 1x").is_err());
    }

    #[test]
    fn test_roundtrip() {
        let s = Shape::new(37, 5);
        let text = "01-10-1-0-10-1-0-11110000----------01 10110";
        let c = cube(s, text);
        assert_eq!(cube(s, &c.to_string()), c);
        assert_eq!(c.to_string(), text);
    }

    #[test]
    fn test_illegal() {
        let s = Shape::new(3, 1);
        let a = cube(s, "0-1 1");
        let b = cube(s, "1-1 1");
        assert!(!a.is_illegal());
        let c = a.intersection(&b).unwrap();
        assert!(c.is_illegal());
        assert!(c.is_void());
        assert_eq!(a.delta_in(&b).unwrap(), 1);
        let no_out = cube(s, "0-1 0");
        assert!(no_out.is_out_empty());
        assert!(no_out.is_void());
        assert!(!Cube::new(Shape::new(0, 1)).is_illegal());
    }

    #[test]
    fn test_self_intersection() {
        let s = Shape::new(5, 2);
        for text in ["01-10 11", "----- 01", "11111 10"] {
            let c = cube(s, text);
            assert_eq!(c.intersection(&c).unwrap(), c);
        }
    }

    #[test]
    fn test_tautology_contains() {
        let s = Shape::new(35, 3);
        let t = Cube::universe(s);
        assert!(t.is_tautology());
        let mut c = Cube::new(s);
        c.set_input(34, Value::Zero).unwrap();
        c.set_output(1, true).unwrap();
        assert!(t.contains(&c).unwrap());
        assert!(!c.contains(&t).unwrap());
        let mut u = Cube::new(s);
        u.set_input(0, Value::One).unwrap();
        u.set_tautology();
        assert_eq!(u, t);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = Cube::new(Shape::new(2, 1));
        let b = Cube::new(Shape::new(3, 1));
        assert!(matches!(
            a.intersection(&b),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(a.contains(&b).is_err());
        assert!(a.sharp(&b).is_err());
        assert_ne!(a, b);
    }

    #[test]
    fn test_consensus() {
        let s = Shape::new(3, 1);
        let a = cube(s, "01- 1");
        let b = cube(s, "11- 1");
        assert_eq!(a.consensus(&b).unwrap(), Some(cube(s, "-1- 1")));
        let c = cube(s, "10- 1");
        assert_eq!(a.consensus(&c).unwrap(), None);

        // Multi-output consensus across the output part
        let s = Shape::new(2, 2);
        let a = cube(s, "0- 10");
        let b = cube(s, "-0 01");
        assert_eq!(a.consensus(&b).unwrap(), Some(cube(s, "00 11")));
        let c = cube(s, "1- 01");
        assert_eq!(a.consensus(&c).unwrap(), None);
    }

    #[test]
    fn test_cofactor() {
        let s = Shape::new(3, 2);
        let c = cube(s, "01- 11");
        let p = cube(s, "0-- 10");
        assert_eq!(c.cofactor(&p).unwrap(), Some(cube(s, "-1- 11")));
        let q = cube(s, "1-- 11");
        assert_eq!(c.cofactor(&q).unwrap(), None);
    }

    #[test]
    fn test_sharp() {
        let s = Shape::new(2, 1);
        let u = Cube::universe(s);
        let a = cube(s, "01 1");
        let mut parts = u.sharp(&a).unwrap();
        parts.sort();
        assert_eq!(parts, vec![cube(s, "-0 1"), cube(s, "1- 1")]);
        let disjoint = u.disjoint_sharp(&a).unwrap();
        assert_eq!(disjoint, vec![cube(s, "1- 1"), cube(s, "00 1")]);
        let b = cube(s, "11 1");
        assert_eq!(a.sharp(&b).unwrap(), vec![a.clone()]);
    }

    #[test]
    fn test_complement_single() {
        let s = Shape::new(1, 1);
        let a = cube(s, "0 1");
        assert_eq!(a.complement(), vec![cube(s, "1 1")]);
        let s = Shape::new(2, 2);
        let a = cube(s, "1- 10");
        assert_eq!(a.complement(), vec![cube(s, "0- 11"), cube(s, "-- 01")]);
    }

    #[test]
    fn test_supercube() {
        let s = Shape::new(3, 2);
        let a = cube(s, "010 10");
        let b = cube(s, "011 01");
        assert_eq!(a.supercube(&b).unwrap(), cube(s, "01- 11"));
    }

    #[test]
    fn test_ordering_ignores_tag() {
        let s = Shape::new(2, 1);
        let mut a = cube(s, "01 1");
        let b = cube(s, "01 1");
        a.set_tag(7);
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a.tag(), 7);
    }

    #[test]
    fn test_contains_point() {
        let s = Shape::new(3, 1);
        let a = cube(s, "0-1 1");
        assert!(a.contains_point(&[false, true, true]).unwrap());
        assert!(a.contains_point(&[false, false, true]).unwrap());
        assert!(!a.contains_point(&[true, false, true]).unwrap());
    }

    #[test]
    fn test_contains_point_wrong_length() {
        let s = Shape::new(3, 1);
        let a = cube(s, "0-1 1");
        assert!(matches!(
            a.contains_point(&[false, true]),
            Err(Error::ShapeMismatch { .. })
        ));
        assert!(a.contains_point(&[false, true, true, false]).is_err());
    }
}
