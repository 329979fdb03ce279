//! Triangular node storage for recombining binomial lattices.
//!
//! A lattice with `steps = N` has `N + 1` time layers; layer `n` holds
//! `n + 1` slots, one per state index `i` (the number of up-moves so far).
//! Each layer is a flat buffer, so bounds checking stays local to
//! [`Lattice::get`] and [`Lattice::set`].

use std::fmt;

use crr_core::utilities::format_real;
use crr_core::{Error, Real, Result, Size};
use crr_math::{round, Rounding};

/// A triangular container holding one value per node `(n, i)` with
/// `0 <= i <= n <= steps`.
///
/// Slots start unset.  Reading an unset slot, or touching a node outside
/// the triangle, returns an error instead of a default value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Lattice<T> {
    levels: Vec<Vec<Option<T>>>,
}

impl<T: Copy> Lattice<T> {
    /// Allocate an empty lattice with `steps + 1` time layers.
    pub fn new(steps: Size) -> Self {
        let levels = (0..=steps).map(|n| vec![None; n + 1]).collect();
        Self { levels }
    }

    /// Allocate a lattice and fill every node with `f(n, i)`, in order of
    /// increasing `n` then increasing `i`.
    ///
    /// Stops at the first error returned by `f`.
    pub fn try_from_fn<F>(steps: Size, mut f: F) -> Result<Self>
    where
        F: FnMut(Size, Size) -> Result<T>,
    {
        let mut lattice = Self::new(steps);
        for n in 0..=steps {
            for i in 0..=n {
                lattice.set(n, i, f(n, i)?)?;
            }
        }
        Ok(lattice)
    }

    /// Number of time steps `N` (the lattice has `N + 1` layers).
    pub fn steps(&self) -> Size {
        self.levels.len() - 1
    }

    /// Number of nodes at time step `n`, or `None` past the last layer.
    pub fn size(&self, n: Size) -> Option<Size> {
        self.levels.get(n).map(Vec::len)
    }

    /// Total number of nodes, `(N + 1)(N + 2) / 2`.
    pub fn node_count(&self) -> Size {
        self.levels.iter().map(Vec::len).sum()
    }

    fn check(&self, n: Size, i: Size) -> Result<()> {
        if i > n || n > self.steps() {
            return Err(Error::NodeOutOfRange {
                step: n,
                index: i,
                steps: self.steps(),
            });
        }
        Ok(())
    }

    /// Value at node `(n, i)`.
    ///
    /// # Errors
    /// [`Error::NodeOutOfRange`] outside the triangle, [`Error::UnsetNode`]
    /// if the slot has not been set yet.
    pub fn get(&self, n: Size, i: Size) -> Result<T> {
        self.check(n, i)?;
        self.levels[n][i].ok_or(Error::UnsetNode { step: n, index: i })
    }

    /// Record `value` at node `(n, i)`, overwriting any previous value.
    ///
    /// # Errors
    /// [`Error::NodeOutOfRange`] outside the triangle.
    pub fn set(&mut self, n: Size, i: Size, value: T) -> Result<()> {
        self.check(n, i)?;
        self.levels[n][i] = Some(value);
        Ok(())
    }

    /// `true` once every slot holds a value.
    pub fn is_complete(&self) -> bool {
        self.levels.iter().flatten().all(Option::is_some)
    }

    /// Iterate over all node coordinates `(n, i)` in layer order.
    pub fn nodes(&self) -> impl Iterator<Item = (Size, Size)> + '_ {
        self.levels
            .iter()
            .enumerate()
            .flat_map(|(n, level)| (0..level.len()).map(move |i| (n, i)))
    }
}

impl Lattice<Real> {
    /// Render the lattice one time layer per line, each value rounded to
    /// the closest `precision`-decimal number and separated by a single
    /// space.
    ///
    /// Unset slots are shown as `-`.
    pub fn render(&self, precision: usize) -> String {
        self.render_with(precision, Rounding::Closest)
    }

    /// Like [`render`](Self::render), rounding with `convention`.
    ///
    /// With [`Rounding::None`] values are only cut to `precision` decimals
    /// by the formatter.
    pub fn render_with(&self, precision: usize, convention: Rounding) -> String {
        let digits = i32::try_from(precision).unwrap_or(i32::MAX);
        let mut out = String::new();
        for level in &self.levels {
            let line: Vec<String> = level
                .iter()
                .map(|slot| match slot {
                    Some(v) => format_real(round(*v, digits, convention), precision),
                    None => "-".to_string(),
                })
                .collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Lattice<Real> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(1);
        f.write_str(&self.render(precision))
    }
}
