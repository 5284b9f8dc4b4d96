//! Fixed-length index tuples.
//!
//! An [`Index`] is used in three roles throughout the crate: as the size of a view along each
//! axis, as the stride of a view along each axis, and as a coordinate into a view.

use std::{
    fmt,
    ops::{self, Deref},
};

/// An axis of a view, numbered from zero.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Axis(pub usize);

impl Deref for Axis {
    type Target = usize;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A `D`-dimensional tuple of unsigned integers.
///
/// Arithmetic is elementwise. Ordering is lexicographic with axis 0 most significant, which is
/// useful for ordered containers but says nothing about whether one shape "fits" in another.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Index<const D: usize>(pub [usize; D]);

impl<const D: usize> Index<D> {
    /// Returns an index with every lane set to `value`.
    pub fn constant(value: usize) -> Self {
        Self([value; D])
    }

    /// Returns the index given by converting a linear row-major position over `range`.
    ///
    /// The last axis varies fastest. The first axis is not wrapped, so that the position one
    /// past the last element maps to `[range[0], 0, ..., 0]` and converts back unchanged.
    pub fn from_position(mut position: usize, range: &Index<D>) -> Self {
        let mut index = Self::zero();

        for d in (0..D).rev() {
            if d == 0 {
                index[d] = position;
            } else if range[d] == 0 {
                index[d] = 0;
            } else {
                index[d] = position % range[d];
                position /= range[d];
            }
        }

        index
    }

    /// Returns a new index.
    pub fn new(lanes: [usize; D]) -> Self {
        Self(lanes)
    }

    /// Returns an index with every lane set to one.
    pub fn ones() -> Self {
        Self::constant(1)
    }

    /// Returns the product of the lanes, or `None` if it overflows.
    ///
    /// A zero lane makes the product zero regardless of the other lanes.
    pub fn checked_product(&self) -> Option<usize> {
        if self.contains(&0) {
            Some(0)
        } else {
            self.iter().try_fold(1usize, |acc, &v| acc.checked_mul(v))
        }
    }

    /// Returns the linear row-major position of this index within `range`, or `None` if it
    /// overflows.
    pub fn checked_to_position(&self, range: &Index<D>) -> Option<usize> {
        let mut position = 0usize;
        let mut weight = Some(1usize);

        for d in (0..D).rev() {
            if self[d] > 0 {
                position = position.checked_add(self[d].checked_mul(weight?)?)?;
            }
            weight = weight.and_then(|w| w.checked_mul(range[d]));
        }

        Some(position)
    }

    /// Returns the product of the lanes, saturating at `usize::MAX`.
    ///
    /// For a size, this is the number of elements.
    pub fn product(&self) -> usize {
        self.checked_product().unwrap_or(usize::MAX)
    }

    /// Returns a copy of the index with `axis` deleted, shifting later lanes down by one.
    ///
    /// # Panics
    ///
    /// Panics if `E + 1 != D` or if `axis` is out of bounds.
    pub fn remove_axis<const E: usize>(&self, axis: Axis) -> Index<E> {
        assert_eq!(E + 1, D, "removing an axis must reduce dimensions by one");
        assert!(*axis < D, "cannot remove axis {} of {D}", *axis);

        let mut removed = Index::<E>::zero();
        self.iter()
            .enumerate()
            .filter(|(d, _)| *d != *axis)
            .zip(removed.0.iter_mut())
            .for_each(|((_, v), lane)| *lane = *v);
        removed
    }

    /// Returns the canonical row-major strides of a view with this size.
    ///
    /// The last axis has stride one, and every preceding axis has the stride of the following
    /// axis multiplied by the size of the following axis. Strides saturate at `usize::MAX`,
    /// which can only happen for sizes with no elements.
    pub fn row_major_strides(&self) -> Self {
        let mut strides = Self::ones();

        for d in (1..D).rev() {
            strides[d - 1] = self[d].saturating_mul(strides[d]);
        }

        strides
    }

    /// Returns the sum of the lanes.
    pub fn sum(&self) -> usize {
        self.iter().sum()
    }

    /// Returns the linear row-major position of this index within `range`.
    ///
    /// This is the inverse of [`Index::from_position`]. The position saturates at `usize::MAX`;
    /// see [`Index::checked_to_position`].
    pub fn to_position(&self, range: &Index<D>) -> usize {
        self.checked_to_position(range).unwrap_or(usize::MAX)
    }

    /// Returns an index with every lane set to zero.
    pub fn zero() -> Self {
        Self::constant(0)
    }
}

impl<const D: usize> AsRef<[usize]> for Index<D> {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl<const D: usize> Deref for Index<D> {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const D: usize> From<[usize; D]> for Index<D> {
    fn from(lanes: [usize; D]) -> Self {
        Self(lanes)
    }
}

impl<const D: usize> From<Index<D>> for [usize; D] {
    fn from(index: Index<D>) -> Self {
        index.0
    }
}

impl<const D: usize> ops::Index<usize> for Index<D> {
    type Output = usize;

    fn index(&self, d: usize) -> &Self::Output {
        &self.0[d]
    }
}

impl<const D: usize> ops::IndexMut<usize> for Index<D> {
    fn index_mut(&mut self, d: usize) -> &mut Self::Output {
        &mut self.0[d]
    }
}

impl<const D: usize> ops::Index<Axis> for Index<D> {
    type Output = usize;

    fn index(&self, axis: Axis) -> &Self::Output {
        &self.0[axis.0]
    }
}

impl<const D: usize> ops::IndexMut<Axis> for Index<D> {
    fn index_mut(&mut self, axis: Axis) -> &mut Self::Output {
        &mut self.0[axis.0]
    }
}

macro_rules! impl_elementwise {
    ($($trait:ident::$method:ident, $assign_trait:ident::$assign_method:ident, $op:tt;)*) => {
        $(
            impl<const D: usize> ops::$assign_trait for Index<D> {
                fn $assign_method(&mut self, rhs: Self) {
                    self.0
                        .iter_mut()
                        .zip(rhs.0)
                        .for_each(|(lhs, rhs)| *lhs = *lhs $op rhs);
                }
            }

            impl<const D: usize> ops::$trait for Index<D> {
                type Output = Self;

                fn $method(mut self, rhs: Self) -> Self::Output {
                    ops::$assign_trait::$assign_method(&mut self, rhs);
                    self
                }
            }
        )*
    };
}

impl_elementwise! {
    Add::add, AddAssign::add_assign, +;
    Sub::sub, SubAssign::sub_assign, -;
    Mul::mul, MulAssign::mul_assign, *;
    Div::div, DivAssign::div_assign, /;
}

macro_rules! impl_scalar {
    ($($trait:ident::$method:ident, $assign_trait:ident::$assign_method:ident, $op:tt;)*) => {
        $(
            impl<const D: usize> ops::$assign_trait<usize> for Index<D> {
                fn $assign_method(&mut self, rhs: usize) {
                    self.0.iter_mut().for_each(|lhs| *lhs = *lhs $op rhs);
                }
            }

            impl<const D: usize> ops::$trait<usize> for Index<D> {
                type Output = Self;

                fn $method(mut self, rhs: usize) -> Self::Output {
                    ops::$assign_trait::$assign_method(&mut self, rhs);
                    self
                }
            }
        )*
    };
}

impl_scalar! {
    Mul::mul, MulAssign::mul_assign, *;
    Div::div, DivAssign::div_assign, /;
}

impl<const D: usize> fmt::Display for Index<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((first, rest)) = self.0.split_first() {
            write!(f, "{first}")?;
            for v in rest {
                write!(f, "/{v}")?;
            }
        }
        Ok(())
    }
}
