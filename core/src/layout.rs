//! View metadata.
//!
//! A [`Layout`] is the part of a dope vector that does not touch memory: a base offset, a size,
//! and a stride per axis. Every view operation is computed here, and the views only apply the
//! resulting origin advance to their borrowed storage.

use std::iter::FusedIterator;

use crate::{Axis, Error, Index};

/// The size and strides of a view, along with its offset in the underlying buffer.
///
/// The offset is the distance from the start of the buffer that a view was originally
/// constructed over to the first element of the view. It is kept for introspection only: views
/// address their elements relative to their own origin.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Layout<const D: usize> {
    offset: usize,
    size: Index<D>,
    strides: Index<D>,
}

impl<const D: usize> Layout<D> {
    /// Returns the offset of `index` along `axis` in the underlying buffer.
    pub fn accumulated_offset(&self, index: usize, axis: Axis) -> Result<usize, Error> {
        self.check_index(index, axis)?;

        Ok(self
            .offset
            .saturating_add(self.strides[axis].saturating_mul(index)))
    }

    pub(crate) fn check_axis(&self, axis: Axis) -> Result<(), Error> {
        if *axis < D {
            Ok(())
        } else {
            Err(Error::AxisOutOfBounds {
                axis: *axis,
                dimensions: D,
            })
        }
    }

    pub(crate) fn check_index(&self, index: usize, axis: Axis) -> Result<(), Error> {
        self.check_axis(axis)?;

        if index < self.size[axis] {
            Ok(())
        } else {
            Err(Error::IndexOutOfBounds {
                index,
                axis: *axis,
                size: self.size[axis],
            })
        }
    }

    /// Checks that `other` has the same size as `self` along every axis.
    pub fn check_same_size(&self, other: &Self) -> Result<(), Error> {
        match (0..D).find(|&d| self.size[d] != other.size[d]) {
            Some(axis) => Err(Error::ShapeMismatch {
                axis,
                expected: self.size[axis],
                found: other.size[axis],
            }),
            None => Ok(()),
        }
    }

    /// Returns the number of elements.
    pub fn elements(&self) -> usize {
        self.size.product()
    }

    /// Returns the position of `index` relative to the origin, checking bounds on every axis.
    pub fn flat_index(&self, index: &Index<D>) -> Result<usize, Error> {
        for (d, &i) in index.iter().enumerate() {
            self.check_index(i, Axis(d))?;
        }

        Ok(self.flat_index_unchecked(index))
    }

    pub(crate) fn flat_index_unchecked(&self, index: &Index<D>) -> usize {
        self.strides
            .iter()
            .zip(index.iter())
            .fold(0, |flat, (stride, idx)| flat + stride * idx)
    }

    /// Returns a layout with the provided strides.
    ///
    /// The strides are not required to be related to the size in any way.
    pub fn from_parts(offset: usize, size: Index<D>, strides: Index<D>) -> Self {
        Self {
            offset,
            size,
            strides,
        }
    }

    /// Returns whether the layout is the canonical row-major layout for its size.
    pub fn is_contiguous(&self) -> bool {
        self.elements() == 0 || self.strides == self.size.row_major_strides()
    }

    /// Returns a canonical row-major layout.
    pub fn new(offset: usize, size: Index<D>) -> Self {
        Self::from_parts(offset, size, size.row_major_strides())
    }

    /// Returns the offset in the underlying buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns an iterator over the positions of the elements relative to the origin, in
    /// row-major order.
    pub fn offsets(&self) -> Offsets<D> {
        Offsets::new(self)
    }

    /// Returns a layout with the axes reordered so that axis `d` of the new layout is axis
    /// `order[d]` of this layout.
    pub fn permute(&self, order: &Index<D>) -> Result<Self, Error> {
        let mut included = [false; D];

        for &axis in order.iter() {
            self.check_axis(Axis(axis))?;

            if included[axis] {
                return Err(Error::DuplicateAxis { axis });
            }
            included[axis] = true;
        }

        let mut size = Index::zero();
        let mut strides = Index::zero();
        for (d, &axis) in order.iter().enumerate() {
            size[d] = self.size[axis];
            strides[d] = self.strides[axis];
        }

        Ok(Self::from_parts(self.offset, size, strides))
    }

    /// Returns the layout given by fixing `axis` to `index`, along with the distance the origin
    /// moves.
    pub(crate) fn reduce<const E: usize>(
        &self,
        axis: Axis,
        index: usize,
    ) -> Result<(usize, Layout<E>), Error> {
        self.check_index(index, axis)?;

        // An empty layout has unchecked strides, so the advance may not be addressable.
        let advance = self.strides[axis].saturating_mul(index);
        let layout = Layout::from_parts(
            self.offset.saturating_add(advance),
            self.size.remove_axis(axis),
            self.strides.remove_axis(axis),
        );

        Ok((advance, layout))
    }

    /// Returns the size along each axis.
    pub fn size(&self) -> &Index<D> {
        &self.size
    }

    /// Returns the size along `axis`.
    pub fn size_at(&self, axis: Axis) -> Result<usize, Error> {
        self.check_axis(axis)?;

        Ok(self.size[axis])
    }

    /// Returns the number of elements a buffer must hold from the origin onward to contain
    /// every element of the layout.
    ///
    /// Returns `None` if the number of elements, the span, or the offset of the last element
    /// in the underlying buffer overflows `usize`.
    pub fn span(&self) -> Option<usize> {
        let elements = self.size.checked_product()?;

        let span = if elements == 0 {
            0
        } else {
            self.size
                .iter()
                .zip(self.strides.iter())
                .try_fold(1usize, |span, (size, stride)| {
                    span.checked_add((size - 1).checked_mul(*stride)?)
                })?
        };

        self.offset.checked_add(span)?;
        Some(span)
    }

    /// Returns the stride along each axis.
    pub fn strides(&self) -> &Index<D> {
        &self.strides
    }

    /// Returns the layout restricted to `size` elements from `start` along each axis, along with
    /// the distance the origin moves.
    ///
    /// Strides are unchanged.
    pub fn window(&self, start: &Index<D>, size: &Index<D>) -> Result<(usize, Self), Error> {
        for d in 0..D {
            let extent = self.size[d];

            if start[d] >= extent {
                return Err(Error::IndexOutOfBounds {
                    index: start[d],
                    axis: d,
                    size: extent,
                });
            }
            if start[d].checked_add(size[d]).map_or(true, |end| end > extent) {
                return Err(Error::WindowOutOfBounds {
                    axis: d,
                    start: start[d],
                    size: size[d],
                    extent,
                });
            }
        }

        let advance = self.flat_index_unchecked(start);

        Ok((
            advance,
            Self::from_parts(self.offset + advance, *size, self.strides),
        ))
    }
}

/// An iterator over element positions of a [`Layout`] in row-major order.
///
/// Positions are relative to the origin of the layout.
#[derive(Clone, Debug)]
pub struct Offsets<const D: usize> {
    size: Index<D>,
    strides: Index<D>,
    coords: Index<D>,
    current: usize,
    remaining: usize,
    first: bool,
}

impl<const D: usize> Offsets<D> {
    fn new(layout: &Layout<D>) -> Self {
        Self {
            size: layout.size,
            strides: layout.strides,
            coords: Index::zero(),
            current: 0,
            remaining: layout.elements(),
            first: true,
        }
    }

    fn impl_next(&mut self, dim: usize) -> Option<usize> {
        if self.first {
            self.first = false;
            return Some(self.current);
        }

        self.coords[dim] += 1;

        if self.coords[dim] < self.size[dim] {
            self.current += self.strides[dim];

            Some(self.current)
        } else if dim > 0 {
            self.coords[dim] = 0;
            let backstride = self.strides[dim] * (self.size[dim] - 1);
            self.current -= backstride;

            self.impl_next(dim - 1)
        } else {
            None
        }
    }
}

impl<const D: usize> Iterator for Offsets<D> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        self.impl_next(D.saturating_sub(1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<const D: usize> ExactSizeIterator for Offsets<D> {}

impl<const D: usize> FusedIterator for Offsets<D> {}
