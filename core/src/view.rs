//! Dope vectors.
//!
//! A [`View`] is a `D`-dimensional window onto a flat buffer that it borrows but does not own.
//! Sub-views along an axis, permutations of the axes, and rectangular windows are all computed
//! from the [`Layout`] alone, so that deriving a view never moves or copies elements. Any number
//! of views may share a buffer; a [`ViewMut`] is the exclusive counterpart that allows writing.
//!
//! Views of rank 2 and above descend into views of one rank lower with `at` and `slice`. Views
//! of rank 1 are the base case, where `at` returns the element itself.
//!
//! ```
//! use dope_core::{Grid, Index};
//!
//! let grid = Grid::from_fn([10, 10], |index: Index<2>| index[0] * 10 + index[1]);
//! let transposed = grid.view().permute([1, 0])?;
//!
//! assert_eq!(grid.view().at(3)?.at(7)?, &37);
//! assert_eq!(transposed.at(7)?.at(3)?, &37);
//! # Ok::<(), dope_core::Error>(())
//! ```

use std::{fmt, ops};

use crate::{
    cursor::{Cursor, CursorMut},
    layout::Layout,
    Axis, Error, Grid, Index,
};

mod iter;
pub use iter::{AxisIter, IndicesIter, Iter};

fn origin<T>(data: &[T], advance: usize) -> &[T] {
    data.get(advance..).unwrap_or(&[])
}

fn origin_mut<T>(data: &mut [T], advance: usize) -> &mut [T] {
    let len = data.len();
    &mut data[advance.min(len)..]
}

fn check_span<const D: usize>(layout: &Layout<D>, len: usize) -> Result<(), Error> {
    let required = layout.span().ok_or(Error::LayoutOverflow)?;

    if required <= len {
        Ok(())
    } else {
        Err(Error::InsufficientData { required, len })
    }
}

/// A shared view of a `D`-dimensional array.
#[derive(Debug)]
pub struct View<'a, T, const D: usize> {
    data: &'a [T], // first element is first element in view
    layout: Layout<D>,
}

impl<'a, T, const D: usize> Clone for View<'a, T, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, const D: usize> Copy for View<'a, T, D> {}

impl<'a, T, const D: usize> View<'a, T, D> {
    /// Returns the offset in the underlying buffer of `index` along `axis`.
    pub fn accumulated_offset(&self, index: usize, axis: Axis) -> Result<usize, Error> {
        self.layout.accumulated_offset(index, axis)
    }

    /// Returns the borrowed storage, starting at the first element of the view.
    ///
    /// Elements of the view are not necessarily contiguous in the slice, and the slice may hold
    /// elements that are not part of the view.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the offset of the first element of the view in the underlying buffer.
    pub fn base_offset(&self) -> usize {
        self.layout.offset()
    }

    /// Returns a cursor at the first element of the view.
    pub fn begin(&self) -> Cursor<'a, T, D> {
        Cursor::new(*self, 0)
    }

    /// Returns a cursor at the element with the provided index.
    pub fn cursor_at<I>(&self, index: I) -> Result<Cursor<'a, T, D>, Error>
    where
        Index<D>: From<I>,
    {
        let index = Index::from(index);
        self.layout.flat_index(&index)?;

        Ok(Cursor::new(*self, index.to_position(self.sizes())))
    }

    /// Returns the number of dimensions of the view.
    pub fn dimensions(&self) -> usize {
        D
    }

    /// Returns the element with the provided index, or an error if out of bounds along any axis.
    pub fn element<I>(&self, index: I) -> Result<&'a T, Error>
    where
        Index<D>: From<I>,
    {
        let flat = self.layout.flat_index(&Index::from(index))?;

        Ok(&self.data[flat])
    }

    /// Returns the total number of elements in the view.
    pub fn elements(&self) -> usize {
        self.layout.elements()
    }

    /// Returns a cursor one past the last element of the view.
    pub fn end(&self) -> Cursor<'a, T, D> {
        Cursor::new(*self, self.elements())
    }

    /// Returns a view over `data` with the provided base offset, size, and strides.
    ///
    /// The base offset is only recorded, and the first element of `data` is the first element of
    /// the view. Returns an error if `data` is too short to hold every element.
    pub fn from_parts<S>(data: &'a [T], offset: usize, size: S, strides: S) -> Result<Self, Error>
    where
        Index<D>: From<S>,
    {
        let layout = Layout::from_parts(offset, Index::from(size), Index::from(strides));
        check_span(&layout, data.len())?;

        Ok(Self::new_unchecked(data, layout))
    }

    /// Returns the element with the provided index, or `None` if out of bounds along any axis.
    pub fn get<I>(&self, index: I) -> Option<&'a T>
    where
        Index<D>: From<I>,
    {
        self.element(index).ok()
    }

    /// Returns an iterator over the indices of the view in row-major order.
    pub fn indices(&self) -> IndicesIter<D> {
        IndicesIter::new(*self.sizes())
    }

    /// Returns whether the view has the canonical row-major layout for its size.
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    /// Returns whether the view contains no elements.
    pub fn is_empty(&self) -> bool {
        self.elements() == 0
    }

    /// Returns an iterator over the elements of the view in row-major order.
    pub fn iter(&self) -> Iter<'a, T, D> {
        Iter::new(*self)
    }

    /// Returns the layout of the view.
    pub fn layout(&self) -> &Layout<D> {
        &self.layout
    }

    /// Returns a canonical row-major view over `data`.
    ///
    /// Returns an error if `data` holds fewer elements than `size` requires.
    pub fn new<S>(data: &'a [T], size: S) -> Result<Self, Error>
    where
        Index<D>: From<S>,
    {
        let layout = Layout::new(0, Index::from(size));
        check_span(&layout, data.len())?;

        Ok(Self::new_unchecked(data, layout))
    }

    pub(crate) fn new_unchecked(data: &'a [T], layout: Layout<D>) -> Self {
        Self { data, layout }
    }

    /// Returns a view with the axes reordered so that axis `d` of the new view is axis
    /// `order[d]` of this view.
    ///
    /// No elements are moved. Returns an error if `order` is not a permutation of `0..D`.
    pub fn permute<I>(&self, order: I) -> Result<Self, Error>
    where
        Index<D>: From<I>,
    {
        let layout = self.layout.permute(&Index::from(order))?;

        Ok(Self::new_unchecked(self.data, layout))
    }

    fn reduce<const E: usize>(&self, axis: Axis, index: usize) -> Result<View<'a, T, E>, Error> {
        let (advance, layout) = self.layout.reduce(axis, index)?;

        Ok(View::new_unchecked(origin(self.data, advance), layout))
    }

    /// Returns whether `other` describes exactly the same elements as `self`.
    ///
    /// Views are the same if they borrow the same storage with the same layout.
    pub fn same_view(&self, other: &Self) -> bool {
        std::ptr::eq(self.data, other.data) && self.layout == other.layout
    }

    /// Returns the size along `axis`.
    pub fn size_at(&self, axis: Axis) -> Result<usize, Error> {
        self.layout.size_at(axis)
    }

    /// Returns the size along each axis.
    pub fn sizes(&self) -> &Index<D> {
        self.layout.size()
    }

    /// Returns the stride along each axis.
    pub fn strides(&self) -> &Index<D> {
        self.layout.strides()
    }

    /// Returns an owned grid with a copy of the elements of the view.
    pub fn to_grid(&self) -> Grid<T, D>
    where
        T: Clone,
    {
        Grid::new_unchecked(self.to_vec(), *self.sizes())
    }

    /// Returns the elements of the view in row-major order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Returns the view restricted to `size` elements from `start` along each axis.
    ///
    /// Strides are unchanged. Returns an error if the window does not fit in the view.
    pub fn window<I>(&self, start: I, size: I) -> Result<Self, Error>
    where
        Index<D>: From<I>,
    {
        let (advance, layout) = self
            .layout
            .window(&Index::from(start), &Index::from(size))?;

        Ok(Self::new_unchecked(origin(self.data, advance), layout))
    }
}

impl<'a, T> View<'a, T, 1> {
    /// Returns the element at `index`.
    pub fn at(&self, index: usize) -> Result<&'a T, Error> {
        self.element([index])
    }

    /// Returns the element at `index` along `axis`, which must be the only axis.
    pub fn slice(&self, axis: Axis, index: usize) -> Result<&'a T, Error> {
        self.layout.check_axis(axis)?;

        self.at(index)
    }
}

impl<'a, T, const D: usize> IntoIterator for View<'a, T, D> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, D>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}

impl<T, const D: usize> ops::Index<Index<D>> for View<'_, T, D> {
    type Output = T;

    fn index(&self, index: Index<D>) -> &Self::Output {
        self.element(index).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<T, const D: usize> ops::Index<[usize; D]> for View<'_, T, D> {
    type Output = T;

    fn index(&self, index: [usize; D]) -> &Self::Output {
        self.element(index).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<T> ops::Index<usize> for View<'_, T, 1> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.element([index]).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<T, const D: usize> fmt::Display for View<'_, T, D>
where
    T: fmt::Display,
{
    /// Formats the rows along the last axis on separate lines, with tab-separated elements.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = D.checked_sub(1).map_or(1, |last| self.sizes()[last]);

        for (i, x) in self.iter().enumerate() {
            if i % row != 0 {
                f.write_str("\t")?;
            }
            write!(f, "{x}")?;
            if (i + 1) % row == 0 {
                f.write_str("\n")?;
            }
        }

        Ok(())
    }
}

/// An exclusive view of a `D`-dimensional array.
///
/// Derived views are obtained by consuming the view; use [`ViewMut::reborrow`] first to keep it.
#[derive(Debug)]
pub struct ViewMut<'a, T, const D: usize> {
    data: &'a mut [T], // first element is first element in view
    layout: Layout<D>,
}

impl<'a, T, const D: usize> ViewMut<'a, T, D> {
    /// Returns the offset of the first element of the view in the underlying buffer.
    pub fn base_offset(&self) -> usize {
        self.layout.offset()
    }

    /// Returns a cursor at the first element of the view that allows writing.
    pub fn begin_mut(&mut self) -> CursorMut<'_, T, D> {
        CursorMut::new(self.reborrow(), 0)
    }

    /// Returns the element with the provided index, or an error if out of bounds along any axis.
    pub fn element_mut<I>(&mut self, index: I) -> Result<&mut T, Error>
    where
        Index<D>: From<I>,
    {
        let flat = self.layout.flat_index(&Index::from(index))?;

        Ok(&mut self.data[flat])
    }

    /// Returns the total number of elements in the view.
    pub fn elements(&self) -> usize {
        self.layout.elements()
    }

    /// Sets every element of the view to `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.for_each_mut(|x| x.clone_from(&value));
    }

    /// Calls `f` on every element of the view in row-major order.
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut T),
    {
        for offset in self.layout.offsets() {
            f(&mut self.data[offset]);
        }
    }

    /// Returns a view over `data` with the provided base offset, size, and strides.
    ///
    /// See [`View::from_parts`].
    pub fn from_parts<S>(
        data: &'a mut [T],
        offset: usize,
        size: S,
        strides: S,
    ) -> Result<Self, Error>
    where
        Index<D>: From<S>,
    {
        let layout = Layout::from_parts(offset, Index::from(size), Index::from(strides));
        check_span(&layout, data.len())?;

        Ok(Self::new_unchecked(data, layout))
    }

    /// Returns the element with the provided index, or `None` if out of bounds along any axis.
    pub fn get_mut<I>(&mut self, index: I) -> Option<&mut T>
    where
        Index<D>: From<I>,
    {
        self.element_mut(index).ok()
    }

    /// Copies the elements of `other` into the view.
    ///
    /// Elements are matched by index, so the two views may have different strides. Returns an
    /// error and leaves the view unchanged if the sizes differ along any axis.
    pub fn import(&mut self, other: View<'_, T, D>) -> Result<(), Error>
    where
        T: Clone,
    {
        self.layout.check_same_size(other.layout())?;

        for (dst, src) in self.layout.offsets().zip(other.layout.offsets()) {
            self.data[dst].clone_from(&other.data[src]);
        }

        Ok(())
    }

    /// Returns whether the view contains no elements.
    pub fn is_empty(&self) -> bool {
        self.elements() == 0
    }

    /// Returns the view as a shared view with the same lifetime.
    pub fn into_view(self) -> View<'a, T, D> {
        View::new_unchecked(self.data, self.layout)
    }

    /// Returns a canonical row-major view over `data`.
    ///
    /// See [`View::new`].
    pub fn new<S>(data: &'a mut [T], size: S) -> Result<Self, Error>
    where
        Index<D>: From<S>,
    {
        let layout = Layout::new(0, Index::from(size));
        check_span(&layout, data.len())?;

        Ok(Self::new_unchecked(data, layout))
    }

    pub(crate) fn new_unchecked(data: &'a mut [T], layout: Layout<D>) -> Self {
        Self { data, layout }
    }

    /// Returns the layout of the view.
    pub fn layout(&self) -> &Layout<D> {
        &self.layout
    }

    /// Returns the view with its axes reordered.
    ///
    /// See [`View::permute`].
    pub fn permute<I>(self, order: I) -> Result<Self, Error>
    where
        Index<D>: From<I>,
    {
        let layout = self.layout.permute(&Index::from(order))?;

        Ok(Self::new_unchecked(self.data, layout))
    }

    /// Returns a view of the same elements that borrows from `self`.
    pub fn reborrow(&mut self) -> ViewMut<'_, T, D> {
        ViewMut::new_unchecked(&mut *self.data, self.layout)
    }

    fn reduce<const E: usize>(self, axis: Axis, index: usize) -> Result<ViewMut<'a, T, E>, Error> {
        let (advance, layout) = self.layout.reduce(axis, index)?;

        Ok(ViewMut::new_unchecked(
            origin_mut(self.data, advance),
            layout,
        ))
    }

    /// Returns the size along `axis`.
    pub fn size_at(&self, axis: Axis) -> Result<usize, Error> {
        self.layout.size_at(axis)
    }

    /// Returns the size along each axis.
    pub fn sizes(&self) -> &Index<D> {
        self.layout.size()
    }

    /// Returns the stride along each axis.
    pub fn strides(&self) -> &Index<D> {
        self.layout.strides()
    }

    /// Returns a shared view of the same elements.
    pub fn view(&self) -> View<'_, T, D> {
        View::new_unchecked(&*self.data, self.layout)
    }

    /// Returns the view restricted to a window.
    ///
    /// See [`View::window`].
    pub fn window<I>(self, start: I, size: I) -> Result<Self, Error>
    where
        Index<D>: From<I>,
    {
        let (advance, layout) = self
            .layout
            .window(&Index::from(start), &Index::from(size))?;

        Ok(Self::new_unchecked(origin_mut(self.data, advance), layout))
    }
}

impl<'a, T> ViewMut<'a, T, 1> {
    /// Returns the element at `index`.
    pub fn at(self, index: usize) -> Result<&'a mut T, Error> {
        let flat = self.layout.flat_index(&Index([index]))?;

        Ok(&mut self.data[flat])
    }

    /// Returns the element at `index` along `axis`, which must be the only axis.
    pub fn slice(self, axis: Axis, index: usize) -> Result<&'a mut T, Error> {
        self.layout.check_axis(axis)?;

        self.at(index)
    }
}

impl<T, const D: usize> ops::Index<Index<D>> for ViewMut<'_, T, D> {
    type Output = T;

    fn index(&self, index: Index<D>) -> &Self::Output {
        let flat = self.layout.flat_index(&index).unwrap_or_else(|e| panic!("{e}"));
        &self.data[flat]
    }
}

impl<T, const D: usize> ops::IndexMut<Index<D>> for ViewMut<'_, T, D> {
    fn index_mut(&mut self, index: Index<D>) -> &mut Self::Output {
        self.element_mut(index).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl<T, const D: usize> ops::Index<[usize; D]> for ViewMut<'_, T, D> {
    type Output = T;

    fn index(&self, index: [usize; D]) -> &Self::Output {
        &self[Index(index)]
    }
}

impl<T, const D: usize> ops::IndexMut<[usize; D]> for ViewMut<'_, T, D> {
    fn index_mut(&mut self, index: [usize; D]) -> &mut Self::Output {
        &mut self[Index(index)]
    }
}

impl<T> ops::Index<usize> for ViewMut<'_, T, 1> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self[Index([index])]
    }
}

impl<T> ops::IndexMut<usize> for ViewMut<'_, T, 1> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self[Index([index])]
    }
}

macro_rules! impl_reduce {
    ($($d:literal => $e:literal),* $(,)?) => {
        $(
            impl<'a, T> View<'a, T, $d> {
                /// Returns the sub-view at `index` along the first axis.
                pub fn at(&self, index: usize) -> Result<View<'a, T, $e>, Error> {
                    self.reduce(Axis(0), index)
                }

                /// Returns an iterator over the sub-views along `axis`.
                pub fn axis_iter(&self, axis: Axis) -> Result<AxisIter<'a, T, $d, $e>, Error> {
                    AxisIter::new(*self, axis)
                }

                /// Returns the sub-view given by fixing `axis` to `index`.
                ///
                /// Axes after `axis` shift down by one.
                pub fn slice(&self, axis: Axis, index: usize) -> Result<View<'a, T, $e>, Error> {
                    self.reduce(axis, index)
                }
            }

            impl<'a, T> ViewMut<'a, T, $d> {
                /// Returns the sub-view at `index` along the first axis.
                pub fn at(self, index: usize) -> Result<ViewMut<'a, T, $e>, Error> {
                    self.reduce(Axis(0), index)
                }

                /// Returns the sub-view given by fixing `axis` to `index`.
                pub fn slice(self, axis: Axis, index: usize) -> Result<ViewMut<'a, T, $e>, Error> {
                    self.reduce(axis, index)
                }
            }
        )*
    };
}

impl_reduce!(
    2 => 1,
    3 => 2,
    4 => 3,
    5 => 4,
    6 => 5,
    7 => 6,
    8 => 7,
    9 => 8,
    10 => 9,
    11 => 10,
    12 => 11,
);

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ErrorKind;

    fn iota(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_new_insufficient_data() {
        let data = iota(5);

        assert_eq!(
            View::new(&data, [2, 3]).unwrap_err(),
            Error::InsufficientData {
                required: 6,
                len: 5
            }
        );
    }

    #[test]
    fn test_at_descends() {
        let data = iota(24);
        let view = View::new(&data, [2, 3, 4]).unwrap();

        let sub = view.at(1).unwrap();
        assert_eq!(sub.sizes(), &Index([3, 4]));
        assert_eq!(sub.strides(), &Index([4, 1]));
        assert_eq!(sub.base_offset(), 12);

        let row = sub.at(2).unwrap();
        assert_eq!(row.base_offset(), 20);
        assert_eq!(row.to_vec(), vec![20, 21, 22, 23]);
        assert_eq!(row.at(3), Ok(&23));
    }

    #[test]
    fn test_at_out_of_bounds() {
        let data = iota(24);
        let view = View::new(&data, [2, 3, 4]).unwrap();

        assert_eq!(
            view.at(2).unwrap_err(),
            Error::IndexOutOfBounds {
                index: 2,
                axis: 0,
                size: 2
            }
        );
        assert_eq!(
            view.at(0).unwrap().at(0).unwrap().at(4).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
    }

    #[test]
    fn test_element_row_major_offset_law() {
        let data = iota(60);
        let view = View::new(&data, [3, 4, 5]).unwrap();

        for index in view.indices() {
            let expected = index[0] * 20 + index[1] * 5 + index[2];
            assert_eq!(view.element(index), Ok(&expected));
        }
    }

    #[test]
    fn test_get_out_of_bounds() {
        let data = iota(6);
        let view = View::new(&data, [2, 3]).unwrap();

        assert_eq!(view.get([1, 2]), Some(&5));
        assert_eq!(view.get([2, 0]), None);
        assert_eq!(view.get([0, 3]), None);
    }

    #[test]
    fn test_slice() {
        let data = iota(24);
        let view = View::new(&data, [2, 3, 4]).unwrap();

        let middle = view.slice(Axis(1), 1).unwrap();
        assert_eq!(middle.sizes(), &Index([2, 4]));
        assert_eq!(middle.to_vec(), vec![4, 5, 6, 7, 16, 17, 18, 19]);

        let last = view.slice(Axis(2), 3).unwrap();
        assert_eq!(last.sizes(), &Index([2, 3]));
        assert_eq!(last.to_vec(), vec![3, 7, 11, 15, 19, 23]);
    }

    #[test]
    fn test_slice_out_of_bounds() {
        let data = iota(24);
        let view = View::new(&data, [2, 3, 4]).unwrap();

        assert_eq!(
            view.slice(Axis(3), 0).unwrap_err(),
            Error::AxisOutOfBounds {
                axis: 3,
                dimensions: 3
            }
        );
        assert_eq!(
            view.slice(Axis(1), 3).unwrap_err(),
            Error::IndexOutOfBounds {
                index: 3,
                axis: 1,
                size: 3
            }
        );
    }

    #[test]
    fn test_slice_1d() {
        let data = iota(4);
        let view = View::new(&data, [4]).unwrap();

        assert_eq!(view.slice(Axis(0), 2), Ok(&2));
        assert_eq!(view.slice(Axis(1), 2).unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_permute_transposes() {
        let data = iota(100);
        let view = View::new(&data, [10, 10]).unwrap();
        let permuted = view.permute([1, 0]).unwrap();

        assert_eq!(view.at(3).unwrap().at(7), Ok(&37));
        assert_eq!(permuted.at(7).unwrap().at(3), Ok(&37));
        assert_eq!(permuted.base_offset(), 0);

        for index in view.indices() {
            assert_eq!(view[index], permuted[[index[1], index[0]]]);
        }
    }

    #[test]
    fn test_permute_inverse_roundtrip() {
        let data = iota(120);
        let view = View::new(&data, [2, 3, 4, 5]).unwrap();
        let order = Index([2, 0, 3, 1]);

        let mut inverse = Index::zero();
        for (d, &axis) in order.iter().enumerate() {
            inverse[axis] = d;
        }

        let roundtrip = view.permute(order).unwrap().permute(inverse).unwrap();
        assert!(roundtrip.same_view(&view));
        for index in view.indices() {
            assert!(std::ptr::eq(&view[index], &roundtrip[index]));
        }
    }

    #[test]
    fn test_permute_duplicate() {
        let data = iota(120);

        let view = View::new(&data, [2, 60]).unwrap();
        assert_eq!(
            view.permute([1, 1]).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );

        let view = View::new(&data, [2, 3, 20]).unwrap();
        assert_eq!(
            view.permute([0, 2, 0]).unwrap_err(),
            Error::DuplicateAxis { axis: 0 }
        );

        let view = View::new(&data, [2, 3, 4, 5]).unwrap();
        assert_eq!(
            view.permute([3, 2, 3, 0]).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_permute_1d() {
        let data = iota(3);
        let view = View::new(&data, [3]).unwrap();

        assert!(view.permute([0]).unwrap().same_view(&view));
        assert_eq!(view.permute([1]).unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_window_containment() {
        let data = iota(100);
        let view = View::new(&data, [10, 10]).unwrap();
        let start = Index([2, 3]);
        let window = view.window(start, Index([4, 5])).unwrap();

        assert_eq!(window.base_offset(), 23);
        assert_eq!(window.strides(), view.strides());

        for index in window.indices() {
            assert_eq!(window[index], view[index + start]);
        }

        assert_eq!(window.get([4, 0]), None);
        assert_eq!(window.get([0, 5]), None);
        assert_eq!(window.iter().max(), Some(&77));
        assert_eq!(window.iter().min(), Some(&23));
    }

    #[test]
    fn test_window_of_permuted() {
        let data = iota(12);
        let view = View::new(&data, [3, 4]).unwrap().permute([1, 0]).unwrap();
        let window = view.window([1, 1], [2, 2]).unwrap();

        assert_eq!(window.to_vec(), vec![5, 9, 6, 10]);
    }

    #[test]
    fn test_window_out_of_bounds() {
        let data = iota(100);
        let view = View::new(&data, [10, 10]).unwrap();

        assert_eq!(
            view.window([0, 10], [1, 0]).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            view.window([5, 5], [6, 1]).unwrap_err(),
            Error::WindowOutOfBounds {
                axis: 0,
                start: 5,
                size: 6,
                extent: 10
            }
        );
    }

    #[test]
    fn test_window_overflowing_size() {
        let data = iota(5);
        let view = View::new(&data, [5]).unwrap();

        assert_eq!(
            view.window([1], [usize::MAX]).unwrap_err(),
            Error::WindowOutOfBounds {
                axis: 0,
                start: 1,
                size: usize::MAX,
                extent: 5
            }
        );
    }

    #[test]
    fn test_window_1d() {
        let data = iota(10);
        let view = View::new(&data, [10]).unwrap();
        let window = view.window([4], [3]).unwrap();

        assert_eq!(window.to_vec(), vec![4, 5, 6]);
        assert_eq!(window[2], 6);
    }

    #[test]
    fn test_from_parts_custom_strides() {
        // Every other column of a 3x4 buffer
        let data = iota(12);
        let view = View::from_parts(&data, 0, [3, 2], [4, 2]).unwrap();

        assert!(!view.is_contiguous());
        assert_eq!(view.to_vec(), vec![0, 2, 4, 6, 8, 10]);

        assert_eq!(
            View::<_, 2>::from_parts(&data, 0, [3, 2], [5, 2])
                .unwrap_err()
                .kind(),
            ErrorKind::SizeMismatch
        );
    }

    #[test]
    fn test_from_parts_overflowing_strides() {
        let data = iota(12);

        assert_eq!(
            View::<_, 2>::from_parts(&data[..4], 0, [3, 2], [usize::MAX / 2 + 1, 1]).unwrap_err(),
            Error::LayoutOverflow
        );
        assert_eq!(
            View::<_, 1>::from_parts(&data, usize::MAX, [2], [1]).unwrap_err(),
            Error::LayoutOverflow
        );
        assert_eq!(
            View::new(&data, [usize::MAX, 2]).unwrap_err().kind(),
            ErrorKind::SizeMismatch
        );
    }

    #[test]
    fn test_from_parts_zero_strides() {
        let data = [7];
        let view = View::from_parts(&data, 0, [usize::MAX / 2, 2], [0, 0]).unwrap();

        assert_eq!(view[[usize::MAX / 2 - 1, 1]], 7);

        let empty = View::from_parts(&data[..0], 0, [0, usize::MAX], [usize::MAX, 1]).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    #[should_panic(expected = "index 2 is out of range [0, 2) along axis 0")]
    fn test_index_out_of_bounds_panics() {
        let data = iota(6);
        let view = View::new(&data, [2, 3]).unwrap();

        assert_eq!(view[[2, 0]], 0);
    }

    #[test]
    #[should_panic(expected = "index 3 is out of range [0, 3) along axis 1")]
    fn test_index_mut_out_of_bounds_panics() {
        let mut data = iota(6);
        let mut view = ViewMut::new(&mut data, [2, 3]).unwrap();

        view[[1, 3]] = 0;
    }

    #[test]
    fn test_accessors() {
        let data = iota(24);
        let view = View::new(&data, [2, 3, 4]).unwrap();

        assert_eq!(view.dimensions(), 3);
        assert_eq!(view.elements(), 24);
        assert_eq!(view.size_at(Axis(1)), Ok(3));
        assert_eq!(view.size_at(Axis(3)).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(view.accumulated_offset(1, Axis(0)), Ok(12));
        assert_eq!(view.accumulated_offset(2, Axis(2)), Ok(2));
        assert_eq!(
            view.accumulated_offset(3, Axis(1)).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
    }

    #[test]
    fn test_empty_view() {
        let data: Vec<usize> = Vec::new();
        let view = View::new(&data, [3, 0]).unwrap();

        assert!(view.is_empty());
        assert_eq!(view.iter().count(), 0);
        assert!(view.at(2).unwrap().is_empty());
        assert_eq!(view.at(3).unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_axis_iter() {
        let data = iota(6);
        let view = View::new(&data, [2, 3]).unwrap();

        let columns = Vec::from_iter(view.axis_iter(Axis(1)).unwrap().map(|v| v.to_vec()));
        assert_eq!(columns, vec![vec![0, 3], vec![1, 4], vec![2, 5]]);

        assert!(view.axis_iter(Axis(2)).is_err());
    }

    #[test]
    fn test_display() {
        let data = iota(6);
        let view = View::new(&data, [2, 3]).unwrap();

        assert_eq!(view.to_string(), "0\t1\t2\n3\t4\t5\n");
        assert_eq!(view.permute([1, 0]).unwrap().to_string(), "0\t3\n1\t4\n2\t5\n");
    }

    #[test]
    fn test_view_mut_writes_are_shared() {
        let mut data = vec![0; 12];
        let mut view = ViewMut::new(&mut data, [3, 4]).unwrap();

        view.reborrow().at(1).unwrap().fill(1);
        *view.reborrow().permute([1, 0]).unwrap().at(3).unwrap().at(2).unwrap() = 5;
        view[[0, 0]] = 7;

        assert_eq!(view.view().to_vec(), vec![7, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 5]);
        assert_eq!(data, vec![7, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 5]);
    }

    #[test]
    fn test_view_mut_window() {
        let mut data = vec![0; 16];
        let mut view = ViewMut::new(&mut data, [4, 4]).unwrap();

        view.reborrow().window([1, 1], [2, 2]).unwrap().fill(1);

        assert_eq!(
            view.view().to_string(),
            "0\t0\t0\t0\n0\t1\t1\t0\n0\t1\t1\t0\n0\t0\t0\t0\n"
        );
    }

    #[test]
    fn test_import() {
        let src = iota(6);
        let source = View::new(&src, [3, 2]).unwrap().permute([1, 0]).unwrap();

        let mut dst = vec![0; 6];
        let mut target = ViewMut::new(&mut dst, [2, 3]).unwrap();
        target.import(source).unwrap();

        assert_eq!(dst, vec![0, 2, 4, 1, 3, 5]);
    }

    #[test]
    fn test_import_mismatch() {
        let src = iota(6);
        let source = View::new(&src, [2, 3]).unwrap();

        let mut dst = vec![0; 6];
        let mut target = ViewMut::new(&mut dst, [3, 2]).unwrap();

        assert_eq!(
            target.import(source),
            Err(Error::ShapeMismatch {
                axis: 0,
                expected: 3,
                found: 2
            })
        );

        let mut dst = vec![0; 8];
        let mut target = ViewMut::new(&mut dst, [2, 4]).unwrap();

        assert_eq!(
            target.import(source),
            Err(Error::ShapeMismatch {
                axis: 1,
                expected: 4,
                found: 3
            })
        );
        assert_eq!(dst, vec![0; 8]);
    }

    #[test]
    fn test_view_mut_1d_at() {
        let mut data = iota(4);
        let view = ViewMut::new(&mut data, [4]).unwrap();

        *view.at(2).unwrap() = 9;
        assert_eq!(data, vec![0, 1, 9, 3]);
    }
}
