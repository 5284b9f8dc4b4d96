//! Owned arrays.

use std::{fmt, mem, ops};

use crate::{
    cursor::{Cursor, CursorMut},
    layout::Layout,
    view::IndicesIter,
    Axis, Error, Index, View, ViewMut,
};

/// An owned `D`-dimensional array in row-major order.
///
/// A grid owns its buffer and always has the canonical layout for its size. Views of a grid
/// borrow it, so a grid cannot be resized while any of its views are alive.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Grid<T, const D: usize> {
    data: Vec<T>,
    layout: Layout<D>,
}

impl<T, const D: usize> Grid<T, D> {
    /// Returns the backing buffer as a mutable pointer.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    /// Returns the backing buffer as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_mut_slice()
    }

    /// Returns the backing buffer as a pointer.
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Returns the backing buffer as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    /// Returns a cursor at the first element.
    pub fn begin(&self) -> Cursor<'_, T, D> {
        self.view().begin()
    }

    /// Returns a cursor at the first element that allows writing.
    pub fn begin_mut(&mut self) -> CursorMut<'_, T, D> {
        CursorMut::new(self.view_mut(), 0)
    }

    /// Releases the buffer and sets the size to zero along every axis.
    pub fn clear(&mut self) {
        log::debug!("Releasing grid buffer of {} elements", self.data.len());

        self.data = Vec::new();
        self.layout = Layout::new(0, Index::zero());
    }

    /// Returns a cursor at the element with the provided index.
    pub fn cursor_at<I>(&self, index: I) -> Result<Cursor<'_, T, D>, Error>
    where
        Index<D>: From<I>,
    {
        self.view().cursor_at(index)
    }

    /// Returns the number of dimensions.
    pub fn dimensions(&self) -> usize {
        D
    }

    /// Returns the total number of elements.
    pub fn elements(&self) -> usize {
        self.data.len()
    }

    /// Returns a cursor one past the last element.
    pub fn end(&self) -> Cursor<'_, T, D> {
        self.view().end()
    }

    /// Returns a grid of the provided size filled with the default value.
    pub fn from_default<S>(size: S) -> Self
    where
        T: Default,
        Index<D>: From<S>,
    {
        Self::from_fn(size, |_| T::default())
    }

    /// Returns a grid of the provided size with each element given by calling `f` on its index.
    ///
    /// Elements are created in row-major order.
    pub fn from_fn<S, F>(size: S, f: F) -> Self
    where
        Index<D>: From<S>,
        F: FnMut(Index<D>) -> T,
    {
        let size = Index::from(size);

        Self::new_unchecked(IndicesIter::new(size).map(f).collect(), size)
    }

    /// Returns a grid of the provided size taking ownership of `data` in row-major order.
    ///
    /// Returns an error if `data` does not hold exactly the number of elements of `size`.
    pub fn from_vec<S>(data: Vec<T>, size: S) -> Result<Self, Error>
    where
        Index<D>: From<S>,
    {
        let size = Index::from(size);
        let expected = size.product();

        if data.len() == expected {
            Ok(Self::new_unchecked(data, size))
        } else {
            Err(Error::LengthMismatch {
                expected,
                found: data.len(),
            })
        }
    }

    /// Returns the element with the provided index, or `None` if out of bounds along any axis.
    pub fn get<I>(&self, index: I) -> Option<&T>
    where
        Index<D>: From<I>,
    {
        let flat = self.layout.flat_index(&Index::from(index)).ok()?;

        self.data.get(flat)
    }

    /// Returns the element with the provided index mutably, or `None` if out of bounds along
    /// any axis.
    pub fn get_mut<I>(&mut self, index: I) -> Option<&mut T>
    where
        Index<D>: From<I>,
    {
        let flat = self.layout.flat_index(&Index::from(index)).ok()?;

        self.data.get_mut(flat)
    }

    /// Returns a grid with all `D` axes of size `n` filled with `value`.
    pub fn hypercube(n: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(Index::constant(n), value)
    }

    /// Copies the elements of `view` into the grid, matching elements by index.
    ///
    /// Returns an error and leaves the grid unchanged if the sizes differ along any axis.
    pub fn import(&mut self, view: View<'_, T, D>) -> Result<(), Error>
    where
        T: Clone,
    {
        log::trace!(
            "Importing {} elements element-wise from view with strides {}",
            view.elements(),
            view.strides()
        );

        self.view_mut().import(view)
    }

    /// Copies the elements of `other` into the grid.
    ///
    /// Since both grids have the canonical layout, the buffers are copied in bulk. Returns an
    /// error and leaves the grid unchanged if the sizes differ along any axis.
    pub fn import_grid(&mut self, other: &Self) -> Result<(), Error>
    where
        T: Clone,
    {
        self.layout.check_same_size(&other.layout)?;

        log::trace!("Importing {} elements in bulk", other.elements());

        self.data.clone_from_slice(&other.data);
        Ok(())
    }

    /// Returns the backing buffer in row-major order.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Returns whether the grid contains no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns an iterator over the elements in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Returns an iterator over the indices in row-major order.
    pub fn iter_indices(&self) -> IndicesIter<D> {
        IndicesIter::new(*self.sizes())
    }

    /// Returns a mutable iterator over the elements in row-major order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Returns the layout of the grid.
    pub fn layout(&self) -> &Layout<D> {
        &self.layout
    }

    /// Returns a grid of the provided size filled with copies of `value`.
    pub fn new<S>(size: S, value: T) -> Self
    where
        T: Clone,
        Index<D>: From<S>,
    {
        let size = Index::from(size);
        let elements = size.product();

        log::debug!("Allocating grid of size {size} with {elements} elements");

        Self::new_unchecked(vec![value; elements], size)
    }

    pub(crate) fn new_unchecked(data: Vec<T>, size: Index<D>) -> Self {
        Self {
            data,
            layout: Layout::new(0, size),
        }
    }

    /// Returns a view of the grid with the axes reordered.
    ///
    /// See [`View::permute`].
    pub fn permute<I>(&self, order: I) -> Result<View<'_, T, D>, Error>
    where
        Index<D>: From<I>,
    {
        self.view().permute(order)
    }

    /// Sets every element to `value`, keeping the size.
    pub fn reset(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }

    /// Changes the size of the grid.
    ///
    /// If the number of elements is unchanged, the elements are kept in row-major order.
    /// Otherwise, the old elements are dropped and the grid is filled with the default value.
    /// A size with no elements releases the buffer as [`Grid::clear`].
    pub fn resize<S>(&mut self, size: S)
    where
        T: Default,
        Index<D>: From<S>,
    {
        let size = Index::from(size);
        let elements = size.product();

        if elements == 0 {
            self.clear();
        } else if elements == self.data.len() {
            log::trace!("Reshaping grid from {} to {size}", self.sizes());

            self.layout = Layout::new(0, size);
        } else {
            log::debug!(
                "Reallocating grid from {} to {size} with {elements} elements",
                self.sizes()
            );

            self.data.clear();
            self.data.resize_with(elements, T::default);
            self.layout = Layout::new(0, size);
        }
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

    /// Exchanges the elements and sizes of two grids.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Returns a shared view of the grid.
    pub fn view(&self) -> View<'_, T, D> {
        View::new_unchecked(&self.data, self.layout)
    }

    /// Returns an exclusive view of the grid.
    pub fn view_mut(&mut self) -> ViewMut<'_, T, D> {
        ViewMut::new_unchecked(&mut self.data, self.layout)
    }

    /// Returns a view of the grid restricted to a window.
    ///
    /// See [`View::window`].
    pub fn window<I>(&self, start: I, size: I) -> Result<View<'_, T, D>, Error>
    where
        Index<D>: From<I>,
    {
        self.view().window(start, size)
    }
}

impl<T> Grid<T, 1> {
    /// Returns the element at `index`.
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        self.view().at(index)
    }

    /// Returns the element at `index` mutably.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        self.view_mut().at(index)
    }
}

macro_rules! impl_reduce {
    ($($d:literal => $e:literal),* $(,)?) => {
        $(
            impl<T> Grid<T, $d> {
                /// Returns the sub-view at `index` along the first axis.
                pub fn at(&self, index: usize) -> Result<View<'_, T, $e>, Error> {
                    self.view().at(index)
                }

                /// Returns the exclusive sub-view at `index` along the first axis.
                pub fn at_mut(&mut self, index: usize) -> Result<ViewMut<'_, T, $e>, Error> {
                    self.view_mut().at(index)
                }

                /// Returns the sub-view given by fixing `axis` to `index`.
                pub fn slice(&self, axis: Axis, index: usize) -> Result<View<'_, T, $e>, Error> {
                    self.view().slice(axis, index)
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

impl<'a, T, const D: usize> IntoIterator for &'a Grid<T, D> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const D: usize> IntoIterator for &'a mut Grid<T, D> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, const D: usize> ops::Index<Index<D>> for Grid<T, D> {
    type Output = T;

    fn index(&self, index: Index<D>) -> &Self::Output {
        let flat = self.layout.flat_index(&index).unwrap_or_else(|e| panic!("{e}"));
        &self.data[flat]
    }
}

impl<T, const D: usize> ops::IndexMut<Index<D>> for Grid<T, D> {
    fn index_mut(&mut self, index: Index<D>) -> &mut Self::Output {
        let flat = self.layout.flat_index(&index).unwrap_or_else(|e| panic!("{e}"));
        &mut self.data[flat]
    }
}

impl<T, const D: usize> ops::Index<[usize; D]> for Grid<T, D> {
    type Output = T;

    fn index(&self, index: [usize; D]) -> &Self::Output {
        &self[Index(index)]
    }
}

impl<T, const D: usize> ops::IndexMut<[usize; D]> for Grid<T, D> {
    fn index_mut(&mut self, index: [usize; D]) -> &mut Self::Output {
        &mut self[Index(index)]
    }
}

impl<T> ops::Index<usize> for Grid<T, 1> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self[Index([index])]
    }
}

impl<T> ops::IndexMut<usize> for Grid<T, 1> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self[Index([index])]
    }
}

impl<T, const D: usize> fmt::Display for Grid<T, D>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(), f)
    }
}

impl<'a, T, const D: usize> From<View<'a, T, D>> for Grid<T, D>
where
    T: Clone,
{
    fn from(view: View<'a, T, D>) -> Self {
        view.to_grid()
    }
}
