//! Random-access positions in a view.
//!
//! A [`Cursor`] is a linear position in the row-major index space of a [`View`], running from
//! [`View::begin`] at zero to [`View::end`] at the number of elements. The multi-index of a
//! cursor is derived from its position and the size of the view, so that moving a cursor is
//! plain integer arithmetic and only dereferencing consults the strides.
//!
//! Moving a cursor outside the range from begin to end leaves it at the end.

use std::{cmp::Ordering, iter::FusedIterator, ops};

use crate::{Index, View, ViewMut};

fn forward(position: usize, n: usize, elements: usize) -> usize {
    match position.checked_add(n) {
        Some(moved) if moved <= elements => moved,
        _ => elements,
    }
}

fn backward(position: usize, n: usize, elements: usize) -> usize {
    position.checked_sub(n).unwrap_or(elements)
}

/// A position in a shared view.
#[derive(Debug)]
pub struct Cursor<'a, T, const D: usize> {
    view: View<'a, T, D>,
    position: usize,
}

impl<'a, T, const D: usize> Clone for Cursor<'a, T, D> {
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            position: self.position,
        }
    }
}

impl<'a, T, const D: usize> Cursor<'a, T, D> {
    pub(crate) fn new(view: View<'a, T, D>, position: usize) -> Self {
        let position = position.min(view.elements());

        Self { view, position }
    }

    /// Returns the element at the cursor, or `None` at the end.
    pub fn get(&self) -> Option<&'a T> {
        if self.is_end() {
            None
        } else {
            self.view.get(self.index())
        }
    }

    /// Returns the element `n` positions after the cursor, or `None` if that is the end.
    pub fn get_at(&self, n: usize) -> Option<&'a T> {
        (self.clone() + n).get()
    }

    /// Returns the distance from `origin` to the cursor.
    ///
    /// Returns `None` if the cursors are positions in different views.
    pub fn offset_from(&self, origin: &Self) -> Option<isize> {
        self.view
            .same_view(&origin.view)
            .then(|| self.position as isize - origin.position as isize)
    }

    /// Returns the view the cursor moves in.
    pub fn view(&self) -> View<'a, T, D> {
        self.view
    }
}

impl<'a, T, const D: usize> Iterator for Cursor<'a, T, D> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.get()?;
        self.advance(1);
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.view.elements() - self.position;
        (len, Some(len))
    }
}

impl<'a, T, const D: usize> ExactSizeIterator for Cursor<'a, T, D> {}

impl<'a, T, const D: usize> FusedIterator for Cursor<'a, T, D> {}

impl<'a, T, const D: usize> PartialEq for Cursor<'a, T, D> {
    fn eq(&self, other: &Self) -> bool {
        self.view.same_view(&other.view) && self.position == other.position
    }
}

impl<'a, T, const D: usize> PartialOrd for Cursor<'a, T, D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.view
            .same_view(&other.view)
            .then(|| self.position.cmp(&other.position))
    }
}

/// A position in an exclusive view that allows writing.
///
/// Unlike [`Cursor`], the element at the cursor can only be borrowed for as long as the cursor
/// itself, so the cursor is not an iterator.
#[derive(Debug)]
pub struct CursorMut<'a, T, const D: usize> {
    view: ViewMut<'a, T, D>,
    position: usize,
}

impl<'a, T, const D: usize> CursorMut<'a, T, D> {
    pub(crate) fn new(view: ViewMut<'a, T, D>, position: usize) -> Self {
        let position = position.min(view.elements());

        Self { view, position }
    }

    /// Returns the element at the cursor, or `None` at the end.
    pub fn get(&self) -> Option<&T> {
        if self.is_end() {
            None
        } else {
            self.view.view().get(self.index())
        }
    }

    /// Returns the element at the cursor mutably, or `None` at the end.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        if self.is_end() {
            None
        } else {
            let index = self.index();
            self.view.get_mut(index)
        }
    }

    /// Returns the cursor as a shared cursor at the same position.
    pub fn into_cursor(self) -> Cursor<'a, T, D> {
        Cursor::new(self.view.into_view(), self.position)
    }
}

macro_rules! impl_motion {
    ($($cursor:ident),*) => {
        $(
            impl<'a, T, const D: usize> $cursor<'a, T, D> {
                /// Moves the cursor `n` positions forward.
                pub fn advance(&mut self, n: usize) {
                    self.position = forward(self.position, n, self.view.elements());
                }

                /// Moves the cursor forward by `delta`, carrying across axes.
                ///
                /// Moving by one along the last axis is the same as [`Self::advance`] by one,
                /// while moving by one along the first axis skips a full sub-view.
                pub fn advance_by(&mut self, delta: Index<D>) {
                    match delta.checked_to_position(self.view.sizes()) {
                        Some(n) => self.advance(n),
                        None => self.position = self.view.elements(),
                    }
                }

                /// Returns the multi-index of the cursor.
                ///
                /// At the end, this is the size along the first axis followed by zeros.
                pub fn index(&self) -> Index<D> {
                    Index::from_position(self.position, self.view.sizes())
                }

                /// Returns whether the cursor is one past the last element.
                pub fn is_end(&self) -> bool {
                    self.position == self.view.elements()
                }

                /// Returns the linear row-major position of the cursor.
                pub fn position(&self) -> usize {
                    self.position
                }

                /// Moves the cursor `n` positions backward.
                pub fn retreat(&mut self, n: usize) {
                    self.position = backward(self.position, n, self.view.elements());
                }

                /// Moves the cursor backward by `delta`, carrying across axes.
                pub fn retreat_by(&mut self, delta: Index<D>) {
                    match delta.checked_to_position(self.view.sizes()) {
                        Some(n) => self.retreat(n),
                        None => self.position = self.view.elements(),
                    }
                }

                /// Returns the offset of the element at the cursor in the underlying buffer.
                pub fn to_original(&self) -> usize {
                    let index = self.index();

                    self.view.base_offset()
                        + index
                            .iter()
                            .zip(self.view.strides().iter())
                            .map(|(i, stride)| i * stride)
                            .sum::<usize>()
                }
            }

            impl<'a, T, const D: usize> ops::AddAssign<usize> for $cursor<'a, T, D> {
                fn add_assign(&mut self, n: usize) {
                    self.advance(n);
                }
            }

            impl<'a, T, const D: usize> ops::SubAssign<usize> for $cursor<'a, T, D> {
                fn sub_assign(&mut self, n: usize) {
                    self.retreat(n);
                }
            }

            impl<'a, T, const D: usize> ops::AddAssign<Index<D>> for $cursor<'a, T, D> {
                fn add_assign(&mut self, delta: Index<D>) {
                    self.advance_by(delta);
                }
            }

            impl<'a, T, const D: usize> ops::SubAssign<Index<D>> for $cursor<'a, T, D> {
                fn sub_assign(&mut self, delta: Index<D>) {
                    self.retreat_by(delta);
                }
            }

            impl<'a, T, const D: usize> ops::Add<usize> for $cursor<'a, T, D> {
                type Output = Self;

                fn add(mut self, n: usize) -> Self::Output {
                    self += n;
                    self
                }
            }

            impl<'a, T, const D: usize> ops::Sub<usize> for $cursor<'a, T, D> {
                type Output = Self;

                fn sub(mut self, n: usize) -> Self::Output {
                    self -= n;
                    self
                }
            }

            impl<'a, T, const D: usize> ops::Add<Index<D>> for $cursor<'a, T, D> {
                type Output = Self;

                fn add(mut self, delta: Index<D>) -> Self::Output {
                    self += delta;
                    self
                }
            }

            impl<'a, T, const D: usize> ops::Sub<Index<D>> for $cursor<'a, T, D> {
                type Output = Self;

                fn sub(mut self, delta: Index<D>) -> Self::Output {
                    self -= delta;
                    self
                }
            }
        )*
    };
}

impl_motion!(Cursor, CursorMut);
