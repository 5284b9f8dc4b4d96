use std::iter::FusedIterator;

use crate::{layout::Offsets, Axis, Error, Index};

use super::View;

/// An iterator over the elements of a view in row-major order.
#[derive(Debug)]
pub struct Iter<'a, T, const D: usize> {
    data: &'a [T],
    offsets: Offsets<D>,
}

impl<'a, T, const D: usize> Clone for Iter<'a, T, D> {
    fn clone(&self) -> Self {
        Self {
            data: self.data,
            offsets: self.offsets.clone(),
        }
    }
}

impl<'a, T, const D: usize> Iter<'a, T, D> {
    pub(super) fn new(view: View<'a, T, D>) -> Self {
        Self {
            data: view.data,
            offsets: view.layout.offsets(),
        }
    }
}

impl<'a, T, const D: usize> Iterator for Iter<'a, T, D> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.offsets.next().map(|offset| &self.data[offset])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.offsets.size_hint()
    }
}

impl<'a, T, const D: usize> ExactSizeIterator for Iter<'a, T, D> {}

impl<'a, T, const D: usize> FusedIterator for Iter<'a, T, D> {}

/// An iterator over the sub-views of a view along an axis.
///
/// See [`View::axis_iter`](super::View) for the rank-specific constructors.
#[derive(Debug)]
pub struct AxisIter<'a, T, const D: usize, const E: usize> {
    view: View<'a, T, D>,
    axis: Axis,
    index: usize,
}

impl<'a, T, const D: usize, const E: usize> AxisIter<'a, T, D, E> {
    pub(super) fn new(view: View<'a, T, D>, axis: Axis) -> Result<Self, Error> {
        view.layout.check_axis(axis)?;

        Ok(Self {
            view,
            axis,
            index: 0,
        })
    }
}

impl<'a, T, const D: usize, const E: usize> Iterator for AxisIter<'a, T, D, E> {
    type Item = View<'a, T, E>;

    fn next(&mut self) -> Option<Self::Item> {
        let view = self.view.reduce(self.axis, self.index).ok()?;
        self.index += 1;
        Some(view)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.view.sizes()[self.axis] - self.index.min(self.view.sizes()[self.axis]);
        (n, Some(n))
    }
}

impl<'a, T, const D: usize, const E: usize> ExactSizeIterator for AxisIter<'a, T, D, E> {}

impl<'a, T, const D: usize, const E: usize> FusedIterator for AxisIter<'a, T, D, E> {}

/// An iterator over the indices of a view in row-major order.
#[derive(Clone, Debug)]
pub struct IndicesIter<const D: usize> {
    size: Index<D>,
    position: usize,
    total: usize,
}

impl<const D: usize> IndicesIter<D> {
    pub(crate) fn new(size: Index<D>) -> Self {
        Self {
            size,
            position: 0,
            total: size.product(),
        }
    }
}

impl<const D: usize> Iterator for IndicesIter<D> {
    type Item = Index<D>;

    fn next(&mut self) -> Option<Self::Item> {
        (self.position < self.total).then(|| {
            self.position += 1;
            Index::from_position(self.position - 1, &self.size)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.total - self.position;
        (len, Some(len))
    }
}

impl<const D: usize> ExactSizeIterator for IndicesIter<D> {}

impl<const D: usize> FusedIterator for IndicesIter<D> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_fused() {
        let data = [0.0, 1.0];
        let view = View::new(&data, [2, 1]).unwrap();
        let row = view.at(0).unwrap();
        let mut iter = row.iter();

        assert_eq!(iter.next(), Some(&0.0));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    fn test_slice_iter(shape: [usize; 3], axis: Axis, index: usize, expected: &[usize]) {
        let data = Vec::from_iter(0..shape.iter().product::<usize>());
        let view = View::new(&data, shape).unwrap();
        let values = Vec::from_iter(view.slice(axis, index).unwrap().iter().copied());

        assert_eq!(values, expected);
    }

    #[test]
    fn test_slice_iter_3x2x4() {
        let run = |axis, index, expected| test_slice_iter([3, 2, 4], axis, index, expected);

        run(Axis(0), 0, &[0, 1, 2, 3, 4, 5, 6, 7]);
        run(Axis(0), 1, &[8, 9, 10, 11, 12, 13, 14, 15]);
        run(Axis(0), 2, &[16, 17, 18, 19, 20, 21, 22, 23]);

        run(Axis(1), 0, &[0, 1, 2, 3, 8, 9, 10, 11, 16, 17, 18, 19]);
        run(Axis(1), 1, &[4, 5, 6, 7, 12, 13, 14, 15, 20, 21, 22, 23]);

        run(Axis(2), 0, &[0, 4, 8, 12, 16, 20]);
        run(Axis(2), 1, &[1, 5, 9, 13, 17, 21]);
        run(Axis(2), 2, &[2, 6, 10, 14, 18, 22]);
        run(Axis(2), 3, &[3, 7, 11, 15, 19, 23]);
    }

    #[test]
    fn test_iter_len() {
        let data = Vec::from_iter(0..12);
        let view = View::new(&data, [3, 4]).unwrap();
        let mut iter = view.iter();

        assert_eq!(iter.len(), 12);
        iter.next();
        assert_eq!(iter.len(), 11);
    }

    #[test]
    fn test_axis_iter_len() {
        let data = Vec::from_iter(0..24);
        let view = View::new(&data, [2, 3, 4]).unwrap();
        let mut iter = view.axis_iter(Axis(2)).unwrap();

        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next().map(|v| *v.sizes()), Some(Index([2, 3])));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.by_ref().count(), 3);
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_indices_2d() {
        let mut iter = IndicesIter::new(Index([2, 3]));

        assert_eq!(iter.len(), 6);

        assert_eq!(iter.next(), Some(Index([0, 0])));
        assert_eq!(iter.next(), Some(Index([0, 1])));
        assert_eq!(iter.next(), Some(Index([0, 2])));

        assert_eq!(iter.len(), 3);

        assert_eq!(iter.next(), Some(Index([1, 0])));
        assert_eq!(iter.next(), Some(Index([1, 1])));
        assert_eq!(iter.next(), Some(Index([1, 2])));

        assert_eq!(iter.len(), 0);
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_indices_3d() {
        let mut iter = IndicesIter::new(Index([2, 1, 3]));

        assert_eq!(iter.next(), Some(Index([0, 0, 0])));
        assert_eq!(iter.next(), Some(Index([0, 0, 1])));
        assert_eq!(iter.next(), Some(Index([0, 0, 2])));

        assert_eq!(iter.len(), 3);

        assert_eq!(iter.next(), Some(Index([1, 0, 0])));
        assert_eq!(iter.next(), Some(Index([1, 0, 1])));
        assert_eq!(iter.next(), Some(Index([1, 0, 2])));

        assert_eq!(iter.len(), 0);
        assert!(iter.next().is_none());
    }
}
