//! Errors from view and grid operations.

use std::fmt;

/// The broad category of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// An axis, an index, or a window exceeds the valid bound for an axis.
    OutOfRange,
    /// An argument is malformed, such as a permutation with a repeated axis.
    InvalidArgument,
    /// Two shapes disagree, or a buffer is too short for a shape.
    SizeMismatch,
}

/// An error from a view or grid operation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// An axis is not less than the number of dimensions.
    AxisOutOfBounds {
        /// The offending axis.
        axis: usize,
        /// The number of dimensions.
        dimensions: usize,
    },
    /// An index is not less than the size along its axis.
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The axis of the index.
        axis: usize,
        /// The size along the axis.
        size: usize,
    },
    /// A window extends past the end of an axis.
    WindowOutOfBounds {
        /// The axis of the window.
        axis: usize,
        /// The start of the window.
        start: usize,
        /// The size of the window.
        size: usize,
        /// The size of the view along the axis.
        extent: usize,
    },
    /// An axis appears more than once in a permutation.
    DuplicateAxis {
        /// The repeated axis.
        axis: usize,
    },
    /// Two views differ in size along an axis.
    ShapeMismatch {
        /// The first axis where the sizes differ.
        axis: usize,
        /// The size of the receiving view.
        expected: usize,
        /// The size of the other view.
        found: usize,
    },
    /// A buffer is too short for the layout of a view.
    InsufficientData {
        /// The number of elements required from the origin.
        required: usize,
        /// The length of the buffer.
        len: usize,
    },
    /// The elements of a layout cannot all be addressed with `usize` offsets.
    LayoutOverflow,
    /// A buffer for a grid does not hold exactly the number of elements of its size.
    LengthMismatch {
        /// The number of elements of the size.
        expected: usize,
        /// The length of the buffer.
        found: usize,
    },
}

impl Error {
    /// Returns the category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::AxisOutOfBounds { .. }
            | Error::IndexOutOfBounds { .. }
            | Error::WindowOutOfBounds { .. } => ErrorKind::OutOfRange,
            Error::DuplicateAxis { .. } => ErrorKind::InvalidArgument,
            Error::ShapeMismatch { .. }
            | Error::InsufficientData { .. }
            | Error::LayoutOverflow
            | Error::LengthMismatch { .. } => ErrorKind::SizeMismatch,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AxisOutOfBounds { axis, dimensions } => {
                write!(f, "axis {axis} is out of range for {dimensions} dimensions")
            }
            Error::IndexOutOfBounds { index, axis, size } => write!(
                f,
                "index {index} is out of range [0, {size}) along axis {axis}"
            ),
            Error::WindowOutOfBounds {
                axis,
                start,
                size,
                extent,
            } => write!(
                f,
                "window of size {size} starting at {start} does not fit in extent {extent} \
                along axis {axis}"
            ),
            Error::DuplicateAxis { axis } => write!(f, "axis {axis} is duplicated in permutation"),
            Error::ShapeMismatch {
                axis,
                expected,
                found,
            } => write!(
                f,
                "views do not have the same size: expected {expected} along axis {axis}, \
                found {found}"
            ),
            Error::InsufficientData { required, len } => write!(
                f,
                "cannot construct view requiring {required} elements from {len} elements"
            ),
            Error::LayoutOverflow => {
                f.write_str("size and strides of view overflow the addressable range")
            }
            Error::LengthMismatch { expected, found } => write!(
                f,
                "cannot construct grid of {expected} elements from {found} elements"
            ),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(
            Error::AxisOutOfBounds {
                axis: 2,
                dimensions: 2
            }
            .kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            Error::DuplicateAxis { axis: 0 }.kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            Error::InsufficientData {
                required: 4,
                len: 3
            }
            .kind(),
            ErrorKind::SizeMismatch
        );
    }

    #[test]
    fn test_display() {
        let error = Error::IndexOutOfBounds {
            index: 10,
            axis: 0,
            size: 10,
        };

        assert_eq!(
            error.to_string(),
            "index 10 is out of range [0, 10) along axis 0"
        );
    }
}
