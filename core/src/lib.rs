#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Strided views of multi-dimensional arrays.
//!
//! This serves as the core library implementation for the `dope` CLI, but can also be used as a
//! free-standing library for working with multi-dimensional data.
//!
//! # Overview
//!
//! The core struct is a [`View`], a dope vector describing a `D`-dimensional array by the size
//! and stride of each axis over a flat buffer it borrows. Views are cheap to derive from one
//! another: descending into a sub-view, permuting axes, and restricting to a window only compute
//! a new [`Layout`]. The owning counterpart is a [`Grid`], which allocates a buffer in row-major
//! order and hands out views of it. A [`Cursor`] is a random-access position in a view.
//!
//! # Example
//!
//! Create a 3×4 grid, take its transpose, and restrict the transpose to a window.
//!
//! ```
//! use dope_core::{Grid, Index};
//!
//! let grid = Grid::from_vec(Vec::from_iter(0..12), [3, 4])?;
//!
//! let transposed = grid.view().permute([1, 0])?;
//! assert_eq!(transposed.sizes(), &Index([4, 3]));
//! assert_eq!(transposed[[3, 1]], 7);
//!
//! let window = transposed.window([1, 1], [2, 2])?;
//! assert_eq!(window.to_vec(), vec![5, 9, 6, 10]);
//! assert_eq!(window.base_offset(), 5);
//! # Ok::<(), dope_core::Error>(())
//! ```

pub mod cursor;
pub use cursor::{Cursor, CursorMut};

pub mod error;
pub use error::{Error, ErrorKind};

pub mod grid;
pub use grid::Grid;

pub mod index;
pub use index::{Axis, Index};

pub mod layout;
pub use layout::Layout;

pub mod view;
pub use view::{View, ViewMut};
