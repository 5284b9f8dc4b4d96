use std::{
    io::{self, Write},
    str::FromStr,
    time::Instant,
};

use anyhow::{anyhow, Error};

use clap::Parser;
use dope_core::{Axis, Grid, Index, View};

/// Print a view of a grid.
#[derive(Debug, Parser)]
pub struct Show {
    /// Shape of the grid.
    ///
    /// The size along each axis, separated by commas. Between one and six axes are supported.
    #[arg(
        short = 's',
        long,
        required = true,
        use_value_delimiter = true,
        value_delimiter = ',',
        value_name = "SIZE,..."
    )]
    shape: Vec<usize>,

    /// Permutation of the axes.
    ///
    /// Axis `d` of the resulting view is axis `order[d]` of the grid. Must contain every axis
    /// exactly once, separated by commas.
    #[arg(
        short = 'p',
        long,
        use_value_delimiter = true,
        value_delimiter = ',',
        value_name = "AXIS,..."
    )]
    permute: Option<Vec<usize>>,

    /// Window of the view.
    ///
    /// The start and size of the window along each axis, as two comma-separated lists joined by
    /// a colon. The window is applied after any permutation.
    #[arg(short = 'w', long, value_parser = parse_window, value_name = "START,...:SIZE,...")]
    window: Option<Window>,

    /// Fix an axis of the view to an index.
    ///
    /// The resulting view has one axis fewer. Applied after any permutation and window.
    #[arg(long, value_parser = parse_slice, value_name = "AXIS:INDEX")]
    slice: Option<(usize, usize)>,

    /// Values of the grid.
    ///
    /// Either 'iota' for the row-major position of each element, 'zero', or an integer used for
    /// every element.
    #[arg(
        short = 'f',
        long,
        default_value = "iota",
        allow_negative_numbers = true,
        value_name = "FILL"
    )]
    fill: Fill,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Fill {
    Iota,
    Zero,
    Value(i64),
}

impl FromStr for Fill {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "iota" => Ok(Self::Iota),
            "zero" => Ok(Self::Zero),
            s => s
                .parse()
                .map(Self::Value)
                .map_err(|_| format!("expected 'iota', 'zero', or an integer, found '{s}'")),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Window {
    start: Vec<usize>,
    size: Vec<usize>,
}

fn parse_list(s: &str) -> Result<Vec<usize>, String> {
    s.split(',')
        .map(|v| v.parse().map_err(|e| format!("invalid value '{v}': {e}")))
        .collect()
}

fn parse_window(s: &str) -> Result<Window, String> {
    let (start, size) = s
        .split_once(':')
        .ok_or_else(|| format!("expected START,...:SIZE,..., found '{s}'"))?;

    Ok(Window {
        start: parse_list(start)?,
        size: parse_list(size)?,
    })
}

fn parse_slice(s: &str) -> Result<(usize, usize), String> {
    let (axis, index) = s
        .split_once(':')
        .ok_or_else(|| format!("expected AXIS:INDEX, found '{s}'"))?;

    match (axis.parse(), index.parse()) {
        (Ok(axis), Ok(index)) => Ok((axis, index)),
        _ => Err(format!("expected AXIS:INDEX, found '{s}'")),
    }
}

fn to_array<const D: usize>(values: &[usize], name: &str) -> Result<[usize; D], Error> {
    <[usize; D]>::try_from(values).map_err(|_| {
        anyhow!(
            "{name} must have {D} values for a {D}-dimensional grid (found {})",
            values.len()
        )
    })
}

fn write_view<W, const D: usize>(writer: &mut W, view: View<'_, i64, D>) -> io::Result<()>
where
    W: Write,
{
    writeln!(
        writer,
        "#SHAPE={} STRIDES={} OFFSET={}",
        view.sizes(),
        view.strides(),
        view.base_offset()
    )?;
    write!(writer, "{view}")
}

macro_rules! write_ranks {
    ($show:ident, $writer:ident; $($d:literal),* $(,)?) => {
        match $show.shape.len() {
            1 => $show.write_vector($writer),
            $(
                $d => {
                    let grid = $show.grid::<$d>()?;
                    let view = $show.derive(grid.view())?;

                    match $show.slice {
                        Some((axis, index)) => {
                            write_view($writer, view.slice(Axis(axis), index)?)?
                        }
                        None => write_view($writer, view)?,
                    }

                    Ok(())
                }
            )*
            n => Err(anyhow!("shape must have between 1 and 6 axes (found {n})")),
        }
    };
}

impl Show {
    fn derive<'a, const D: usize>(
        &self,
        mut view: View<'a, i64, D>,
    ) -> Result<View<'a, i64, D>, Error> {
        let start = Instant::now();

        if let Some(order) = &self.permute {
            view = view.permute(to_array::<D>(order, "permutation")?)?;
        }

        if let Some(window) = &self.window {
            view = view.window(
                to_array::<D>(&window.start, "window start")?,
                to_array::<D>(&window.size, "window size")?,
            )?;
        }

        log::info!("Derived view in {:.2?}", start.elapsed());

        Ok(view)
    }

    fn grid<const D: usize>(&self) -> Result<Grid<i64, D>, Error> {
        let shape = Index(to_array::<D>(&self.shape, "shape")?);

        log::debug!("Creating grid of shape {shape} filled with {:?}", self.fill);

        Ok(match self.fill {
            Fill::Iota => Grid::from_fn(shape, |index: Index<D>| index.to_position(&shape) as i64),
            Fill::Zero => Grid::new(shape, 0),
            Fill::Value(value) => Grid::new(shape, value),
        })
    }

    pub fn run(self) -> Result<(), Error> {
        let mut writer = io::BufWriter::new(io::stdout().lock());

        self.write(&mut writer)?;

        writer.flush()?;
        Ok(())
    }

    fn write<W>(&self, writer: &mut W) -> Result<(), Error>
    where
        W: Write,
    {
        write_ranks!(self, writer; 2, 3, 4, 5, 6)
    }

    fn write_vector<W>(&self, writer: &mut W) -> Result<(), Error>
    where
        W: Write,
    {
        let grid = self.grid::<1>()?;
        let view = self.derive(grid.view())?;

        match self.slice {
            Some((axis, index)) => {
                let value = view.slice(Axis(axis), index)?;
                let offset = view.accumulated_offset(index, Axis(axis))?;

                writeln!(writer, "#SHAPE= STRIDES= OFFSET={offset}")?;
                writeln!(writer, "{value}")?;
            }
            None => write_view(writer, view)?,
        }

        Ok(())
    }
}
