/*!
# IO

Utilities for reading edge streams from and writing them to text files.

## Format

The only supported format is the **EdgeList**-Format: every non-comment line `u v` describes one
edge of the stream, in stream order. See [`edge_list`] for details and configuration.

## Traits

To generalize over reading/writing:
- [`StreamReader`] and [`StreamWriter`] are implemented by configurable readers and writers,
- [`EdgeListRead`] and [`EdgeListWrite`] are shorthands using the default settings.

All functions report failures as [`std::io::Error`]; malformed input yields
[`ErrorKind::InvalidData`].
*/

pub mod edge_list;

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, ErrorKind, Result, Write},
    path::Path,
};

use crate::prelude::*;

pub use edge_list::*;

/// Trait for types that can read edge streams in a specific format.
pub trait StreamReader {
    /// Reads a stream from the given reader according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the input is not a valid stream in the expected format.
    fn try_read_stream<R>(&self, reader: R) -> Result<EdgeList>
    where
        R: BufRead;

    /// Reads a stream from a file according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or if its contents are invalid.
    fn try_read_stream_file<P>(&self, path: P) -> Result<EdgeList>
    where
        P: AsRef<Path>,
    {
        self.try_read_stream(BufReader::new(File::open(path)?))
    }
}

/// Trait for types that can write edge streams in a specific format.
pub trait StreamWriter {
    /// Writes one pass of `stream` to the provided writer according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    fn try_write_stream<S, W>(&self, stream: &S, writer: W) -> Result<()>
    where
        S: EdgeStream + ?Sized,
        W: Write;

    /// Writes one pass of `stream` to a file according to the settings in `self`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or if writing fails.
    fn try_write_stream_file<S, P>(&self, stream: &S, path: P) -> Result<()>
    where
        S: EdgeStream + ?Sized,
        P: AsRef<Path>,
    {
        self.try_write_stream(stream, BufWriter::new(File::create(path)?))
    }
}

/// Shorthand for creating a new IO-error
macro_rules! io_error {
    ($kind: expr, $info: expr) => {
        std::io::Error::new($kind, $info)
    };
}

/// Shorthand for returning `Err(std::io::Error)` early when a condition fails
macro_rules! raise_error_unless {
    ($cond : expr, $kind : expr, $info : expr) => {
        if !($cond) {
            return Err(io_error!($kind, $info));
        }
    };
}

/// Tries to parse the next value in an iterator and returns early if it fails
macro_rules! parse_next_value {
    ($iterator : expr, $name : expr) => {{
        let Some(token) = $iterator.next() else {
            return Err(io_error!(
                ErrorKind::InvalidData,
                format!("Premature end of line when parsing {}.", $name)
            ));
        };

        match token.parse() {
            Ok(value) => value,
            Err(_) => {
                return Err(io_error!(
                    ErrorKind::InvalidData,
                    format!("Invalid value {token:?} found. Cannot parse {}.", $name)
                ));
            }
        }
    }};
}

use io_error;
use parse_next_value;
use raise_error_unless;
