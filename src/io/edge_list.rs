//! # EdgeList
//!
//! The EdgeList-Format consists of non-comment-lines `u v`, each describing the edge `Edge(u, v)`
//! at its position in the stream. There is no header: the number of vertices is not known in
//! advance and vertex identifiers need not be contiguous.
//!
//! Lines starting with the comment identifier (default `#`) and blank lines are skipped.
//! Readers reject self-loops and keep only the first occurrence of a repeated endpoint pair,
//! exactly like [`EdgeList::try_from_edges`].
//!
//! # Example
//! ```rust
//! use streammatch::{prelude::*, io::*};
//!
//! let input = "# a path\n1 2\n0 1\n\n2 3\n";
//! let stream = EdgeList::try_read_edge_list(input.as_bytes()).unwrap();
//! assert_eq!(stream.as_slice(), &[Edge(1, 2), Edge(0, 1), Edge(2, 3)]);
//!
//! let mut output = Vec::new();
//! stream.try_write_edge_list(&mut output).unwrap();
//! assert_eq!(String::from_utf8(output).unwrap(), "1 2\n0 1\n2 3\n");
//! ```

use std::io::Lines;

use super::*;

/// A [`StreamReader`] for the EdgeList-Format
#[derive(Debug, Clone)]
pub struct EdgeListReader {
    /// Lines starting with `comment_identifier` are skipped when reading
    comment_identifier: String,
    /// If set, identifiers in the file start at `1` and are decremented
    one_based: bool,
}

impl Default for EdgeListReader {
    fn default() -> Self {
        Self {
            comment_identifier: "#".to_string(),
            one_based: false,
        }
    }
}

impl EdgeListReader {
    /// Creates a new (default) reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the comment identifier
    pub fn comment_identifier<S: Into<String>>(mut self, c: S) -> EdgeListReader {
        self.comment_identifier = c.into();
        self
    }

    /// If set, vertex `1` in the file becomes `Node` `0` (as in the PACE formats)
    pub fn one_based(mut self, one_based: bool) -> EdgeListReader {
        self.one_based = one_based;
        self
    }
}

impl StreamReader for EdgeListReader {
    fn try_read_stream<R: BufRead>(&self, reader: R) -> Result<EdgeList> {
        let edges = EdgeListEdgesReader::new(reader, &self.comment_identifier, self.one_based)
            .collect::<Result<Vec<Edge>>>()?;

        EdgeList::try_from_edges(edges).map_err(|err| io_error!(ErrorKind::InvalidData, err))
    }
}

/// Trait for creating streams from an EdgeListReader.
/// Used as shorthand for default EdgeListReader settings
pub trait EdgeListRead: Sized {
    /// Tries to read the stream from a given reader
    fn try_read_edge_list<R: BufRead>(reader: R) -> Result<Self>;

    /// Tries to read the stream from a given file
    fn try_read_edge_list_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::try_read_edge_list(BufReader::new(File::open(path)?))
    }
}

impl EdgeListRead for EdgeList {
    fn try_read_edge_list<R: BufRead>(reader: R) -> Result<Self> {
        EdgeListReader::default().try_read_stream(reader)
    }
}

/// Lazily parses edges line by line; yields an error for every malformed line
pub struct EdgeListEdgesReader<'a, R> {
    /// Lines in the reader
    lines: Lines<R>,
    /// Comment identifier
    comment_identifier: &'a str,
    /// Decrement identifiers
    one_based: bool,
}

impl<'a, R: BufRead> EdgeListEdgesReader<'a, R> {
    /// Creates a new reader over the lines of `reader`
    pub fn new(reader: R, comment_identifier: &'a str, one_based: bool) -> Self {
        Self {
            lines: reader.lines(),
            comment_identifier,
            one_based,
        }
    }

    /// An empty comment identifier disables comments
    fn is_comment(&self, line: &str) -> bool {
        !self.comment_identifier.is_empty() && line.starts_with(self.comment_identifier)
    }

    /// Returns the next non-comment-line if it exists or propagate an error
    fn next_non_comment_line(&mut self) -> Result<Option<String>> {
        loop {
            match self.lines.next() {
                None => return Ok(None),
                Some(Err(x)) => return Err(x),
                Some(Ok(line)) if line.trim().is_empty() || self.is_comment(&line) => {
                    continue;
                }
                Some(Ok(line)) => return Ok(Some(line)),
            }
        }
    }

    /// Tries to parse an edge from the next non-comment-line
    fn parse_edge_line(&mut self) -> Result<Option<Edge>> {
        let Some(line) = self.next_non_comment_line()? else {
            return Ok(None);
        };

        let mut parts = line.split_whitespace();
        let from: Node = parse_next_value!(parts, "Source node");
        let dest: Node = parse_next_value!(parts, "Target node");

        raise_error_unless!(
            parts.next().is_none(),
            ErrorKind::InvalidData,
            format!("Trailing tokens in edge line {line:?}.")
        );

        if !self.one_based {
            return Ok(Some(Edge(from, dest)));
        }

        raise_error_unless!(
            from > 0 && dest > 0,
            ErrorKind::InvalidData,
            format!("Node 0 found in one-based edge line {line:?}.")
        );
        Ok(Some(Edge(from - 1, dest - 1)))
    }
}

impl<'a, R: BufRead> Iterator for EdgeListEdgesReader<'a, R> {
    type Item = Result<Edge>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parse_edge_line().transpose()
    }
}

/// A [`StreamWriter`] for the EdgeList-Format
#[derive(Debug, Clone, Default)]
pub struct EdgeListWriter {
    /// If set, identifiers are incremented by one
    one_based: bool,
}

impl EdgeListWriter {
    /// Shorthand for default
    pub fn new() -> Self {
        Self::default()
    }

    /// If set, `Node` `0` is written as `1`
    pub fn one_based(mut self, one_based: bool) -> EdgeListWriter {
        self.one_based = one_based;
        self
    }
}

impl StreamWriter for EdgeListWriter {
    fn try_write_stream<S, W>(&self, stream: &S, mut writer: W) -> Result<()>
    where
        S: EdgeStream + ?Sized,
        W: Write,
    {
        // widened so that `Node::MAX` stays representable when shifted
        let offset = u64::from(self.one_based);
        for Edge(u, v) in stream.pass() {
            writeln!(writer, "{} {}", u64::from(u) + offset, u64::from(v) + offset)?;
        }

        Ok(())
    }
}

/// Trait for writing a stream to a writer in the EdgeList-Format.
/// Shorthand for default settings.
pub trait EdgeListWrite {
    /// Tries to write the stream to a writer
    fn try_write_edge_list<W: Write>(&self, writer: W) -> Result<()>;

    /// Tries to write the stream to a file
    fn try_write_edge_list_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        self.try_write_edge_list(writer)
    }
}

impl<S> EdgeListWrite for S
where
    S: EdgeStream + ?Sized,
{
    fn try_write_edge_list<W: Write>(&self, writer: W) -> Result<()> {
        EdgeListWriter::default().try_write_stream(self, writer)
    }
}
