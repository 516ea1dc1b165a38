//! Text format reader.
//!
//! # Instance format
//!
//! ```text
//! B L D                 books, libraries, days
//! v_0 ... v_{B-1}       book values
//! N T M                 per library: book count, signup days, books per day
//! id ... id             per library: N book ids
//! ```
//!
//! Fields are separated by any whitespace; blank lines are ignored. A library
//! declaring zero books has no id line.
//!
//! # Submission format
//!
//! ```text
//! A                     activated libraries
//! Y K                   per library: library id, book count
//! id ... id             per library: K book ids
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{Assignment, BookCatalog, Instance, Library, Schedule};

/// Errors raised while reading instance or submission text.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: book {book} out of range (catalog has {books} books)")]
    UnknownBook { line: usize, book: u64, books: usize },

    #[error("trailing content at line {line}")]
    TrailingContent { line: usize },
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Whitespace-separated numeric lines, skipping blanks.
struct Lines<'a> {
    inner: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
}

impl<'a> Lines<'a> {
    fn new(input: &'a str) -> Self {
        let inner = input
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());
        Self {
            inner: Box::new(inner),
        }
    }

    /// Reads the next non-blank line as exactly `count` numbers.
    fn fields(&mut self, expected: &'static str, count: usize) -> ParseResult<(usize, Vec<u64>)> {
        let (line, text) = self
            .inner
            .next()
            .ok_or(ParseError::UnexpectedEof { expected })?;

        let values = text
            .split_whitespace()
            .map(|token| {
                token.parse::<u64>().map_err(|_| ParseError::InvalidNumber {
                    line,
                    token: token.to_string(),
                })
            })
            .collect::<ParseResult<Vec<_>>>()?;

        if values.len() != count {
            return Err(ParseError::FieldCount {
                line,
                expected: count,
                found: values.len(),
            });
        }
        Ok((line, values))
    }

    fn finish(mut self) -> ParseResult<()> {
        match self.inner.next() {
            Some((line, _)) => Err(ParseError::TrailingContent { line }),
            None => Ok(()),
        }
    }
}

fn to_usize(value: u64, line: usize) -> ParseResult<usize> {
    usize::try_from(value).map_err(|_| ParseError::InvalidNumber {
        line,
        token: value.to_string(),
    })
}

fn book_id(value: u64, line: usize, catalog: &BookCatalog) -> ParseResult<usize> {
    match usize::try_from(value) {
        Ok(id) if catalog.contains(id) => Ok(id),
        _ => Err(ParseError::UnknownBook {
            line,
            book: value,
            books: catalog.len(),
        }),
    }
}

/// Parses an instance from text. Library book lists come back sorted by
/// descending value.
pub fn parse_instance(input: &str) -> ParseResult<Instance> {
    let mut lines = Lines::new(input);

    let (line, header) = lines.fields("header 'books libraries days'", 3)?;
    let book_count = to_usize(header[0], line)?;
    let library_count = to_usize(header[1], line)?;
    let days = header[2];

    let (_, values) = lines.fields("book values", book_count)?;
    let catalog = BookCatalog::from_values(values);

    let mut libraries = Vec::with_capacity(library_count);
    for id in 0..library_count {
        let (line, head) = lines.fields("library header 'books signup per_day'", 3)?;
        let count = to_usize(head[0], line)?;
        let books = if count == 0 {
            Vec::new()
        } else {
            let (line, ids) = lines.fields("library book ids", count)?;
            ids.into_iter()
                .map(|b| book_id(b, line, &catalog))
                .collect::<ParseResult<Vec<_>>>()?
        };
        libraries.push(Library::new(id, head[1], head[2]).with_books(books));
    }

    lines.finish()?;
    Ok(Instance::new(days, catalog, libraries))
}

/// Reads and parses an instance file.
pub fn read_instance(path: &Path) -> ParseResult<Instance> {
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_instance(&text)
}

/// Parses a submission back into a schedule.
///
/// Only library ids and book lists are recovered; timing fields are zero.
/// Book ids are not checked against any catalog.
pub fn parse_submission(input: &str) -> ParseResult<Schedule> {
    let mut lines = Lines::new(input);
    let (line, header) = lines.fields("activated library count", 1)?;
    let count = to_usize(header[0], line)?;

    let mut schedule = Schedule::new();
    for _ in 0..count {
        let (line, head) = lines.fields("library line 'id books'", 2)?;
        let library_id = to_usize(head[0], line)?;
        let book_count = to_usize(head[1], line)?;
        let books = if book_count == 0 {
            Vec::new()
        } else {
            let (line, ids) = lines.fields("submitted book ids", book_count)?;
            ids.into_iter()
                .map(|b| to_usize(b, line))
                .collect::<ParseResult<Vec<_>>>()?
        };
        schedule.add_assignment(Assignment::new(library_id, 0, 0).with_books(books));
    }

    lines.finish()?;
    Ok(schedule)
}

/// Reads and parses a submission file.
pub fn read_submission(path: &Path) -> ParseResult<Schedule> {
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_submission(&text)
}
