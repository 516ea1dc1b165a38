//! Text input and submission output.
//!
//! Both directions use the competition's whitespace-separated formats.
//! Nothing here is needed by the scheduler itself.

mod dump;
mod parser;

pub use dump::{render_submission, write_submission, DumpError, DumpReport};
pub use parser::{
    parse_instance, parse_submission, read_instance, read_submission, ParseError, ParseResult,
};
