/*!
# Language Module

Lexical analysis of BASIC source text and the primitive binary
encodings shared by the tokenizer and the lister.

*/

#[macro_use]
mod error;
mod ident;
mod lex;
mod token;

pub mod number;

pub use error::Error;
pub use error::ErrorCode;
pub use ident::IdentifierStore;
pub use lex::lex;
pub use token::{Marker, Token};
pub use token::{
    TOKEN_DEC, TOKEN_DOLLAR, TOKEN_END, TOKEN_REMARK, TOKEN_SH1, TOKEN_SH2, TOKEN_STR,
};

pub type LineNumber = Option<u16>;
pub type Column = std::ops::Range<usize>;
