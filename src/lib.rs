//! A parser for a small TOML-like configuration language that builds an
//! owned tree of tables and reports errors with precise locations.
//!
//! Documents are sequences of `key = value` assignments and `[table]`
//! headers. Keys may be dotted (`a.b.c = 1`) to address nested tables,
//! which are created on demand. Values are strings, 64-bit integers,
//! booleans and arrays.
//!
//! Parsing is split into a [`Lexer`] producing [`Token`]s and a [`Parser`]
//! consuming any [`TokenSource`], so a pre-built [`TokenList`] can be parsed
//! without going through text. Every token and every [`Error`] carries a
//! byte [`Span`] and a 1-based line and column [`Location`].
//!
//! # Examples
//!
//! ```
//! use toml_tree::{ErrorKind, Value};
//!
//! let content = r#"
//! name = "demo"
//! tags = ["a", "b"]
//!
//! [server]
//! host = "localhost"
//! port = 8080
//! tls.enabled = true
//! "#;
//!
//! let root = toml_tree::parse(content)?;
//! assert_eq!(root.get("name").and_then(Value::as_str), Some("demo"));
//!
//! let server = root.get("server").and_then(Value::as_table).unwrap();
//! assert_eq!(server.get("port").and_then(Value::as_integer), Some(8080));
//! let tls = server.get("tls").and_then(Value::as_table).unwrap();
//! assert_eq!(tls.get("enabled").and_then(Value::as_bool), Some(true));
//!
//! let err = toml_tree::parse("port = 1\nport = 2\n").unwrap_err();
//! assert!(matches!(err.kind, ErrorKind::DuplicateKey { .. }));
//! assert_eq!((err.location.line, err.location.column), (2, 1));
//! # Ok::<(), toml_tree::Error>(())
//! ```
//!
//! # Features
//!
//! - `serde`: [`serde::Serialize`] and [`serde::Deserialize`] for [`Value`]
//!   and [`Table`].
//! - `reporting`: [`Error::to_diagnostic`] for rendering errors with
//!   `codespan-reporting`.

mod error;
mod lexer;
mod parser;
mod span;
mod table;
mod token;
mod value;

pub use error::{Error, ErrorKind};
pub use lexer::Lexer;
pub use parser::{Parser, parse, parse_tokens};
pub use span::{Location, Span, Spanned};
pub use table::{IntoIter, Iter, Table};
pub use token::{Token, TokenList, TokenSource};
pub use value::Value;

#[cfg(feature = "serde")]
pub mod impl_serde;
