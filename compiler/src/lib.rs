//! Provides for the parsing and compilation of a regular expression into a
//! deterministic finite automaton, built directly from the `followpos`
//! relation of its augmented syntax tree.
//!
//! # Example
//!
//! ```rust
//! // Parsing and compilation of a regular expression into an automaton is
//! // accomplished by two functions exposed in the `regex_dfa_compiler` crate.
//! use regex_dfa_compiler::{compile, parse};
//!
//! // Evaluating a given input against an automaton is accomplished via a
//! // single exposed function in the `regex_dfa_runtime` crate.
//! use regex_dfa_runtime::run;
//!
//! // The first line declares the alphabet, the second the expression. Every
//! // concatenation must be written out explicitly with `.`.
//! let input = "a b\n(a|b)*.a.b.b\n";
//!
//! let dfa = parse(input)
//!     .map_err(|e| e.to_string())
//!     .and_then(|source| compile(&source.expression).map_err(|e| e.to_string()))
//!     .expect("failed to parse or compile");
//!
//! assert!(run(&dfa, "aabb"));
//! assert!(!run(&dfa, "ab"));
//! ```

pub mod ast;
pub mod compiler;
pub mod dot;
pub mod parser;
pub mod postfix;
pub mod tree;

pub use compiler::{compile, synthesize, CompileError};
pub use dot::{to_dot, write_dot};
pub use parser::{parse, parse_alphabet, parse_expression, ParseErr, Source};
pub use postfix::to_postfix;
pub use tree::build;
