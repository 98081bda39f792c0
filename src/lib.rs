//! A scanf-style format language compiled to regular expressions.
//!
//! A format such as `"%s - %d errors"` is compiled once into a regex plus one
//! conversion per captured field, then applied to lines of text.
//!
//! # Example
//!
//! ```rust
//! use rescanf::{Value, scanf};
//!
//! let values = scanf("%s - %d errors, %d warnings", "/usr/sbin/sendmail - 0 errors, 4 warnings")
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(
//!     values,
//!     vec![Value::from("/usr/sbin/sendmail"), Value::from(0i64), Value::from(4i64)]
//! );
//!
//! // Lines that don't match are `None`, not errors.
//! assert_eq!(scanf("%u", "-50").unwrap(), None);
//! ```
//!
//! See [`directive`] for the full directive syntax.

mod cache;
mod code;
mod compiler;
pub mod conversion;
pub mod directive;
mod error;
mod extract;
mod matcher;
mod value;

pub use cache::{CACHE_CAPACITY, FormatCache};
pub use code::CompiledFormat;
pub use compiler::{compile, translate};
pub use error::{Result, ScanError};
pub use extract::{Columns, collect_columns, extract, extract_file, extract_reader};
pub use matcher::{FormatSource, apply, scanf, scanf_with};
pub use num_bigint::BigInt;
pub use value::Value;
