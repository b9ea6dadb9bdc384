//! # Attribute System
//!
//! Widgets carry arbitrary named attributes. Rather than open-ended dynamic
//! fields, every attribute holds an [`AttrValue`], a closed sum type that can
//! be cloned structurally, compared, printed for assertions and handed to the
//! template engine as context.
//!
//! ## Value Kinds
//!
//! | Kind | Example | JSON form |
//! |------|---------|-----------|
//! | `Nil` | unset / explicit absence | `null` |
//! | `Bool` | `admin = true` | `true` |
//! | `Int` | `age = 36` | `36` |
//! | `Float` | `balance = 10.5` | `10.5` |
//! | `Str` | `name = "Ada"` | `"Ada"` |
//! | `List` | `comments = []` | `[...]` |
//! | `Map` | a nested widget | `{...}` |
//!
//! ## Ordering
//!
//! [`Attributes`] is insertion ordered, so a widget prints and serializes its
//! attributes in the order they were first set. Overwriting an attribute keeps
//! its original position.
//!
//! ## Usage
//!
//! ```ignore
//! let mut attrs = Attributes::new();
//! attrs.insert("name".into(), AttrValue::from("Ada"));
//! attrs.insert("tags".into(), AttrValue::from(vec!["admin", "ops"]));
//!
//! assert_eq!(attrs["name"].as_str(), Some("Ada"));
//! ```

mod value;

pub use value::{AttrValue, Attributes};
