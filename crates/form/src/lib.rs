//! # Nebula Form
//!
//! Reactive validation state for form fields.
//!
//! A [`Field`] watches an [`Observable<String>`] and re-derives three
//! published values whenever something relevant happens:
//!
//! - [`Status`]: sticky interaction flags (`touched`, `dirty`, `validated`),
//!   the aggregate `valid` / `optional` flags and one boolean per rule
//! - the display state: `""`, `"valid"`, `"invalid"`, or an external override
//! - [`Messages`]: failure messages of the rules that should be shown now
//!
//! Rules come from a [`RuleRegistry`](nebula_validator::RuleRegistry); the
//! shared built-in one is used unless a descriptor names another.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use nebula_form::{FieldDescriptor, Observable, RuleSpec, ValidateOn, use_validation};
//!
//! let email = Observable::new(String::new());
//! let updates = Rc::new(Cell::new(0));
//!
//! let counter = Rc::clone(&updates);
//! let field = use_validation(
//!     FieldDescriptor::new(email.clone(), ["required", "email"])
//!         .rule(RuleSpec::with("minLength", 5))
//!         .validate_on(ValidateOn::Blur)
//!         .on_update(move |_, _, _| counter.set(counter.get() + 1)),
//! )
//! .unwrap()
//! .into_field()
//! .unwrap();
//!
//! email.set("a".to_owned());
//! assert!(field.messages().get().is_empty()); // blur: edits alone stay quiet
//!
//! field.touch();
//! let messages = field.messages().get();
//! assert_eq!(messages.keys().collect::<Vec<_>>(), ["email", "minLength"]);
//! assert_eq!(updates.get(), 3);
//! ```
//!
//! Fields are single-threaded (`Rc`-based); every recompute runs
//! synchronously on the thread that triggered it.

#![forbid(unsafe_code)]

pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod field;
pub mod field_set;
pub mod messages;
pub mod observable;
pub mod state;
pub mod status;

pub use descriptor::{FieldDescriptor, FieldOptions, FieldSchema};
pub use dispatch::{UpdateCallback, UpdateDispatcher};
pub use error::{FormError, Result};
pub use field::Field;
pub use field_set::{FieldSet, Validation, ValidationInput, use_validation};
pub use messages::{Messages, ValidateOn};
pub use observable::{Observable, ReadOnly, Subscription};
pub use state::FieldSnapshot;
pub use status::{FieldFlags, Status};

pub use nebula_validator::{RuleRegistry, RuleSpec};
