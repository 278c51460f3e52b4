//! Application views (screens).

mod form;

pub use form::{Element, Form, FormEvent, SubmittedField};
