//! tagfield - tag entry with autocomplete for terminal forms.
//!
//! A text input of a [`Form`] is enhanced with [`bind`]: it is hidden and
//! replaced by a widget showing the entered tags as chips, a field to type
//! into and a suggestion menu filtered from a candidate list. The hidden
//! input always holds the tags joined with commas, so submitting the form
//! submits the tags.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod ui;

pub use error::{AppError, Result};
pub use ui::{bind, bind_with, AutoComplete, BindError, CandidateSet, Form, WidgetOptions};
