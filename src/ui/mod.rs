//! User interface components and views.
//!
//! This module contains all TUI rendering logic: the tag widget and its
//! parts, the form that hosts them, and the process-wide theme.

pub mod components;
pub mod theme;
pub mod views;

pub use components::{
    bind, bind_with, render_context_help, AutoComplete, BindError, CandidateSet, HelpContext,
    Input, InputKind, MatchMode, SuggestionMenu, TagList, TextField, WidgetEvent, WidgetOptions,
};
pub use theme::{init_theme, theme, Theme};
pub use views::{Element, Form, FormEvent, SubmittedField};
