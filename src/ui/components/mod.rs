//! Reusable UI components.

mod autocomplete;
mod help_bar;
mod input;
mod suggestion_menu;
mod tag_list;
mod text_field;

pub use autocomplete::{
    bind, bind_with, AutoComplete, BindError, CandidateSet, WidgetEvent, WidgetOptions,
};
pub use help_bar::{context_hints, render_context_help, HelpContext};
pub use input::{Input, InputKind};
pub use suggestion_menu::{
    MatchMode, MenuEvent, MenuItem, SuggestionMenu, DEFAULT_MAX_ITEMS, MAX_ITEMS_LIMIT,
};
pub use tag_list::{layout_chips, ChipArea, ChipLayout, Tag, TagEvent, TagList, SEPARATOR};
pub use text_field::TextField;
