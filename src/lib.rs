//! Lodestone - a find/replace engine for text editors
//!
//! Lodestone implements the logic side of an editor's find/replace dialog,
//! fully decoupled from any widget toolkit:
//! - Seven independently toggle-able search options with coupled side effects
//! - Incremental ("search as you type") search anchored to a stable base location
//! - Single search, select-all, replace-all, select-and-replace, and
//!   replace-and-find operations with wrap-around and scope confinement
//! - A typed operation status with user-facing message generation
//! - An abstract target capability surface, plus a complete `String`-backed
//!   reference target
//!
//! The host owns the text surface and binds it to the engine through the
//! [`FindReplaceTarget`] trait; everything the engine does flows through that
//! contract, so any editor widget, document model, or plain buffer can sit on
//! the other side.
//!
//! # Example
//! ```
//! use lodestone::{FindReplaceLogic, SearchOption, TextBuffer};
//!
//! let mut logic = FindReplaceLogic::new();
//! logic.update_target(TextBuffer::new("cat cat dog cat"), true);
//! logic.activate(SearchOption::Forward);
//!
//! logic.set_find_string("cat");
//! logic.set_replace_string("dog");
//! let replaced = logic.perform_replace_all();
//!
//! assert_eq!(replaced, 3);
//! assert_eq!(logic.target().unwrap().text(), "dog dog dog dog");
//! ```

mod buffer;
mod engine;
mod error;
mod message;
mod options;
mod status;
mod target;

pub use buffer::TextBuffer;
pub use engine::FindReplaceLogic;
pub use error::TargetError;
pub use message::status_message;
pub use options::SearchOption;
pub use status::{FindStatusCode, SearchStatus};
pub use target::{
    BatchReplaceTarget, FindReplaceTarget, MultiSelectionTarget, RegexTarget, ScopeTarget,
    SessionTarget, TextRange, ValidationTarget,
};
