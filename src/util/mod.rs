//! Utility modules

pub mod text;

pub use text::{big_word_class, char_class, CharClass};
