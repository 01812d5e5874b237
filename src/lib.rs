#![warn(missing_debug_implementations)]

//! Word recognition over hunspell-format dictionaries.
//!
//! A [`Checker`] is compiled once from an `.aff`/`.dic` pair and then
//! answers [`Checker::lookup`] queries: affix stripping (up to two
//! prefixes and two suffixes, with cross-product rules), capitalization
//! handling, compound words by flags and by rules, and break-pattern
//! splitting. [`Checker::analyze`] exposes the underlying parse stream.

mod affix_trie;
mod affixdata;
mod capitalization;
mod checker;
mod compound;
mod compoundrule;
mod condition;
mod dic;
mod flags;
mod forms;
mod parse_aff;
mod replacements;
mod wordflags;

pub use crate::affixdata::{AffixData, AffixEntry, AffixKind, CompoundPattern};
pub use crate::capitalization::Cap;
pub use crate::checker::{Checker, Parse};
pub use crate::condition::Condition;
pub use crate::dic::{Dictionary, WordInfo};
pub use crate::flags::{Flag, FlagMode, FlagSet, FlagVec};
pub use crate::forms::{CompoundPos, WordForm};
pub use crate::parse_aff::parse_affix_data;
pub use crate::wordflags::WordFlags;
