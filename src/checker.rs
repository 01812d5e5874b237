use anyhow::Result;
use std::fs::read_to_string;
use std::path::Path;

use crate::affix_trie::{PrefixTrie, SuffixTrie};
use crate::affixdata::AffixData;
use crate::capitalization::{self, Cap};
use crate::compoundrule::CompoundRule;
use crate::dic::Dictionary;
use crate::forms::WordForm;
use crate::parse_aff::parse_affix_data;
use crate::replacements::{BreakPattern, ConvTable, RepTable};
use crate::wordflags::WordFlags;

/// Recursion bound for break-pattern splitting.
const MAX_BREAK_DEPTH: usize = 10;

/// One accepted reading of an input word.
#[derive(Clone, Debug)]
pub enum Parse<'a> {
    Word(WordForm<'a>),
    Compound(Vec<WordForm<'a>>),
}

/// A compiled dictionary ready for lookups. Everything is immutable after
/// construction; a shared reference can serve lookups from any number of
/// threads.
#[derive(Debug)]
pub struct Checker {
    pub(crate) aff: AffixData,
    pub(crate) dic: Dictionary,
    pub(crate) prefix_trie: PrefixTrie,
    pub(crate) suffix_trie: SuffixTrie,
    pub(crate) compound_rules: Vec<CompoundRule>,
    pub(crate) rep_table: RepTable,
    iconv: ConvTable,
    break_patterns: Vec<BreakPattern>,
}

impl Checker {
    pub fn new(aff: AffixData, dic: Dictionary) -> Result<Self> {
        let mut prefix_trie = PrefixTrie::default();
        for (i, entry) in aff.prefixes.iter().enumerate() {
            prefix_trie.insert(&entry.add, i as u32);
        }
        let mut suffix_trie = SuffixTrie::default();
        for (i, entry) in aff.suffixes.iter().enumerate() {
            suffix_trie.insert(&entry.add, i as u32);
        }
        let compound_rules = aff
            .compound_rules
            .iter()
            .map(|r| CompoundRule::parse(r, aff.flag_mode))
            .collect::<Result<Vec<CompoundRule>>>()?;
        let mut rep_table = RepTable::default();
        for (from, to) in aff.rep.iter() {
            rep_table.push(from, to);
        }
        let iconv = ConvTable::from_pairs(&aff.iconv);
        let break_patterns = aff
            .break_table
            .iter()
            .map(|pat| BreakPattern::new(pat))
            .collect();

        Ok(Checker {
            aff,
            dic,
            prefix_trie,
            suffix_trie,
            compound_rules,
            rep_table,
            iconv,
            break_patterns,
        })
    }

    pub fn from_strs(aff_text: &str, dic_text: &str) -> Result<Self> {
        let aff = parse_affix_data(aff_text)?;
        let dic = Dictionary::parse(dic_text, &aff)?;
        Checker::new(aff, dic)
    }

    /// Compile a checker from a hunspell .aff and .dic file pair.
    pub fn load(aff_path: &Path, dic_path: &Path) -> Result<Self> {
        let aff_text = read_to_string(aff_path)?;
        let dic_text = read_to_string(dic_path)?;
        Checker::from_strs(&aff_text, &dic_text)
    }

    /// Returns true if the word is in the dictionary, otherwise false.
    pub fn lookup(&self, word: &str) -> bool {
        self.lookup_with(word, true, true)
    }

    /// `capitalization` enables trying case variants of the input;
    /// `allow_nosuggest` admits words carrying the NOSUGGEST flag.
    pub fn lookup_with(
        &self,
        word: &str,
        capitalization: bool,
        allow_nosuggest: bool,
    ) -> bool {
        if self.aff.forbidden_word.is_some() {
            let mut homonyms = self.dic.homonyms(word).peekable();
            if homonyms.peek().is_some()
                && homonyms.all(|w| w.bits.contains(WordFlags::Forbidden))
            {
                return false;
            }
        }

        let word = if self.iconv.is_empty() {
            word.to_string()
        } else {
            self.iconv.apply(word)
        };

        if self.is_found(&word, capitalization, allow_nosuggest) {
            return true;
        }

        // try splitting at break patterns; empty parts (from consecutive
        // or anchored separators) are fine
        let mut acc: Vec<&str> = Vec::new();
        self.break_splits(&word, 0, &mut acc, &mut |parts| {
            parts.len() > 1
                && parts.iter().all(|part| {
                    part.is_empty() || self.is_found(part, capitalization, allow_nosuggest)
                })
        })
    }

    /// Every way to segment `text` at break patterns, including no split
    /// at all.
    fn break_splits<'t>(
        &self,
        text: &'t str,
        depth: usize,
        acc: &mut Vec<&'t str>,
        visit: &mut dyn FnMut(&[&'t str]) -> bool,
    ) -> bool {
        acc.push(text);
        let accepted = visit(acc);
        acc.pop();
        if accepted {
            return true;
        }
        if depth >= MAX_BREAK_DEPTH {
            return false;
        }
        for pattern in self.break_patterns.iter() {
            for (start, end) in pattern.occurrences(text) {
                acc.push(&text[..start]);
                let accepted = self.break_splits(&text[end..], depth + 1, acc, visit);
                acc.pop();
                if accepted {
                    return true;
                }
            }
        }
        false
    }

    fn is_found(&self, word: &str, capitalization: bool, allow_nosuggest: bool) -> bool {
        self.analyze_inner(word, capitalization, allow_nosuggest, &mut |_| true)
    }

    /// Lazily produce the accepted parses of `word`. `visit` returns true
    /// to stop the stream early; the return value reports whether it did.
    pub fn analyze<'a, F>(
        &'a self,
        word: &str,
        capitalization: bool,
        allow_nosuggest: bool,
        mut visit: F,
    ) -> bool
    where
        F: FnMut(Parse<'a>) -> bool,
    {
        self.analyze_inner(word, capitalization, allow_nosuggest, &mut visit)
    }

    fn analyze_inner<'a>(
        &'a self,
        word: &str,
        capitalization: bool,
        allow_nosuggest: bool,
        visit: &mut dyn FnMut(Parse<'a>) -> bool,
    ) -> bool {
        if capitalization {
            let (captype, variants) = capitalization::variants(word);
            for variant in variants.iter() {
                if self.analyze_variant(variant, captype, allow_nosuggest, visit) {
                    return true;
                }
            }
            false
        } else {
            self.analyze_variant(word, capitalization::guess(word), allow_nosuggest, visit)
        }
    }

    fn analyze_variant<'a>(
        &'a self,
        word: &str,
        captype: Cap,
        allow_nosuggest: bool,
        visit: &mut dyn FnMut(Parse<'a>) -> bool,
    ) -> bool {
        if self.word_forms(word, captype, None, allow_nosuggest, &mut |form| {
            visit(Parse::Word(form))
        }) {
            return true;
        }
        self.compound_parts(word, allow_nosuggest, &mut |parts| {
            visit(Parse::Compound(parts.to_vec()))
        })
    }
}
