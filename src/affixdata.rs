use crate::condition::Condition;
use crate::flags::{Flag, FlagMode, FlagSet};
use crate::wordflags::WordFlags;

/// Whether an affix entry strips and adds at the start or the end of a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AffixKind {
    Prefix,
    Suffix,
}

/// One PFX or SFX rule line.
#[derive(Debug)]
pub struct AffixEntry {
    pub kind: AffixKind,
    pub flag: Flag,
    /// String removed from the stem when the affix is applied (so re-added
    /// when the affix is stripped).
    pub strip: String,
    /// Surface string the affix contributes.
    pub add: String,
    /// Eligibility condition, already pruned against `strip` so that it
    /// applies directly to the word with `add` removed.
    pub condition: Condition,
    pub cross_product: bool,
    /// Continuation classes carried by the affix itself.
    pub flags: FlagSet,
    /// Well-known semantics of `flags`, precomputed.
    pub bits: WordFlags,
}

impl AffixEntry {
    pub fn new(
        kind: AffixKind,
        flag: Flag,
        strip: &str,
        add: &str,
        condition: &str,
        cross_product: bool,
        flags: FlagSet,
        bits: WordFlags,
    ) -> Self {
        let mut condition = Condition::parse(condition);
        match kind {
            AffixKind::Prefix => condition.prune_leading(strip),
            AffixKind::Suffix => condition.prune_trailing(strip),
        }
        AffixEntry {
            kind,
            flag,
            strip: strip.to_string(),
            add: add.to_string(),
            condition,
            cross_product,
            flags,
            bits,
        }
    }
}

/// A CHECKCOMPOUNDPATTERN row. `left`/`right` may carry a flag after a
/// slash; the flags are stored but not consulted when matching, which
/// mirrors the reference implementations.
#[derive(Clone, Debug)]
pub struct CompoundPattern {
    pub left_stem: String,
    pub left_flag: Option<Flag>,
    pub right_stem: String,
    pub right_flag: Option<Flag>,
    pub replacement: Option<String>,
}

/// The in-memory form of a parsed .aff file. Immutable once built; the
/// recognizer only reads it.
#[derive(Debug)]
pub struct AffixData {
    pub flag_mode: FlagMode,
    pub prefixes: Vec<AffixEntry>,
    pub suffixes: Vec<AffixEntry>,

    pub forbidden_word: Option<Flag>,
    pub no_suggest: Option<Flag>,
    pub keep_case: Option<Flag>,
    pub need_affix: Option<Flag>,
    pub only_in_compound: Option<Flag>,
    pub compound_flag: Option<Flag>,
    pub compound_begin: Option<Flag>,
    pub compound_middle: Option<Flag>,
    pub compound_last: Option<Flag>,
    pub compound_permit: Option<Flag>,
    pub compound_forbid: Option<Flag>,

    pub compound_min: u32,
    pub compound_words_max: Option<u32>,

    pub check_compound_case: bool,
    pub check_compound_triple: bool,
    pub check_compound_rep: bool,

    pub rep: Vec<(String, String)>,
    pub iconv: Vec<(String, String)>,
    pub break_table: Vec<String>,
    pub compound_rules: Vec<String>,
    pub compound_patterns: Vec<CompoundPattern>,
}

impl AffixData {
    pub fn new() -> Self {
        AffixData {
            flag_mode: FlagMode::CharFlags,
            prefixes: Vec::new(),
            suffixes: Vec::new(),
            forbidden_word: None,
            no_suggest: None,
            keep_case: None,
            need_affix: None,
            only_in_compound: None,
            compound_flag: None,
            compound_begin: None,
            compound_middle: None,
            compound_last: None,
            compound_permit: None,
            compound_forbid: None,
            compound_min: 3,
            compound_words_max: None,
            check_compound_case: false,
            check_compound_triple: false,
            check_compound_rep: false,
            rep: Vec::new(),
            iconv: Vec::new(),
            // hunspell's default break table; an explicit BREAK directive
            // replaces it
            break_table: vec!["-".to_string(), "^-".to_string(), "-$".to_string()],
            compound_rules: Vec::new(),
            compound_patterns: Vec::new(),
        }
    }

    pub fn parse_flags(&self, s: &str) -> anyhow::Result<crate::flags::FlagVec> {
        self.flag_mode.parse_flags(s)
    }

    /// The well-known semantics present in a raw flag set.
    pub fn word_flags(&self, flags: &FlagSet) -> WordFlags {
        let mut bits = WordFlags::empty();
        let mut set = |opt: Option<Flag>, bit| {
            if opt.map_or(false, |f| flags.contains(f)) {
                bits |= bit;
            }
        };
        set(self.forbidden_word, WordFlags::Forbidden);
        set(self.no_suggest, WordFlags::NoSuggest);
        set(self.keep_case, WordFlags::KeepCase);
        set(self.need_affix, WordFlags::NeedAffix);
        set(self.only_in_compound, WordFlags::OnlyInCompound);
        set(self.compound_flag, WordFlags::CompoundFlag);
        set(self.compound_begin, WordFlags::CompoundBegin);
        set(self.compound_middle, WordFlags::CompoundMiddle);
        set(self.compound_last, WordFlags::CompoundEnd);
        set(self.compound_permit, WordFlags::CompoundPermit);
        set(self.compound_forbid, WordFlags::CompoundForbid);
        bits
    }
}

impl Default for AffixData {
    fn default() -> Self {
        Self::new()
    }
}
