use smallvec::SmallVec;

use crate::affixdata::AffixEntry;
use crate::capitalization::{self, Cap};
use crate::checker::Checker;
use crate::dic::WordInfo;
use crate::flags::Flag;
use crate::wordflags::WordFlags;

/// Position of a part inside a compound word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompoundPos {
    Begin,
    Middle,
    End,
}

/// One way of reading a surface string as a dictionary stem with up to two
/// stripped prefixes and two stripped suffixes.
#[derive(Clone, Debug)]
pub struct WordForm<'a> {
    /// The surface string this form was derived from.
    pub text: String,
    /// The surface with the affixes stripped; the dictionary lookup key.
    pub stem: String,
    pub prefix: Option<&'a AffixEntry>,
    pub suffix: Option<&'a AffixEntry>,
    /// Secondary layers. The affix nearer the stem is `prefix`/`suffix`;
    /// the one nearer the word edge lands here.
    pub prefix2: Option<&'a AffixEntry>,
    pub suffix2: Option<&'a AffixEntry>,
}

impl<'a> WordForm<'a> {
    pub fn base(word: &str) -> Self {
        WordForm {
            text: word.to_string(),
            stem: word.to_string(),
            prefix: None,
            suffix: None,
            prefix2: None,
            suffix2: None,
        }
    }

    fn with_suffix(word: &str, stem: String, suffix: &'a AffixEntry) -> Self {
        WordForm {
            suffix: Some(suffix),
            ..WordForm::base(word)
        }
        .stemmed(stem)
    }

    fn with_prefix(word: &str, stem: String, prefix: &'a AffixEntry) -> Self {
        WordForm {
            prefix: Some(prefix),
            ..WordForm::base(word)
        }
        .stemmed(stem)
    }

    fn stemmed(mut self, stem: String) -> Self {
        self.stem = stem;
        self
    }

    pub fn is_base(&self) -> bool {
        self.prefix.is_none() && self.suffix.is_none()
    }

    /// Is `flag` among the continuation flags of the primary affix layer?
    fn has_affix_flag(&self, flag: Flag) -> bool {
        self.prefix.map_or(false, |p| p.flags.contains(flag))
            || self.suffix.map_or(false, |s| s.flags.contains(flag))
    }

    /// Well-known semantics contributed by the primary affix layer.
    fn affix_bits(&self) -> WordFlags {
        let mut bits = WordFlags::empty();
        if let Some(p) = self.prefix {
            bits |= p.bits;
        }
        if let Some(s) = self.suffix {
            bits |= s.bits;
        }
        bits
    }

    pub fn all_affixes(&self) -> SmallVec<[&'a AffixEntry; 4]> {
        [self.prefix2, self.prefix, self.suffix, self.suffix2]
            .into_iter()
            .flatten()
            .collect()
    }
}

pub(crate) type FormVisitor<'a, 'v> = &'v mut dyn FnMut(WordForm<'a>) -> bool;

type FlagList = SmallVec<[Flag; 2]>;

impl Checker {
    /// All single-word readings of `word` that some dictionary entry
    /// admits. `visit` returns true to stop; so does this function.
    pub(crate) fn word_forms<'a>(
        &'a self,
        word: &str,
        captype: Cap,
        compoundpos: Option<CompoundPos>,
        allow_nosuggest: bool,
        visit: FormVisitor<'a, '_>,
    ) -> bool {
        let mut stopped = false;
        self.try_affix_forms(word, compoundpos, &mut |form| {
            // A stripped or in-compound stem with a forbidden homonym
            // poisons all remaining forms of this word, not just this one.
            if compoundpos.is_some() || !form.is_base() {
                let mut homonyms = self.dic.homonyms(&form.stem);
                if homonyms.any(|w| w.bits.contains(WordFlags::Forbidden)) {
                    return true;
                }
            }
            let mut found = false;
            for w in self.dic.homonyms(&form.stem) {
                if self.compatible_flags(w, &form, compoundpos, captype, allow_nosuggest) {
                    found = true;
                    if visit(form.clone()) {
                        stopped = true;
                        return true;
                    }
                }
            }
            if !found {
                for w in self.dic.homonyms_ignorecase(&form.stem) {
                    // A dictionary word that isn't all-lowercase matches
                    // only its exact case, or an all-caps input.
                    if captype != Cap::All && capitalization::guess(&w.stem) != Cap::No {
                        continue;
                    }
                    if self.compatible_flags(w, &form, compoundpos, captype, allow_nosuggest)
                        && visit(form.clone())
                    {
                        stopped = true;
                        return true;
                    }
                }
            }
            false
        });
        stopped
    }

    /// Does `word` admit `form` under the given capitalization and
    /// compound position?
    fn compatible_flags(
        &self,
        word: &WordInfo,
        form: &WordForm,
        compoundpos: Option<CompoundPos>,
        captype: Cap,
        allow_nosuggest: bool,
    ) -> bool {
        let all_bits = word.bits | form.affix_bits();

        if !allow_nosuggest && word.bits.contains(WordFlags::NoSuggest) {
            return false;
        }

        if word.bits.contains(WordFlags::KeepCase)
            && captype != capitalization::guess(&word.stem)
        {
            return false;
        }

        if self.aff.need_affix.is_some() {
            let affixes = form.all_affixes();
            if word.bits.contains(WordFlags::NeedAffix) && affixes.is_empty() {
                return false;
            }
            // an affix chain made only of need-affix carriers doesn't count
            if !affixes.is_empty()
                && affixes.iter().all(|a| a.bits.contains(WordFlags::NeedAffix))
            {
                return false;
            }
        }

        if let Some(prefix) = form.prefix {
            if !word.flags.contains(prefix.flag) && !form.has_affix_flag(prefix.flag) {
                return false;
            }
        }
        if let Some(suffix) = form.suffix {
            if !word.flags.contains(suffix.flag) && !form.has_affix_flag(suffix.flag) {
                return false;
            }
        }

        match compoundpos {
            None => !all_bits.contains(WordFlags::OnlyInCompound),
            Some(_) if all_bits.contains(WordFlags::CompoundFlag) => true,
            Some(CompoundPos::Begin) => all_bits.contains(WordFlags::CompoundBegin),
            Some(CompoundPos::Middle) => all_bits.contains(WordFlags::CompoundMiddle),
            Some(CompoundPos::End) => all_bits.contains(WordFlags::CompoundEnd),
        }
    }

    /// Enumerate candidate affix strippings of `word`: the word itself,
    /// de-suffixed forms, de-prefixed forms, and cross-product
    /// combinations of both.
    pub(crate) fn try_affix_forms<'a>(
        &'a self,
        word: &str,
        compoundpos: Option<CompoundPos>,
        visit: FormVisitor<'a, '_>,
    ) -> bool {
        if visit(WordForm::base(word)) {
            return true;
        }

        let aff = &self.aff;
        let mut prefix_required = FlagList::new();
        let mut suffix_required = FlagList::new();
        let mut forbidden = FlagList::new();
        let (prefix_allowed, suffix_allowed) = match compoundpos {
            None => (true, true),
            Some(pos) => {
                if pos != CompoundPos::Begin {
                    prefix_required.extend(aff.compound_permit);
                }
                if pos != CompoundPos::End {
                    suffix_required.extend(aff.compound_permit);
                }
                forbidden.extend(aff.compound_forbid);
                (
                    pos == CompoundPos::Begin || aff.compound_permit.is_some(),
                    pos == CompoundPos::End || aff.compound_permit.is_some(),
                )
            }
        };

        if suffix_allowed
            && self.desuffix(word, &suffix_required, &forbidden, false, false, visit)
        {
            return true;
        }

        if prefix_allowed {
            return self.deprefix(word, &prefix_required, &forbidden, false, &mut |form| {
                if visit(form.clone()) {
                    return true;
                }
                match form.prefix {
                    Some(prefix) if suffix_allowed && prefix.cross_product => self
                        .desuffix(
                            &form.stem,
                            &suffix_required,
                            &forbidden,
                            false,
                            true,
                            &mut |mut form2| {
                                form2.prefix = Some(prefix);
                                form2.text = word.to_string();
                                visit(form2)
                            },
                        ),
                    _ => false,
                }
            });
        }
        false
    }

    /// Strip up to two suffixes from the end of `word`. In crossproduct
    /// mode only rules marked for it qualify.
    fn desuffix<'a>(
        &'a self,
        word: &str,
        required: &[Flag],
        forbidden: &[Flag],
        nested: bool,
        crossproduct: bool,
        visit: FormVisitor<'a, '_>,
    ) -> bool {
        let mut stopped = false;
        self.suffix_trie.lookup(word, &mut |id| {
            let entry = &self.aff.suffixes[id as usize];
            if (crossproduct && !entry.cross_product)
                || !required.iter().all(|f| entry.flags.contains(*f))
                || forbidden.iter().any(|f| entry.flags.contains(*f))
            {
                return false;
            }
            let cut = word.len() - entry.add.len();
            if !entry.condition.matches_back(&word[..cut]) {
                return false;
            }
            let mut stem = String::with_capacity(cut + entry.strip.len());
            stem.push_str(&word[..cut]);
            stem.push_str(&entry.strip);

            if visit(WordForm::with_suffix(word, stem.clone(), entry)) {
                stopped = true;
                return true;
            }
            if !nested {
                // the outer rule's flag must be a continuation flag of the
                // inner rule
                let mut required2: SmallVec<[Flag; 4]> = SmallVec::new();
                required2.push(entry.flag);
                required2.extend_from_slice(required);
                let deeper =
                    self.desuffix(&stem, &required2, forbidden, true, crossproduct, &mut |mut form2| {
                        form2.suffix2 = Some(entry);
                        form2.text = word.to_string();
                        visit(form2)
                    });
                if deeper {
                    stopped = true;
                    return true;
                }
            }
            false
        });
        stopped
    }

    /// Mirror image of `desuffix` for the start of the word.
    fn deprefix<'a>(
        &'a self,
        word: &str,
        required: &[Flag],
        forbidden: &[Flag],
        nested: bool,
        visit: FormVisitor<'a, '_>,
    ) -> bool {
        let mut stopped = false;
        self.prefix_trie.lookup(word, &mut |id| {
            let entry = &self.aff.prefixes[id as usize];
            if !required.iter().all(|f| entry.flags.contains(*f))
                || forbidden.iter().any(|f| entry.flags.contains(*f))
            {
                return false;
            }
            let rest = &word[entry.add.len()..];
            if !entry.condition.matches_front(rest) {
                return false;
            }
            let mut stem = String::with_capacity(entry.strip.len() + rest.len());
            stem.push_str(&entry.strip);
            stem.push_str(rest);

            if visit(WordForm::with_prefix(word, stem.clone(), entry)) {
                stopped = true;
                return true;
            }
            if !nested {
                let mut required2: SmallVec<[Flag; 4]> = SmallVec::new();
                required2.push(entry.flag);
                required2.extend_from_slice(required);
                let deeper = self.deprefix(&stem, &required2, forbidden, true, &mut |mut form2| {
                    form2.prefix2 = Some(entry);
                    form2.text = word.to_string();
                    visit(form2)
                });
                if deeper {
                    stopped = true;
                    return true;
                }
            }
            false
        });
        stopped
    }
}
