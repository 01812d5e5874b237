use crate::affixdata::CompoundPattern;
use crate::capitalization::Cap;
use crate::checker::Checker;
use crate::compoundrule::CompoundRule;
use crate::dic::WordInfo;
use crate::flags::FlagSet;
use crate::forms::{CompoundPos, WordForm};
use crate::wordflags::WordFlags;

pub(crate) type PartsVisitor<'a, 'v> = &'v mut dyn FnMut(&[WordForm<'a>]) -> bool;

impl Checker {
    /// All readings of `word` as a compound of two or more dictionary
    /// words, by compound flags and by compound rules, with the seam
    /// filters applied.
    pub(crate) fn compound_parts<'a>(
        &'a self,
        word: &str,
        allow_nosuggest: bool,
        visit: PartsVisitor<'a, '_>,
    ) -> bool {
        if self.aff.compound_begin.is_some() || self.aff.compound_flag.is_some() {
            let mut parts = Vec::new();
            if self.compound_by_flags(word, &mut parts, allow_nosuggest, &mut |c| {
                !self.is_bad_compound(c) && visit(c)
            }) {
                return true;
            }
        }
        if !self.compound_rules.is_empty() {
            let mut forms = Vec::new();
            let mut words = Vec::new();
            let rules: Vec<&CompoundRule> = self.compound_rules.iter().collect();
            if self.compound_by_rules(word, &mut forms, &mut words, &rules, &mut |c| {
                !self.is_bad_compound(c) && visit(c)
            }) {
                return true;
            }
        }
        false
    }

    /// Segment `rest` into parts whose dictionary entries carry the
    /// compound flags appropriate for their position. `parts` accumulates
    /// the segmentation so far.
    fn compound_by_flags<'a>(
        &'a self,
        rest: &str,
        parts: &mut Vec<WordForm<'a>>,
        allow_nosuggest: bool,
        visit: PartsVisitor<'a, '_>,
    ) -> bool {
        // mid-segmentation, the whole remainder can be the final part
        if !parts.is_empty() {
            let mut stopped = false;
            self.word_forms(
                rest,
                Cap::No,
                Some(CompoundPos::End),
                allow_nosuggest,
                &mut |form| {
                    parts.push(form);
                    let hit = visit(parts);
                    parts.pop();
                    if hit {
                        stopped = true;
                    }
                    hit
                },
            );
            if stopped {
                return true;
            }
        }

        let min = self.aff.compound_min as usize;
        let len = rest.chars().count();
        if len < min * 2
            || self
                .aff
                .compound_words_max
                .map_or(false, |max| parts.len() >= max as usize)
        {
            return false;
        }

        let pos = if parts.is_empty() {
            CompoundPos::Begin
        } else {
            CompoundPos::Middle
        };
        for (n, (cut, _)) in rest.char_indices().enumerate() {
            if n < min {
                continue;
            }
            if n > len - min {
                break;
            }
            let (head, tail) = rest.split_at(cut);
            let mut stopped = false;
            self.word_forms(head, Cap::No, Some(pos), allow_nosuggest, &mut |form| {
                parts.push(form);
                let hit = self.compound_by_flags(tail, parts, allow_nosuggest, visit);
                parts.pop();
                if hit {
                    stopped = true;
                }
                hit
            });
            if stopped {
                return true;
            }
        }
        false
    }

    /// Segment `rest` into dictionary stems whose flag sequence satisfies
    /// a COMPOUNDRULE. Only rules that partially match the parts so far
    /// are carried into the recursion.
    fn compound_by_rules<'a>(
        &'a self,
        rest: &str,
        forms: &mut Vec<WordForm<'a>>,
        words: &mut Vec<&'a WordInfo>,
        rules: &[&CompoundRule],
        visit: PartsVisitor<'a, '_>,
    ) -> bool {
        if !forms.is_empty() {
            for homonym in self.dic.homonyms(rest) {
                words.push(homonym);
                let sets: Vec<&FlagSet> = words.iter().map(|w| &w.flags).collect();
                let full = rules.iter().any(|r| r.full_match(&sets));
                words.pop();
                if full {
                    forms.push(WordForm::base(rest));
                    let hit = visit(forms);
                    forms.pop();
                    if hit {
                        return true;
                    }
                }
            }
        }

        let min = self.aff.compound_min as usize;
        let len = rest.chars().count();
        if len < min * 2
            || self
                .aff
                .compound_words_max
                .map_or(false, |max| forms.len() >= max as usize)
        {
            return false;
        }

        for (n, (cut, _)) in rest.char_indices().enumerate() {
            if n < min {
                continue;
            }
            if n > len - min {
                break;
            }
            let (head, tail) = rest.split_at(cut);
            for homonym in self.dic.homonyms(head) {
                words.push(homonym);
                let sets: Vec<&FlagSet> = words.iter().map(|w| &w.flags).collect();
                let narrowed: Vec<&CompoundRule> = rules
                    .iter()
                    .copied()
                    .filter(|r| r.partial_match(&sets))
                    .collect();
                let mut hit = false;
                if !narrowed.is_empty() {
                    forms.push(WordForm::base(head));
                    hit = self.compound_by_rules(tail, forms, words, &narrowed, visit);
                    forms.pop();
                }
                words.pop();
                if hit {
                    return true;
                }
            }
        }
        false
    }

    /// The seam filters of compound validation. True rejects the compound.
    fn is_bad_compound(&self, compound: &[WordForm]) -> bool {
        let aff = &self.aff;
        for (i, left) in compound.iter().enumerate() {
            if i + 1 == compound.len() {
                break;
            }

            // compound-forbid prohibits words at the beginning and middle;
            // the last part is not checked
            if aff.compound_forbid.is_some()
                && self
                    .dic
                    .homonyms(&left.text)
                    .any(|w| w.bits.contains(WordFlags::CompoundForbid))
            {
                return true;
            }

            for right in compound[i + 1..].iter() {
                if aff.check_compound_rep {
                    let mut joined = left.text.clone();
                    joined.push_str(&right.text);
                    let mut rewrite_hit = false;
                    self.rep_table.rewrites(&joined, &mut |cand| {
                        if self.has_word_forms(cand) {
                            rewrite_hit = true;
                        }
                        rewrite_hit
                    });
                    if rewrite_hit {
                        return true;
                    }
                }
                if aff.check_compound_triple && seam_triple(&left.text, &right.text) {
                    return true;
                }
                if aff.check_compound_case && seam_case(&left.text, &right.text) {
                    return true;
                }
                if aff
                    .compound_patterns
                    .iter()
                    .any(|p| pattern_match(p, left, right))
                {
                    return true;
                }
            }
        }
        false
    }

    fn has_word_forms(&self, word: &str) -> bool {
        self.word_forms(word, Cap::No, None, true, &mut |_| true)
    }
}

fn all_same(mut chars: impl Iterator<Item = char>) -> bool {
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => false,
    }
}

/// A run of one letter spanning the seam, like the `ooo` in `foo|obar`.
fn seam_triple(left: &str, right: &str) -> bool {
    all_same(left.chars().rev().take(2).chain(right.chars().take(1)))
        || all_same(left.chars().rev().take(1).chain(right.chars().take(2)))
}

/// An uppercase letter touching the seam, unless hyphenated.
fn seam_case(left: &str, right: &str) -> bool {
    match (left.chars().last(), right.chars().next()) {
        (Some(l), Some(r)) => {
            (l.is_uppercase() || r.is_uppercase()) && l != '-' && r != '-'
        }
        _ => false,
    }
}

fn pattern_match(pattern: &CompoundPattern, left: &WordForm, right: &WordForm) -> bool {
    // left_flag/right_flag are not consulted
    left.stem.ends_with(&pattern.left_stem) && right.stem.starts_with(&pattern.right_stem)
}
