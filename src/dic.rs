use anyhow::Result;
use caseless::default_case_fold_str;
use fnv::FnvHashMap;
use smallvec::SmallVec;

use crate::affixdata::AffixData;
use crate::flags::FlagSet;
use crate::wordflags::WordFlags;

/// One dictionary entry: a stem with its raw flags and the precomputed
/// well-known semantics of those flags.
#[derive(Clone, Debug)]
pub struct WordInfo {
    pub stem: String,
    pub flags: FlagSet,
    pub bits: WordFlags,
}

/// The word list from a .dic file. Entries are looked up by exact stem,
/// or through a case-folded index for `ignorecase` queries.
#[derive(Debug, Default)]
pub struct Dictionary {
    words: FnvHashMap<String, SmallVec<[WordInfo; 1]>>,
    folded: FnvHashMap<String, Vec<String>>,
}

impl Dictionary {
    /// Parse hunspell .dic text. The customary first line holding the
    /// approximate word count is skipped; so are blank lines. Everything
    /// after the first whitespace of an entry (morphological fields) is
    /// ignored.
    pub fn parse(text: &str, aff: &AffixData) -> Result<Self> {
        let mut dict = Dictionary::default();
        let mut first = true;
        for line in text.lines() {
            let line = line.trim_start_matches('\u{FEFF}');
            let entry = match line.split_whitespace().next() {
                Some(entry) => entry,
                None => continue,
            };
            if first {
                first = false;
                if entry.chars().all(|c| c.is_ascii_digit()) {
                    continue;
                }
            }
            let (stem, flags) = match entry.split_once('/') {
                Some((stem, flagstr)) => {
                    (stem, FlagSet::new(aff.parse_flags(flagstr)?))
                }
                None => (entry, FlagSet::empty()),
            };
            dict.insert(stem, flags, aff);
        }
        Ok(dict)
    }

    pub fn insert(&mut self, stem: &str, flags: FlagSet, aff: &AffixData) {
        let bits = aff.word_flags(&flags);
        let info = WordInfo {
            stem: stem.to_string(),
            flags,
            bits,
        };
        self.words.entry(stem.to_string()).or_default().push(info);

        let keys = self.folded.entry(default_case_fold_str(stem)).or_default();
        if !keys.iter().any(|k| k == stem) {
            keys.push(stem.to_string());
        }
    }

    /// All entries whose stem is exactly `stem`.
    pub fn homonyms<'a>(&'a self, stem: &str) -> impl Iterator<Item = &'a WordInfo> {
        self.words.get(stem).into_iter().flatten()
    }

    /// All entries whose stem equals `stem` under a locale-neutral case
    /// fold, in any spelling.
    pub fn homonyms_ignorecase<'a>(
        &'a self,
        stem: &str,
    ) -> impl Iterator<Item = &'a WordInfo> {
        self.folded
            .get(&default_case_fold_str(stem))
            .into_iter()
            .flatten()
            .flat_map(move |key| self.homonyms(key))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::flags::Flag;

    fn dict(text: &str) -> Dictionary {
        Dictionary::parse(text, &AffixData::new()).unwrap()
    }

    #[test]
    fn test_parse() {
        let d = dict("4\nhello\nworld/AB\nworld/C\nBerlin\n");
        assert!(d.homonyms("4").next().is_none());
        assert_eq!(1, d.homonyms("hello").count());
        let world: Vec<&WordInfo> = d.homonyms("world").collect();
        assert_eq!(2, world.len());
        assert!(world[0].flags.contains('A' as Flag));
        assert!(world[1].flags.contains('C' as Flag));
        assert!(d.homonyms("berlin").next().is_none());
    }

    #[test]
    fn test_ignorecase() {
        let d = dict("2\nBerlin\nworld\n");
        assert_eq!(1, d.homonyms_ignorecase("BERLIN").count());
        assert_eq!(1, d.homonyms_ignorecase("berlin").count());
        assert_eq!(1, d.homonyms_ignorecase("WoRlD").count());
        assert!(d.homonyms_ignorecase("earth").next().is_none());
    }

    #[test]
    fn test_morph_fields_ignored() {
        let d = dict("1\nwalk/A po:verb\n");
        assert_eq!(1, d.homonyms("walk").count());
        assert!(d.homonyms("walk").next().unwrap().flags.contains('A' as Flag));
    }
}
