/// Surface-string rewriting tables from the .aff file: REP pairs,
/// ICONV input conversion, and BREAK patterns. REP and BREAK share the
/// hunspell convention that a leading `^` or trailing `$` anchors the
/// pattern to the start or end of the word.
use itertools::Itertools;
use std::cmp::Reverse;

/// Where a pattern is allowed to sit in the word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Anchor {
    Anywhere,
    AtStart,
    AtEnd,
    Whole,
}

/// Strip `^`/`$` markers off a pattern. None if nothing matchable is left.
fn anchored(pattern: &str) -> Option<(Anchor, &str)> {
    let (pattern, at_start) = match pattern.strip_prefix('^') {
        Some(rest) => (rest, true),
        None => (pattern, false),
    };
    let (pattern, at_end) = match pattern.strip_suffix('$') {
        Some(rest) => (rest, true),
        None => (pattern, false),
    };
    if pattern.is_empty() {
        return None;
    }
    let anchor = match (at_start, at_end) {
        (false, false) => Anchor::Anywhere,
        (true, false) => Anchor::AtStart,
        (false, true) => Anchor::AtEnd,
        (true, true) => Anchor::Whole,
    };
    Some((anchor, pattern))
}

/// Byte offsets at which `pattern` occurs in `text`, honoring the anchor.
fn pattern_sites(anchor: Anchor, pattern: &str, text: &str) -> Vec<usize> {
    match anchor {
        Anchor::Anywhere => text.match_indices(pattern).map(|(i, _)| i).collect(),
        Anchor::AtStart if text.starts_with(pattern) => vec![0],
        Anchor::AtEnd if text.ends_with(pattern) => vec![text.len() - pattern.len()],
        Anchor::Whole if text == pattern => vec![0],
        _ => Vec::new(),
    }
}

/// The REP table. CHECKCOMPOUNDREP asks whether rewriting a compound seam
/// with one of these pairs lands on a real word.
#[derive(Clone, Debug, Default)]
pub struct RepTable {
    pairs: Vec<(Anchor, String, String)>,
}

impl RepTable {
    pub fn push(&mut self, from: &str, to: &str) {
        // a pair with an empty pattern can never fire
        if let Some((anchor, from)) = anchored(from) {
            self.pairs.push((anchor, from.to_string(), to.to_string()));
        }
    }

    /// Visit the result of applying one pair at one site of `word`, for
    /// every pair and every site. Returns true as soon as `visit` does.
    pub fn rewrites(&self, word: &str, visit: &mut dyn FnMut(&str) -> bool) -> bool {
        let mut cand = String::with_capacity(word.len());
        for (anchor, from, to) in self.pairs.iter() {
            for site in pattern_sites(*anchor, from, word) {
                cand.clear();
                cand.push_str(&word[..site]);
                cand.push_str(to);
                cand.push_str(&word[site + from.len()..]);
                if visit(&cand) {
                    return true;
                }
            }
        }
        false
    }
}

/// The ICONV table: ordered pairs applied as plain string replacement,
/// longest output first.
#[derive(Clone, Debug, Default)]
pub struct ConvTable {
    pairs: Vec<(String, String)>,
}

impl ConvTable {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let pairs = pairs
            .iter()
            .cloned()
            .sorted_by_key(|(_, out)| Reverse(out.len()))
            .collect();
        ConvTable { pairs }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn apply(&self, word: &str) -> String {
        let mut word = word.to_string();
        for (from, to) in self.pairs.iter() {
            if !from.is_empty() {
                word = word.replace(from, to);
            }
        }
        word
    }
}

/// One BREAK pattern, marking seams where the word may split.
#[derive(Clone, Debug)]
pub struct BreakPattern {
    anchor: Anchor,
    pattern: String,
}

impl BreakPattern {
    pub fn new(pattern: &str) -> Self {
        match anchored(pattern) {
            Some((anchor, pattern)) => BreakPattern {
                anchor,
                pattern: pattern.to_string(),
            },
            // nothing left to match; the pattern stays inert
            None => BreakPattern {
                anchor: Anchor::Whole,
                pattern: String::new(),
            },
        }
    }

    /// Byte ranges of `text` where this pattern allows a split.
    pub fn occurrences(&self, text: &str) -> Vec<(usize, usize)> {
        if self.pattern.is_empty() {
            return Vec::new();
        }
        pattern_sites(self.anchor, &self.pattern, text)
            .into_iter()
            .map(|site| (site, site + self.pattern.len()))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rep_rewrites() {
        let mut table = RepTable::default();
        table.push("f", "ph");
        table.push("shun$", "tion");

        let mut seen = Vec::new();
        table.rewrites("fashun", &mut |cand| {
            seen.push(cand.to_string());
            false
        });
        assert_eq!(vec!["phashun", "fation"], seen);

        // early stop
        let mut count = 0;
        table.rewrites("fifi", &mut |_| {
            count += 1;
            true
        });
        assert_eq!(1, count);
    }

    #[test]
    fn test_rep_anchors() {
        let mut table = RepTable::default();
        table.push("^a", "A");
        let mut seen = Vec::new();
        table.rewrites("ada", &mut |cand| {
            seen.push(cand.to_string());
            false
        });
        // only the word-initial site qualifies
        assert_eq!(vec!["Ada"], seen);
    }

    #[test]
    fn test_conv_longest_output_first() {
        let table = ConvTable::from_pairs(&[
            ("a".to_string(), "b".to_string()),
            ("x".to_string(), "yyy".to_string()),
        ]);
        // the x->yyy pair runs first, so its output survives the a->b pass
        assert_eq!("byyyb", table.apply("axa"));
    }

    #[test]
    fn test_break_occurrences() {
        let dash = BreakPattern::new("-");
        assert_eq!(vec![(3, 4), (4, 5)], dash.occurrences("foo--bar"));
        assert_eq!(vec![(0, 1)], dash.occurrences("-foo"));

        let lead = BreakPattern::new("^-");
        assert_eq!(vec![(0, 1)], lead.occurrences("-foo"));
        assert!(lead.occurrences("foo-").is_empty());

        let tail = BreakPattern::new("-$");
        assert_eq!(vec![(3, 4)], tail.occurrences("foo-"));
        assert!(tail.occurrences("-foo").is_empty());
    }
}
