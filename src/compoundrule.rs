use anyhow::{bail, Result};

use crate::flags::{Flag, FlagMode, FlagSet};

/// A COMPOUNDRULE pattern over flags, with `*` and `?` quantifiers. Long
/// and numeric flags are parenthesized, as in `(1001)(1002)*(1003)`.
///
/// A rule is matched against the flag sets of a candidate's parts: each
/// part may stand in for any of its flags that the rule mentions, and the
/// rule holds if some choice of flags spells a word of the rule's
/// language. Rather than enumerating those choices, matching drives the
/// rule as an automaton and keeps the set of positions still alive after
/// each part.
#[derive(Clone, Debug)]
pub struct CompoundRule {
    atoms: Vec<RuleAtom>,
}

#[derive(Clone, Debug)]
struct RuleAtom {
    flag: Flag,
    quant: Quant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Quant {
    One,
    ZeroOrOne,
    ZeroOrMore,
}

fn group_flag(s: &str, mode: FlagMode) -> Result<Flag> {
    let flags = mode.parse_flags(s)?;
    match flags.as_slice() {
        [flag] => Ok(*flag),
        _ => bail!("COMPOUNDRULE: {} is not a single flag", s),
    }
}

impl CompoundRule {
    pub fn parse(s: &str, mode: FlagMode) -> Result<Self> {
        let mut atoms = Vec::new();
        let mut chars = s.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let flag = match c {
                '(' => {
                    let open = i + 1;
                    let close = loop {
                        match chars.next() {
                            Some((j, ')')) => break j,
                            Some(_) => (),
                            None => bail!("COMPOUNDRULE {}: unclosed group", s),
                        }
                    };
                    group_flag(&s[open..close], mode)?
                }
                '*' | '?' | ')' => bail!("COMPOUNDRULE {}: misplaced {}", s, c),
                _ => group_flag(&s[i..i + c.len_utf8()], mode)?,
            };
            let quant = match chars.peek() {
                Some((_, '*')) => Quant::ZeroOrMore,
                Some((_, '?')) => Quant::ZeroOrOne,
                _ => Quant::One,
            };
            if quant != Quant::One {
                chars.next();
            }
            atoms.push(RuleAtom { flag, quant });
        }
        Ok(CompoundRule { atoms })
    }

    /// Mark `from` alive, along with every later position reachable by
    /// skipping quantified atoms. Index `atoms.len()` is the accepting
    /// position.
    fn wake(&self, from: usize, alive: &mut [bool]) {
        for (i, atom) in self.atoms.iter().enumerate().skip(from) {
            alive[i] = true;
            if atom.quant == Quant::One {
                return;
            }
        }
        alive[self.atoms.len()] = true;
    }

    /// Advance the automaton over the parts' flag sets. None means no
    /// position survived some part.
    fn run(&self, sets: &[&FlagSet]) -> Option<Vec<bool>> {
        let mut alive = vec![false; self.atoms.len() + 1];
        self.wake(0, &mut alive);
        for set in sets {
            let mut next = vec![false; alive.len()];
            let mut moved = false;
            for (i, atom) in self.atoms.iter().enumerate() {
                if alive[i] && set.contains(atom.flag) {
                    // a starred atom may consume the next part again
                    let target = if atom.quant == Quant::ZeroOrMore { i } else { i + 1 };
                    self.wake(target, &mut next);
                    moved = true;
                }
            }
            if !moved {
                return None;
            }
            alive = next;
        }
        Some(alive)
    }

    /// Do the parts' flag sets spell a complete match of this rule?
    pub fn full_match(&self, sets: &[&FlagSet]) -> bool {
        self.run(sets)
            .map_or(false, |alive| alive[self.atoms.len()])
    }

    /// Could the parts seen so far be extended into a complete match?
    pub fn partial_match(&self, sets: &[&FlagSet]) -> bool {
        self.run(sets).is_some()
    }
}
