use anyhow::{bail, Result};
use smallvec::SmallVec;

/// A single flag value. Multi-character and numeric flag modes are packed
/// into one integer so that flag comparisons stay cheap.
pub type Flag = u32;

pub type FlagVec = SmallVec<[Flag; 4]>;

/// Represents the format of the flags after words in the dictionary file
/// and in affix continuation classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagMode {
    /// Single-character flags
    CharFlags,
    /// Two-character flags
    DoubleCharFlags,
    /// Flags are comma-separated ASCII integers
    NumericFlags,
    /// Flags are Unicode codepoints in UTF-8 format
    Utf8Flags,
}

impl FlagMode {
    pub fn parse_flags(self, s: &str) -> Result<FlagVec> {
        let mut v = FlagVec::new();
        match self {
            FlagMode::CharFlags | FlagMode::Utf8Flags => {
                for c in s.chars() {
                    v.push(c as Flag);
                }
            }
            FlagMode::DoubleCharFlags => {
                let mut iter = s.chars();
                while let Some(c1) = iter.next() {
                    let c2 = match iter.next() {
                        Some(c2) => c2,
                        None => bail!("Odd number of characters in long flags {}", s),
                    };
                    if c2 as u32 > 0xffff {
                        bail!("Unsupported character in long flags {}", s);
                    }
                    v.push(((c1 as Flag) << 16) | c2 as Flag);
                }
            }
            FlagMode::NumericFlags => {
                for num in s.split(',') {
                    match num.trim().parse::<Flag>() {
                        Ok(f) => v.push(f),
                        Err(_) => bail!("Could not parse numeric flags {}", s),
                    }
                }
            }
        }
        Ok(v)
    }
}

/// A sorted set of flags, as attached to a dictionary word or carried by
/// an affix entry as continuation classes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlagSet(FlagVec);

impl FlagSet {
    pub fn new(mut flags: FlagVec) -> Self {
        flags.sort_unstable();
        flags.dedup();
        FlagSet(flags)
    }

    pub fn empty() -> Self {
        FlagSet(FlagVec::new())
    }

    pub fn contains(&self, flag: Flag) -> bool {
        self.0.binary_search(&flag).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        self.0.iter().copied()
    }
}
