use hunlex::{Checker, Parse};

fn checker(aff: &str, dic: &str) -> Checker {
    Checker::from_strs(aff, dic).unwrap()
}

#[test]
fn bare_match() {
    let ch = checker("", "1\nhello\n");
    assert!(ch.lookup("hello"));
    assert!(!ch.lookup("hell"));
    assert!(!ch.lookup("helloo"));
    assert!(!ch.lookup(""));
    // repeated calls are deterministic
    assert!(ch.lookup("hello"));
    assert!(!ch.lookup("hell"));
}

#[test]
fn simple_suffix() {
    let ch = checker("SFX A Y 1\nSFX A 0 s .\n", "1\ncat/A\n");
    assert!(ch.lookup("cat"));
    assert!(ch.lookup("cats"));
    assert!(!ch.lookup("dogs"));
    assert!(!ch.lookup("catss"));
}

#[test]
fn suffix_with_strip_and_condition() {
    let ch = checker(
        "SFX A Y 3\n\
         SFX A y ies [^aeiou]y\n\
         SFX A 0 s [aeiou]y\n\
         SFX A 0 s [^y]\n",
        "2\nfly/A\nstay/A\n",
    );
    assert!(ch.lookup("fly"));
    assert!(ch.lookup("flies"));
    // the condition blocks vowel-y stems from the ies rule
    assert!(ch.lookup("stays"));
    assert!(!ch.lookup("staies"));
    assert!(!ch.lookup("flys"));
}

#[test]
fn prefix() {
    let ch = checker("PFX B Y 1\nPFX B 0 un .\n", "1\nlock/B\n");
    assert!(ch.lookup("lock"));
    assert!(ch.lookup("unlock"));
    assert!(!ch.lookup("relock"));
    assert!(!ch.lookup("unlocked"));
}

#[test]
fn cross_product_two_level() {
    let ch = checker(
        "PFX B Y 1\n\
         PFX B 0 un .\n\
         SFX A Y 1\n\
         SFX A 0 ed .\n",
        "1\nlock/AB\n",
    );
    assert!(ch.lookup("lock"));
    assert!(ch.lookup("locked"));
    assert!(ch.lookup("unlock"));
    assert!(ch.lookup("unlocked"));
    assert!(!ch.lookup("unedlock"));
}

#[test]
fn cross_product_gate() {
    // the suffix is not marked for cross product, so prefix+suffix
    // together must not be accepted
    let ch = checker(
        "PFX B Y 1\n\
         PFX B 0 un .\n\
         SFX A N 1\n\
         SFX A 0 ed .\n",
        "1\nlock/AB\n",
    );
    assert!(ch.lookup("locked"));
    assert!(ch.lookup("unlock"));
    assert!(!ch.lookup("unlocked"));
}

#[test]
fn nested_suffixes() {
    // the outer rule's flag rides as a continuation class on the inner rule
    let ch = checker(
        "SFX A Y 1\n\
         SFX A 0 er/B .\n\
         SFX B Y 1\n\
         SFX B 0 s .\n",
        "1\nwalk/A\n",
    );
    assert!(ch.lookup("walk"));
    assert!(ch.lookup("walker"));
    assert!(ch.lookup("walkers"));
    // B applies only on top of A, not to the bare stem
    assert!(!ch.lookup("walks"));
}

#[test]
fn nested_prefixes() {
    let ch = checker(
        "PFX R Y 1\n\
         PFX R 0 re .\n\
         PFX O Y 1\n\
         PFX O 0 out/R .\n",
        "1\nplay/O\n",
    );
    assert!(ch.lookup("outplay"));
    assert!(ch.lookup("reoutplay"));
    assert!(!ch.lookup("replay"));
}

#[test]
fn affix_reversibility() {
    let ch = checker("SFX A Y 1\nSFX A y ies [^aeiou]y\n", "1\nfly/A\n");
    let mut forms = Vec::new();
    ch.analyze("flies", true, true, |parse| {
        if let Parse::Word(form) = parse {
            forms.push(form);
        }
        false
    });
    assert_eq!(1, forms.len());
    let form = &forms[0];
    assert_eq!("flies", form.text);
    assert_eq!("fly", form.stem);
    let suffix = form.suffix.unwrap();
    // stem minus strip plus add reproduces the surface
    let mut rebuilt = form.stem.clone();
    rebuilt.truncate(rebuilt.len() - suffix.strip.len());
    rebuilt.push_str(&suffix.add);
    assert_eq!(form.text, rebuilt);
}

#[test]
fn compound_by_flag() {
    let ch = checker("COMPOUNDFLAG Z\nCOMPOUNDMIN 3\n", "2\nfoo/Z\nbar/Z\n");
    assert!(ch.lookup("foobar"));
    assert!(ch.lookup("barfoo"));
    assert!(ch.lookup("foobarfoo"));
    assert!(ch.lookup("foo"));
    assert!(!ch.lookup("fobar"));
    assert!(!ch.lookup("foobarf"));
}

#[test]
fn compound_completeness() {
    let ch = checker("COMPOUNDFLAG Z\nCOMPOUNDMIN 3\n", "2\nfoo/Z\nbar/Z\n");
    let mut compounds = Vec::new();
    ch.analyze("foobarfoo", true, true, |parse| {
        if let Parse::Compound(parts) = parse {
            compounds.push(parts);
        }
        false
    });
    assert!(!compounds.is_empty());
    for parts in compounds.iter() {
        assert!(parts.len() >= 2);
        let joined: String = parts.iter().map(|p| p.text.as_str()).collect();
        assert_eq!("foobarfoo", joined);
    }
}

#[test]
fn compound_positions() {
    let ch = checker(
        "COMPOUNDBEGIN B\nCOMPOUNDMIDDLE M\nCOMPOUNDLAST L\n",
        "3\none/B\ntwo/M\nsix/L\n",
    );
    assert!(ch.lookup("onesix"));
    assert!(ch.lookup("onetwosix"));
    assert!(ch.lookup("onetwotwosix"));
    assert!(!ch.lookup("onetwo"));
    assert!(!ch.lookup("twosix"));
    assert!(!ch.lookup("sixone"));
}

#[test]
fn compound_min_length() {
    let ch = checker("COMPOUNDFLAG Z\nCOMPOUNDMIN 4\n", "2\nfoos/Z\nbars/Z\n");
    assert!(ch.lookup("foosbars"));
    let ch = checker("COMPOUNDFLAG Z\nCOMPOUNDMIN 5\n", "2\nfoos/Z\nbars/Z\n");
    assert!(!ch.lookup("foosbars"));
}

#[test]
fn compound_words_max() {
    let ch = checker(
        "COMPOUNDFLAG Z\nCOMPOUNDWORDSMAX 1\n",
        "3\nfoo/Z\nbar/Z\nbaz/Z\n",
    );
    assert!(ch.lookup("foobar"));
    assert!(!ch.lookup("foobarbaz"));
}

#[test]
fn compound_affixes_need_permit_flag() {
    let aff_permit = "COMPOUNDFLAG Z\n\
                      COMPOUNDPERMITFLAG P\n\
                      SFX A Y 1\n\
                      SFX A 0 s/P .\n";
    let aff_no_permit = "COMPOUNDFLAG Z\n\
                         SFX A Y 1\n\
                         SFX A 0 s .\n";
    let dic = "2\nfoo/ZA\nbar/Z\n";

    let ch = checker(aff_permit, dic);
    // suffixed begin part, carrying the permit flag
    assert!(ch.lookup("foosbar"));
    // a suffix at the very end needs no permit flag
    assert!(ch.lookup("barfoos"));

    let ch = checker(aff_no_permit, dic);
    assert!(!ch.lookup("foosbar"));
    assert!(ch.lookup("barfoos"));
}

#[test]
fn compound_forbid_flag_on_affix() {
    let aff = "COMPOUNDFLAG Z\n\
               COMPOUNDFORBIDFLAG F\n\
               SFX C Y 1\n\
               SFX C 0 er/F .\n";
    let dic = "2\nfoo/ZC\nbar/Z\n";

    let ch = checker(aff, dic);
    assert!(ch.lookup("fooer"));
    assert!(!ch.lookup("barfooer"));

    let without = "COMPOUNDFLAG Z\n\
                   SFX C Y 1\n\
                   SFX C 0 er .\n";
    let ch = checker(without, dic);
    assert!(ch.lookup("barfooer"));
}

#[test]
fn compound_rule() {
    let ch = checker(
        "COMPOUNDMIN 1\nCOMPOUNDRULE 1\nCOMPOUNDRULE A*B\n",
        "3\nx/A\ny/A\nz/B\n",
    );
    assert!(ch.lookup("xyz"));
    assert!(ch.lookup("xz"));
    assert!(ch.lookup("xxxxz"));
    assert!(ch.lookup("z"));
    assert!(!ch.lookup("zxy"));
    assert!(!ch.lookup("xy"));
    assert!(!ch.lookup("xzz"));
}

#[test]
fn compound_triple() {
    let aff = "COMPOUNDFLAG Z\nCHECKCOMPOUNDTRIPLE\n";
    let dic = "4\nfoo/Z\nobar/Z\nbar/Z\noos/Z\nster/Z\n";
    let ch = checker(aff, dic);
    // ooo spans the seam
    assert!(!ch.lookup("fooobar"));
    assert!(ch.lookup("foobar"));
    assert!(!ch.lookup("ooster"));

    let ch = checker("COMPOUNDFLAG Z\n", dic);
    assert!(ch.lookup("fooobar"));
}

#[test]
fn compound_case() {
    let aff = "COMPOUNDFLAG Z\nCHECKCOMPOUNDCASE\n";
    let dic = "3\nfoo/Z\nBar/Z\nbar/Z\n";
    let ch = checker(aff, dic);
    assert!(!ch.lookup("fooBar"));
    assert!(ch.lookup("foobar"));

    let ch = checker("COMPOUNDFLAG Z\n", dic);
    assert!(ch.lookup("fooBar"));
}

#[test]
fn compound_rep() {
    let aff = "COMPOUNDFLAG Z\n\
               COMPOUNDMIN 2\n\
               CHECKCOMPOUNDREP\n\
               REP 1\n\
               REP w v\n";
    let dic = "3\naw/Z\nax/Z\navax\n";
    let ch = checker(aff, dic);
    // rewriting the seam produces the real word "avax"
    assert!(!ch.lookup("awax"));
    assert!(ch.lookup("awaw"));

    let without = "COMPOUNDFLAG Z\nCOMPOUNDMIN 2\nREP 1\nREP w v\n";
    let ch = checker(without, dic);
    assert!(ch.lookup("awax"));
}

#[test]
fn compound_pattern() {
    let aff = "COMPOUNDFLAG Z\n\
               CHECKCOMPOUNDPATTERN 1\n\
               CHECKCOMPOUNDPATTERN o s\n";
    let dic = "3\nfoo/Z\nsun/Z\nbar/Z\n";
    let ch = checker(aff, dic);
    assert!(!ch.lookup("foosun"));
    assert!(ch.lookup("foobar"));
    assert!(ch.lookup("barsun"));
}

#[test]
fn only_in_compound() {
    let ch = checker(
        "COMPOUNDFLAG Z\nONLYINCOMPOUND c\n",
        "2\nfoo/Zc\nbar/Z\n",
    );
    assert!(!ch.lookup("foo"));
    assert!(ch.lookup("bar"));
    assert!(ch.lookup("foobar"));
    assert!(ch.lookup("barfoo"));
}

#[test]
fn forbidden_word() {
    let ch = checker("FORBIDDENWORD !\n", "1\nbad/!\n");
    assert!(!ch.lookup("bad"));

    // a non-forbidden homonym wins
    let ch = checker("FORBIDDENWORD !\n", "2\nbad/!\nbad\n");
    assert!(ch.lookup("bad"));
}

#[test]
fn forbidden_word_blocks_affixed_form() {
    let ch = checker(
        "FORBIDDENWORD !\nSFX A Y 1\nSFX A 0 s .\n",
        "2\nbads/!\nbad/A\n",
    );
    assert!(ch.lookup("bad"));
    // bad+s would be derivable, but the explicit entry forbids it
    assert!(!ch.lookup("bads"));
}

#[test]
fn nosuggest() {
    let ch = checker("NOSUGGEST N\n", "1\ndamn/N\n");
    assert!(ch.lookup("damn"));
    assert!(ch.lookup_with("damn", true, true));
    assert!(!ch.lookup_with("damn", true, false));
}

#[test]
fn keep_case() {
    let ch = checker("KEEPCASE k\n", "2\nfoo/k\nBar/k\n");
    assert!(ch.lookup("foo"));
    assert!(!ch.lookup("Foo"));
    assert!(!ch.lookup("FOO"));
    assert!(ch.lookup("Bar"));
    assert!(!ch.lookup("bar"));
}

#[test]
fn need_affix() {
    let ch = checker(
        "NEEDAFFIX n\nSFX A Y 1\nSFX A 0 s .\n",
        "1\nwalk/An\n",
    );
    assert!(!ch.lookup("walk"));
    assert!(ch.lookup("walks"));
}

#[test]
fn capitalization_variants() {
    let ch = checker("", "1\nparis\n");
    assert!(ch.lookup("paris"));
    assert!(ch.lookup("Paris"));
    assert!(ch.lookup("PARIS"));
    // all-lowercase entries are reachable through the folded index from
    // any input case
    assert!(ch.lookup("pArIs"));

    let ch = checker("", "1\nParis\n");
    assert!(ch.lookup("Paris"));
    assert!(ch.lookup("PARIS"));
    assert!(!ch.lookup("paris"));
    assert!(!ch.lookup("pArIs"));
}

#[test]
fn capitalization_disabled() {
    let ch = checker("", "1\nParis\n");
    assert!(ch.lookup_with("Paris", false, true));
    assert!(!ch.lookup_with("paris", false, true));
    // an all-caps query still reaches the entry through the folded index
    assert!(ch.lookup_with("PARIS", false, true));
}

#[test]
fn iconv() {
    let ch = checker("ICONV 1\nICONV \u{2019} '\n", "1\nisn't\n");
    assert!(ch.lookup("isn't"));
    assert!(ch.lookup("isn\u{2019}t"));
}

#[test]
fn break_patterns() {
    let ch = checker("BREAK 1\nBREAK -\n", "2\nfoo\nbar\n");
    assert!(ch.lookup("foo-bar"));
    assert!(ch.lookup("foo--bar"));
    assert!(ch.lookup("foo-bar-foo"));
    assert!(!ch.lookup("foo-baz"));
    assert!(!ch.lookup("foobar"));
}

#[test]
fn break_patterns_default_table() {
    // with no BREAK directive, hyphen splitting is on by default
    let ch = checker("", "2\nfoo\nbar\n");
    assert!(ch.lookup("foo-bar"));
    assert!(ch.lookup("foo-"));
    assert!(ch.lookup("-foo"));

    // BREAK 0 switches it off
    let ch = checker("BREAK 0\n", "2\nfoo\nbar\n");
    assert!(!ch.lookup("foo-bar"));
}

#[test]
fn break_anchored_patterns() {
    let ch = checker("BREAK 2\nBREAK ^x\nBREAK x$\n", "1\nfoo\n");
    assert!(ch.lookup("xfoo"));
    assert!(ch.lookup("foox"));
    assert!(!ch.lookup("fxoo"));
}

#[test]
fn break_depth_cap() {
    let ch = checker("BREAK 1\nBREAK -\n", "1\na\n");
    // ten separators can be consumed, eleven cannot
    let ok = vec!["a"; 11].join("-");
    let too_deep = vec!["a"; 12].join("-");
    assert!(ch.lookup(&ok));
    assert!(!ch.lookup(&too_deep));
}

#[test]
fn dictionary_stems_are_words() {
    let ch = checker(
        "SFX A Y 1\nSFX A 0 s .\nFORBIDDENWORD !\n",
        "3\ncat/A\ndog\nvile/!\n",
    );
    assert!(ch.lookup("cat"));
    assert!(ch.lookup("dog"));
    assert!(!ch.lookup("vile"));
}
