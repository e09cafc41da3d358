//! In-place application of matched rewrite rules.

use log::debug;

use crate::{matcher::MatchSite, rules::RuleSet, syntax::GoFile};

/// Mutate every matched callee to its rule's `to_alias.to_func`.
/// Argument lists and all surrounding nodes are untouched. Returns
/// whether any rewrite was applied; with zero matches the arena is left
/// exactly as parsed and the text round-trips byte-identical.
pub fn apply(file: &mut GoFile, matches: &[MatchSite], rules: &RuleSet) -> bool {
    for site in matches {
        let rule = &rules.as_slice()[site.rule];
        let qref = &mut file.refs[site.site];
        debug!(
            "rewriting {}.{} to {}.{}",
            qref.ns, qref.name, rule.to_alias, rule.to_func
        );
        qref.ns = rule.to_alias.clone();
        qref.name = rule.to_func.clone();
        qref.edited = true;
    }
    !matches.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher;

    #[test]
    fn rewrites_only_matched_sites() {
        let mut file = GoFile::parse(
            "test.go",
            concat!(
                "package main\n\n",
                "import \"net\"\n\n",
                "func f() net.Addr {\n",
                "\tc := net.ParseIP(\"a\")\n",
                "\treturn nil\n",
                "}\n",
            ),
        )
        .unwrap();
        let rules = RuleSet::netparse();
        let matches = matcher::find_matches(&file, &rules);
        assert!(apply(&mut file, &matches, &rules));

        let edited: Vec<_> = file.refs.iter().filter(|r| r.edited).collect();
        assert_eq!(edited.len(), 1);
        assert_eq!(edited[0].ns, "netutils");
        assert_eq!(edited[0].name, "ParseIPSloppy");
        // The qualified type reference is untouched.
        assert!(file.refs.iter().any(|r| r.ns == "net" && r.name == "Addr" && !r.edited));
    }

    #[test]
    fn no_matches_means_no_change() {
        let mut file =
            GoFile::parse("test.go", "package main\n\nfunc f() {}\n").unwrap();
        let rules = RuleSet::netparse();
        assert!(!apply(&mut file, &[], &rules));
        assert!(file.refs.iter().all(|r| !r.edited));
    }
}
