//! Name-based pattern matching over the qualified-reference arena.
//!
//! Matching is purely syntactic: a call matches a rule when its callee is
//! `<local>.<from_func>`, where `<local>` is whatever identifier the
//! rule's source path is bound to in this file. No scope resolution is
//! performed, so a local variable shadowing the package name would still
//! match; this is an accepted precision limit of the tool.

use log::debug;

use crate::{
    rules::{RewriteRule, RuleSet},
    syntax::{GoFile, ImportEntry, default_alias},
};

/// A matched call site: arena index of the reference plus the index of
/// the rule that claimed it. Rebuilt fresh on every pass, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSite {
    pub site: usize,
    pub rule: usize,
}

/// Resolve the local identifier a rule's source path is bound to in this
/// file: the recorded alias when the path is imported, its last segment
/// otherwise.
pub fn source_local_name<'a>(file: &'a GoFile, rule: &'a RewriteRule) -> &'a str {
    file.imports
        .iter()
        .find(|entry| entry.path == rule.from_path)
        .map(ImportEntry::local_name)
        .unwrap_or_else(|| default_alias(&rule.from_path))
}

/// Collect matches in tree traversal order (pre-order, left-to-right),
/// which fixes rewrite application order and output determinism.
pub fn find_matches(file: &GoFile, rules: &RuleSet) -> Vec<MatchSite> {
    let locals: Vec<&str> = rules
        .as_slice()
        .iter()
        .map(|rule| source_local_name(file, rule))
        .collect();

    let mut matches = Vec::new();
    for (site, qref) in file.refs.iter().enumerate() {
        if !qref.is_call {
            continue;
        }
        for (rule_idx, rule) in rules.as_slice().iter().enumerate() {
            if qref.ns == locals[rule_idx] && qref.name == rule.from_func {
                debug!(
                    "{}: {}.{} -> {}.{}",
                    file.desc(),
                    qref.ns,
                    qref.name,
                    rule.to_alias,
                    rule.to_func
                );
                matches.push(MatchSite { site, rule: rule_idx });
                break;
            }
        }
    }
    matches
}

/// Post-rewrite predicate: does any reference (call or type) still
/// qualify through `local`? Import specs themselves do not count as
/// references.
pub fn references_namespace(file: &GoFile, local: &str) -> bool {
    file.refs.iter().any(|qref| qref.ns == local)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> GoFile {
        GoFile::parse("test.go", source).unwrap()
    }

    #[test]
    fn matches_in_traversal_order() {
        let file = parse(concat!(
            "package main\n\n",
            "import \"net\"\n\n",
            "func f() {\n",
            "\tc := net.ParseIP(\"a\")\n",
            "\td, _, _ := net.ParseCIDR(\"b\")\n",
            "\te := net.ParseIP(\"c\")\n",
            "}\n",
        ));
        let matches = find_matches(&file, &RuleSet::netparse());
        let rules: Vec<usize> = matches.iter().map(|m| m.rule).collect();
        assert_eq!(rules, vec![0, 1, 0]);
        assert!(matches.windows(2).all(|w| w[0].site < w[1].site));
    }

    #[test]
    fn aliased_source_import_resolves_through_table() {
        let file = parse(concat!(
            "package main\n\n",
            "import gonet \"net\"\n\n",
            "func f() {\n",
            "\tc := gonet.ParseIP(\"a\")\n",
            "\td := net.ParseIP(\"a\")\n",
            "}\n",
        ));
        let matches = find_matches(&file, &RuleSet::netparse());
        // Only the aliased call matches; the bare `net` identifier is not
        // bound to the rule's source path in this file.
        assert_eq!(matches.len(), 1);
        assert_eq!(file.refs[matches[0].site].ns, "gonet");
    }

    #[test]
    fn bare_selector_values_do_not_match() {
        let file = parse("package main\n\nimport \"net\"\n\nvar parse = net.ParseIP\n");
        assert!(find_matches(&file, &RuleSet::netparse()).is_empty());
        assert!(references_namespace(&file, "net"));
        assert!(!references_namespace(&file, "netutils"));
    }
}
