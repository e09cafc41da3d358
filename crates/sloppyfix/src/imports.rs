//! Import table reconciliation after a rewrite pass.
//!
//! For every rule that fired, the target path must end up imported under
//! its canonical alias exactly once, and the source path's import is
//! dropped when nothing references it anymore. Dot (`.`) and blank (`_`)
//! bindings are opaque: they are never merged, re-aliased, or removed.

use log::debug;

use crate::{
    matcher::{self, MatchSite},
    rules::{RewriteRule, RuleSet},
    syntax::{GoFile, ImportEntry},
    types::FxIndexSet,
};

fn is_special_binding(alias: Option<&str>) -> bool {
    matches!(alias, Some(".") | Some("_"))
}

/// Bring the import table in line with the applied matches: ensure each
/// touched target path is present under its canonical alias (merging any
/// pre-existing import of the same path and repointing its references),
/// then drop each source import that no remaining reference uses.
pub fn reconcile(file: &mut GoFile, matches: &[MatchSite], rules: &RuleSet) {
    let fired: FxIndexSet<usize> = matches.iter().map(|site| site.rule).collect();

    for &rule_idx in &fired {
        ensure_target(file, &rules.as_slice()[rule_idx]);
    }

    // Source removal runs after all target aliasing has settled, over the
    // fully mutated reference arena.
    let sources: FxIndexSet<String> = fired
        .iter()
        .map(|&rule_idx| rules.as_slice()[rule_idx].from_path.clone())
        .collect();
    for path in &sources {
        drop_if_unused(file, path);
    }
}

/// Per-path state machine: NeedsAdd adds the canonical entry,
/// WrongAlias repoints every reference and rewrites the entry in place,
/// CorrectAlias is a no-op. Duplicate entries for the same path are
/// merged into the first surviving one.
fn ensure_target(file: &mut GoFile, rule: &RewriteRule) {
    let mut present = false;
    let mut idx = 0;
    while idx < file.imports.len() {
        let entry = &file.imports[idx];
        if entry.path != rule.to_path || is_special_binding(entry.alias.as_deref()) {
            idx += 1;
            continue;
        }
        let current = entry.local_name().to_owned();
        if current != rule.to_alias {
            debug!(
                "{}: re-aliasing {} from {} to {}",
                file.desc(),
                rule.to_path,
                current,
                rule.to_alias
            );
            for qref in &mut file.refs {
                if qref.ns == current {
                    qref.ns = rule.to_alias.clone();
                    qref.edited = true;
                }
            }
            file.imports[idx].alias = Some(rule.to_alias.clone());
        }
        if present {
            file.imports.remove(idx);
            continue;
        }
        present = true;
        idx += 1;
    }

    if !present {
        debug!(
            "{}: adding import {} as {}",
            file.desc(),
            rule.to_path,
            rule.to_alias
        );
        file.imports.push(ImportEntry {
            path: rule.to_path.clone(),
            alias: Some(rule.to_alias.clone()),
        });
    }
}

fn drop_if_unused(file: &mut GoFile, path: &str) {
    let Some(idx) = file.imports.iter().position(|entry| entry.path == path) else {
        return;
    };
    if is_special_binding(file.imports[idx].alias.as_deref()) {
        return;
    }
    let local = file.imports[idx].local_name().to_owned();
    if matcher::references_namespace(file, &local) {
        return;
    }
    debug!("{}: dropping unused import {path}", file.desc());
    file.imports.remove(idx);
}
