//! The per-file fix pipeline.
//!
//! parse → match → rewrite → reconcile → print → regroup, strictly
//! sequential over one file at a time. Nothing persists across files, so
//! a surrounding driver may process files in parallel with a shared
//! [`RuleSet`].

use std::{fs, path::Path};

use anyhow::{Context, Result};
use log::debug;

use crate::{
    error::FixError, format, imports, matcher, printer, rewriter, rules::RuleSet, syntax::GoFile,
};

/// Result of fixing one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutput {
    pub text: String,
    /// True iff at least one rewrite rule fired. For canonically
    /// formatted input this equals `text != input`.
    pub changed: bool,
}

/// Apply the rule set to one Go source text. `desc` names the input for
/// diagnostics only. With zero matches the input is returned
/// byte-identical and nothing is reformatted.
pub fn fix_source(desc: &str, source: &str, rules: &RuleSet) -> Result<FixOutput, FixError> {
    let mut file = GoFile::parse(desc, source)?;
    let matches = matcher::find_matches(&file, rules);
    if !rewriter::apply(&mut file, &matches, rules) {
        debug!("{desc}: no matches");
        return Ok(FixOutput {
            text: source.to_owned(),
            changed: false,
        });
    }
    imports::reconcile(&mut file, &matches, rules);
    let text = printer::print(&file)?;
    let text = format::regroup_imports(desc, &text)?;
    Ok(FixOutput { text, changed: true })
}

/// Fix one file on disk. Returns whether it changed; the new text is
/// written back only when `write` is set.
pub fn fix_file(path: &Path, rules: &RuleSet, write: bool) -> Result<bool> {
    let source =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let desc = path.display().to_string();
    let output = fix_source(&desc, &source, rules)?;
    if output.changed && write {
        fs::write(path, &output.text).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(output.changed)
}
