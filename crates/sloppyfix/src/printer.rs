//! Canonical text emission for a mutated arena.
//!
//! Printing is a pure function of the arena: edited reference spans are
//! spliced, the import block is re-rendered in its grouped canonical
//! form, and every other byte of the original text is preserved exactly.
//! There is no hidden formatting state.

use std::fmt::Write as _;

use crate::{
    error::FixError,
    syntax::{GoFile, ImportEntry},
    types::ImportGroup,
};

#[derive(Debug)]
struct Edit {
    start: usize,
    end: usize,
    replacement: String,
}

/// Serialize the arena back to text.
pub fn print(file: &GoFile) -> Result<String, FixError> {
    let mut edits: Vec<Edit> = file
        .refs
        .iter()
        .filter(|qref| qref.edited)
        .map(|qref| Edit {
            start: qref.span.0,
            end: qref.span.1,
            replacement: format!("{}.{}", qref.ns, qref.name),
        })
        .collect();

    let block = render_import_block(&file.imports);
    match file.import_span {
        Some((start, end)) => edits.push(Edit {
            start,
            end,
            replacement: block,
        }),
        // A file that declared no imports gains a block right after the
        // package clause.
        None if !block.is_empty() => edits.push(Edit {
            start: file.package_end,
            end: file.package_end,
            replacement: format!("\n\n{block}"),
        }),
        None => {}
    }

    splice(file, edits)
}

fn splice(file: &GoFile, mut edits: Vec<Edit>) -> Result<String, FixError> {
    edits.sort_by_key(|edit| edit.start);
    let text = file.text();
    let mut out = String::with_capacity(text.len() + 64);
    let mut cursor = 0usize;
    for edit in &edits {
        if edit.start < cursor || edit.start > edit.end || edit.end > text.len() {
            return Err(FixError::Print {
                file: file.desc().to_owned(),
                message: format!(
                    "edit span {}..{} overlaps a prior edit or exceeds file length {}",
                    edit.start,
                    edit.end,
                    text.len()
                ),
            });
        }
        out.push_str(&text[cursor..edit.start]);
        out.push_str(&edit.replacement);
        cursor = edit.end;
    }
    out.push_str(&text[cursor..]);
    Ok(out)
}

/// Render the parenthesized import block: standard-library group first,
/// then a blank-line-separated third-party group, lexicographic by path
/// within each group. An empty table renders nothing.
pub(crate) fn render_import_block(imports: &[ImportEntry]) -> String {
    if imports.is_empty() {
        return String::new();
    }

    let mut standard: Vec<&ImportEntry> = Vec::new();
    let mut third_party: Vec<&ImportEntry> = Vec::new();
    for entry in imports {
        match ImportGroup::classify(&entry.path) {
            ImportGroup::Standard => standard.push(entry),
            ImportGroup::ThirdParty => third_party.push(entry),
        }
    }
    for group in [&mut standard, &mut third_party] {
        group.sort_by(|a, b| a.path.cmp(&b.path));
    }

    let mut block = String::from("import (\n");
    let mut first = true;
    for group in [&standard, &third_party] {
        if group.is_empty() {
            continue;
        }
        if !first {
            block.push('\n');
        }
        first = false;
        for entry in group {
            match &entry.alias {
                Some(alias) => {
                    let _ = writeln!(block, "\t{alias} \"{}\"", entry.path);
                }
                None => {
                    let _ = writeln!(block, "\t\"{}\"", entry.path);
                }
            }
        }
    }
    block.push(')');
    block
}
