//! Import-grouping post-pass.
//!
//! The analogue of running goimports after a fix: re-parses already
//! printed text and re-renders only the import block, leaving every other
//! byte alone. Idempotent on the printer's own output.

use crate::{error::FixError, printer, syntax::GoFile};

/// Normalize the import block of `source`. Files without imports are
/// returned unchanged.
pub fn regroup_imports(desc: &str, source: &str) -> Result<String, FixError> {
    let file = GoFile::parse(desc, source).map_err(|err| FixError::Format {
        file: desc.to_owned(),
        message: format!("re-parsing printed output: {err}"),
    })?;
    let Some((start, end)) = file.import_span else {
        return Ok(source.to_owned());
    };
    let block = printer::render_import_block(&file.imports);
    if block.is_empty() {
        return Ok(source.to_owned());
    }
    let mut out = String::with_capacity(source.len());
    out.push_str(&source[..start]);
    out.push_str(&block);
    out.push_str(&source[end..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn canonical_block_is_unchanged() {
        let source = concat!(
            "package main\n\n",
            "import (\n",
            "\t\"net\"\n\n",
            "\tnetutils \"k8s.io/utils/net\"\n",
            ")\n\n",
            "func f() {}\n",
        );
        assert_eq!(regroup_imports("ok.go", source).unwrap(), source);
    }

    #[test]
    fn regroups_out_of_order_block() {
        let source = concat!(
            "package main\n\n",
            "import (\n",
            "\tnetutils \"k8s.io/utils/net\"\n",
            "\t\"net\"\n",
            ")\n\n",
            "func f() {}\n",
        );
        let want = concat!(
            "package main\n\n",
            "import (\n",
            "\t\"net\"\n\n",
            "\tnetutils \"k8s.io/utils/net\"\n",
            ")\n\n",
            "func f() {}\n",
        );
        assert_eq!(regroup_imports("sort.go", source).unwrap(), want);
    }

    #[test]
    fn file_without_imports_is_untouched() {
        let source = "package main\n\nfunc f() {}\n";
        assert_eq!(regroup_imports("none.go", source).unwrap(), source);
    }

    #[test]
    fn unparseable_output_is_a_format_error() {
        let err = regroup_imports("broken.go", "package main\n\nfunc {\n").unwrap_err();
        assert!(matches!(err, FixError::Format { .. }), "{err}");
    }
}
