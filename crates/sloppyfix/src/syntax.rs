//! Go source parsing into a mutable per-file arena.
//!
//! tree-sitter provides the concrete syntax tree; this module extracts
//! the pieces the rewrite pipeline needs (the import table and every
//! namespace-qualified reference) into [`GoFile`], whose vectors act as
//! an arena with stable indices. Later passes mutate entries in place
//! and never re-parse, so alias renames and reference counting observe
//! one consistent state. The CST itself is discarded after extraction.

use tree_sitter::{Node, Parser};

use crate::error::FixError;

/// Guard against pathological nesting blowing the stack during extraction.
const MAX_TREE_DEPTH: usize = 500;

/// One declared import: `import [alias] "path"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    pub path: String,
    /// Explicit binding, including the `.` and `_` forms. `None` means
    /// the package is bound to the last path segment.
    pub alias: Option<String>,
}

impl ImportEntry {
    /// The identifier call sites use to qualify into this import.
    pub fn local_name(&self) -> &str {
        match &self.alias {
            Some(alias) => alias,
            None => default_alias(&self.path),
        }
    }
}

/// Default binding for an import path: its last segment.
pub fn default_alias(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// A namespace-qualified reference (`ns.Name`): either the callee of a
/// call expression or a qualified type. The span covers `ns.Name` only,
/// never argument lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedRef {
    pub ns: String,
    pub name: String,
    /// Byte range of the reference in the original text.
    pub span: (usize, usize),
    /// Whether this reference is the callee of a call expression.
    pub is_call: bool,
    /// Set when a pass mutated `ns` or `name`; the printer splices only
    /// edited references.
    pub edited: bool,
}

/// Mutable arena for one parsed Go file. Created per input, driven
/// through exactly one match → rewrite → reconcile → print pass, then
/// discarded.
#[derive(Debug)]
pub struct GoFile {
    desc: String,
    text: String,
    /// End byte of the package clause; insertion point for a new import
    /// block when the file declares no imports.
    pub(crate) package_end: usize,
    /// Byte span covering the first through last import declaration.
    pub(crate) import_span: Option<(usize, usize)>,
    /// The import table, in declaration order.
    pub imports: Vec<ImportEntry>,
    /// Qualified references in tree traversal order (pre-order,
    /// left-to-right).
    pub refs: Vec<QualifiedRef>,
}

impl GoFile {
    /// Parse Go source into the arena. `desc` is the filename or label
    /// used only for diagnostics.
    pub fn parse(desc: &str, source: &str) -> Result<Self, FixError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|err| FixError::Parse {
                file: desc.to_owned(),
                message: format!("loading Go grammar: {err}"),
            })?;
        let tree = parser.parse(source, None).ok_or_else(|| FixError::Parse {
            file: desc.to_owned(),
            message: "parser produced no tree".to_owned(),
        })?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(FixError::Parse {
                file: desc.to_owned(),
                message: describe_syntax_error(root),
            });
        }

        let mut file = Self {
            desc: desc.to_owned(),
            text: source.to_owned(),
            package_end: 0,
            import_span: None,
            imports: Vec::new(),
            refs: Vec::new(),
        };
        collect(root, source.as_bytes(), &mut file, 0);
        Ok(file)
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

fn node_text(node: Node<'_>, src: &[u8]) -> String {
    node.utf8_text(src).unwrap_or_default().to_owned()
}

/// Is `node` the callee of a call expression (as opposed to a bare
/// selector used as a value)?
fn is_callee(node: Node<'_>) -> bool {
    node.parent().is_some_and(|parent| {
        parent.kind() == "call_expression"
            && parent
                .child_by_field_name("function")
                .is_some_and(|func| func.id() == node.id())
    })
}

fn collect(node: Node<'_>, src: &[u8], file: &mut GoFile, depth: usize) {
    if depth > MAX_TREE_DEPTH {
        return;
    }
    match node.kind() {
        "package_clause" => {
            file.package_end = node.end_byte();
        }
        "import_declaration" => {
            let span = file
                .import_span
                .get_or_insert((node.start_byte(), node.end_byte()));
            span.0 = span.0.min(node.start_byte());
            span.1 = span.1.max(node.end_byte());
            collect_import_specs(node, src, file, depth);
            return;
        }
        "selector_expression" => {
            // Only single-level qualification (`ident.Field`) can name a
            // package member; deeper chains have a non-identifier operand.
            if let (Some(operand), Some(field)) = (
                node.child_by_field_name("operand"),
                node.child_by_field_name("field"),
            ) && operand.kind() == "identifier"
            {
                file.refs.push(QualifiedRef {
                    ns: node_text(operand, src),
                    name: node_text(field, src),
                    span: (node.start_byte(), node.end_byte()),
                    is_call: is_callee(node),
                    edited: false,
                });
            }
        }
        "qualified_type" => {
            if let (Some(package), Some(name)) = (
                node.child_by_field_name("package"),
                node.child_by_field_name("name"),
            ) {
                file.refs.push(QualifiedRef {
                    ns: node_text(package, src),
                    name: node_text(name, src),
                    span: (node.start_byte(), node.end_byte()),
                    is_call: false,
                    edited: false,
                });
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect(child, src, file, depth + 1);
    }
}

fn collect_import_specs(node: Node<'_>, src: &[u8], file: &mut GoFile, depth: usize) {
    if depth > MAX_TREE_DEPTH {
        return;
    }
    if node.kind() == "import_spec" {
        if let Some(path) = node.child_by_field_name("path") {
            let path = node_text(path, src)
                .trim_matches(|c| c == '"' || c == '`')
                .to_owned();
            let alias = node
                .child_by_field_name("name")
                .map(|name| node_text(name, src));
            file.imports.push(ImportEntry { path, alias });
        }
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_import_specs(child, src, file, depth + 1);
    }
}

fn describe_syntax_error(root: Node<'_>) -> String {
    let node = first_error(root).unwrap_or(root);
    let pos = node.start_position();
    format!("syntax error at line {}, column {}", pos.row + 1, pos.column + 1)
}

fn first_error<'tree>(node: Node<'tree>) -> Option<Node<'tree>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(err) = first_error(child) {
            return Some(err);
        }
    }
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_import() {
        let file = GoFile::parse(
            "single.go",
            "package main\n\nimport \"net\"\n\nfunc f() {}\n",
        )
        .unwrap();
        assert_eq!(
            file.imports,
            vec![ImportEntry {
                path: "net".to_owned(),
                alias: None,
            }]
        );
        assert_eq!(file.package_end, "package main".len());
        assert!(file.import_span.is_some());
    }

    #[test]
    fn parses_import_block_with_aliases() {
        let source = concat!(
            "package main\n\n",
            "import (\n",
            "\t\"net\"\n\n",
            "\tutilnet \"k8s.io/utils/net\"\n",
            "\t_ \"embed\"\n",
            ")\n",
        );
        let file = GoFile::parse("block.go", source).unwrap();
        assert_eq!(file.imports.len(), 3);
        assert_eq!(file.imports[0].local_name(), "net");
        assert_eq!(file.imports[1].alias.as_deref(), Some("utilnet"));
        assert_eq!(file.imports[1].local_name(), "utilnet");
        assert_eq!(file.imports[2].alias.as_deref(), Some("_"));
    }

    #[test]
    fn collects_calls_and_qualified_types_in_order() {
        let source = concat!(
            "package main\n\n",
            "import \"net\"\n\n",
            "func f() net.Addr {\n",
            "\ta := &net.IPAddr{ip1}\n",
            "\tc := net.ParseIP(\"ads\")\n",
            "\treturn a\n",
            "}\n",
        );
        let file = GoFile::parse("refs.go", source).unwrap();
        let names: Vec<(&str, &str, bool)> = file
            .refs
            .iter()
            .map(|r| (r.ns.as_str(), r.name.as_str(), r.is_call))
            .collect();
        assert_eq!(
            names,
            vec![
                ("net", "Addr", false),
                ("net", "IPAddr", false),
                ("net", "ParseIP", true),
            ]
        );
        // Spans cover exactly `ns.Name`.
        let (start, end) = file.refs[2].span;
        assert_eq!(&source[start..end], "net.ParseIP");
    }

    #[test]
    fn bare_selector_is_not_a_call() {
        let source = "package main\n\nimport \"net\"\n\nvar parse = net.ParseIP\n";
        let file = GoFile::parse("value.go", source).unwrap();
        assert_eq!(file.refs.len(), 1);
        assert!(!file.refs[0].is_call);
    }

    #[test]
    fn chained_selectors_have_no_identifier_operand() {
        let source = "package main\n\nfunc f() {\n\ta.b.C()\n}\n";
        let file = GoFile::parse("chain.go", source).unwrap();
        // Only the inner `a.b` qualifies; the outer operand is itself a
        // selector expression.
        assert_eq!(file.refs.len(), 1);
        assert_eq!(file.refs[0].ns, "a");
        assert_eq!(file.refs[0].name, "b");
    }

    #[test]
    fn default_alias_is_last_path_segment() {
        assert_eq!(default_alias("net"), "net");
        assert_eq!(default_alias("net/http"), "http");
        assert_eq!(default_alias("k8s.io/utils/net"), "net");
    }

    #[test]
    fn malformed_source_is_a_parse_error() {
        let err = GoFile::parse("bad.go", "package main\n\nfunc {\n").unwrap_err();
        assert!(matches!(err, FixError::Parse { .. }), "{err}");
        assert!(err.to_string().contains("bad.go"));
    }

    #[test]
    fn file_without_imports_has_no_span() {
        let file = GoFile::parse("none.go", "package main\n\nfunc f() {}\n").unwrap();
        assert!(file.import_span.is_none());
        assert!(file.imports.is_empty());
    }
}
