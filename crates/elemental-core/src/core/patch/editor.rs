use super::scanner::{CollectionScan, Delimiter, FieldNode, ScanError, ScanIssue, Span, TokenKind, tokenize};
use crate::core::io::literal::{LiteralStyle, is_identifier, quote};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("No record with atomic number {0}")]
    NotFound(u32),
    #[error("Atomic number {atomic_number} matches {count} records")]
    Ambiguous { atomic_number: u32, count: usize },
    #[error("Record {atomic_number} is malformed: {issue}")]
    MalformedRecord {
        atomic_number: u32,
        issue: ScanIssue,
    },
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidLiteral { field: String, reason: &'static str },
    #[error("Invalid field name '{0}'")]
    InvalidFieldName(String),
    #[error("Record {0} has no field to insert after")]
    NoInsertionPoint(u32),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Identifies one located record of the editor's collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordHandle(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    Replaced,
    Inserted,
    Unchanged,
}

#[derive(Debug, Clone)]
struct Insertion {
    record: usize,
    at: usize,
    name: String,
    text: String,
}

/// Field-level edits over a scanned record collection.
///
/// Edits are recorded against the original text and applied back to front by
/// [`StructuralEditor::finish`], so spans stay valid no matter how many edits are
/// queued. Bytes outside the edited value or insertion point are never touched.
pub struct StructuralEditor<'a> {
    scan: CollectionScan<'a>,
    style: LiteralStyle,
    anchor: String,
    replacements: BTreeMap<usize, (Span, String)>,
    insertions: Vec<Insertion>,
}

impl<'a> StructuralEditor<'a> {
    pub fn new(text: &'a str, anchor: impl Into<String>) -> Result<Self, ScanError> {
        let scan = CollectionScan::parse(text)?;
        let style = detect_style(&scan);
        Ok(Self {
            scan,
            style,
            anchor: anchor.into(),
            replacements: BTreeMap::new(),
            insertions: Vec::new(),
        })
    }

    pub fn scan(&self) -> &CollectionScan<'a> {
        &self.scan
    }

    /// The quoting convention of the artifact, taken from its record keys.
    pub fn literal_style(&self) -> LiteralStyle {
        self.style
    }

    pub fn has_pending_edits(&self) -> bool {
        !self.replacements.is_empty() || !self.insertions.is_empty()
    }

    /// Finds the single, well-formed record keyed by `atomic_number`.
    pub fn locate(&self, atomic_number: u32) -> Result<RecordHandle, PatchError> {
        let matches: Vec<_> = self.scan.records_for(atomic_number).collect();
        match matches.as_slice() {
            [] => Err(PatchError::NotFound(atomic_number)),
            [(index, record)] => match &record.issue {
                None => Ok(RecordHandle(*index)),
                Some(issue) => Err(PatchError::MalformedRecord {
                    atomic_number,
                    issue: issue.clone(),
                }),
            },
            many => Err(PatchError::Ambiguous {
                atomic_number,
                count: many.len(),
            }),
        }
    }

    /// The value of `name` as it appears in the original text.
    pub fn get_field(&self, record: RecordHandle, name: &str) -> Option<&'a str> {
        let text = self.scan.text();
        self.scan.records()[record.0]
            .field(name)
            .map(|f| f.value_span.slice(text))
    }

    /// Sets `name` to `literal`: the value is replaced in place when the field exists,
    /// otherwise a new entry is inserted after the editor's anchor field.
    pub fn set_field(
        &mut self,
        record: RecordHandle,
        name: &str,
        literal: &str,
    ) -> Result<FieldAction, PatchError> {
        let anchor = self.anchor.clone();
        self.insert_field_after(record, &anchor, name, literal)
    }

    /// Inserts `name: literal` after `anchor`, or after the last field when the record
    /// has no `anchor`. An existing `name` is replaced in place instead.
    pub fn insert_field_after(
        &mut self,
        record: RecordHandle,
        anchor: &str,
        name: &str,
        literal: &str,
    ) -> Result<FieldAction, PatchError> {
        validate_field_name(name)?;
        let literal = validate_literal(name, literal)?;

        let node = &self.scan.records()[record.0];
        if let Some(field) = node.field(name) {
            let span = field.value_span;
            return Ok(self.replace_value(span, literal));
        }

        let target = node
            .field(anchor)
            .or_else(|| node.fields.last())
            .ok_or_else(|| PatchError::NoInsertionPoint(node.atomic_number.unwrap_or(0)))?;
        let (at, text) = render_insertion(self.scan.text(), target, name, literal);

        match self
            .insertions
            .iter_mut()
            .find(|ins| ins.record == record.0 && ins.name == name)
        {
            Some(existing) => {
                existing.at = at;
                existing.text = text;
            }
            None => self.insertions.push(Insertion {
                record: record.0,
                at,
                name: name.to_string(),
                text,
            }),
        }
        Ok(FieldAction::Inserted)
    }

    /// Sets several fields of one record, or none of them.
    ///
    /// Every name and literal is validated, and an insertion point is confirmed, before
    /// the first edit is queued.
    pub fn set_fields<'f>(
        &mut self,
        record: RecordHandle,
        fields: impl IntoIterator<Item = (&'f str, &'f str)> + Clone,
    ) -> Result<Vec<FieldAction>, PatchError> {
        let node = &self.scan.records()[record.0];
        let mut needs_insert = false;
        for (name, literal) in fields.clone() {
            validate_field_name(name)?;
            validate_literal(name, literal)?;
            needs_insert |= node.field(name).is_none();
        }
        if needs_insert && node.fields.is_empty() {
            return Err(PatchError::NoInsertionPoint(node.atomic_number.unwrap_or(0)));
        }

        fields
            .into_iter()
            .map(|(name, literal)| self.set_field(record, name, literal))
            .collect()
    }

    fn replace_value(&mut self, span: Span, literal: &str) -> FieldAction {
        if span.slice(self.scan.text()) == literal {
            self.replacements.remove(&span.start);
            FieldAction::Unchanged
        } else {
            self.replacements
                .insert(span.start, (span, literal.to_string()));
            FieldAction::Replaced
        }
    }

    /// Applies every queued edit and returns the new text.
    pub fn finish(self) -> String {
        let text = self.scan.text();
        let mut edits: Vec<(usize, usize, String)> = self
            .replacements
            .into_values()
            .map(|(span, value)| (span.start, span.end, value))
            .collect();

        let mut grouped: BTreeMap<usize, String> = BTreeMap::new();
        for insertion in self.insertions {
            grouped.entry(insertion.at).or_default().push_str(&insertion.text);
        }
        edits.extend(grouped.into_iter().map(|(at, text)| (at, at, text)));

        edits.sort_by(|a, b| b.0.cmp(&a.0));
        let mut out = text.to_string();
        for (start, end, replacement) in edits {
            out.replace_range(start..end, &replacement);
        }
        out
    }
}

pub(crate) fn detect_style(scan: &CollectionScan<'_>) -> LiteralStyle {
    let quoted = scan
        .records()
        .iter()
        .flat_map(|r| r.fields.iter())
        .next()
        .and_then(|f| f.key_quote);
    match quoted {
        Some('"') => LiteralStyle::Json,
        _ => LiteralStyle::TypeScript,
    }
}

/// Builds the text inserted after `anchor`, mirroring its layout.
///
/// On its own line the new entry copies the anchor's indentation and the line break
/// that ends the line before it; inline it follows a single space. Key quoting copies
/// the anchor key. If the anchor ends in a comma the new entry does too; otherwise the
/// comma goes in front of it.
fn render_insertion(text: &str, anchor: &FieldNode, name: &str, literal: &str) -> (usize, String) {
    let key = match anchor.key_quote {
        Some('"') => quote(name, LiteralStyle::Json),
        Some(_) => quote(name, LiteralStyle::TypeScript),
        None => name.to_string(),
    };
    let separator = match line_indent(text, anchor.key_span.start) {
        Some(indent) => format!(
            "{}{}",
            line_break_before(text, anchor.key_span.start),
            indent
        ),
        None => " ".to_string(),
    };

    if anchor.has_trailing_comma {
        (
            anchor.entry_span.end,
            format!("{}{}: {},", separator, key, literal),
        )
    } else {
        (
            anchor.value_span.end,
            format!(",{}{}: {}", separator, key, literal),
        )
    }
}

/// The whitespace before `pos` on its line, or `None` if anything else precedes it.
fn line_indent(text: &str, pos: usize) -> Option<&str> {
    let line_start = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    let prefix = &text[line_start..pos];
    prefix
        .bytes()
        .all(|b| b == b' ' || b == b'\t')
        .then_some(prefix)
}

/// `"\r\n"` if the line holding `pos` is preceded by a CRLF break, else `"\n"`.
fn line_break_before(text: &str, pos: usize) -> &'static str {
    match text[..pos].rfind('\n') {
        Some(i) if text[..i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

fn validate_field_name(name: &str) -> Result<(), PatchError> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(PatchError::InvalidFieldName(name.to_string()))
    }
}

/// Checks that `literal` is one balanced value that cannot spill into sibling fields.
pub fn validate_literal<'l>(field: &str, literal: &'l str) -> Result<&'l str, PatchError> {
    let invalid = |reason| PatchError::InvalidLiteral {
        field: field.to_string(),
        reason,
    };
    let trimmed = literal.trim();
    if trimmed.is_empty() {
        return Err(invalid("value is empty"));
    }

    let mut stack: Vec<Delimiter> = Vec::new();
    for token in tokenize(trimmed) {
        match token.kind {
            TokenKind::Str {
                terminated: false, ..
            } => return Err(invalid("unterminated string")),
            TokenKind::Comment { .. } => return Err(invalid("comments are not allowed")),
            TokenKind::Open(d) => stack.push(d),
            TokenKind::Close(d) => {
                if stack.pop() != Some(d) {
                    return Err(invalid("unbalanced delimiters"));
                }
            }
            TokenKind::Comma | TokenKind::Colon | TokenKind::Equals if stack.is_empty() => {
                return Err(invalid("more than one value"));
            }
            TokenKind::Word if stack.is_empty() && token.span.slice(trimmed) == ";" => {
                return Err(invalid("more than one value"));
            }
            _ => {}
        }
    }
    if !stack.is_empty() {
        return Err(invalid("unbalanced delimiters"));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "export const ELEMENTS: readonly Element[] = [
  {
    symbol: 'In',
    atomicNumber: 49,
    atomicRadius: 155,
    uses: [],
  },
  {
    symbol: 'Sn',
    atomicNumber: 50,
    atomicRadius: null,
    uses: [],
  },
  {
    symbol: 'Sb',
    atomicNumber: 51,
    atomicRadius: 145,
    uses: [],
  },
] as const;
";

    #[test]
    fn replaces_only_the_value() {
        let mut editor = StructuralEditor::new(TS, "uses").unwrap();
        let tin = editor.locate(50).unwrap();
        assert_eq!(editor.get_field(tin, "atomicRadius"), Some("null"));
        assert_eq!(
            editor.set_field(tin, "atomicRadius", "145").unwrap(),
            FieldAction::Replaced
        );
        let out = editor.finish();
        assert_eq!(
            out,
            TS.replace("atomicNumber: 50,\n    atomicRadius: null", "atomicNumber: 50,\n    atomicRadius: 145")
        );
    }

    #[test]
    fn inserts_after_the_anchor_with_mirrored_layout() {
        let mut editor = StructuralEditor::new(TS, "uses").unwrap();
        let tin = editor.locate(50).unwrap();
        editor
            .set_field(tin, "alternativeNames", "{ af: 'Tin', latin: 'Stannum' }")
            .unwrap();
        editor.set_field(tin, "valenceElectrons", "4").unwrap();
        let out = editor.finish();

        assert!(out.contains(
            "    uses: [],\n    alternativeNames: { af: 'Tin', latin: 'Stannum' },\n    valenceElectrons: 4,\n  },\n  {\n    symbol: 'Sb'"
        ));
    }

    #[test]
    fn insertion_keeps_crlf_line_endings() {
        let crlf = TS.replace('\n', "\r\n");
        let mut editor = StructuralEditor::new(&crlf, "uses").unwrap();
        let tin = editor.locate(50).unwrap();
        editor.set_field(tin, "valenceElectrons", "4").unwrap();
        let out = editor.finish();

        assert!(out.contains("    uses: [],\r\n    valenceElectrons: 4,\r\n  },"));
        assert_eq!(out.matches('\n').count(), out.matches("\r\n").count());
    }

    #[test]
    fn edits_leave_neighbouring_records_byte_identical() {
        let mut editor = StructuralEditor::new(TS, "uses").unwrap();
        let tin = editor.locate(50).unwrap();
        editor.set_field(tin, "atomicRadius", "145").unwrap();
        editor.set_field(tin, "category", "'post-transition'").unwrap();
        let out = editor.finish();

        let before = CollectionScan::parse(TS).unwrap();
        let after = CollectionScan::parse(&out).unwrap();
        for z in [49, 51] {
            let old = before.records_for(z).next().unwrap().1.span.slice(TS);
            let new = after.records_for(z).next().unwrap().1.span.slice(&out);
            assert_eq!(old, new);
        }
        let prefix_len = before.records_for(50).next().unwrap().1.span.start;
        assert_eq!(&out[..prefix_len], &TS[..prefix_len]);
    }

    #[test]
    fn identical_value_is_unchanged_and_repeat_insert_is_idempotent() {
        let mut editor = StructuralEditor::new(TS, "uses").unwrap();
        let tin = editor.locate(50).unwrap();
        assert_eq!(
            editor.set_field(tin, "atomicRadius", " null ").unwrap(),
            FieldAction::Unchanged
        );
        editor.set_field(tin, "valenceElectrons", "4").unwrap();
        let once = editor.finish();

        let mut editor = StructuralEditor::new(&once, "uses").unwrap();
        let tin = editor.locate(50).unwrap();
        assert_eq!(
            editor.set_field(tin, "valenceElectrons", "4").unwrap(),
            FieldAction::Unchanged
        );
        assert!(!editor.has_pending_edits());
        assert_eq!(editor.finish(), once);
    }

    #[test]
    fn missing_anchor_falls_back_to_the_last_field() {
        let text = "x = [{ atomicNumber: 3, symbol: 'Li' }]";
        let mut editor = StructuralEditor::new(text, "uses").unwrap();
        let li = editor.locate(3).unwrap();
        editor.set_field(li, "period", "2").unwrap();
        assert_eq!(
            editor.finish(),
            "x = [{ atomicNumber: 3, symbol: 'Li', period: 2 }]"
        );
    }

    #[test]
    fn json_records_get_quoted_keys_and_a_leading_comma() {
        let json = "[\n  {\n    \"atomicNumber\": 1,\n    \"uses\": []\n  }\n]\n";
        let mut editor = StructuralEditor::new(json, "uses").unwrap();
        assert_eq!(editor.literal_style(), LiteralStyle::Json);
        let h = editor.locate(1).unwrap();
        editor.set_field(h, "valenceElectrons", "1").unwrap();
        assert_eq!(
            editor.finish(),
            "[\n  {\n    \"atomicNumber\": 1,\n    \"uses\": [],\n    \"valenceElectrons\": 1\n  }\n]\n"
        );
    }

    #[test]
    fn locate_reports_missing_duplicate_and_malformed_records() {
        let text = "x = [
  { atomicNumber: 1, uses: [] },
  { atomicNumber: 1, uses: [] },
  { atomicNumber: 2, uses: [1, 2 },
]";
        let editor = StructuralEditor::new(text, "uses").unwrap();
        assert_eq!(editor.locate(3), Err(PatchError::NotFound(3)));
        assert_eq!(
            editor.locate(1),
            Err(PatchError::Ambiguous {
                atomic_number: 1,
                count: 2
            })
        );
        assert!(matches!(
            editor.locate(2),
            Err(PatchError::MalformedRecord {
                atomic_number: 2,
                ..
            })
        ));
    }

    #[test]
    fn invalid_literals_and_names_are_rejected() {
        for bad in ["", "1, foo: 2", "[1, 2", "'open", "1 // note", "]"] {
            assert!(
                matches!(validate_literal("x", bad), Err(PatchError::InvalidLiteral { .. })),
                "accepted {:?}",
                bad
            );
        }
        assert_eq!(validate_literal("x", " [3, 2] "), Ok("[3, 2]"));
        assert_eq!(validate_literal("x", "{ af: 'Tin' }"), Ok("{ af: 'Tin' }"));

        let mut editor = StructuralEditor::new(TS, "uses").unwrap();
        let tin = editor.locate(50).unwrap();
        assert_eq!(
            editor.set_field(tin, "atomic-radius", "1"),
            Err(PatchError::InvalidFieldName("atomic-radius".into()))
        );
    }

    #[test]
    fn set_fields_is_all_or_nothing() {
        let mut editor = StructuralEditor::new(TS, "uses").unwrap();
        let tin = editor.locate(50).unwrap();
        let result = editor.set_fields(tin, [("atomicRadius", "145"), ("group", "[14")]);
        assert!(result.is_err());
        assert!(!editor.has_pending_edits());
        assert_eq!(editor.finish(), TS);
    }
}
