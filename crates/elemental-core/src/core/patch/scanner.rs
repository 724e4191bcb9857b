use thiserror::Error;

/// Key of the field that identifies a record.
pub const RECORD_KEY_FIELD: &str = "atomicNumber";

/// A half-open byte range into the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Paren,
    Bracket,
    Brace,
}

impl Delimiter {
    fn closer(self) -> char {
        match self {
            Delimiter::Paren => ')',
            Delimiter::Bracket => ']',
            Delimiter::Brace => '}',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Open(Delimiter),
    Close(Delimiter),
    Comma,
    Colon,
    Equals,
    Str { quote: u8, terminated: bool },
    Comment { terminated: bool },
    Word,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Structural damage found inside one record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanIssue {
    #[error("unterminated string starting at byte {offset}")]
    UnterminatedString { offset: usize },
    #[error("unterminated comment starting at byte {offset}")]
    UnterminatedComment { offset: usize },
    #[error("expected '{expected}' but found '{found}' at byte {offset}")]
    MismatchedCloser {
        offset: usize,
        expected: char,
        found: char,
    },
    #[error("record opened at byte {offset} is never closed")]
    UnclosedRecord { offset: usize },
    #[error("field key at byte {offset} is not followed by ':'")]
    MissingColon { offset: usize },
    #[error("unexpected token at byte {offset}")]
    UnexpectedToken { offset: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("no record collection found (expected a leading '[' or '= [')")]
    CollectionNotFound,
}

/// One top-level `key: value` entry of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNode {
    /// The key without quotes.
    pub key: String,
    /// The key as written, including quotes.
    pub key_span: Span,
    /// `Some('\'')` or `Some('"')` for quoted keys, `None` for bare identifiers.
    pub key_quote: Option<char>,
    /// The value with surrounding whitespace trimmed.
    pub value_span: Span,
    /// From the key to the value, or to the trailing comma when there is one.
    pub entry_span: Span,
    pub has_trailing_comma: bool,
}

/// One `{ ... }` record of the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordNode {
    pub span: Span,
    pub atomic_number: Option<u32>,
    pub fields: Vec<FieldNode>,
    pub issue: Option<ScanIssue>,
}

impl RecordNode {
    pub fn field(&self, name: &str) -> Option<&FieldNode> {
        self.fields.iter().find(|f| f.key == name)
    }

    pub fn is_malformed(&self) -> bool {
        self.issue.is_some()
    }
}

/// The record collection of an artifact, split into records and fields.
///
/// Parsing never fails on damaged records: each one carries its own [`ScanIssue`] and
/// the scan resynchronizes at the next record boundary.
#[derive(Debug, Clone)]
pub struct CollectionScan<'a> {
    text: &'a str,
    span: Span,
    records: Vec<RecordNode>,
}

impl<'a> CollectionScan<'a> {
    pub fn parse(text: &'a str) -> Result<Self, ScanError> {
        let tokens: Vec<Token> = tokenize(text)
            .into_iter()
            .filter(|t| !matches!(t.kind, TokenKind::Comment { terminated: true }))
            .collect();
        let open = find_collection(&tokens).ok_or(ScanError::CollectionNotFound)?;

        let mut records = Vec::new();
        let mut stray: Vec<Delimiter> = Vec::new();
        let mut i = open + 1;
        let mut end = text.len();
        while i < tokens.len() {
            let token = tokens[i];
            match token.kind {
                TokenKind::Open(Delimiter::Brace) if stray.is_empty() => {
                    let (record, next) = parse_record(text, &tokens, i);
                    records.push(record);
                    i = next;
                    continue;
                }
                TokenKind::Close(Delimiter::Bracket) if stray.is_empty() => {
                    end = token.span.end;
                    break;
                }
                // Leftovers of a damaged record: keep them balanced so their closers
                // are not mistaken for the end of the collection.
                TokenKind::Open(d) if d != Delimiter::Brace => stray.push(d),
                TokenKind::Close(d) => {
                    if let Some(pos) = stray.iter().rposition(|open| *open == d) {
                        stray.truncate(pos);
                    }
                }
                _ => {}
            }
            i += 1;
        }

        Ok(Self {
            text,
            span: Span::new(tokens[open].span.start, end),
            records,
        })
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn records(&self) -> &[RecordNode] {
        &self.records
    }

    /// All records whose key field reads `atomic_number`, in text order.
    pub fn records_for(&self, atomic_number: u32) -> impl Iterator<Item = (usize, &RecordNode)> {
        self.records
            .iter()
            .enumerate()
            .filter(move |(_, r)| r.atomic_number == Some(atomic_number))
    }
}

/// Finds the opening `[` of the record collection.
///
/// A leading `[` (JSON) wins; otherwise the first `[` directly after a top-level `=`.
fn find_collection(tokens: &[Token]) -> Option<usize> {
    if matches!(
        tokens.first().map(|t| t.kind),
        Some(TokenKind::Open(Delimiter::Bracket))
    ) {
        return Some(0);
    }

    let mut depth = 0usize;
    let mut after_equals = false;
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::Comment { .. } => continue,
            TokenKind::Open(Delimiter::Bracket) if depth == 0 && after_equals => return Some(i),
            _ => {}
        }
        if depth == 0 {
            after_equals = token.kind == TokenKind::Equals;
        }
        match token.kind {
            TokenKind::Open(_) => depth += 1,
            TokenKind::Close(_) => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

enum FieldState {
    ExpectKey,
    ExpectColon {
        key: String,
        key_span: Span,
        key_quote: Option<char>,
    },
    InValue {
        key: String,
        key_span: Span,
        key_quote: Option<char>,
        value: Option<Span>,
    },
    /// Skipping to the next depth-1 comma after a structural error.
    Resync,
}

#[derive(Clone, Copy)]
enum Phase {
    Key,
    Colon,
    Value,
    Resync,
}

impl FieldState {
    fn phase(&self) -> Phase {
        match self {
            FieldState::ExpectKey => Phase::Key,
            FieldState::ExpectColon { .. } => Phase::Colon,
            FieldState::InValue { .. } => Phase::Value,
            FieldState::Resync => Phase::Resync,
        }
    }
}

fn note(issue: &mut Option<ScanIssue>, found: ScanIssue) {
    if issue.is_none() {
        *issue = Some(found);
    }
}

/// Parses the record whose `{` is `tokens[open]`. Returns the record and the index of
/// the first token after it.
fn parse_record(text: &str, tokens: &[Token], open: usize) -> (RecordNode, usize) {
    let start = tokens[open].span.start;
    let mut stack = vec![Delimiter::Brace];
    let mut fields = Vec::new();
    let mut issue: Option<ScanIssue> = None;
    let mut state = FieldState::ExpectKey;
    let mut end = text.len();
    let mut next = tokens.len();
    let mut closed = false;

    let mut i = open + 1;
    while i < tokens.len() {
        let token = tokens[i];
        let offset = token.span.start;
        let unterminated_string = matches!(
            token.kind,
            TokenKind::Str {
                terminated: false,
                ..
            }
        );
        if unterminated_string {
            note(&mut issue, ScanIssue::UnterminatedString { offset });
        }
        if token.kind == (TokenKind::Comment { terminated: false }) {
            note(&mut issue, ScanIssue::UnterminatedComment { offset });
        }

        if stack.len() > 1 {
            if let TokenKind::Close(d) = token.kind {
                let top = stack[stack.len() - 1];
                if top != d {
                    note(
                        &mut issue,
                        ScanIssue::MismatchedCloser {
                            offset,
                            expected: top.closer(),
                            found: d.closer(),
                        },
                    );
                    match stack.iter().rposition(|open| *open == d) {
                        Some(pos) => stack.truncate(pos + 1),
                        None => {
                            // Opened outside this record; leave it for the collection.
                            finish_field(&mut state, &mut fields, None);
                            end = last_end(tokens, open, i);
                            next = i;
                            break;
                        }
                    }
                }
                stack.pop();
                if stack.is_empty() {
                    finish_field(&mut state, &mut fields, None);
                    end = token.span.end;
                    next = i + 1;
                    closed = true;
                    break;
                }
            } else if let TokenKind::Open(d) = token.kind {
                stack.push(d);
            }
            extend_value(&mut state, token.span);
            i += 1;
            continue;
        }

        // Depth 1: directly inside the record braces.
        match (token.kind, state.phase()) {
            (TokenKind::Close(Delimiter::Brace), _) => {
                finish_field(&mut state, &mut fields, None);
                end = token.span.end;
                next = i + 1;
                closed = true;
                break;
            }
            (TokenKind::Close(_), _) => {
                // Never opened in this record: the collection's own closer.
                finish_field(&mut state, &mut fields, None);
                end = last_end(tokens, open, i);
                next = i;
                break;
            }
            (TokenKind::Open(Delimiter::Brace), Phase::Key) => {
                // The next record begins before this one was closed.
                end = last_end(tokens, open, i);
                next = i;
                break;
            }
            (TokenKind::Comma, Phase::Value) => {
                finish_field(&mut state, &mut fields, Some(token.span));
            }
            (TokenKind::Comma, Phase::Key | Phase::Resync) => state = FieldState::ExpectKey,
            (TokenKind::Word | TokenKind::Str { .. }, Phase::Key) => {
                let raw = token.span.slice(text);
                let (key, key_quote) = match token.kind {
                    TokenKind::Str { quote, .. } => (unquote(raw).to_string(), Some(quote as char)),
                    _ => (raw.to_string(), None),
                };
                state = FieldState::ExpectColon {
                    key,
                    key_span: token.span,
                    key_quote,
                };
            }
            (TokenKind::Colon, Phase::Colon) => {
                if let FieldState::ExpectColon {
                    key,
                    key_span,
                    key_quote,
                } = std::mem::replace(&mut state, FieldState::Resync)
                {
                    state = FieldState::InValue {
                        key,
                        key_span,
                        key_quote,
                        value: None,
                    };
                }
            }
            (kind, Phase::Colon) => {
                if let FieldState::ExpectColon { key_span, .. } = &state {
                    note(
                        &mut issue,
                        ScanIssue::MissingColon {
                            offset: key_span.start,
                        },
                    );
                }
                state = match kind {
                    TokenKind::Comma => FieldState::ExpectKey,
                    _ => FieldState::Resync,
                };
                if let TokenKind::Open(d) = kind {
                    stack.push(d);
                }
            }
            (kind, Phase::Value) => {
                if let TokenKind::Open(d) = kind {
                    stack.push(d);
                }
                extend_value(&mut state, token.span);
                if unterminated_string {
                    // The string swallowed the rest of its line, including any comma.
                    finish_field(&mut state, &mut fields, None);
                }
            }
            (kind, Phase::Key) => {
                note(&mut issue, ScanIssue::UnexpectedToken { offset });
                state = FieldState::Resync;
                if let TokenKind::Open(d) = kind {
                    stack.push(d);
                }
            }
            (kind, Phase::Resync) => {
                if let TokenKind::Open(d) = kind {
                    stack.push(d);
                }
            }
        }
        i += 1;
    }

    if !closed {
        if i >= tokens.len() {
            finish_field(&mut state, &mut fields, None);
        }
        note(&mut issue, ScanIssue::UnclosedRecord { offset: start });
    }

    let atomic_number = fields
        .iter()
        .find(|f| f.key == RECORD_KEY_FIELD)
        .and_then(|f| f.value_span.slice(text).trim().parse::<u32>().ok());

    (
        RecordNode {
            span: Span::new(start, end),
            atomic_number,
            fields,
            issue,
        },
        next,
    )
}

fn last_end(tokens: &[Token], open: usize, before: usize) -> usize {
    if before > open + 1 {
        tokens[before - 1].span.end
    } else {
        tokens[open].span.end
    }
}

fn extend_value(state: &mut FieldState, span: Span) {
    if let FieldState::InValue { value, .. } = state {
        *value = Some(match value {
            Some(existing) => Span::new(existing.start, span.end),
            None => span,
        });
    }
}

fn finish_field(state: &mut FieldState, fields: &mut Vec<FieldNode>, comma: Option<Span>) {
    let previous = std::mem::replace(state, FieldState::ExpectKey);
    if let FieldState::InValue {
        key,
        key_span,
        key_quote,
        value: Some(value_span),
    } = previous
    {
        let entry_end = comma.map_or(value_span.end, |c| c.end);
        fields.push(FieldNode {
            key,
            key_span,
            key_quote,
            value_span,
            entry_span: Span::new(key_span.start, entry_end),
            has_trailing_comma: comma.is_some(),
        });
    }
}

fn unquote(raw: &str) -> &str {
    let inner = raw.get(1..).unwrap_or("");
    match raw.as_bytes().first() {
        Some(q) if inner.as_bytes().last() == Some(q) => &inner[..inner.len() - 1],
        _ => inner,
    }
}

fn is_special(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')' | b'[' | b']' | b'{' | b'}' | b',' | b':' | b';' | b'\'' | b'"' | b'`' | b'='
            | b'<' | b'>' | b'!' | b'/'
    )
}

/// Splits `text` into structural tokens. Whitespace is dropped; comments are kept so
/// callers can tell whether a value contains one.
pub(crate) fn tokenize(text: &str) -> Vec<Token> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let start = i;
        let kind = match b {
            b if b.is_ascii_whitespace() => {
                i += 1;
                continue;
            }
            b'(' => single(&mut i, TokenKind::Open(Delimiter::Paren)),
            b'[' => single(&mut i, TokenKind::Open(Delimiter::Bracket)),
            b'{' => single(&mut i, TokenKind::Open(Delimiter::Brace)),
            b')' => single(&mut i, TokenKind::Close(Delimiter::Paren)),
            b']' => single(&mut i, TokenKind::Close(Delimiter::Bracket)),
            b'}' => single(&mut i, TokenKind::Close(Delimiter::Brace)),
            b',' => single(&mut i, TokenKind::Comma),
            b':' => single(&mut i, TokenKind::Colon),
            b';' => single(&mut i, TokenKind::Word),
            b'\'' | b'"' | b'`' => {
                let terminated = scan_string(bytes, &mut i, b);
                TokenKind::Str {
                    quote: b,
                    terminated,
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                TokenKind::Comment { terminated: true }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                let mut terminated = false;
                while i < bytes.len() {
                    if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
                        i += 2;
                        terminated = true;
                        break;
                    }
                    i += 1;
                }
                TokenKind::Comment { terminated }
            }
            b'=' | b'<' | b'>' | b'!' => {
                while i < bytes.len() && matches!(bytes[i], b'=' | b'<' | b'>' | b'!') {
                    i += 1;
                }
                if &text[start..i] == "=" {
                    TokenKind::Equals
                } else {
                    TokenKind::Word
                }
            }
            b'/' => single(&mut i, TokenKind::Word),
            _ => {
                while i < bytes.len() && !bytes[i].is_ascii_whitespace() && !is_special(bytes[i]) {
                    i += 1;
                }
                TokenKind::Word
            }
        };
        tokens.push(Token {
            kind,
            span: Span::new(start, i),
        });
    }

    tokens
}

fn single(i: &mut usize, kind: TokenKind) -> TokenKind {
    *i += 1;
    kind
}

/// Advances past a string literal. Single- and double-quoted strings cannot span
/// lines, so an unterminated one stops at the end of its line.
fn scan_string(bytes: &[u8], i: &mut usize, quote: u8) -> bool {
    *i += 1;
    while *i < bytes.len() {
        match bytes[*i] {
            b'\\' => *i += 2,
            b'\n' if quote != b'`' => return false,
            b if b == quote => {
                *i += 1;
                return true;
            }
            _ => *i += 1,
        }
    }
    *i = bytes.len();
    false
}
