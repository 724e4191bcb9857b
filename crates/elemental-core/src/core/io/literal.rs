use crate::core::models::category::Category;
use crate::core::models::element::{AlternativeNames, Element};
use std::fmt::Write;

/// Quoting conventions of the two artifact formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralStyle {
    /// Single-quoted strings and bare object keys.
    TypeScript,
    /// Double-quoted strings and keys.
    Json,
}

/// A value as it appears in an emitted artifact.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Integer(i64),
    Number(f64),
    String(String),
    Array(Vec<Literal>),
    Object(Vec<(String, Literal)>),
}

impl Literal {
    /// Renders the value on a single line.
    pub fn render(&self, style: LiteralStyle) -> String {
        let mut out = String::new();
        self.write_inline(&mut out, style);
        out
    }

    fn write_inline(&self, out: &mut String, style: LiteralStyle) {
        match self {
            Literal::Null => out.push_str("null"),
            Literal::Integer(i) => {
                let _ = write!(out, "{}", i);
            }
            Literal::Number(n) if n.is_finite() => {
                let _ = write!(out, "{}", n);
            }
            Literal::Number(_) => out.push_str("null"),
            Literal::String(s) => out.push_str(&quote(s, style)),
            Literal::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_inline(out, style);
                }
                out.push(']');
            }
            Literal::Object(entries) if entries.is_empty() => out.push_str("{}"),
            Literal::Object(entries) => {
                out.push_str("{ ");
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&render_key(key, style));
                    out.push_str(": ");
                    value.write_inline(out, style);
                }
                out.push_str(" }");
            }
        }
    }
}

/// Quotes and escapes a string for the given style.
pub fn quote(value: &str, style: LiteralStyle) -> String {
    let delimiter = match style {
        LiteralStyle::TypeScript => '\'',
        LiteralStyle::Json => '"',
    };
    let mut out = String::with_capacity(value.len() + 2);
    out.push(delimiter);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

/// Renders an object key: bare in TypeScript when it is an identifier, quoted otherwise.
pub fn render_key(key: &str, style: LiteralStyle) -> String {
    match style {
        LiteralStyle::TypeScript if is_identifier(key) => key.to_string(),
        _ => quote(key, style),
    }
}

/// Returns `true` for ASCII identifiers such as `atomicRadius` or `_private`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Number(value)
    }
}

impl From<u8> for Literal {
    fn from(value: u8) -> Self {
        Literal::Integer(i64::from(value))
    }
}

impl From<u32> for Literal {
    fn from(value: u32) -> Self {
        Literal::Integer(i64::from(value))
    }
}

impl From<i8> for Literal {
    fn from(value: i8) -> Self {
        Literal::Integer(i64::from(value))
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        value.map_or(Literal::Null, Into::into)
    }
}

impl<T: Clone + Into<Literal>> From<&[T]> for Literal {
    fn from(values: &[T]) -> Self {
        Literal::Array(values.iter().cloned().map(Into::into).collect())
    }
}

impl From<Category> for Literal {
    fn from(value: Category) -> Self {
        Literal::String(value.as_str().to_string())
    }
}

impl From<&AlternativeNames> for Literal {
    fn from(names: &AlternativeNames) -> Self {
        Literal::Object(
            names
                .iter()
                .map(|(locale, name)| (locale.as_str().to_string(), Literal::from(name)))
                .collect(),
        )
    }
}

/// The fields of one record in emission order.
///
/// `alternativeNames` is only present when the element has at least one entry.
pub fn element_fields(element: &Element) -> Vec<(&'static str, Literal)> {
    let mut fields = vec![
        ("symbol", Literal::from(element.symbol.as_str())),
        ("name", Literal::from(element.name.as_str())),
        ("atomicNumber", Literal::from(element.atomic_number)),
        ("atomicMass", Literal::from(element.atomic_mass)),
        ("electronConfig", Literal::from(element.electron_config.as_str())),
        ("group", Literal::from(element.group)),
        ("period", Literal::from(element.period)),
        ("category", Literal::from(element.category)),
        ("electronegativity", Literal::from(element.electronegativity)),
        ("ionizationEnergy", Literal::from(element.ionization_energy)),
        ("electronAffinity", Literal::from(element.electron_affinity)),
        ("atomicRadius", Literal::from(element.atomic_radius)),
        ("oxidationStates", Literal::from(element.oxidation_states.as_slice())),
        ("valenceElectrons", Literal::from(element.valence_electrons)),
        (
            "uses",
            Literal::Array(element.uses.iter().map(|u| Literal::from(u.as_str())).collect()),
        ),
    ];
    if let Some(names) = &element.alternative_names {
        fields.push(("alternativeNames", Literal::from(names)));
    }
    fields
}
