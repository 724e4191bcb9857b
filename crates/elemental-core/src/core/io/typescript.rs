use super::literal::{LiteralStyle, element_fields, render_key};
use super::traits::DatasetEmitter;
use crate::core::models::element::ElementTable;
use std::io::{self, Write};

/// Import line at the top of the module; the `Element` type lives with the front end.
pub const TYPE_IMPORT: &str = "import type { Element } from '../types/element';";

const RECORD_INDENT: &str = "  ";
const FIELD_INDENT: &str = "    ";

const HELPERS: &str = "\
// Helper function to get element by symbol
export const getElementBySymbol = (symbol: string): Element | undefined => {
  return ELEMENTS.find((el) => el.symbol === symbol);
};

// Helper function to get element by atomic number
export const getElementByAtomicNumber = (atomicNumber: number): Element | undefined => {
  return ELEMENTS.find((el) => el.atomicNumber === atomicNumber);
};

// Helper function to get all elements in a category
export const getElementsByCategory = (category: Element['category']): readonly Element[] => {
  return ELEMENTS.filter((el) => el.category === category);
};
";

/// The literal TypeScript module consumed by the front end.
///
/// Records are written one field per line with a trailing comma after every field
/// and every record, followed by the three lookup helpers.
pub struct TypeScriptModule;

impl DatasetEmitter for TypeScriptModule {
    type Error = io::Error;

    fn write_to(table: &ElementTable, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "{}", TYPE_IMPORT)?;
        writeln!(writer)?;
        writeln!(writer, "export const ELEMENTS: readonly Element[] = [")?;

        for element in table {
            writeln!(writer, "{}{{", RECORD_INDENT)?;
            for (key, value) in element_fields(element) {
                writeln!(
                    writer,
                    "{}{}: {},",
                    FIELD_INDENT,
                    render_key(key, LiteralStyle::TypeScript),
                    value.render(LiteralStyle::TypeScript)
                )?;
            }
            writeln!(writer, "{}}},", RECORD_INDENT)?;
        }

        writeln!(writer, "] as const;")?;
        writeln!(writer)?;
        write!(writer, "{}", HELPERS)?;
        Ok(())
    }
}
