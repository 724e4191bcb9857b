use crate::core::models::category::Category;
use crate::core::models::element::Element;
use crate::core::models::raw::RawElement;

#[rustfmt::skip]
const SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca",
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr",
    "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn",
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd",
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb",
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th",
    "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm",
    "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds",
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

const METALLOIDS: [u32; 6] = [5, 14, 32, 33, 51, 52];
const NONMETALS: [u32; 6] = [6, 7, 8, 15, 16, 34];

/// A minimal valid record for model-level tests.
pub fn sample_element(atomic_number: u32, symbol: &str) -> Element {
    Element {
        symbol: symbol.to_string(),
        name: symbol.to_string(),
        atomic_number,
        atomic_mass: f64::from(atomic_number) * 2.0,
        electron_config: "1s¹".to_string(),
        group: Some(1),
        period: 1,
        category: Category::Nonmetal,
        electronegativity: None,
        ionization_energy: None,
        electron_affinity: None,
        atomic_radius: None,
        oxidation_states: vec![1],
        valence_electrons: 1,
        uses: Vec::new(),
        alternative_names: None,
    }
}

fn period_and_position(atomic_number: u32) -> (u8, u32) {
    match atomic_number {
        1..=2 => (1, atomic_number - 1),
        3..=10 => (2, atomic_number - 3),
        11..=18 => (3, atomic_number - 11),
        19..=36 => (4, atomic_number - 19),
        37..=54 => (5, atomic_number - 37),
        55..=86 => (6, atomic_number - 55),
        _ => (7, atomic_number - 87),
    }
}

fn group_of(atomic_number: u32) -> Option<u8> {
    let (period, position) = period_and_position(atomic_number);
    match (period, position) {
        (1, 0) => Some(1),
        (1, _) => Some(18),
        (2 | 3, 0..=1) => Some(position as u8 + 1),
        (2 | 3, _) => Some(position as u8 + 11),
        (4 | 5, _) => Some(position as u8 + 1),
        (_, 0..=1) => Some(position as u8 + 1),
        (_, 2..=16) => None,
        (_, _) => Some(position as u8 - 13),
    }
}

fn feed_label(atomic_number: u32, period: u8, group: Option<u8>) -> &'static str {
    match group {
        _ if atomic_number == 1 => "diatomic nonmetal",
        None if period == 6 => "lanthanide",
        None => "actinide",
        Some(1) => "alkali metal",
        Some(2) => "alkaline earth metal",
        Some(3..=12) => "transition metal",
        Some(17) => "diatomic nonmetal",
        Some(18) => "noble gas",
        _ if METALLOIDS.contains(&atomic_number) => "metalloid",
        _ if NONMETALS.contains(&atomic_number) => "polyatomic nonmetal",
        _ => "post-transition metal",
    }
}

/// A complete, plausible feed covering atomic numbers 1..=118 in ascending order.
pub fn synthetic_feed() -> Vec<RawElement> {
    SYMBOLS
        .iter()
        .enumerate()
        .map(|(index, symbol)| {
            let number = index as u32 + 1;
            let (period, _) = period_and_position(number);
            let group = group_of(number);
            RawElement {
                number: i64::from(number),
                symbol: symbol.to_string(),
                name: format!("Element {}", symbol),
                atomic_mass: Some(f64::from(number) * 2.0 + 0.008),
                group: group.map(i64::from),
                period: Some(i64::from(period)),
                category: Some(feed_label(number, period, group).to_string()),
                electronegativity_pauling: None,
                ionization_energies: vec![500.0 + f64::from(number)],
                electron_affinity: None,
                electron_configuration: Some(format!("[Core] {}s2", period)),
            }
        })
        .collect()
}

/// Serializes raw entries back into the feed's `{ "elements": [...] }` document.
pub fn feed_document(raw: &[RawElement]) -> String {
    let elements: Vec<_> = raw
        .iter()
        .map(|raw| {
            serde_json::json!({
                "number": raw.number,
                "symbol": raw.symbol,
                "name": raw.name,
                "atomic_mass": raw.atomic_mass,
                "group": raw.group,
                "period": raw.period,
                "category": raw.category,
                "electronegativity_pauling": raw.electronegativity_pauling,
                "ionization_energies": raw.ionization_energies,
                "electron_affinity": raw.electron_affinity,
                "electron_configuration": raw.electron_configuration,
            })
        })
        .collect();
    serde_json::json!({ "elements": elements }).to_string()
}

#[test]
fn synthetic_feed_places_known_elements() {
    let feed = synthetic_feed();
    let tin = &feed[49];
    assert_eq!((tin.symbol.as_str(), tin.group, tin.period), ("Sn", Some(14), Some(5)));
    let gold = &feed[78];
    assert_eq!((gold.symbol.as_str(), gold.group), ("Au", Some(11)));
    assert_eq!(feed[56].group, None);
    assert_eq!(feed[117].group, Some(18));
    assert_eq!(feed[8].group, Some(17));
}
