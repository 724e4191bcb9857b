/// Afrikaans element names, indexed by `atomic_number - 1`.
#[rustfmt::skip]
pub static AFRIKAANS_NAMES: [&str; 118] = [
    "Waterstof", "Helium", "Litium", "Berillium", "Boor", "Koolstof",
    "Stikstof", "Suurstof", "Fluoor", "Neon", "Natrium", "Magnesium",
    "Aluminium", "Silikon", "Fosfor", "Swawel", "Chloor", "Argon",
    "Kalium", "Kalsium", "Skandium", "Titaan", "Vanadium", "Chroom",
    "Mangaan", "Yster", "Kobalt", "Nikkel", "Koper", "Sink",
    "Gallium", "Germanium", "Arseen", "Seleen", "Broom", "Kripton",
    "Rubidium", "Strontium", "Yttrium", "Sirkonium", "Niobium", "Molibdeen",
    "Teknesium", "Rutenium", "Rodium", "Palladium", "Silwer", "Kadmium",
    "Indium", "Tin", "Antimoon", "Telluur", "Jodium", "Xenon",
    "Sesium", "Barium", "Lantaan", "Serium", "Praseodimium", "Neodimium",
    "Prometium", "Samarium", "Europium", "Gadolinium", "Terbium", "Disprosium",
    "Holmium", "Erbium", "Tulium", "Ytterbium", "Lutetium", "Hafnium",
    "Tantaal", "Wolfram", "Renium", "Osmium", "Iridium", "Platina",
    "Goud", "Kwik", "Tallium", "Lood", "Bismut", "Polonium",
    "Astaat", "Radon", "Francium", "Radium", "Aktinium", "Torium",
    "Protaktinium", "Uraan", "Neptunium", "Plutonium", "Amerikium", "Curium",
    "Berkelium", "Kalifornium", "Einsteinium", "Fermium", "Mendelevium", "Nobelium",
    "Lawrencium", "Rutherfordium", "Dubnium", "Seaborgium", "Bohrium", "Hassium",
    "Meitnerium", "Darmstadtium", "Roentgenium", "Copernicium", "Nihonium", "Flerovium",
    "Moscovium", "Livermorium", "Tennessine", "Oganesson",
];

/// Historical Latin names of the eleven elements whose symbol derives from them.
pub static LATIN_NAMES: [(u32, &str); 11] = [
    (11, "Natrium"),
    (19, "Kalium"),
    (26, "Ferrum"),
    (29, "Cuprum"),
    (47, "Argentum"),
    (50, "Stannum"),
    (51, "Stibium"),
    (74, "Wolfram"),
    (79, "Aurum"),
    (80, "Hydrargyrum"),
    (82, "Plumbum"),
];

pub fn afrikaans_name(atomic_number: u32) -> Option<&'static str> {
    let index = usize::try_from(atomic_number).ok()?.checked_sub(1)?;
    AFRIKAANS_NAMES.get(index).copied()
}

pub fn latin_name(atomic_number: u32) -> Option<&'static str> {
    LATIN_NAMES
        .iter()
        .find(|(z, _)| *z == atomic_number)
        .map(|(_, name)| *name)
}
