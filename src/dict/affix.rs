use rustc_hash::FxHashMap;

/// A named affix class consulted by the external tokenizer (§6 "An
/// affix table with named classes"), grounded on
/// `dict-common/dict-affix-impl.c`'s `afdict_classname` table.
///
/// §5.2 of SPEC_FULL.md: plain data the core can type-check lookups
/// against; the affix *file* parser stays external (§1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AffixClass {
    Quotes,
    Bullets,
    Units,
    Prefix,
    Suffix,
    /// The "sane morphism" regex class — stored as a raw pattern string
    /// in [`AffixTable`] rather than a compiled regex, since compiling
    /// and running it is a tokenizer concern (§1).
    SaneMorphism,
}

/// Read-only view over a dictionary's affix classes (§6).
pub trait AffixTable {
    fn class(&self, class: AffixClass) -> &[String];
}

/// A plain in-memory [`AffixTable`] — what a dictionary builder or test
/// fixture populates directly.
#[derive(Debug, Default)]
pub struct MapAffixTable {
    classes: FxHashMap<AffixClass, Vec<String>>,
}

impl MapAffixTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_class(&mut self, class: AffixClass, members: Vec<String>) {
        self.classes.insert(class, members);
    }
}

impl AffixTable for MapAffixTable {
    fn class(&self, class: AffixClass) -> &[String] {
        self.classes.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }
}
