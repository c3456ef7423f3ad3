use std::collections::BTreeMap;

use crate::error::DeckError;

/// Named shortcuts to fixed slide indices, plus digit keys bound to those names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionTable {
    sections: BTreeMap<String, usize>,
    shortcuts: BTreeMap<char, String>,
}

/// Section names are matched case-insensitively, with spaces and dashes as underscores.
pub fn normalize_section_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

impl SectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manifest(
        sections: &BTreeMap<String, usize>,
        shortcuts: &BTreeMap<String, String>,
        total_slides: usize,
    ) -> Result<Self, DeckError> {
        let mut table = Self::new();

        for (name, &index) in sections {
            if index < 1 || index > total_slides {
                return Err(DeckError::SectionOutOfRange {
                    name: name.clone(),
                    index,
                    total: total_slides,
                });
            }
            table.insert(name, index);
        }

        for (key, section) in shortcuts {
            let digit = match key.chars().collect::<Vec<_>>().as_slice() {
                [c @ '1'..='9'] => *c,
                _ => return Err(DeckError::InvalidShortcut(key.clone())),
            };
            let section = normalize_section_name(section);
            if !table.sections.contains_key(&section) {
                return Err(DeckError::UnknownShortcutSection {
                    key: key.clone(),
                    section,
                });
            }
            table.shortcuts.insert(digit, section);
        }

        Ok(table)
    }

    pub fn insert(&mut self, name: &str, index: usize) {
        self.sections.insert(normalize_section_name(name), index);
    }

    pub fn lookup(&self, name: &str) -> Option<usize> {
        self.sections.get(&normalize_section_name(name)).copied()
    }

    pub fn shortcut(&self, digit: char) -> Option<&str> {
        self.shortcuts.get(&digit).map(String::as_str)
    }

    /// Name of the section whose first slide is `index`, if any.
    pub fn section_starting_at(&self, index: usize) -> Option<&str> {
        self.sections
            .iter()
            .find(|(_, start)| **start == index)
            .map(|(name, _)| name.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SectionTable {
        let sections = BTreeMap::from([
            ("TITLE".to_string(), 1),
            ("CASE_STUDIES".to_string(), 20),
            ("WOMENS_SAFETY".to_string(), 48),
        ]);
        let shortcuts = BTreeMap::from([("4".to_string(), "womens_safety".to_string())]);
        SectionTable::from_manifest(&sections, &shortcuts, 50).unwrap()
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = table();
        assert_eq!(table.lookup("womens_safety"), Some(48));
        assert_eq!(table.lookup("Case Studies"), Some(20));
        assert_eq!(table.lookup("case-studies"), Some(20));
        assert_eq!(table.lookup("nowhere"), None);
    }

    #[test]
    fn test_shortcuts_resolve_to_sections() {
        let table = table();
        assert_eq!(table.shortcut('4'), Some("WOMENS_SAFETY"));
        assert_eq!(table.shortcut('5'), None);
    }

    #[test]
    fn test_section_starting_at() {
        let table = table();
        assert_eq!(table.section_starting_at(20), Some("CASE_STUDIES"));
        assert_eq!(table.section_starting_at(21), None);
    }

    #[test]
    fn test_section_outside_deck_is_rejected() {
        let sections = BTreeMap::from([("LATE".to_string(), 51)]);
        let err = SectionTable::from_manifest(&sections, &BTreeMap::new(), 50).unwrap_err();
        assert!(matches!(err, DeckError::SectionOutOfRange { index: 51, total: 50, .. }));

        let sections = BTreeMap::from([("ZERO".to_string(), 0)]);
        assert!(SectionTable::from_manifest(&sections, &BTreeMap::new(), 50).is_err());
    }

    #[test]
    fn test_bad_shortcuts_are_rejected() {
        let sections = BTreeMap::from([("TITLE".to_string(), 1)]);

        let shortcuts = BTreeMap::from([("10".to_string(), "TITLE".to_string())]);
        let err = SectionTable::from_manifest(&sections, &shortcuts, 5).unwrap_err();
        assert!(matches!(err, DeckError::InvalidShortcut(_)));

        let shortcuts = BTreeMap::from([("1".to_string(), "AGENDA".to_string())]);
        let err = SectionTable::from_manifest(&sections, &shortcuts, 5).unwrap_err();
        assert!(matches!(err, DeckError::UnknownShortcutSection { .. }));
    }
}
