use super::section::AtomsSection;

/// A snapshot of a molecular system as seen by the frame formatters.
///
/// A frame holds at most one section, the atoms section, looked up under
/// [`AtomsSection::NAME`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MolecularFrame {
    atoms: Option<AtomsSection>,
}

impl MolecularFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the section stored under `name`, if any.
    pub fn section(&self, name: &str) -> Option<&AtomsSection> {
        if name == AtomsSection::NAME {
            self.atoms.as_ref()
        } else {
            None
        }
    }

    /// Stores `section` as the frame's atoms section, replacing any previous one.
    pub fn set_section(&mut self, section: AtomsSection) {
        self.atoms = Some(section);
    }

    pub fn atoms(&self) -> Option<&AtomsSection> {
        self.atoms.as_ref()
    }

    pub fn section_names(&self) -> impl Iterator<Item = &'static str> {
        self.atoms.iter().map(|_| AtomsSection::NAME)
    }
}

impl From<AtomsSection> for MolecularFrame {
    fn from(section: AtomsSection) -> Self {
        let mut frame = Self::new();
        frame.set_section(section);
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use nalgebra::Point3;

    #[test]
    fn new_frame_has_no_sections() {
        let frame = MolecularFrame::new();
        assert!(frame.atoms().is_none());
        assert_eq!(frame.section_names().count(), 0);
    }

    #[test]
    fn set_section_replaces_previous_atoms() {
        let mut frame = MolecularFrame::new();
        frame.set_section(AtomsSection::from(vec![Atom::new(1, "C", Point3::origin())]));
        frame.set_section(AtomsSection::new());

        assert_eq!(frame.section("Atoms").map(AtomsSection::len), Some(0));
        assert_eq!(frame.section_names().collect::<Vec<_>>(), ["Atoms"]);
    }

    #[test]
    fn only_atoms_name_resolves_to_a_section() {
        let frame = MolecularFrame::from(AtomsSection::new());
        assert!(frame.section("Atoms").is_some());
        assert!(frame.section("Bonds").is_none());
        assert!(frame.section("atoms").is_none());
    }
}
