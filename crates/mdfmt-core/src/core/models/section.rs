use super::atom::Atom;

/// An ordered collection of atoms, as stored under the `Atoms` name of a frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomsSection {
    atoms: Vec<Atom>,
}

impl AtomsSection {
    /// The name under which an atoms section is stored in a [`MolecularFrame`](super::frame::MolecularFrame).
    pub const NAME: &'static str = "Atoms";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }

    pub fn add_atom(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    /// Appends every atom of `atoms`, preserving their order.
    pub fn add_atoms(&mut self, atoms: impl IntoIterator<Item = Atom>) {
        self.atoms.extend(atoms);
    }

    pub fn into_atoms(self) -> Vec<Atom> {
        self.atoms
    }
}

impl From<Vec<Atom>> for AtomsSection {
    fn from(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }
}

impl FromIterator<Atom> for AtomsSection {
    fn from_iter<T: IntoIterator<Item = Atom>>(iter: T) -> Self {
        Self {
            atoms: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AtomsSection {
    type Item = &'a Atom;
    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn atom(id: usize, label: &str) -> Atom {
        Atom::new(id, label, Point3::origin())
    }

    #[test]
    fn add_atoms_appends_in_order() {
        let mut section = AtomsSection::new();
        section.add_atom(atom(1, "O"));
        section.add_atoms(vec![atom(2, "H"), atom(3, "H")]);

        assert_eq!(section.len(), 3);
        let labels: Vec<_> = section.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, ["O", "H", "H"]);
    }

    #[test]
    fn new_section_is_empty() {
        let section = AtomsSection::new();
        assert!(section.is_empty());
        assert_eq!(section.len(), 0);
    }

    #[test]
    fn collect_builds_section_from_iterator() {
        let section: AtomsSection = (1..=4).map(|i| atom(i, "Ar")).collect();
        assert_eq!(section.len(), 4);
        assert_eq!(section.atoms()[3].atom_id, 4);
    }
}
