use nalgebra::Point3;

/// Represents one particle record as it appears in a geometry file.
///
/// The same record serves both formats: an XYZ line only fills the label and the
/// position, while a LAMMPS `full` style `Atoms` row fills every field. Fields that a
/// format does not carry keep their neutral defaults (`0` for ids and types, `0.0` for
/// the charge and `[0, 0, 0]` for the image flags).
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The 1-based identifier of the atom, unique within its section.
    pub atom_id: usize,
    /// The molecule this atom belongs to (`0` means unassigned).
    pub molecule_id: usize,
    /// The numeric atom type index (`0` when the format carries no type).
    pub atom_type: usize,
    /// The partial charge in elementary charge units.
    pub charge: f64,
    /// The Cartesian coordinates of the atom.
    pub position: Point3<f64>,
    /// Periodic image flags (`ix`, `iy`, `iz`).
    pub image: [i32; 3],
    /// Free-form label, usually the element symbol or the type name.
    pub label: String,
}

impl Atom {
    /// Creates a new `Atom` with default values for the LAMMPS-only fields.
    ///
    /// # Arguments
    ///
    /// * `atom_id` - The 1-based identifier of the atom.
    /// * `label` - The label of the atom (e.g., the element symbol).
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(atom_id: usize, label: &str, position: Point3<f64>) -> Self {
        Self {
            atom_id,
            molecule_id: 0,
            atom_type: 0,
            charge: 0.0,
            position,
            image: [0; 3],
            label: label.to_string(),
        }
    }

    pub fn with_molecule(mut self, molecule_id: usize) -> Self {
        self.molecule_id = molecule_id;
        self
    }

    pub fn with_type(mut self, atom_type: usize) -> Self {
        self.atom_type = atom_type;
        self
    }

    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }

    pub fn with_image(mut self, image: [i32; 3]) -> Self {
        self.image = image;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_has_neutral_defaults() {
        let atom = Atom::new(3, "C", Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.atom_id, 3);
        assert_eq!(atom.label, "C");
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.molecule_id, 0);
        assert_eq!(atom.atom_type, 0);
        assert_eq!(atom.charge, 0.0);
        assert_eq!(atom.image, [0, 0, 0]);
    }

    #[test]
    fn builder_methods_set_lammps_fields() {
        let atom = Atom::new(1, "OW", Point3::origin())
            .with_molecule(7)
            .with_type(2)
            .with_charge(-0.8476)
            .with_image([1, -1, 0]);
        assert_eq!(atom.molecule_id, 7);
        assert_eq!(atom.atom_type, 2);
        assert_eq!(atom.charge, -0.8476);
        assert_eq!(atom.image, [1, -1, 0]);
    }
}
