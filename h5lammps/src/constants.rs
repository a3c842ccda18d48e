/// Species label given to every particle of the converted group.
pub const SPECIES_LABEL:   &str  = "F";
/// LAMMPS atom type written for `SPECIES_LABEL`.
pub const SPECIES_TYPE:    usize = 1;

pub const DEFAULT_GROUP:   &str  = "fluid";
pub const PROGRESS_EVERY:  usize = 100;     // written frames between progress updates

/// Digits after the decimal point for every float in the dump.
pub const FLOAT_PRECISION: usize = 6;
