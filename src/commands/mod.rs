mod check;
mod doctor;
mod run;

pub use check::check;
pub use doctor::doctor;
pub use run::{RunReport, convert_tree, run};
