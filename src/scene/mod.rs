pub mod anim;
pub mod ease;
pub mod eval;
pub mod model;
