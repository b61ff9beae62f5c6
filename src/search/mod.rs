pub mod pst;
pub mod eval;
pub mod alphabeta;
