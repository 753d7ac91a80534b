pub mod root;
pub mod sql;
