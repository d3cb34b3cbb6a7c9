pub mod csv;
pub mod shell;
