/* CLI command bodies, kept in the library so they can be driven from tests */

pub mod analyze;
pub mod codegen;
pub mod common;
