pub mod apr;
pub mod page;
