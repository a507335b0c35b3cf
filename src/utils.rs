pub mod date;
pub(crate) mod ddb;
pub(crate) mod locks;
pub mod logs;
