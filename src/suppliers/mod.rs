pub mod idlix;

mod tests;
