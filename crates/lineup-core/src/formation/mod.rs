pub mod drag;
pub mod geometry;
pub mod lineup;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod proptest_gen;
