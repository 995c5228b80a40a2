//! Command-line interface for the `skillpath` application.
//!
//! This crate serves as the entry point for the executable; the commands live
//! in the library half of the crate.

fn main() -> anyhow::Result<()> {
    skillpath::run()
}
