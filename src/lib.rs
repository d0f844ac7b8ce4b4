//! Nucamp - a Winamp-style terminal dashboard for the Nuclei scanner.

pub mod event;
pub mod panels;
pub mod scan;
pub mod session;
pub mod ui;
