pub mod runner;

pub use runner::{BootReport, BootWaitRunner};
