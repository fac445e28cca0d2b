// --- File: crates/clinic_gcal/src/lib.rs ---
// Declare modules within this crate
pub mod auth;
pub mod booking;
pub mod demo;
#[cfg(test)]
mod demo_test;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod service;
pub mod time;
