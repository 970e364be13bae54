//! A/B experiment registration.

pub mod ab_test;

pub use ab_test::AbTest;
