//! Wire types and pure helpers shared by the prediction client and its front ends.

pub mod domain;
pub mod error;
pub mod protocol;
pub mod salary;
