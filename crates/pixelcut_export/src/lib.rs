//! Export path: compile a time-range selection into an ordered trim/concat
//! plan and drive an external media processor. The engine never encodes;
//! it only selects source ranges.

pub mod error;
pub mod job;
pub mod plan;
