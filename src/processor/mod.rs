//! Per-pixel depth pipeline: raw sample → metric depth → render space point.

pub mod calibration;
pub mod projection;
pub mod sampler;
