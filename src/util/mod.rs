//! Shared utilities for the frame-loop drivers.

pub mod frame_timing;
