//! World-level tests that drive systems through the ECS
