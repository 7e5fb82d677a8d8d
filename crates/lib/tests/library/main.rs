//! Library-level tests driving the pipeline through the public API.
