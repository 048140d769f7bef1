//! Viewport capacity management for a terminal chat client.
//!
//! Two components share one problem, more logical items than the screen
//! can hold, along different axes:
//!
//! - [`roster::RosterGrid`] virtualizes a large, searchable user directory
//!   vertically: only the grid rows intersecting the scroll viewport (plus
//!   overscan) are materialized.
//! - [`window::ChatDock`] bounds the floating chat windows horizontally:
//!   every open conversation is registered, but only as many windows as fit
//!   the viewport width are materialized; the rest wait in an overflow
//!   queue. Each materialized window tracks its own position through a
//!   [`drag::DragController`].
//!
//! Both are synchronous, single-threaded derivations over explicit state;
//! the binary in `main.rs` wires them to a ratatui render loop.

pub mod config;
pub mod constants;
pub mod drag;
pub mod geometry;
pub mod roster;
pub mod tracing_sub;
pub mod window;
