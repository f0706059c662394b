//! Sky-track bookkeeping: polar coordinates, the precomputed orbit path and
//! the per-tick frame state shared by the window and console front ends.

mod frame;
mod path;
mod polar;

pub use frame::{FrameState, Ticker};
pub use path::{segments, PathSample};
pub use polar::{PolarPoint, HORIZON_ZENITH_DEG};
