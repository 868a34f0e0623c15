//! Live execution annotations for editor buffers.
//!
//! Facts observed while running a file's tests are shown next to the lines
//! they belong to:
//!
//! - **Frame marks** summarise locals, arguments, return values, exceptions
//!   and console output recorded on a line.
//! - **Test marks** badge a test declaration with its outcome.
//!
//! The [`MarkRegistry`] reconciles each fresh batch of facts against what is
//! already on screen. It keeps what is still true, flags what could not be
//! re-confirmed as unconfirmed, and disposes what was contradicted. Rendering
//! goes through a host-implemented [`DecorationSurface`]; [`MemorySurface`]
//! serves headless hosts.

pub mod check;
pub mod fact;
pub mod frame;
mod mark;
pub mod registry;
pub mod render;
pub mod surface;
pub mod test_mark;

pub use check::{CheckGlyph, CheckState};
pub use fact::{ConsoleOutput, ExceptionInfo, FrameFact, FramePayload, Line, NamedValue, ReturnValue, TestError, TestFact, TestRef, TestState};
pub use frame::FrameMark;
pub use mark::Mark;
pub use registry::{MarkKind, MarkRegistry};
pub use render::{DumpSection, FrameDump, OverlayAction, TestBadge};
pub use surface::{AnchorHandle, DecorationHandle, DecorationSurface, MemorySurface, OverlayContent, StyleClass, VisibleRows};
pub use test_mark::TestMark;
