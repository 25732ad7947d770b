//! Console formatting and the interactive grid viewer

pub mod display;
pub mod viewer;

pub use display::{Color, ColorOutput, SolutionFormatter};
pub use viewer::{SequenceViewer, ViewerCommand};
