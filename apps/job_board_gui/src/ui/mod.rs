//! UI layer: the job board window.

pub mod app;

pub use app::JobBoardApp;
