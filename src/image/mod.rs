pub mod frame;
pub mod io;

pub use self::frame::{CSpaceFrame, DisparityFrame, Frame};
