//! Display drivers and rendering
//!
//! The SH1106 driver owns the bus; layouts draw into a plain 1bpp
//! framebuffer and are host-testable without any hardware.

pub mod assets;
pub mod font;
pub mod framebuffer;
pub mod layout;
pub mod pbm;
pub mod sh1106;

pub use framebuffer::FrameBuffer;
pub use pbm::Pbm;
pub use sh1106::Sh1106;
