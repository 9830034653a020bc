mod action;
mod author;
mod backend;
mod event;
mod loading;
mod message;
mod session;
mod textarea;

pub use action::*;
pub use author::*;
pub use backend::*;
pub use event::*;
pub use loading::*;
pub use message::*;
pub use session::*;
pub use textarea::*;
