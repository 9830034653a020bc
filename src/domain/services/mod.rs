pub mod actions;
mod app_state;
mod bubble;
mod bubble_list;
mod connectivity;
mod conversation;
pub mod events;
mod grouping;
mod messenger;
mod scroll;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use connectivity::*;
pub use conversation::*;
pub use grouping::*;
pub use messenger::*;
pub use scroll::*;
