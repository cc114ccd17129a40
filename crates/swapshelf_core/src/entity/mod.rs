//! Record types owned by the registry.

mod book;
mod feedback;
mod id;
mod swap_request;
mod user;

pub use book::{Book, BookPayload};
pub use feedback::{Feedback, FeedbackPayload, FeedbackUpdate};
pub use id::RecordId;
pub use swap_request::{SwapRequest, SwapRequestPayload};
pub use user::{User, UserPayload};
