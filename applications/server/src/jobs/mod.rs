/// Background stream dispatch
pub mod dispatcher;

pub use dispatcher::{Backend, DispatchTicket, StreamDispatcher, StreamRequest};
