pub mod compare;
mod expectation;
pub mod ports;
mod start_receiver;
mod verify;

pub use expectation::{Expectation, ExpectationBuilder};
pub use start_receiver::{FakeReceiver, ReceiverBuilder};
pub use verify::{Verification, DEFAULT_DEADLINE};
