mod server;

pub use server::{RunningServer, Server};
