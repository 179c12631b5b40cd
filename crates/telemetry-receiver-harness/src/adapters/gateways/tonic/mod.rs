mod framing;
mod server;

pub use server::Tonic;
