mod tonic;

pub use self::tonic::Tonic;
