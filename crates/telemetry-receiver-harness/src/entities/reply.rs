use tonic::Code;

/// What a service stub answers after capturing a request
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Reply {
    /// Empty success message, `grpc-status: 0`
    #[default]
    Ack,
    /// Simulated backend failure with the given status; the request is
    /// still captured
    Fail { code: Code, message: String },
}

impl Reply {
    pub fn fail(code: Code, message: impl Into<String>) -> Self {
        Reply::Fail {
            code,
            message: message.into(),
        }
    }

    pub fn grpc_status(&self) -> i32 {
        match self {
            Reply::Ack => Code::Ok as i32,
            Reply::Fail { code, .. } => *code as i32,
        }
    }

    pub fn grpc_message(&self) -> Option<&str> {
        match self {
            Reply::Ack => None,
            Reply::Fail { message, .. } => Some(message.as_str()),
        }
    }
}
