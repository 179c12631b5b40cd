use super::{Reply, ServiceKind};

/// One impersonated ingestion service: the RPC it serves and how it answers
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceStub {
    pub kind: ServiceKind,
    pub reply: Reply,
}

impl ServiceStub {
    pub fn new(kind: ServiceKind) -> Self {
        Self {
            kind,
            reply: Reply::Ack,
        }
    }

    pub fn with_reply(mut self, reply: Reply) -> Self {
        self.reply = reply;
        self
    }

    pub fn path(&self) -> String {
        self.kind.path()
    }
}
