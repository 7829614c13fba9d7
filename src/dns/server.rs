use crate::dns::error::HandleError;
use crate::dns::handler::HandlerChain;
use crate::dns::log_record::LogRecord;
use crate::dns::log_viewer::LogViewer;
use crate::dns::query::Query;
use std::sync::Arc;
use synthdns_proto::packet::header::ResponseCode;
use synthdns_proto::{BytePacketBuffer, DnsPacket};
use synthdns_server::prelude::Message;

/// Converts a parsed question into a `Query`, runs the interpreter chain,
/// writes the reply, and logs questions under the configured domain.
/// Implements the transport crate's `Handler`, which knows nothing about
/// DNS semantics — only this service does.
pub struct DnsService {
    chain: HandlerChain,
    log_viewer: Arc<LogViewer>,
    /// Dot-terminated, lower-cased, e.g. `"1u.ms."`.
    domain: String,
}

impl DnsService {
    pub fn new(chain: HandlerChain, log_viewer: Arc<LogViewer>, domain: &str) -> Self {
        let mut domain = domain.to_ascii_lowercase();
        if !domain.ends_with('.') {
            domain.push('.');
        }
        Self {
            chain,
            log_viewer,
            domain,
        }
    }

    /// A name is logged only if it's a subdomain of the configured
    /// domain, not the apex itself.
    fn is_loggable(&self, name: &str) -> bool {
        name != self.domain && name.ends_with(&self.domain)
    }

    async fn try_handle(&self, message: &Message) -> Result<Message, HandleError> {
        let address = message.address;
        let mut buffer = BytePacketBuffer::new(message.buffer);
        let request = DnsPacket::from_buffer(&mut buffer)?;
        let mut response = DnsPacket::response_from(&request);

        if let Some(question) = request.questions.first().cloned() {
            let mut query = Query::new(question.qtype, &question.name);
            let handled = self.chain.handle(&mut query).await;

            if let Some(response_data) = &handled {
                response.answers.extend(response_data.rrs.iter().cloned());
                if response_data.servfail {
                    response.header.response_code = ResponseCode::ServerFailure;
                }
            }

            // Logged whether or not a handler matched: a question under the
            // configured domain is interesting to the operator either way.
            if self.is_loggable(&query.name) {
                self.log_viewer.push(&LogRecord::new(
                    address.to_string(),
                    query.qtype,
                    query.name.clone(),
                    handled,
                ));
            }
        }

        let buffer = response.create_buffer()?;
        Ok(Message {
            address,
            buffer: buffer.buf,
            size: buffer.pos(),
        })
    }
}

#[async_trait::async_trait]
impl synthdns_server::Handler for DnsService {
    async fn handle(&self, message: Message) -> Message {
        let address = message.address;
        match self.try_handle(&message).await {
            Ok(reply) => reply,
            Err(HandleError::Reader(error)) => {
                tracing::warn!("couldn't parse request from {address:?}: {error}");
                message
            }
            Err(HandleError::Writer(error)) => {
                tracing::error!("couldn't encode response to {address:?}: {error:?}");
                Message {
                    address,
                    buffer: [0; 512],
                    size: 0,
                }
            }
        }
    }
}
