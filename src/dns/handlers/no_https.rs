use crate::dns::handler::Handler;
use crate::dns::query::Query;
use crate::dns::response::Response;
use async_trait::async_trait;
use synthdns_proto::QueryType;

/// Suppresses HTTPS (type 65) queries before any synthesizer gets to them:
/// matched, but with nothing in the answer.
pub struct NoHttpsHandler;

#[async_trait]
impl Handler for NoHttpsHandler {
    async fn handle(&self, query: &mut Query) -> Option<Response> {
        (query.qtype == QueryType::HTTPS).then(Response::empty)
    }
}
