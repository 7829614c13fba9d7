use crate::dns::address::{interpret_multi, ttl_for_owner};
use crate::dns::handler::Handler;
use crate::dns::query::Query;
use crate::dns::regex_handler::RegexHandler;
use crate::dns::response::Response;
use async_trait::async_trait;
use regex::Captures;

type Callback = Box<dyn Fn(&mut Query, &Captures) -> Option<Response> + Send + Sync>;

/// `.*?make-(X)(rr|rebind).*` — the general-purpose synthesizer. `X` may
/// carry several `-and-`-joined address tokens.
///
/// Note this also matches names ending in the literal `rebind` (not
/// `rebind-`), which is distinct from the stateful rebind handlers'
/// patterns and deliberately falls to plain synthesis.
pub struct MakeRecordHandler {
    inner: RegexHandler<Callback>,
}

impl MakeRecordHandler {
    pub fn new() -> Self {
        let callback: Callback = Box::new(|query, captures| {
            let payload = captures[1].to_string();
            let ttl = ttl_for_owner(&query.name_for_reply);
            let (rrs, matched) = interpret_multi(&payload, &*query, ttl);
            matched.then(|| Response::records(rrs))
        });
        Self {
            inner: RegexHandler::new(r"^.*?make-(.+?)(?:rr|rebind).*$", callback),
        }
    }
}

impl Default for MakeRecordHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Handler for MakeRecordHandler {
    async fn handle(&self, query: &mut Query) -> Option<Response> {
        self.inner.handle(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synthdns_proto::QueryType;

    #[tokio::test]
    async fn synthesizes_a_single_address() {
        let handler = MakeRecordHandler::new();
        let mut query = Query::new(QueryType::A, "make-1.2.3.4-rr.1u.ms.");
        let response = handler.handle(&mut query).await.unwrap();
        assert_eq!(response.rrs.len(), 1);
    }

    #[tokio::test]
    async fn synthesizes_multiple_and_joined_addresses() {
        let handler = MakeRecordHandler::new();
        let mut query = Query::new(QueryType::A, "make-1.2.3.4-and-5.6.7.8-rr.1u.ms.");
        let response = handler.handle(&mut query).await.unwrap();
        assert_eq!(response.rrs.len(), 2);
    }

    #[tokio::test]
    async fn ignores_names_without_a_terminator() {
        let handler = MakeRecordHandler::new();
        let mut query = Query::new(QueryType::ANY, "make-servfail.1u.ms.");
        assert!(handler.handle(&mut query).await.is_none());
    }
}
