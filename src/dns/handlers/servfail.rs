use crate::dns::handler::Handler;
use crate::dns::query::Query;
use crate::dns::regex_handler::RegexHandler;
use crate::dns::response::Response;
use async_trait::async_trait;
use regex::Captures;

type Callback = Box<dyn Fn(&mut Query, &Captures) -> Option<Response> + Send + Sync>;

/// `.*?make-servfail.*` — returns SERVFAIL with no answers, regardless of
/// query type.
pub struct ServfailHandler {
    inner: RegexHandler<Callback>,
}

impl ServfailHandler {
    pub fn new() -> Self {
        let callback: Callback = Box::new(|_query, _captures| Some(Response::servfail()));
        Self {
            inner: RegexHandler::new(r"^.*?make-servfail.*$", callback),
        }
    }
}

impl Default for ServfailHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Handler for ServfailHandler {
    async fn handle(&self, query: &mut Query) -> Option<Response> {
        self.inner.handle(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synthdns_proto::QueryType;

    #[tokio::test]
    async fn matches_make_servfail() {
        let handler = ServfailHandler::new();
        let mut query = Query::new(QueryType::ANY, "make-servfail.1u.ms.");
        let response = handler.handle(&mut query).await.unwrap();
        assert!(response.servfail);
        assert!(response.rrs.is_empty());
    }

    #[tokio::test]
    async fn ignores_unrelated_names() {
        let handler = ServfailHandler::new();
        let mut query = Query::new(QueryType::A, "foo.1u.ms.");
        assert!(handler.handle(&mut query).await.is_none());
    }
}
