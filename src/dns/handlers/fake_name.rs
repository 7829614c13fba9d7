use crate::dns::handler::Handler;
use crate::dns::query::Query;
use crate::dns::regex_handler::RegexHandler;
use crate::dns::response::Response;
use async_trait::async_trait;
use regex::Captures;

type Callback = Box<dyn Fn(&mut Query, &Captures) -> Option<Response> + Send + Sync>;

/// `.*?fake-(X)-rr.*` — rewrites `query.name_for_reply` to `X` and
/// deliberately returns `None` so every subsequent handler in the chain
/// synthesizes against the rewritten owner, not the name the client asked
/// for.
pub struct FakeNameHandler {
    inner: RegexHandler<Callback>,
}

impl FakeNameHandler {
    pub fn new() -> Self {
        let callback: Callback = Box::new(|query, captures| {
            query.name_for_reply = captures[1].to_string();
            None
        });
        Self {
            inner: RegexHandler::new(r"^.*?fake-(.+?)-rr.*$", callback),
        }
    }
}

impl Default for FakeNameHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Handler for FakeNameHandler {
    async fn handle(&self, query: &mut Query) -> Option<Response> {
        self.inner.handle(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synthdns_proto::QueryType;

    #[tokio::test]
    async fn rewrites_name_for_reply_and_falls_through() {
        let handler = FakeNameHandler::new();
        let mut query = Query::new(QueryType::A, "fake-other.1u.ms-rr.1u.ms.");
        assert!(handler.handle(&mut query).await.is_none());
        assert_eq!(query.name_for_reply, "other.1u.ms");
        assert_eq!(query.name, "fake-other.1u.ms-rr.1u.ms.");
    }

    #[tokio::test]
    async fn leaves_unmatched_queries_untouched() {
        let handler = FakeNameHandler::new();
        let mut query = Query::new(QueryType::A, "foo.1u.ms.");
        assert!(handler.handle(&mut query).await.is_none());
        assert_eq!(query.name_for_reply, "foo.1u.ms.");
    }
}
