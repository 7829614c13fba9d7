use crate::dns::query::Query;
use crate::dns::response::Response;
use async_trait::async_trait;

/// A capability producing an optional `Response` from a query. Returning
/// `None` means "did not match; try the next handler." A handler may also
/// mutate the query (the fake-name rewriter does, deliberately returning
/// `None` so the chain continues with an enriched query).
///
/// `handle` is async because the delay handler suspends on
/// `tokio::time::sleep`; every other handler simply never awaits.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, query: &mut Query) -> Option<Response>;
}

/// Runs handlers in a fixed order and returns the first non-nil response.
pub struct HandlerChain {
    handlers: Vec<Box<dyn Handler>>,
}

impl HandlerChain {
    pub fn new(handlers: Vec<Box<dyn Handler>>) -> Self {
        Self { handlers }
    }

    pub async fn handle(&self, query: &mut Query) -> Option<Response> {
        for handler in &self.handlers {
            if let Some(response) = handler.handle(query).await {
                return Some(response);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synthdns_proto::QueryType;

    struct AlwaysNone;
    #[async_trait]
    impl Handler for AlwaysNone {
        async fn handle(&self, _query: &mut Query) -> Option<Response> {
            None
        }
    }

    struct AlwaysSome;
    #[async_trait]
    impl Handler for AlwaysSome {
        async fn handle(&self, _query: &mut Query) -> Option<Response> {
            Some(Response::empty())
        }
    }

    struct Poison;
    #[async_trait]
    impl Handler for Poison {
        async fn handle(&self, _query: &mut Query) -> Option<Response> {
            panic!("should never run once an earlier handler matched");
        }
    }

    #[tokio::test]
    async fn returns_first_match_and_skips_the_rest() {
        let chain = HandlerChain::new(vec![
            Box::new(AlwaysNone),
            Box::new(AlwaysSome),
            Box::new(Poison),
        ]);
        let mut query = Query::new(QueryType::A, "foo.1u.ms.");
        assert!(chain.handle(&mut query).await.is_some());
    }

    #[tokio::test]
    async fn falls_through_to_none_when_nothing_matches() {
        let chain = HandlerChain::new(vec![Box::new(AlwaysNone), Box::new(AlwaysNone)]);
        let mut query = Query::new(QueryType::A, "foo.1u.ms.");
        assert!(chain.handle(&mut query).await.is_none());
    }
}
