use crate::dns::duration::parse_duration_spec;
use crate::dns::handler::Handler;
use crate::dns::query::Query;
use crate::dns::response::Response;
use async_trait::async_trait;
use regex::Regex;

/// `.*?delay-(X)-(Y)-only.*` — if the query type matches `Y`, suspend for
/// the duration `X` before letting the rest of the chain run. Always
/// returns `None`: the delay is a side effect, not an answer.
pub struct DelayHandler {
    pattern: Regex,
}

impl DelayHandler {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"^.*?delay-([^-]+)-([A-Za-z]+)-only.*$").expect("valid pattern"),
        }
    }
}

impl Default for DelayHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Handler for DelayHandler {
    async fn handle(&self, query: &mut Query) -> Option<Response> {
        let name = query.name.clone();
        let captures = self.pattern.captures(&name)?;

        let duration = parse_duration_spec(&captures[1])?;
        let only_for = captures[2].to_ascii_uppercase();

        if only_for == query.qtype.name() {
            tokio::time::sleep(duration).await;
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use synthdns_proto::QueryType;

    #[tokio::test]
    async fn sleeps_for_the_encoded_duration_on_matching_type() {
        let handler = DelayHandler::new();
        let mut query = Query::new(QueryType::A, "delay-50ms-A-only.1u.ms.");

        let started = tokio::time::Instant::now();
        assert!(handler.handle(&mut query).await.is_none());
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn does_not_sleep_for_a_different_type() {
        let handler = DelayHandler::new();
        let mut query = Query::new(QueryType::AAAA, "delay-5s-A-only.1u.ms.");

        let started = tokio::time::Instant::now();
        assert!(handler.handle(&mut query).await.is_none());
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[tokio::test]
    async fn ignores_unrelated_names() {
        let handler = DelayHandler::new();
        let mut query = Query::new(QueryType::A, "foo.1u.ms.");
        assert!(handler.handle(&mut query).await.is_none());
    }
}
