use crate::dns::address::ttl_for_owner;
use crate::dns::handler::Handler;
use crate::dns::query::Query;
use crate::dns::regex_handler::RegexHandler;
use crate::dns::response::Response;
use async_trait::async_trait;
use regex::Captures;
use synthdns_proto::packet::record::Record;
use synthdns_proto::QueryType;

type Callback = Box<dyn Fn(&mut Query, &Captures) -> Option<Response> + Send + Sync>;

/// `(.*?inc-)([0-9]+?)(-num.*)` — A-records only; a catch-all for names
/// that didn't match anything more specific. Emits a CNAME to the same
/// name with the embedded counter incremented by one.
pub struct IncRecordHandler {
    inner: RegexHandler<Callback>,
}

impl IncRecordHandler {
    pub fn new() -> Self {
        let callback: Callback = Box::new(|query, captures| {
            if query.qtype != QueryType::A {
                return None;
            }

            let prefix = &captures[1];
            let suffix = &captures[3];
            let number: u64 = captures[2].parse().ok()?;

            let target = format!("{prefix}{}{suffix}", number.saturating_add(1));
            let ttl = ttl_for_owner(&query.name_for_reply);

            Some(Response::records(vec![Record::CNAME {
                domain: query.name_for_reply.clone(),
                host: target,
                ttl,
            }]))
        });
        Self {
            inner: RegexHandler::new(r"^(.*?inc-)([0-9]+?)(-num.*)$", callback),
        }
    }
}

impl Default for IncRecordHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Handler for IncRecordHandler {
    async fn handle(&self, query: &mut Query) -> Option<Response> {
        self.inner.handle(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn increments_the_embedded_counter() {
        let handler = IncRecordHandler::new();
        let mut query = Query::new(QueryType::A, "inc-7-num.1u.ms.");
        let response = handler.handle(&mut query).await.unwrap();
        match &response.rrs[..] {
            [Record::CNAME { host, .. }] => assert_eq!(host, "inc-8-num.1u.ms."),
            other => panic!("expected one CNAME, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn only_applies_to_a_records() {
        let handler = IncRecordHandler::new();
        let mut query = Query::new(QueryType::AAAA, "inc-7-num.1u.ms.");
        assert!(handler.handle(&mut query).await.is_none());
    }

    #[tokio::test]
    async fn ignores_unrelated_names() {
        let handler = IncRecordHandler::new();
        let mut query = Query::new(QueryType::A, "foo.1u.ms.");
        assert!(handler.handle(&mut query).await.is_none());
    }
}
