use crate::dns::handler::Handler;
use crate::dns::query::Query;
use crate::dns::response::Response;
use async_trait::async_trait;
use std::collections::HashMap;
use synthdns_proto::packet::record::Record;
use synthdns_proto::QueryType;

/// Exact `(type, dot-terminated lower-cased name) -> records` lookup built
/// from configuration and validated against the text-RR parser at load
/// time (see `crate::config`).
pub type PredefinedTable = HashMap<(QueryType, String), Vec<Record>>;

/// Predefined answers always beat pattern synthesis; this runs before any
/// of the rebind or make-record handlers.
pub struct PredefinedHandler {
    table: PredefinedTable,
}

impl PredefinedHandler {
    pub fn new(table: PredefinedTable) -> Self {
        Self { table }
    }
}

#[async_trait]
impl Handler for PredefinedHandler {
    async fn handle(&self, query: &mut Query) -> Option<Response> {
        let rrs = self.table.get(&(query.qtype, query.name.clone()))?;
        Some(Response::records(rrs.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[tokio::test]
    async fn returns_the_stored_records_verbatim() {
        let mut table = PredefinedTable::new();
        table.insert(
            (QueryType::A, "1u.ms.".to_string()),
            vec![Record::A {
                domain: "1u.ms.".into(),
                addr: Ipv4Addr::new(9, 9, 9, 9),
                ttl: 300,
            }],
        );
        let handler = PredefinedHandler::new(table);

        let mut query = Query::new(QueryType::A, "1u.ms.");
        let response = handler.handle(&mut query).await.unwrap();
        assert_eq!(response.rrs.len(), 1);
    }

    #[tokio::test]
    async fn falls_through_on_miss() {
        let handler = PredefinedHandler::new(PredefinedTable::new());
        let mut query = Query::new(QueryType::A, "unlisted.1u.ms.");
        assert!(handler.handle(&mut query).await.is_none());
    }
}
