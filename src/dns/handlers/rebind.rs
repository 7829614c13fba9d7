use crate::clock::Clock;
use crate::dns::address::{interpret_multi, ttl_for_owner};
use crate::dns::duration::parse_duration_spec;
use crate::dns::handler::Handler;
use crate::dns::query::Query;
use crate::dns::regex_handler::RegexHandler;
use crate::dns::response::Response;
use async_trait::async_trait;
use regex::Captures;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use synthdns_proto::QueryType;

#[derive(Clone, Copy)]
struct RebindState {
    deadline: Instant,
    count: u32,
}

#[derive(Clone, Copy)]
enum Kind {
    /// Fixed 5-second window, no count.
    Fixed,
    /// Parsed window from the name, no count.
    For,
    /// Parsed window and a required hit count before synthesizing.
    ForTimes,
}

type Callback = Box<dyn Fn(&mut Query, &Captures) -> Option<Response> + Send + Sync>;

/// The three rebind variants share one state machine: a miss (first
/// sighting, or past the previous deadline) arms a fresh window and
/// returns nil; a hit inside the window either counts up (the `-times`
/// variant) or synthesizes immediately. Each variant is a `RegexHandler`
/// whose callback closes over its own state map and kind-specific parsing.
pub struct RebindHandler {
    inner: RegexHandler<Callback>,
}

impl RebindHandler {
    fn build(pattern: &str, kind: Kind, clock: Arc<dyn Clock>) -> Self {
        let state: Mutex<HashMap<(QueryType, String), RebindState>> = Mutex::new(HashMap::new());

        let callback: Callback = Box::new(move |query, captures| {
            let (window, required_hits, payload): (Duration, Option<u32>, String) = match kind {
                Kind::Fixed => (Duration::from_secs(5), None, captures[1].to_string()),
                Kind::For => {
                    let window = parse_duration_spec(&captures[1])?;
                    (window, None, captures[2].to_string())
                }
                Kind::ForTimes => {
                    let window = parse_duration_spec(&captures[1])?;
                    let count: u32 = captures[2].parse().ok()?;
                    (window, Some(count), captures[3].to_string())
                }
            };

            let key = query.key();
            let now = clock.now();
            let mut state = state.lock().unwrap();
            let existing = state.get(&key).copied();

            match existing {
                None => {
                    state.insert(
                        key,
                        RebindState {
                            deadline: now + window,
                            count: 1,
                        },
                    );
                    None
                }
                Some(prev) if now > prev.deadline => {
                    state.insert(
                        key,
                        RebindState {
                            deadline: now + window,
                            count: 1,
                        },
                    );
                    None
                }
                Some(prev) => match required_hits {
                    None => {
                        let ttl = ttl_for_owner(&query.name_for_reply);
                        let (rrs, _) = interpret_multi(&payload, &*query, ttl);
                        Some(Response::records(rrs))
                    }
                    Some(target) if prev.count < target => {
                        state.insert(
                            key,
                            RebindState {
                                deadline: prev.deadline,
                                count: prev.count + 1,
                            },
                        );
                        None
                    }
                    Some(_) => {
                        let ttl = ttl_for_owner(&query.name_for_reply);
                        let (rrs, _) = interpret_multi(&payload, &*query, ttl);
                        Some(Response::records(rrs))
                    }
                },
            }
        });

        Self {
            inner: RegexHandler::new(pattern, callback),
        }
    }

    pub fn fixed(clock: Arc<dyn Clock>) -> Self {
        Self::build(r"^.*?rebind-(.+?)rr.*$", Kind::Fixed, clock)
    }

    pub fn for_duration(clock: Arc<dyn Clock>) -> Self {
        Self::build(r"^.*?rebindfor([^-]*)-(.+?)rr.*$", Kind::For, clock)
    }

    pub fn for_times(clock: Arc<dyn Clock>) -> Self {
        Self::build(
            r"^.*?rebindfor([^-]*)after([0-9]*)times-(.+?)rr.*$",
            Kind::ForTimes,
            clock,
        )
    }
}

#[async_trait]
impl Handler for RebindHandler {
    async fn handle(&self, query: &mut Query) -> Option<Response> {
        self.inner.handle(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TestClock;

    #[tokio::test]
    async fn fixed_rebind_misses_then_hits_then_rearms() {
        let clock = Arc::new(TestClock::new());
        let handler = RebindHandler::fixed(clock.clone());

        let mut query = Query::new(QueryType::A, "rebind-1.2.3.4-rr.1u.ms.");

        assert!(handler.handle(&mut query).await.is_none());

        clock.advance(Duration::from_secs(1));
        let response = handler.handle(&mut query).await.unwrap();
        assert_eq!(response.rrs.len(), 1);

        clock.advance(Duration::from_secs(6));
        assert!(handler.handle(&mut query).await.is_none());
    }

    #[tokio::test]
    async fn for_duration_uses_the_parsed_window() {
        let clock = Arc::new(TestClock::new());
        let handler = RebindHandler::for_duration(clock.clone());

        let mut query = Query::new(QueryType::A, "rebindfor10s-5.6.7.8-rr.1u.ms.");
        assert!(handler.handle(&mut query).await.is_none());

        clock.advance(Duration::from_secs(9));
        assert!(handler.handle(&mut query).await.is_some());
    }

    #[tokio::test]
    async fn malformed_window_never_matches() {
        let clock = Arc::new(TestClock::new());
        let handler = RebindHandler::for_duration(clock);

        let mut query = Query::new(QueryType::A, "rebindforxyz-5.6.7.8-rr.1u.ms.");
        assert!(handler.handle(&mut query).await.is_none());
    }

    #[tokio::test]
    async fn for_times_requires_n_hits_before_synthesizing() {
        let clock = Arc::new(TestClock::new());
        let handler = RebindHandler::for_times(clock.clone());

        let mut query = Query::new(QueryType::A, "rebindfor10safter2times-5.6.7.8-rr.1u.ms.");

        assert!(handler.handle(&mut query).await.is_none());
        clock.advance(Duration::from_secs(1));
        assert!(handler.handle(&mut query).await.is_none());
        clock.advance(Duration::from_secs(1));
        let response = handler.handle(&mut query).await.unwrap();
        assert_eq!(response.rrs.len(), 1);
    }
}
