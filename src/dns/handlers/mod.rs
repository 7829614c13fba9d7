mod delay;
mod fake_name;
mod inc_record;
mod make_record;
mod no_https;
mod predefined;
mod rebind;
mod servfail;

pub use delay::DelayHandler;
pub use fake_name::FakeNameHandler;
pub use inc_record::IncRecordHandler;
pub use make_record::MakeRecordHandler;
pub use no_https::NoHttpsHandler;
pub use predefined::{PredefinedHandler, PredefinedTable};
pub use rebind::RebindHandler;
pub use servfail::ServfailHandler;

use crate::clock::Clock;
use crate::dns::handler::HandlerChain;
use std::sync::Arc;

/// Assemble the chain in the order laid out by the name grammar: handlers
/// that always apply first, then the progressively more specific rebind
/// variants, then the generic synthesizers.
pub fn build_chain(clock: Arc<dyn Clock>, predefined: PredefinedTable) -> HandlerChain {
    HandlerChain::new(vec![
        Box::new(DelayHandler::new()),
        Box::new(ServfailHandler::new()),
        Box::new(NoHttpsHandler),
        Box::new(FakeNameHandler::new()),
        Box::new(PredefinedHandler::new(predefined)),
        Box::new(RebindHandler::for_times(clock.clone())),
        Box::new(RebindHandler::for_duration(clock.clone())),
        Box::new(RebindHandler::fixed(clock)),
        Box::new(MakeRecordHandler::new()),
        Box::new(IncRecordHandler::new()),
    ])
}
