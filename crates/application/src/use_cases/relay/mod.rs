mod collect_response;
mod forward_query;
mod publish_response;
mod relay_query;
mod synthesize;
pub mod wire;

pub use collect_response::{response_matches_query, ResponseCollector};
pub use forward_query::{prepare_forward, ForwardedQuery};
pub use publish_response::merge_synthesized;
pub use relay_query::{RelayOutcome, RelayQueryUseCase};
pub use synthesize::synthesize_aaaa_records;
