//! curaios-core — entity resolution cascade and query composition.
//!
//! raw input → [`normalise`] validation → [`special_case`] expansion →
//! [`Resolver`] tier chain (local → authority → fuzzy → keyword → LLM) →
//! [`QueryComposer`].

mod builtin;
pub mod fuzzy;
pub mod normalise;
pub mod query;
pub mod resolver;
pub mod settings;
pub mod special_case;
pub mod tables;
pub mod tiers;

pub use query::{api_parameters, build_base_query, parse_date_range, ApiParameters, QueryComposer, QueryRequest};
pub use resolver::{Adapters, EntityInputs, ResolvedEntities, Resolver};
pub use settings::ResolverSettings;
pub use tables::KnowledgeBase;
