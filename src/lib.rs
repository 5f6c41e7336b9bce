pub mod aggregate;
pub mod config;
pub mod error;
pub mod http_client;
pub mod logging;
pub mod model;
pub mod pickup;
pub mod pipeline;
pub mod sink;
pub mod source;

pub use aggregate::{AggregateOptions, EventTypePolicy, StatsSummary, aggregate, aggregate_with};
pub use error::StatsError;
pub use model::{EventType, Game, GameEvent, Player, Row, RowKey, TeamLeagues};
pub use pickup::PickupPolicy;
