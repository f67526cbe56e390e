//! Order lifecycle: transition table, persistence contract, and the engine
//! that gates every mutation on actor identity and transition legality.

pub mod transitions;
pub mod repository;
pub mod service;

pub use repository::{OrderRepository, SeaOrmOrderRepository};
pub use service::{NewOrder, OrderService};
