//! Review eligibility: persistence contract plus the engine enforcing the
//! completed-order / owning-client / once-per-order rules.

pub mod repository;
pub mod service;

pub use repository::{ReviewRepository, SeaOrmReviewRepository};
pub use service::{NewReview, ReviewService, ReviewUpdate};
