//! Virtual barista: completion API client, discount-eligibility policy,
//! prompt assembly, and reply post-processing.
//!
//! The barista is a single-pass pipeline per chat request: decide whether
//! this customer should be offered a discount, steer the model with a
//! system prompt, then scan the free-form reply for a code to surface as a
//! structured discount. Orchestration lives in `services::barista`.

pub mod client;
pub mod discount;
pub mod error;
pub mod prompt;
pub mod types;

pub use client::CompletionClient;
pub use discount::{CustomerSignals, Eligibility, OfferReason, evaluate_eligibility, extract_discount};
pub use error::CompletionError;
pub use types::{ChatRequest, ChatResponse, ContentBlock, Message};
