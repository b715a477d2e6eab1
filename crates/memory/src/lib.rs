//! Conversation memory for Mentora.
//!
//! A session's memory is a rolling, size-bounded view of the conversation:
//! the most recent turns verbatim, everything older compressed into a
//! single evolving summary blob. The budget is enforced after every
//! completed turn; recency wins over completeness.

pub mod condenser;
pub mod summary;

pub use condenser::{Condenser, ExtractiveCondenser};
pub use summary::SummaryMemory;
