pub mod aggregate;
pub mod filter;
pub mod order;
pub mod predicate;
pub mod request;
