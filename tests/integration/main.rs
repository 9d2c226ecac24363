//! End-to-end tests: question in, answer out, against an in-memory
//! forecast provider.

mod ask_flow;
mod mock_provider;
