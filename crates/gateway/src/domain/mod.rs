//! Core logic of the swap pipeline, free of transport concerns. The API layer
//! drives [`trade::Pipeline`], which talks to the routing and execution
//! backends exclusively through the capability traits in [`swap`].

pub mod eth;
pub mod guard;
pub mod price;
pub mod swap;
pub mod trade;
