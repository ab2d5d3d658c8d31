//! Clients for the external route query APIs, one per pool family.

pub mod amm;
pub mod weighted;
