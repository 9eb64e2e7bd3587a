//! Client for the Rebound consumer-portal API: token issuance, postal-service
//! (return-method) search, and drop-off-point search.

mod client;
mod error;
mod token;
mod types;

pub use client::{DropOffQuery, ReboundClient};
pub use error::ReboundError;
pub use token::{IssuedToken, TokenCache};
pub use types::{
    CollectionDate, DropOffPoint, DropOffSearchResponse, PostalService, PostalServicePage, Price,
    ServiceAddress, ServiceDropOffLocation, TimeSlot,
};
