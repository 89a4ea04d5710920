//! Request and response data transfer objects
//!
//! Responses never carry a navigation back to their parent, and fields
//! holding `None` are left out of the JSON body.

pub mod category;
pub mod product;

use serde::Serialize;

/// Plain confirmation body, e.g. `{ "message": "Updated 4 products" }`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
