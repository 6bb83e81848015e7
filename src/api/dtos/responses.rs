use serde::Serialize;
use crate::domain::models::hotel::Hotel;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self { message: message.to_string() }
    }
}

#[derive(Serialize)]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

#[derive(Serialize)]
pub struct HotelSearchResponse {
    pub data: Vec<Hotel>,
    pub pagination: Pagination,
}
