// src/utils.rs
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use std::net::IpAddr;
use chrono::{Datelike, Utc};
use std::fmt;

#[derive(Debug)]
pub enum RequestError {
    MissingPeerIP,
    RateLimitExceeded,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPeerIP => write!(f, "Failed to extract client IP"),
            Self::RateLimitExceeded => write!(f, "Rate limit exceeded"),
        }
    }
}

impl ResponseError for RequestError {
    fn error_response(&self) -> HttpResponse {
        match self {
            Self::RateLimitExceeded => {
                HttpResponse::TooManyRequests().body(self.to_string())
            }
            _ => HttpResponse::BadRequest().body(self.to_string())
        }
    }
}

pub fn peer_ip(req: &HttpRequest) -> Result<IpAddr, RequestError> {
    req.peer_addr()
        .map(|addr| addr.ip())
        .ok_or(RequestError::MissingPeerIP)
}

pub fn current_year() -> i32 {
    Utc::now().year()
}
