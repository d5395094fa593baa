//! # chirpy-service
//!
//! Application layer: the session orchestrator (login, refresh, revoke,
//! password-change invalidation), account use cases, the request hit
//! counter, and the DTOs the HTTP layer speaks.

pub mod dto;
pub mod services;

pub use services::{
    AtomicHitCounter, HitCounter, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, SessionService, UserService,
};
