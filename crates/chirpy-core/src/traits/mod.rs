//! Store traits (ports)

mod repositories;

pub use repositories::{
    CredentialUpdate, NewUser, RefreshTokenRepository, RepoResult, UserRepository,
};
