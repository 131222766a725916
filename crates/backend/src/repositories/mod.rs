//! Repository traits of the core crate implemented over the REST table API.

mod contracts;
mod deals;
mod people;
mod players;

use crate::client::RestClient;

/// All repositories for one signed-in user.
///
/// Row ownership is enforced by the backend's row-level security; `user_id`
/// is only written into tables whose policies expect it on insert.
#[derive(Debug, Clone)]
pub struct RemoteRepository {
    pub(crate) rest: RestClient,
    pub(crate) user_id: String,
}

impl RemoteRepository {
    pub fn new(rest: RestClient, user_id: &str) -> Self {
        Self {
            rest,
            user_id: user_id.to_string(),
        }
    }
}
