//! `/admin/users` endpoints

use shared::client::{UpdateTierRequest, UpdateUserRequest, UserStatusRequest};
use shared::{Ack, AffiliateTier, User, UserQuery, UsersPage};

use super::{query_key, AdminApi};
use crate::cache::{Tag, TagType};
use crate::http::HttpClient;
use crate::ClientResult;

pub struct UsersApi<'a, C> {
    api: &'a AdminApi<C>,
}

impl<'a, C: HttpClient> UsersApi<'a, C> {
    pub(super) fn new(api: &'a AdminApi<C>) -> Self {
        Self { api }
    }

    /// Paginated, filtered user list
    pub async fn list(&self, query: &UserQuery) -> ClientResult<UsersPage> {
        let params = query.to_params();
        self.api
            .query(
                query_key("admin/users", &params),
                vec![TagType::Users.into()],
                None,
                || self.api.http.get_with("admin/users", &params),
            )
            .await
    }

    pub async fn get(&self, id: &str) -> ClientResult<User> {
        let path = format!("admin/users/{id}");
        self.api
            .query(
                path.clone(),
                vec![Tag::id(TagType::Users, id)],
                None,
                || self.api.http.get(&path),
            )
            .await
    }

    /// Change a user's affiliate tier
    pub async fn update_tier(&self, user_id: &str, tier: AffiliateTier) -> ClientResult<Ack> {
        let req = UpdateTierRequest {
            user_id: user_id.to_string(),
            tier,
        };
        self.api
            .mutate(
                &[TagType::Users.into()],
                self.api.http.put("admin/update-tier", &req),
            )
            .await
    }

    pub async fn update(&self, id: &str, req: &UpdateUserRequest) -> ClientResult<Ack> {
        let path = format!("admin/users/{id}");
        self.api
            .mutate(&[TagType::Users.into()], self.api.http.put(&path, req))
            .await
    }

    pub async fn set_status(&self, id: &str, status: &str) -> ClientResult<Ack> {
        let path = format!("admin/users/{id}/status");
        let req = UserStatusRequest {
            status: status.to_string(),
        };
        self.api
            .mutate(&[TagType::Users.into()], self.api.http.patch(&path, &req))
            .await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<Ack> {
        let path = format!("admin/users/{id}");
        self.api
            .mutate(&[TagType::Users.into()], self.api.http.delete(&path))
            .await
    }
}
