//! Friends API

use crate::{ClientError, ClientResult, HttpClient};
use shared::client::{Ack, FriendRequestsResponse, FriendsListResponse};
use shared::models::{Friend, FriendRequest};

impl HttpClient {
    /// Send a friend request by email
    pub async fn add_friend_by_email(&self, email: &str) -> ClientResult<()> {
        if email.trim().is_empty() {
            return Err(ClientError::Validation("Email is required".to_string()));
        }
        let user_id = self.user_id()?.to_string();
        let response: Ack = self
            .post_empty(
                "friends/add-by-email",
                &[("userId", user_id), ("email", email.trim().to_string())],
            )
            .await?;
        if !response.success {
            return Err(ClientError::rejected(response.message));
        }
        Ok(())
    }

    /// Confirmed friends
    pub async fn friends_list(&self) -> ClientResult<Vec<Friend>> {
        let user_id = self.user_id()?.to_string();
        let response: FriendsListResponse =
            self.get("friends/list", &[("userId", user_id)]).await?;
        if !response.success {
            return Err(ClientError::rejected(response.message));
        }
        Ok(response.friends)
    }

    /// Remove a friend
    pub async fn remove_friend(&self, friend_id: &str) -> ClientResult<()> {
        let user_id = self.user_id()?.to_string();
        let response: Ack = self
            .post_empty(
                "friends/remove",
                &[("userId", user_id), ("friendId", friend_id.to_string())],
            )
            .await?;
        if !response.success {
            return Err(ClientError::rejected(response.message));
        }
        Ok(())
    }

    /// Incoming friend requests awaiting a response
    pub async fn pending_friend_requests(&self) -> ClientResult<Vec<FriendRequest>> {
        let user_id = self.user_id()?.to_string();
        let response: FriendRequestsResponse =
            self.get("friends/pending", &[("userId", user_id)]).await?;
        if !response.success {
            return Err(ClientError::rejected(response.message));
        }
        Ok(response.requests)
    }

    /// Accept a friend request
    pub async fn accept_friend_request(&self, request_id: i64) -> ClientResult<()> {
        self.respond_to_friend_request("friends/accept", request_id)
            .await
    }

    /// Decline a friend request
    pub async fn decline_friend_request(&self, request_id: i64) -> ClientResult<()> {
        self.respond_to_friend_request("friends/decline", request_id)
            .await
    }

    async fn respond_to_friend_request(&self, path: &str, request_id: i64) -> ClientResult<()> {
        let user_id = self.user_id()?.to_string();
        let response: Ack = self
            .post_empty(
                path,
                &[("userId", user_id), ("requestId", request_id.to_string())],
            )
            .await?;
        if !response.success {
            return Err(ClientError::rejected(response.message));
        }
        Ok(())
    }
}
