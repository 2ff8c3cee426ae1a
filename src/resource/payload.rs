//! Fetched values
//!
//! Collections are shared behind `Arc` so cache reads and view derivations
//! clone a pointer, never the records.

use super::key::ResourceType;
use crate::api::types::{Comment, Post, User};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Users(Arc<Vec<User>>),
    User(Arc<User>),
    Posts(Arc<Vec<Post>>),
    Post(Arc<Post>),
    Comments(Arc<Vec<Comment>>),
    Comment(Arc<Comment>),
}

impl Payload {
    pub fn resource(&self) -> ResourceType {
        match self {
            Payload::Users(_) | Payload::User(_) => ResourceType::Users,
            Payload::Posts(_) | Payload::Post(_) => ResourceType::Posts,
            Payload::Comments(_) | Payload::Comment(_) => ResourceType::Comments,
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            Payload::Users(_) | Payload::Posts(_) | Payload::Comments(_)
        )
    }

    /// Number of records carried (1 for single-record payloads)
    pub fn len(&self) -> usize {
        match self {
            Payload::Users(users) => users.len(),
            Payload::Posts(posts) => posts.len(),
            Payload::Comments(comments) => comments.len(),
            Payload::User(_) | Payload::Post(_) | Payload::Comment(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_users(&self) -> Option<&Arc<Vec<User>>> {
        match self {
            Payload::Users(users) => Some(users),
            _ => None,
        }
    }

    pub fn as_user(&self) -> Option<&Arc<User>> {
        match self {
            Payload::User(user) => Some(user),
            _ => None,
        }
    }

    pub fn as_posts(&self) -> Option<&Arc<Vec<Post>>> {
        match self {
            Payload::Posts(posts) => Some(posts),
            _ => None,
        }
    }

    pub fn as_post(&self) -> Option<&Arc<Post>> {
        match self {
            Payload::Post(post) => Some(post),
            _ => None,
        }
    }

    pub fn as_comments(&self) -> Option<&Arc<Vec<Comment>>> {
        match self {
            Payload::Comments(comments) => Some(comments),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&Arc<Comment>> {
        match self {
            Payload::Comment(comment) => Some(comment),
            _ => None,
        }
    }
}

impl From<Vec<User>> for Payload {
    fn from(users: Vec<User>) -> Self {
        Payload::Users(Arc::new(users))
    }
}

impl From<User> for Payload {
    fn from(user: User) -> Self {
        Payload::User(Arc::new(user))
    }
}

impl From<Vec<Post>> for Payload {
    fn from(posts: Vec<Post>) -> Self {
        Payload::Posts(Arc::new(posts))
    }
}

impl From<Post> for Payload {
    fn from(post: Post) -> Self {
        Payload::Post(Arc::new(post))
    }
}

impl From<Vec<Comment>> for Payload {
    fn from(comments: Vec<Comment>) -> Self {
        Payload::Comments(Arc::new(comments))
    }
}

impl From<Comment> for Payload {
    fn from(comment: Comment) -> Self {
        Payload::Comment(Arc::new(comment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64) -> Post {
        Post {
            id,
            user_id: 1,
            title: format!("post {}", id),
            body: String::new(),
        }
    }

    #[test]
    fn test_collection_len_and_resource() {
        let payload = Payload::from(vec![post(1), post(2)]);
        assert!(payload.is_collection());
        assert_eq!(payload.len(), 2);
        assert_eq!(payload.resource(), ResourceType::Posts);
        assert!(payload.as_posts().is_some());
        assert!(payload.as_users().is_none());
    }

    #[test]
    fn test_single_record_counts_as_one() {
        let payload = Payload::from(post(7));
        assert!(!payload.is_collection());
        assert_eq!(payload.len(), 1);
        assert_eq!(payload.as_post().map(|p| p.id), Some(7));
    }

    #[test]
    fn test_empty_collection() {
        let payload = Payload::from(Vec::<Comment>::new());
        assert!(payload.is_empty());
    }
}
