//! Join & Derive Layer
//!
//! Pure functions over already-fetched collections: counts for the summary
//! cards and charts, soft foreign-key lookups, and search filtering. Nothing
//! here holds state or touches the cache.

use crate::api::types::{Comment, Location, Post, User};
use crate::resource::ResourceType;
use serde::Serialize;

/// Display name substituted when a post's owner cannot be resolved
pub const UNKNOWN_USER: &str = "Unknown User";

/// Zoom level used for map embeds
pub const DEFAULT_MAP_ZOOM: u8 = 14;

// =========================================================================
// Counts
// =========================================================================

/// Record counts per resource type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub users: usize,
    pub posts: usize,
    pub comments: usize,
}

impl Counts {
    pub fn get(&self, resource: ResourceType) -> usize {
        match resource {
            ResourceType::Users => self.users,
            ResourceType::Posts => self.posts,
            ResourceType::Comments => self.comments,
        }
    }

    pub fn total(&self) -> usize {
        self.users + self.posts + self.comments
    }

    /// Bar chart series in display order
    pub fn series(&self) -> [(&'static str, u64); 3] {
        ResourceType::ALL.map(|r| (r.label(), self.get(r) as u64))
    }

    /// Percentage share of each resource type, in display order.
    /// All zeros when nothing has been counted.
    pub fn shares(&self) -> [f64; 3] {
        let total = self.total();
        if total == 0 {
            return [0.0; 3];
        }
        ResourceType::ALL.map(|r| self.get(r) as f64 * 100.0 / total as f64)
    }
}

/// Count each collection; inputs that have not loaded count as zero
pub fn counts_by_type(
    users: Option<&[User]>,
    posts: Option<&[Post]>,
    comments: Option<&[Comment]>,
) -> Counts {
    Counts {
        users: users.map_or(0, <[User]>::len),
        posts: posts.map_or(0, <[Post]>::len),
        comments: comments.map_or(0, <[Comment]>::len),
    }
}

// =========================================================================
// Soft foreign keys
// =========================================================================

/// Resolved owner of a post
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Owner<'a> {
    Known(&'a User),
    Unknown,
}

impl<'a> Owner<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Owner::Known(user) => &user.name,
            Owner::Unknown => UNKNOWN_USER,
        }
    }

    pub fn user(&self) -> Option<&'a User> {
        match self {
            Owner::Known(user) => Some(user),
            Owner::Unknown => None,
        }
    }
}

/// Look up the user a post belongs to, falling back to [`Owner::Unknown`]
pub fn owner_of<'a>(post: &Post, users: &'a [User]) -> Owner<'a> {
    users
        .iter()
        .find(|user| user.id == post.user_id)
        .map_or(Owner::Unknown, Owner::Known)
}

/// Comments on `post_id`, in source order
pub fn comments_for(post_id: u64, comments: &[Comment]) -> Vec<&Comment> {
    comments.iter().filter(|c| c.post_id == post_id).collect()
}

/// Posts written by `user_id`, in source order
pub fn posts_by(user_id: u64, posts: &[Post]) -> Vec<&Post> {
    posts.iter().filter(|p| p.user_id == user_id).collect()
}

// =========================================================================
// Search
// =========================================================================

/// Text field accessor used by [`filter_by_search`]
pub type SearchField<T> = fn(&T) -> &str;

fn user_name(user: &User) -> &str {
    &user.name
}

fn user_username(user: &User) -> &str {
    &user.username
}

fn user_email(user: &User) -> &str {
    &user.email
}

fn post_title(post: &Post) -> &str {
    &post.title
}

fn post_body(post: &Post) -> &str {
    &post.body
}

pub const USER_SEARCH_FIELDS: &[SearchField<User>] = &[user_name, user_username, user_email];

pub const POST_SEARCH_FIELDS: &[SearchField<Post>] = &[post_title, post_body];

/// Case-insensitive substring search.
///
/// An item matches when any of `fields` contains the query. An empty query
/// matches everything. Source order is preserved.
pub fn filter_by_search<'a, T>(items: &'a [T], query: &str, fields: &[SearchField<T>]) -> Vec<&'a T> {
    if query.is_empty() {
        return items.iter().collect();
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            fields
                .iter()
                .any(|field| field(item).to_lowercase().contains(&needle))
        })
        .collect()
}

// =========================================================================
// Maps
// =========================================================================

/// Embeddable Google Maps URL centred on `location`
pub fn map_embed_url(location: Location, zoom: u8) -> String {
    format!(
        "https://www.google.com/maps?q={},{}&hl=en&z={}&output=embed",
        location.lat, location.lng, zoom
    )
}
