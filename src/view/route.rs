//! Routes and their dependency sets

use crate::resource::QueryKey;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A screen of the dashboard, identified the same way a URL path would be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Users,
    UserProfile(u64),
    Posts,
    PostDetail(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown view '{0}' (expected dashboard, users, users/ID, posts or posts/ID)")]
pub struct RouteParseError(pub String);

impl Route {
    /// Keys that must all succeed before the route can render.
    ///
    /// Order is significant: [`crate::view::derive_view`] reads payloads
    /// positionally in this order.
    pub fn dependencies(&self) -> Vec<QueryKey> {
        match self {
            Route::Dashboard => vec![QueryKey::users(), QueryKey::posts(), QueryKey::comments()],
            Route::Users => vec![QueryKey::users()],
            Route::UserProfile(id) => vec![QueryKey::user(*id), QueryKey::posts_by_user(*id)],
            Route::Posts => vec![QueryKey::posts(), QueryKey::users()],
            Route::PostDetail(id) => vec![
                QueryKey::post(*id),
                QueryKey::comments_for_post(*id),
                QueryKey::users(),
            ],
        }
    }

    /// Heading shown in the header and crumb
    pub fn title(&self) -> String {
        match self {
            Route::Dashboard => "Dashboard".to_string(),
            Route::Users => "Users".to_string(),
            Route::UserProfile(id) => format!("User {}", id),
            Route::Posts => "Posts".to_string(),
            Route::PostDetail(id) => format!("Post {}", id),
        }
    }

    /// Whether the `/` search filter applies to this route
    pub fn is_searchable(&self) -> bool {
        matches!(self, Route::Users | Route::Posts | Route::UserProfile(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Dashboard => f.write_str("dashboard"),
            Route::Users => f.write_str("users"),
            Route::UserProfile(id) => write!(f, "users/{}", id),
            Route::Posts => f.write_str("posts"),
            Route::PostDetail(id) => write!(f, "posts/{}", id),
        }
    }
}

impl FromStr for Route {
    type Err = RouteParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_matches('/');
        let err = || RouteParseError(s.to_string());

        let (head, id) = match trimmed.split_once('/') {
            Some((head, id)) => (head, Some(id.parse::<u64>().map_err(|_| err())?)),
            None => (trimmed, None),
        };

        match (head.to_ascii_lowercase().as_str(), id) {
            ("" | "dashboard" | "home", None) => Ok(Route::Dashboard),
            ("users", None) => Ok(Route::Users),
            ("users", Some(id)) => Ok(Route::UserProfile(id)),
            ("posts", None) => Ok(Route::Posts),
            ("posts", Some(id)) => Ok(Route::PostDetail(id)),
            _ => Err(err()),
        }
    }
}
