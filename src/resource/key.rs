//! Query keys
//!
//! A key is a resource type plus an optional scalar filter. It identifies one
//! fetchable query, builds its URL and is the cache's lookup key.

use std::fmt;
use url::Url;

/// Named collection served by the upstream API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Users,
    Posts,
    Comments,
}

impl ResourceType {
    pub const ALL: [ResourceType; 3] = [
        ResourceType::Users,
        ResourceType::Posts,
        ResourceType::Comments,
    ];

    /// Path segment on the upstream API
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Users => "users",
            ResourceType::Posts => "posts",
            ResourceType::Comments => "comments",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResourceType::Users => "Users",
            ResourceType::Posts => "Posts",
            ResourceType::Comments => "Comments",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional scalar filter attached to a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Single record by id (`/users/1`)
    Id(u64),
    /// Equality filter on `userId` (`/posts?userId=1`)
    UserId(u64),
    /// Equality filter on `postId` (`/comments?postId=1`)
    PostId(u64),
}

impl Filter {
    fn query_param(&self) -> Option<(&'static str, u64)> {
        match self {
            Filter::Id(_) => None,
            Filter::UserId(id) => Some(("userId", *id)),
            Filter::PostId(id) => Some(("postId", *id)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: ResourceType,
    pub filter: Option<Filter>,
}

impl QueryKey {
    pub const fn new(resource: ResourceType, filter: Option<Filter>) -> Self {
        Self { resource, filter }
    }

    pub const fn users() -> Self {
        Self::new(ResourceType::Users, None)
    }

    pub const fn user(id: u64) -> Self {
        Self::new(ResourceType::Users, Some(Filter::Id(id)))
    }

    pub const fn posts() -> Self {
        Self::new(ResourceType::Posts, None)
    }

    pub const fn post(id: u64) -> Self {
        Self::new(ResourceType::Posts, Some(Filter::Id(id)))
    }

    pub const fn posts_by_user(user_id: u64) -> Self {
        Self::new(ResourceType::Posts, Some(Filter::UserId(user_id)))
    }

    pub const fn comments() -> Self {
        Self::new(ResourceType::Comments, None)
    }

    pub const fn comment(id: u64) -> Self {
        Self::new(ResourceType::Comments, Some(Filter::Id(id)))
    }

    pub const fn comments_for_post(post_id: u64) -> Self {
        Self::new(ResourceType::Comments, Some(Filter::PostId(post_id)))
    }

    /// True when the query resolves to one record rather than a collection
    pub fn is_single_record(&self) -> bool {
        matches!(self.filter, Some(Filter::Id(_)))
    }

    /// Build the request URL under `base`.
    ///
    /// `base` must end with a slash so the resource path joins beneath it.
    pub fn url(&self, base: &Url) -> Result<Url, url::ParseError> {
        let path = match self.filter {
            Some(Filter::Id(id)) => format!("{}/{}", self.resource.as_str(), id),
            _ => self.resource.as_str().to_string(),
        };

        let mut url = base.join(&path)?;
        if let Some((param, value)) = self.filter.and_then(|f| f.query_param()) {
            url.query_pairs_mut()
                .append_pair(param, &value.to_string());
        }

        Ok(url)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.filter {
            None => write!(f, "{}", self.resource),
            Some(Filter::Id(id)) => write!(f, "{}/{}", self.resource, id),
            Some(Filter::UserId(id)) => write!(f, "{}?userId={}", self.resource, id),
            Some(Filter::PostId(id)) => write!(f, "{}?postId={}", self.resource, id),
        }
    }
}
