//! Derived per-view data
//!
//! Turns the payloads of a route's dependency set into the rows, cards and
//! details the presentation layer renders. Pure: everything is computed from
//! the payloads and the search string.

use super::route::Route;
use crate::api::error::FetchError;
use crate::api::types::{Comment, Location, Post, User};
use crate::derive::{
    comments_for, counts_by_type, filter_by_search, map_embed_url, owner_of, posts_by, Counts,
    DEFAULT_MAP_ZOOM, POST_SEARCH_FIELDS, USER_SEARCH_FIELDS,
};
use crate::resource::Payload;
use serde::Serialize;

/// A post together with its resolved owner name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRow {
    #[serde(flatten)]
    pub post: Post,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewData {
    Dashboard {
        counts: Counts,
        shares: [f64; 3],
    },
    Users {
        users: Vec<User>,
    },
    UserProfile {
        user: User,
        location: Option<Location>,
        embed_url: Option<String>,
        posts: Vec<Post>,
    },
    Posts {
        posts: Vec<PostRow>,
    },
    PostDetail {
        post: Post,
        author: Option<User>,
        author_name: String,
        comments: Vec<Comment>,
    },
}

impl ViewData {
    /// Number of selectable rows in the view's main list
    pub fn row_count(&self) -> usize {
        match self {
            ViewData::Dashboard { .. } => 0,
            ViewData::Users { users } => users.len(),
            ViewData::UserProfile { posts, .. } => posts.len(),
            ViewData::Posts { posts } => posts.len(),
            ViewData::PostDetail { comments, .. } => comments.len(),
        }
    }
}

fn unexpected(route: Route, position: usize) -> FetchError {
    FetchError::Parse(format!(
        "unexpected payload at position {} for view {}",
        position, route
    ))
}

/// Derive the data for `route` from its dependency payloads.
///
/// `payloads` must be in [`Route::dependencies`] order. A payload of the
/// wrong shape is reported as a parse failure rather than rendered.
pub fn derive_view(route: Route, payloads: &[Payload], search: &str) -> Result<ViewData, FetchError> {
    let at = |i: usize| payloads.get(i).ok_or_else(|| unexpected(route, i));

    match route {
        Route::Dashboard => {
            let users = at(0)?.as_users().ok_or_else(|| unexpected(route, 0))?;
            let posts = at(1)?.as_posts().ok_or_else(|| unexpected(route, 1))?;
            let comments = at(2)?.as_comments().ok_or_else(|| unexpected(route, 2))?;

            let counts = counts_by_type(
                Some(users.as_slice()),
                Some(posts.as_slice()),
                Some(comments.as_slice()),
            );
            Ok(ViewData::Dashboard {
                counts,
                shares: counts.shares(),
            })
        },
        Route::Users => {
            let users = at(0)?.as_users().ok_or_else(|| unexpected(route, 0))?;
            Ok(ViewData::Users {
                users: filter_by_search(users.as_slice(), search, USER_SEARCH_FIELDS)
                    .into_iter()
                    .cloned()
                    .collect(),
            })
        },
        Route::UserProfile(id) => {
            let user = at(0)?.as_user().ok_or_else(|| unexpected(route, 0))?;
            let posts = at(1)?.as_posts().ok_or_else(|| unexpected(route, 1))?;

            // The filtered endpoint already scopes by user; join again so a
            // lenient upstream cannot leak other users' posts into the profile
            let own: Vec<Post> = posts_by(id, posts).into_iter().cloned().collect();
            let posts = filter_by_search(&own, search, POST_SEARCH_FIELDS)
                .into_iter()
                .cloned()
                .collect();

            let location = user.location();
            Ok(ViewData::UserProfile {
                user: User::clone(user),
                location,
                embed_url: location.map(|loc| map_embed_url(loc, DEFAULT_MAP_ZOOM)),
                posts,
            })
        },
        Route::Posts => {
            let posts = at(0)?.as_posts().ok_or_else(|| unexpected(route, 0))?;
            let users = at(1)?.as_users().ok_or_else(|| unexpected(route, 1))?;

            let posts = filter_by_search(posts.as_slice(), search, POST_SEARCH_FIELDS)
                .into_iter()
                .map(|post| PostRow {
                    post: post.clone(),
                    author: owner_of(post, users).name().to_string(),
                })
                .collect();
            Ok(ViewData::Posts { posts })
        },
        Route::PostDetail(id) => {
            let post = at(0)?.as_post().ok_or_else(|| unexpected(route, 0))?;
            let comments = at(1)?.as_comments().ok_or_else(|| unexpected(route, 1))?;
            let users = at(2)?.as_users().ok_or_else(|| unexpected(route, 2))?;

            let owner = owner_of(post, users);
            Ok(ViewData::PostDetail {
                post: Post::clone(post),
                author: owner.user().cloned(),
                author_name: owner.name().to_string(),
                comments: comments_for(id, comments).into_iter().cloned().collect(),
            })
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Address, Company, Geo};
    use crate::derive::UNKNOWN_USER;

    fn user(id: u64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
            phone: String::new(),
            website: String::new(),
            address: Address {
                street: "Kulas Light".into(),
                suite: "Apt. 556".into(),
                city: "Gwenborough".into(),
                zipcode: "92998-3874".into(),
                geo: Geo {
                    lat: "-37.3159".into(),
                    lng: "81.1496".into(),
                },
            },
            company: Company {
                name: "Romaguera-Crona".into(),
                catch_phrase: String::new(),
                bs: String::new(),
            },
        }
    }

    fn post(id: u64, user_id: u64, title: &str) -> Post {
        Post {
            id,
            user_id,
            title: title.to_string(),
            body: String::new(),
        }
    }

    fn comment(id: u64, post_id: u64) -> Comment {
        Comment {
            id,
            post_id,
            name: String::new(),
            email: String::new(),
            body: String::new(),
        }
    }

    #[test]
    fn test_dashboard_counts() {
        let payloads = vec![
            Payload::from(vec![user(1, "a"), user(2, "b")]),
            Payload::from(vec![post(1, 1, "t")]),
            Payload::from(vec![comment(1, 1), comment(2, 1), comment(3, 1)]),
        ];
        let data = derive_view(Route::Dashboard, &payloads, "").unwrap();
        match data {
            ViewData::Dashboard { counts, .. } => {
                assert_eq!((counts.users, counts.posts, counts.comments), (2, 1, 3));
            },
            other => panic!("unexpected view data: {:?}", other),
        }
    }

    #[test]
    fn test_users_filtered_by_search() {
        let payloads = vec![Payload::from(vec![user(1, "Leanne"), user(2, "Ervin")])];
        let data = derive_view(Route::Users, &payloads, "ERV").unwrap();
        assert_eq!(data.row_count(), 1);
    }

    #[test]
    fn test_posts_with_unknown_owner() {
        let payloads = vec![
            Payload::from(vec![post(1, 1, "first"), post(2, 42, "orphan")]),
            Payload::from(vec![user(1, "Leanne")]),
        ];
        let data = derive_view(Route::Posts, &payloads, "").unwrap();
        let ViewData::Posts { posts } = data else {
            panic!("expected posts view");
        };
        assert_eq!(posts[0].author, "Leanne");
        assert_eq!(posts[1].author, UNKNOWN_USER);
    }

    #[test]
    fn test_user_profile_scopes_posts_and_builds_embed() {
        let payloads = vec![
            Payload::from(user(3, "Clementine")),
            Payload::from(vec![post(1, 3, "mine"), post(2, 4, "not mine")]),
        ];
        let data = derive_view(Route::UserProfile(3), &payloads, "").unwrap();
        let ViewData::UserProfile {
            posts, embed_url, ..
        } = data
        else {
            panic!("expected profile view");
        };
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, 1);
        assert_eq!(
            embed_url.as_deref(),
            Some("https://www.google.com/maps?q=-37.3159,81.1496&hl=en&z=14&output=embed")
        );
    }

    #[test]
    fn test_post_detail_orders_comments() {
        let payloads = vec![
            Payload::from(post(1, 1, "t")),
            Payload::from(vec![comment(5, 1), comment(2, 1), comment(9, 2)]),
            Payload::from(vec![user(1, "Leanne")]),
        ];
        let data = derive_view(Route::PostDetail(1), &payloads, "").unwrap();
        let ViewData::PostDetail {
            comments,
            author_name,
            ..
        } = data
        else {
            panic!("expected post detail view");
        };
        let ids: Vec<u64> = comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![5, 2]);
        assert_eq!(author_name, "Leanne");
    }

    #[test]
    fn test_mismatched_payload_is_parse_error() {
        let payloads = vec![Payload::from(vec![post(1, 1, "t")])];
        let err = derive_view(Route::Users, &payloads, "").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));

        let err = derive_view(Route::Posts, &payloads, "").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn test_serializes_with_view_tag() {
        let payloads = vec![Payload::from(vec![user(1, "Leanne")])];
        let data = derive_view(Route::Users, &payloads, "").unwrap();
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["view"], "users");
        assert_eq!(json["users"][0]["company"]["catchPhrase"], "");
    }
}
