//! Record shapes served by the upstream API
//!
//! Responses are deserialized straight into these types, so a body that does
//! not match the expected shape surfaces as a parse failure instead of leaking
//! half-typed JSON into the rest of the app.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub address: Address,
    pub company: Company,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

/// Coordinates as served upstream (decimal strings)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    /// Soft reference to `User::id`, not guaranteed to resolve
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    /// Soft reference to `Post::id`, not guaranteed to resolve
    pub post_id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Parsed map position
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    /// Caption used under the map, e.g. "-37.315900, 81.149600"
    pub fn label(&self) -> String {
        format!("{:.6}, {:.6}", self.lat, self.lng)
    }
}

impl Geo {
    /// Parse the upstream strings into a position.
    ///
    /// Returns None when either coordinate is not a finite number or falls
    /// outside the valid latitude/longitude range.
    pub fn location(&self) -> Option<Location> {
        let lat: f64 = self.lat.trim().parse().ok()?;
        let lng: f64 = self.lng.trim().parse().ok()?;

        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return None;
        }

        Some(Location { lat, lng })
    }
}

impl User {
    pub fn location(&self) -> Option<Location> {
        self.address.geo.location()
    }

    /// Single-line address, e.g. "Kulas Light, Apt. 556, Gwenborough 92998-3874"
    pub fn address_line(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.address.street, self.address.suite, self.address.city, self.address.zipcode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_user() -> serde_json::Value {
        json!({
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": { "lat": "-37.3159", "lng": "81.1496" }
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": {
                "name": "Romaguera-Crona",
                "catchPhrase": "Multi-layered client-server neural-net",
                "bs": "harness real-time e-markets"
            }
        })
    }

    #[test]
    fn test_user_deserializes_nested_shape() {
        let user: User = serde_json::from_value(sample_user()).unwrap();
        assert_eq!(user.username, "Bret");
        assert_eq!(user.company.catch_phrase, "Multi-layered client-server neural-net");
        assert_eq!(user.address.geo.lat, "-37.3159");
        assert_eq!(
            user.address_line(),
            "Kulas Light, Apt. 556, Gwenborough 92998-3874"
        );
    }

    #[test]
    fn test_user_missing_field_is_rejected() {
        let mut value = sample_user();
        value.as_object_mut().unwrap().remove("email");
        assert!(serde_json::from_value::<User>(value).is_err());
    }

    #[test]
    fn test_post_and_comment_camel_case() {
        let post: Post =
            serde_json::from_value(json!({"id": 1, "userId": 7, "title": "t", "body": "b"}))
                .unwrap();
        assert_eq!(post.user_id, 7);

        let comment: Comment = serde_json::from_value(json!({
            "id": 3, "postId": 1, "name": "n", "email": "e@x.io", "body": "b"
        }))
        .unwrap();
        assert_eq!(comment.post_id, 1);
    }

    #[test]
    fn test_geo_location_parsing() {
        let geo = Geo {
            lat: "-37.3159".into(),
            lng: "81.1496".into(),
        };
        let loc = geo.location().unwrap();
        assert_eq!(loc.label(), "-37.315900, 81.149600");

        let bad = Geo {
            lat: "north".into(),
            lng: "0".into(),
        };
        assert!(bad.location().is_none());

        let out_of_range = Geo {
            lat: "91".into(),
            lng: "0".into(),
        };
        assert!(out_of_range.location().is_none());
    }
}
