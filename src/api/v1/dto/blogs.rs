/*
 * Responsibility
 * - Blogs の request/response DTO
 * - 公開 ID は encode 済みの値を返す (内部 ID を漏らさない)
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    pub url: String,
    // Defaults to 0 when omitted.
    #[serde(default)]
    pub likes: Option<i64>,
}

impl CreateBlogRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.url.trim().is_empty() {
            return Err("url is required");
        }
        if self.likes.is_some_and(|l| l < 0) {
            return Err("likes must be non-negative");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

impl UpdateBlogRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }
        if let Some(url) = &self.url
            && url.trim().is_empty()
        {
            return Err("url cannot be empty");
        }
        if self.likes.is_some_and(|l| l < 0) {
            return Err("likes must be non-negative");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct BlogResponse {
    pub id: String, // encoded
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub user_id: String, // UUID
}

#[derive(Debug, Serialize)]
pub struct BlogStatsResponse {
    pub count: usize,
    pub total_likes: i64,
    pub favorite: Option<BlogResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_title_and_url() {
        let req: CreateBlogRequest =
            serde_json::from_str(r#"{"title":"  ","url":"http://a.com"}"#).unwrap();
        assert_eq!(req.validate(), Err("title is required"));

        let req: CreateBlogRequest =
            serde_json::from_str(r#"{"title":"Hello","url":""}"#).unwrap();
        assert_eq!(req.validate(), Err("url is required"));
    }

    #[test]
    fn create_accepts_missing_author_and_likes() {
        let req: CreateBlogRequest =
            serde_json::from_str(r#"{"title":"Hello","url":"http://a.com"}"#).unwrap();
        assert_eq!(req.validate(), Ok(()));
        assert_eq!(req.likes, None);
        assert_eq!(req.author, None);
    }

    #[test]
    fn update_rejects_blank_fields_only_when_present() {
        let req: UpdateBlogRequest = serde_json::from_str(r#"{"likes":12}"#).unwrap();
        assert_eq!(req.validate(), Ok(()));

        let req: UpdateBlogRequest = serde_json::from_str(r#"{"title":""}"#).unwrap();
        assert_eq!(req.validate(), Err("title cannot be empty"));
    }

    #[test]
    fn negative_likes_are_rejected() {
        let req: UpdateBlogRequest = serde_json::from_str(r#"{"likes":-1}"#).unwrap();
        assert_eq!(req.validate(), Err("likes must be non-negative"));
    }
}
