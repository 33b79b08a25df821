//! Customer review business logic.
//!
//! Any authenticated user can leave a rated review; it lands in `PENDING`
//! status and only reaches the public surface once a manager approves it.
//! Moderation decisions are recorded in the activity log. Rating aggregation
//! (averages, dashboards) is intentionally not done here.

use crate::{
    core::audit,
    entities::{Review, review, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Roles allowed to approve or reject reviews.
const REVIEW_MODERATOR_ROLES: [&str; 2] = ["ADMIN", "MANAGER"];

/// Platform recorded when the reviewer doesn't name one.
const DEFAULT_PLATFORM: &str = "Website";

/// Moderation status of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    /// Submitted, not yet moderated
    Pending,
    /// Approved for public display
    Approved,
    /// Rejected by a moderator
    Rejected,
}

impl ReviewStatus {
    /// Storage representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl std::str::FromStr for ReviewStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(Error::validation(format!("Invalid review status: {other}"))),
        }
    }
}

/// Fields for a new review.
#[derive(Debug, Clone)]
pub struct NewReview {
    /// Star rating, must be 1-5
    pub rating: i32,
    /// Review text, must be non-empty
    pub comment: String,
    /// Where the review was left; defaults to `"Website"` when unset
    pub platform: Option<String>,
}

/// Filter for review listings. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    /// Only reviews in this moderation status
    pub status: Option<ReviewStatus>,
    /// Only reviews from this platform
    pub platform: Option<String>,
}

/// Creates a review on behalf of the acting user.
///
/// The review starts in `PENDING` status and waits for moderation.
///
/// # Errors
/// [`Error::Validation`] when the rating is outside 1-5 or the comment is
/// empty or whitespace-only.
pub async fn create_review(
    db: &DatabaseConnection,
    actor: &user::Model,
    new_review: NewReview,
) -> Result<review::Model> {
    if !(1..=5).contains(&new_review.rating) {
        return Err(Error::validation(format!(
            "Rating must be 1-5, got {}",
            new_review.rating
        )));
    }
    if new_review.comment.trim().is_empty() {
        return Err(Error::validation("Review comment cannot be empty"));
    }

    let model = review::ActiveModel {
        customer_id: Set(actor.id),
        rating: Set(new_review.rating),
        comment: Set(new_review.comment.trim().to_string()),
        platform: Set(new_review
            .platform
            .unwrap_or_else(|| DEFAULT_PLATFORM.to_string())),
        status: Set(ReviewStatus::Pending.as_str().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Lists reviews matching the filter, newest first.
pub async fn list_reviews(
    db: &DatabaseConnection,
    filter: &ReviewFilter,
) -> Result<Vec<review::Model>> {
    let mut query = Review::find();

    if let Some(status) = filter.status {
        query = query.filter(review::Column::Status.eq(status.as_str()));
    }
    if let Some(platform) = &filter.platform {
        query = query.filter(review::Column::Platform.eq(platform));
    }

    query
        .order_by_desc(review::Column::CreatedAt)
        .order_by_desc(review::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Approves or rejects a review.
///
/// Moderator-only. The decision is recorded in the activity log with the
/// review id and the new status.
///
/// # Errors
/// * [`Error::Forbidden`] when the actor is not an admin or manager
/// * [`Error::NotFound`] when the review does not exist
pub async fn moderate_review(
    db: &DatabaseConnection,
    actor: &user::Model,
    review_id: i64,
    status: ReviewStatus,
) -> Result<review::Model> {
    if !REVIEW_MODERATOR_ROLES.contains(&actor.role.as_str()) {
        return Err(Error::Forbidden {
            action: "moderate reviews".to_string(),
        });
    }

    let mut review: review::ActiveModel = Review::find_by_id(review_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "review",
            id: review_id.to_string(),
        })?
        .into();

    review.status = Set(status.as_str().to_string());
    let updated = review.update(db).await?;

    let metadata = serde_json::json!({
        "reviewId": updated.id,
        "status": status.as_str(),
    })
    .to_string();
    audit::append(
        db,
        actor.id,
        None,
        audit::REVIEW_STATUS_UPDATED,
        format!("Review {}", status.as_str().to_lowercase()),
        Some(metadata),
    )
    .await?;

    Ok(updated)
}
