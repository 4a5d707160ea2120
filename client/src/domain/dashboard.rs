//! Admin dashboard counts.

use std::fmt;
use std::sync::Arc;

use tracing::{info, instrument};

use super::Session;
use super::ports::{PlaceholderSource, PlaceholderSourceError};

/// Series name of the dashboard bar chart.
pub const SERIES_NAME: &str = "Count";
/// Category labels of the dashboard bar chart.
pub const CATEGORIES: [&str; 3] = ["Users", "Posts", "Comments"];

/// Errors raised while building the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DashboardError {
    /// The session is not the administrator's.
    #[error("dashboard is restricted to the administrator")]
    Forbidden,
    /// Reading placeholder data failed.
    #[error(transparent)]
    Source(#[from] PlaceholderSourceError),
}

/// One bar chart series.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BarSeries {
    /// Legend label.
    pub name: &'static str,
    /// Bar labels.
    pub categories: [&'static str; 3],
    /// Bar heights, one per category.
    pub values: [usize; 3],
}

/// Entity totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct DashboardSummary {
    /// Number of users.
    pub users: usize,
    /// Number of posts.
    pub posts: usize,
    /// Number of comments.
    pub comments: usize,
}

impl DashboardSummary {
    /// Chart series in category order.
    #[must_use]
    pub const fn series(&self) -> BarSeries {
        BarSeries {
            name: SERIES_NAME,
            categories: CATEGORIES,
            values: [self.users, self.posts, self.comments],
        }
    }
}

/// Builds dashboard summaries.
#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn PlaceholderSource>,
}

impl fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardService").finish_non_exhaustive()
    }
}

impl DashboardService {
    /// Build the service over a data source.
    #[must_use]
    pub fn new(source: Arc<dyn PlaceholderSource>) -> Self {
        Self { source }
    }

    /// Count every entity for the administrator.
    ///
    /// # Errors
    ///
    /// [`DashboardError::Forbidden`] for members, otherwise source failures.
    #[instrument(skip_all)]
    pub async fn summarize(&self, session: &Session) -> Result<DashboardSummary, DashboardError> {
        if !session.is_admin() {
            return Err(DashboardError::Forbidden);
        }
        let (users, posts, comments) = tokio::try_join!(
            self.source.users(),
            self.source.posts(),
            self.source.comments(None)
        )?;
        let summary = DashboardSummary {
            users: users.len(),
            posts: posts.len(),
            comments: comments.len(),
        };
        info!(
            users = summary.users,
            posts = summary.posts,
            comments = summary.comments,
            "dashboard summarised"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FixturePlaceholderSource, MockPlaceholderSource};
    use crate::domain::{Comment, CommentId, Post, PostId, SessionUser, UserId};
    use rstest::rstest;

    #[rstest]
    fn series_follows_category_order() {
        let summary = DashboardSummary {
            users: 10,
            posts: 100,
            comments: 500,
        };
        let series = summary.series();
        assert_eq!(series.name, "Count");
        assert_eq!(series.categories, ["Users", "Posts", "Comments"]);
        assert_eq!(series.values, [10, 100, 500]);
    }

    #[rstest]
    #[tokio::test]
    async fn counts_every_entity() {
        let post = Post {
            user_id: UserId::new(1),
            id: PostId::new(1),
            title: String::new(),
            body: String::new(),
        };
        let comment = |id| Comment {
            post_id: PostId::new(1),
            id: CommentId::new(id),
            name: String::new(),
            email: String::new(),
            body: String::new(),
        };
        let source =
            FixturePlaceholderSource::new(Vec::new(), vec![post], vec![comment(1), comment(2)]);
        let service = DashboardService::new(Arc::new(source));

        let summary = service.summarize(&Session::admin()).await.expect("summary");

        assert_eq!(summary.series().values, [0, 1, 2]);
    }

    #[rstest]
    #[tokio::test]
    async fn members_are_forbidden() {
        let mut source = MockPlaceholderSource::new();
        source.expect_users().times(0);
        let service = DashboardService::new(Arc::new(source));
        let member = Session::new(SessionUser {
            id: "3".to_owned(),
            name: "Clementine".to_owned(),
            email: "Nathan@yesenia.net".to_owned(),
            username: "Samantha".to_owned(),
        });

        let err = service.summarize(&member).await.expect_err("forbidden");

        assert_eq!(err, DashboardError::Forbidden);
    }
}
