//! Home feed: posts visible to the session with lazily loaded comments.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::ports::{PlaceholderSource, PlaceholderSourceError};
use super::{Comment, Post, PostId, Session, User};

/// Errors raised by the feed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    /// The post is not part of this feed.
    #[error("post {post} is not in the feed")]
    NotFound {
        /// Requested post.
        post: PostId,
    },
    /// Reading placeholder data failed.
    #[error(transparent)]
    Source(#[from] PlaceholderSourceError),
}

/// A post with its author's display name resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    /// The post.
    pub post: Post,
    /// Author display name; empty when the author is unknown.
    pub author: String,
}

/// Feed for one session.
pub struct FeedView {
    source: Arc<dyn PlaceholderSource>,
    entries: Vec<FeedEntry>,
    comments: HashMap<PostId, Vec<Comment>>,
    open: Option<PostId>,
}

impl fmt::Debug for FeedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedView")
            .field("entries", &self.entries.len())
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

fn visible_posts<'a>(session: &Session, users: &[User], posts: &'a [Post]) -> Vec<&'a Post> {
    if session.is_admin() {
        return posts.iter().collect();
    }
    let Some(me) = users.iter().find(|user| user.email == session.user().email) else {
        return Vec::new();
    };
    posts.iter().filter(|post| post.user_id == me.id).collect()
}

impl FeedView {
    /// Fetch users and posts concurrently and build the session's feed.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Source`] when either fetch fails.
    #[instrument(skip_all, fields(email = %session.user().email))]
    pub async fn load(
        source: Arc<dyn PlaceholderSource>,
        session: &Session,
    ) -> Result<Self, FeedError> {
        let (users, posts) = tokio::try_join!(source.users(), source.posts())?;
        let authors: HashMap<_, _> = users
            .iter()
            .map(|user| (user.id, user.name.as_str()))
            .collect();
        let entries: Vec<_> = visible_posts(session, &users, &posts)
            .into_iter()
            .map(|post| FeedEntry {
                post: post.clone(),
                author: authors
                    .get(&post.user_id)
                    .map_or_else(String::new, |name| (*name).to_owned()),
            })
            .collect();
        info!(posts = entries.len(), "feed loaded");
        Ok(Self {
            source,
            entries,
            comments: HashMap::new(),
            open: None,
        })
    }

    /// Visible posts in API order.
    #[must_use]
    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    /// Open `post`, fetching its comments on first open.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::NotFound`] for posts outside the feed and
    /// [`FeedError::Source`] when the comment fetch fails.
    pub async fn open_post(&mut self, post: PostId) -> Result<&[Comment], FeedError> {
        if !self.entries.iter().any(|entry| entry.post.id == post) {
            return Err(FeedError::NotFound { post });
        }
        let comments = match self.comments.entry(post) {
            Entry::Occupied(cached) => cached.into_mut(),
            Entry::Vacant(slot) => {
                let fetched = self.source.comments(Some(post)).await?;
                debug!(%post, comments = fetched.len(), "comments cached");
                slot.insert(fetched)
            }
        };
        self.open = Some(post);
        Ok(comments)
    }

    /// Close the open post; cached comments are kept.
    pub fn close_post(&mut self) {
        self.open = None;
    }

    /// Currently open post.
    #[must_use]
    pub const fn open(&self) -> Option<PostId> {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockPlaceholderSource;
    use crate::domain::{CommentId, SessionUser, UserId};
    use rstest::{fixture, rstest};

    fn user(id: u64, name: &str, email: &str) -> User {
        User {
            id: UserId::new(id),
            name: name.to_owned(),
            username: name.to_owned(),
            email: email.to_owned(),
            address: Default::default(),
            phone: String::new(),
            website: String::new(),
            company: Default::default(),
        }
    }

    fn post(user: u64, id: u64) -> Post {
        Post {
            user_id: UserId::new(user),
            id: PostId::new(id),
            title: format!("post {id}"),
            body: String::new(),
        }
    }

    #[fixture]
    fn source() -> MockPlaceholderSource {
        let mut source = MockPlaceholderSource::new();
        source.expect_users().returning(|| {
            Ok(vec![
                user(1, "Leanne", "leanne@example.com"),
                user(2, "Ervin", "ervin@example.com"),
            ])
        });
        source
            .expect_posts()
            .returning(|| Ok(vec![post(1, 1), post(2, 2), post(1, 3)]));
        source
    }

    fn member(email: &str) -> Session {
        Session::new(SessionUser {
            id: "1".to_owned(),
            name: "Leanne".to_owned(),
            email: email.to_owned(),
            username: "Leanne".to_owned(),
        })
    }

    fn ids(feed: &FeedView) -> Vec<u64> {
        feed.entries()
            .iter()
            .map(|entry| entry.post.id.get())
            .collect()
    }

    #[rstest]
    #[tokio::test]
    async fn admin_sees_every_post(source: MockPlaceholderSource) {
        let feed = FeedView::load(Arc::new(source), &Session::admin())
            .await
            .expect("feed");
        assert_eq!(ids(&feed), vec![1, 2, 3]);
        assert_eq!(
            feed.entries().get(1).map(|entry| entry.author.as_str()),
            Some("Ervin")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn member_sees_only_their_posts(source: MockPlaceholderSource) {
        let feed = FeedView::load(Arc::new(source), &member("leanne@example.com"))
            .await
            .expect("feed");
        assert_eq!(ids(&feed), vec![1, 3]);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_member_sees_nothing(source: MockPlaceholderSource) {
        let feed = FeedView::load(Arc::new(source), &member("ghost@example.com"))
            .await
            .expect("feed");
        assert!(feed.entries().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn comments_are_fetched_once_per_post(mut source: MockPlaceholderSource) {
        source
            .expect_comments()
            .withf(|post| *post == Some(PostId::new(1)))
            .times(1)
            .returning(|_| {
                Ok(vec![Comment {
                    post_id: PostId::new(1),
                    id: CommentId::new(9),
                    name: "first".to_owned(),
                    email: "reader@example.com".to_owned(),
                    body: String::new(),
                }])
            });
        let mut feed = FeedView::load(Arc::new(source), &Session::admin())
            .await
            .expect("feed");

        assert_eq!(feed.open_post(PostId::new(1)).await.expect("open").len(), 1);
        feed.close_post();
        assert_eq!(feed.open(), None);
        assert_eq!(
            feed.open_post(PostId::new(1)).await.expect("reopen").len(),
            1
        );
        assert_eq!(feed.open(), Some(PostId::new(1)));
    }

    #[rstest]
    #[tokio::test]
    async fn opening_a_foreign_post_fails(source: MockPlaceholderSource) {
        let mut feed = FeedView::load(Arc::new(source), &member("leanne@example.com"))
            .await
            .expect("feed");
        let err = feed.open_post(PostId::new(2)).await.expect_err("not found");
        assert_eq!(err, FeedError::NotFound { post: PostId::new(2) });
    }

    #[rstest]
    #[tokio::test]
    async fn fetch_failures_surface() {
        let mut source = MockPlaceholderSource::new();
        source
            .expect_users()
            .returning(|| Err(PlaceholderSourceError::status(503_u16, "unavailable")));
        source.expect_posts().returning(|| Ok(Vec::new()));

        let err = FeedView::load(Arc::new(source), &Session::admin())
            .await
            .expect_err("source failure");

        assert!(matches!(err, FeedError::Source(_)));
    }
}
