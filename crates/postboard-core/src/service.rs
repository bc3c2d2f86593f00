//! The post indexing service - dual-key writes and key-resolution reads.

use std::sync::Arc;

use crate::domain::Post;
use crate::error::IndexError;
use crate::ports::IndexStore;

/// Optional lookup criteria for [`PostIndex::query`].
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub name: Option<String>,
    pub author: Option<String>,
    /// When set, results are sorted by date descending instead of
    /// store-native (insertion-reverse) order.
    pub order_by_date: bool,
}

/// Post indexing service.
///
/// Every inserted post is appended under two keys - its name and its
/// author - so it can be looked up by either. The service holds only a
/// shared handle to the store; it keeps no state and is safe to call
/// from concurrent requests.
#[derive(Clone)]
pub struct PostIndex {
    store: Arc<dyn IndexStore>,
}

impl PostIndex {
    pub fn new(store: Arc<dyn IndexStore>) -> Self {
        Self { store }
    }

    /// Store a post under both its name key and its author key.
    ///
    /// The two appends are not atomic: a failure after the first one
    /// leaves the post reachable under its name but not its author. The
    /// error reaches the caller, who may re-insert; nothing is rolled
    /// back here.
    pub async fn insert(&self, post: &Post) -> Result<(), IndexError> {
        let encoded = serde_json::to_string(post)?;
        self.store.append(&post.name, &encoded).await?;
        self.store.append(&post.author, &encoded).await?;
        Ok(())
    }

    /// All posts under a single key (a post name or an author), most
    /// recently inserted first. An unknown key yields an empty vec.
    ///
    /// Decoding is fail-fast: one malformed entry fails the whole call
    /// with no partial results.
    pub async fn posts_by_key(&self, key: &str) -> Result<Vec<Post>, IndexError> {
        let entries = self.store.read_all(key).await?;
        entries
            .iter()
            .map(|entry| serde_json::from_str(entry).map_err(IndexError::from))
            .collect()
    }

    /// Posts matching both a name and an author.
    ///
    /// Reads the name list only and filters by author in memory. Both
    /// keys hold identical payloads, so this equals a store-level
    /// intersection at the cost of one read instead of two.
    pub async fn posts_by_name_and_author(
        &self,
        name: &str,
        author: &str,
    ) -> Result<Vec<Post>, IndexError> {
        let posts = self.posts_by_key(name).await?;
        Ok(posts.into_iter().filter(|p| p.author == author).collect())
    }

    /// Resolve a caller-facing filter into the right lookup.
    ///
    /// Both name and author present -> name list filtered by author;
    /// exactly one present -> single-key read, author winning over name;
    /// neither -> empty result without touching the store.
    pub async fn query(&self, filter: &PostFilter) -> Result<Vec<Post>, IndexError> {
        let mut posts = match (filter.name.as_deref(), filter.author.as_deref()) {
            (Some(name), Some(author)) => self.posts_by_name_and_author(name, author).await?,
            (_, Some(author)) => self.posts_by_key(author).await?,
            (Some(name), None) => self.posts_by_key(name).await?,
            (None, None) => Vec::new(),
        };

        if filter.order_by_date {
            // Stable, so equal dates keep their store-native order.
            posts.sort_by(|a, b| b.date.cmp(&a.date));
        }
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::*;
    use crate::ports::StoreError;

    /// Front-inserting list store, mirroring LPUSH/LRANGE semantics.
    #[derive(Default)]
    struct ListStore {
        lists: Mutex<HashMap<String, Vec<String>>>,
    }

    impl ListStore {
        fn push_raw(&self, key: &str, value: &str) {
            let mut lists = self.lists.lock().unwrap();
            lists
                .entry(key.to_string())
                .or_default()
                .insert(0, value.to_string());
        }
    }

    #[async_trait]
    impl IndexStore for ListStore {
        async fn append(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.push_raw(key, value);
            Ok(())
        }

        async fn read_all(&self, key: &str) -> Result<Vec<String>, StoreError> {
            let lists = self.lists.lock().unwrap();
            Ok(lists.get(key).cloned().unwrap_or_default())
        }
    }

    /// Store whose appends fail after a set number of successes.
    struct FlakyStore {
        inner: ListStore,
        appends_before_failure: Mutex<usize>,
    }

    #[async_trait]
    impl IndexStore for FlakyStore {
        async fn append(&self, key: &str, value: &str) -> Result<(), StoreError> {
            let mut remaining = self.appends_before_failure.lock().unwrap();
            if *remaining == 0 {
                return Err(StoreError::Operation("append rejected".into()));
            }
            *remaining -= 1;
            self.inner.push_raw(key, value);
            Ok(())
        }

        async fn read_all(&self, key: &str) -> Result<Vec<String>, StoreError> {
            self.inner.read_all(key).await
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn index() -> (PostIndex, Arc<ListStore>) {
        let store = Arc::new(ListStore::default());
        (PostIndex::new(store.clone()), store)
    }

    #[tokio::test]
    async fn inserted_post_is_reachable_by_name_and_by_author() {
        let (index, _) = index();
        let post = Post::new("name1", "author1", date(2020, 1, 1));
        index.insert(&post).await.unwrap();

        assert_eq!(index.posts_by_key("name1").await.unwrap(), vec![post.clone()]);
        assert_eq!(index.posts_by_key("author1").await.unwrap(), vec![post]);
    }

    #[tokio::test]
    async fn unknown_key_yields_empty_not_error() {
        let (index, _) = index();
        assert!(index.posts_by_key("nonexistent").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn repeated_reads_are_identical() {
        let (index, _) = index();
        index
            .insert(&Post::new("name1", "author1", date(2020, 1, 1)))
            .await
            .unwrap();
        index
            .insert(&Post::new("name2", "author1", date(2019, 5, 5)))
            .await
            .unwrap();

        let first = index.posts_by_key("author1").await.unwrap();
        let second = index.posts_by_key("author1").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn reads_return_most_recently_inserted_first() {
        let (index, _) = index();
        let older = Post::new("name1", "author1", date(2000, 1, 1));
        let newer = Post::new("name2", "author1", date(2020, 1, 1));
        index.insert(&older).await.unwrap();
        index.insert(&newer).await.unwrap();

        // Store-native order is insertion-reverse, regardless of dates.
        assert_eq!(
            index.posts_by_key("author1").await.unwrap(),
            vec![newer, older]
        );
    }

    #[tokio::test]
    async fn name_and_author_lookup_filters_the_name_list() {
        let (index, _) = index();
        let matching = Post::new("shared-name", "author1", date(2020, 1, 1));
        let other_author = Post::new("shared-name", "author2", date(2020, 2, 2));
        index.insert(&matching).await.unwrap();
        index.insert(&other_author).await.unwrap();

        assert_eq!(
            index
                .posts_by_name_and_author("shared-name", "author1")
                .await
                .unwrap(),
            vec![matching]
        );
    }

    #[tokio::test]
    async fn name_and_author_lookup_equals_filtered_key_lookup() {
        let (index, _) = index();
        for (name, author, d) in [
            ("n1", "a1", date(2020, 1, 1)),
            ("n1", "a2", date(2020, 1, 2)),
            ("n1", "a1", date(2020, 1, 3)),
            ("n2", "a1", date(2020, 1, 4)),
        ] {
            index.insert(&Post::new(name, author, d)).await.unwrap();
        }

        let combined = index.posts_by_name_and_author("n1", "a1").await.unwrap();
        let filtered: Vec<Post> = index
            .posts_by_key("n1")
            .await
            .unwrap()
            .into_iter()
            .filter(|p| p.author == "a1")
            .collect();
        assert_eq!(combined, filtered);
    }

    #[tokio::test]
    async fn one_malformed_entry_fails_the_whole_read() {
        let (index, store) = index();
        index
            .insert(&Post::new("name1", "author1", date(2020, 1, 1)))
            .await
            .unwrap();
        store.push_raw("name1", "{not json");

        let err = index.posts_by_key("name1").await.unwrap_err();
        assert!(matches!(err, IndexError::Serialization(_)));
    }

    #[tokio::test]
    async fn store_failure_propagates_unchanged() {
        let store = Arc::new(FlakyStore {
            inner: ListStore::default(),
            appends_before_failure: Mutex::new(0),
        });
        let index = PostIndex::new(store);

        let err = index
            .insert(&Post::new("name1", "author1", date(2020, 1, 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, IndexError::Store(_)));
    }

    #[tokio::test]
    async fn partial_insert_leaves_post_under_name_only() {
        let store = Arc::new(FlakyStore {
            inner: ListStore::default(),
            appends_before_failure: Mutex::new(1),
        });
        let index = PostIndex::new(store);
        let post = Post::new("name1", "author1", date(2020, 1, 1));

        assert!(index.insert(&post).await.is_err());
        // The name append went through before the author append failed;
        // nothing rolls it back.
        assert_eq!(index.posts_by_key("name1").await.unwrap(), vec![post]);
        assert!(index.posts_by_key("author1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn query_with_both_filters_intersects() {
        let (index, _) = index();
        let first = Post::new("name1", "author1", date(2020, 1, 1));
        let second = Post::new("name2", "author1", date(2000, 1, 1));
        index.insert(&first).await.unwrap();
        index.insert(&second).await.unwrap();

        let by_author = index
            .query(&PostFilter {
                author: Some("author1".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_author, vec![second, first.clone()]);

        let both = index
            .query(&PostFilter {
                name: Some("name1".into()),
                author: Some("author1".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(both, vec![first]);
    }

    #[tokio::test]
    async fn query_with_both_filters_reads_the_name_list_only() {
        let (index, store) = index();
        let post = Post::new("name1", "author1", date(2020, 1, 1));
        // Seed the author list only. A combined lookup dispatches to the
        // name list, so this entry must not satisfy it.
        store.push_raw("author1", &serde_json::to_string(&post).unwrap());

        let both = index
            .query(&PostFilter {
                name: Some("name1".into()),
                author: Some("author1".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(both.is_empty());

        // With only the author given, the author list is read directly.
        let by_author = index
            .query(&PostFilter {
                author: Some("author1".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_author, vec![post]);
    }

    #[tokio::test]
    async fn query_with_single_filter_reads_that_key() {
        let (index, _) = index();
        let post = Post::new("name1", "author1", date(2020, 1, 1));
        index.insert(&post).await.unwrap();

        let by_name = index
            .query(&PostFilter {
                name: Some("name1".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_name, vec![post.clone()]);

        let by_author = index
            .query(&PostFilter {
                author: Some("author1".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_author, vec![post]);
    }

    #[tokio::test]
    async fn query_without_filters_skips_the_store() {
        let (index, _) = index();
        index
            .insert(&Post::new("name1", "author1", date(2020, 1, 1)))
            .await
            .unwrap();

        assert!(index
            .query(&PostFilter::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn ordered_query_sorts_by_date_descending() {
        let (index, _) = index();
        let oldest = Post::new("name1", "author1", date(2000, 1, 1));
        let newest = Post::new("name2", "author1", date(2020, 1, 1));
        // Newest inserted first, so store-native order already leads with
        // it; insert the oldest last to make the sort observable.
        index.insert(&newest).await.unwrap();
        index.insert(&oldest).await.unwrap();

        let unordered = index
            .query(&PostFilter {
                author: Some("author1".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(unordered, vec![oldest.clone(), newest.clone()]);

        let ordered = index
            .query(&PostFilter {
                author: Some("author1".into()),
                order_by_date: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(ordered, vec![newest, oldest]);
    }
}
