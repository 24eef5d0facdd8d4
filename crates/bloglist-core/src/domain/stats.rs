//! Aggregate helpers over blog lists.

use std::collections::HashMap;

use super::Blog;

/// Sum of likes across all blogs.
pub fn total_likes(blogs: &[Blog]) -> i64 {
    blogs.iter().map(|blog| blog.likes).sum()
}

/// The blog with the highest like count, if any. Ties resolve to the last
/// contender, matching a left-to-right fold.
pub fn favorite_blog(blogs: &[Blog]) -> Option<&Blog> {
    blogs.iter().max_by_key(|blog| blog.likes)
}

/// The author with the most blogs, with their blog count. Anonymous entries
/// are not counted as an author.
pub fn most_blogs(blogs: &[Blog]) -> Option<(&str, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for blog in blogs {
        if let Some(author) = blog.author.as_deref() {
            *counts.entry(author).or_default() += 1;
        }
    }
    counts.into_iter().max_by_key(|(_, count)| *count)
}
