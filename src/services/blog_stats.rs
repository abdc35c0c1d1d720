/*
 * Responsibility
 * - blog 一覧に対する集計 (合計 likes / 最多 likes)
 * - DB を触らない純粋関数。handler 側で一覧を取ってから渡す
 */
use crate::repos::blog_repo::BlogRow;

pub fn total_likes(blogs: &[BlogRow]) -> i64 {
    blogs.iter().map(|b| b.likes).sum()
}

/// The entry with the most likes. Ties keep the earliest entry in the slice.
pub fn favorite_blog(blogs: &[BlogRow]) -> Option<&BlogRow> {
    blogs.iter().max_by(|a, b| {
        a.likes.cmp(&b.likes).then(std::cmp::Ordering::Greater) // keep `a` on ties
    })
}
