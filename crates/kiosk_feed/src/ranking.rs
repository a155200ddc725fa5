use chrono::{Datelike, Duration, NaiveDate};
use kiosk_core::Article;

/// Articles published within this many days of the seed date take part in
/// the rotation; anything older trails the feed in plain recency order.
pub const RECENT_WINDOW_DAYS: i64 = 7;
/// First-page size: hero + rotated image slots + text-only slots.
pub const PAGE_SIZE: usize = 10;

const ROTATED_SLOTS: usize = 4;
const TEXT_SLOTS: usize = 5;

/// Daily rotation seed: the sum of the date's year, month and day. A plain
/// additive checksum, not a hash; the contract is only "changes once per
/// calendar day, reproducible within it", and tests pin the exact rotation.
pub fn rotation_seed(date: NaiveDate) -> usize {
    (date.year().unsigned_abs() + date.month() + date.day()) as usize
}

/// Order a batch for display: a locked hero story, a deterministically
/// rotated band of image stories, a band of text-only stories, then
/// everything else by recency.
///
/// Idempotent for a fixed `(articles, seed_date)` pair, and always a
/// permutation of the input.
pub fn rank(articles: &[Article], seed_date: NaiveDate) -> Vec<Article> {
    // Stable sort: ties on published_at keep the upstream's order.
    let mut sorted: Vec<Article> = articles.to_vec();
    sorted.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    let cutoff = seed_date - Duration::days(RECENT_WINDOW_DAYS);
    let (recent, older): (Vec<Article>, Vec<Article>) = sorted
        .into_iter()
        .partition(|a| a.published_at.date_naive() >= cutoff);

    // Not enough for a full first page: plain recency, no rotation.
    if recent.len() < PAGE_SIZE {
        return chain(recent, older);
    }

    let (with_image, without_image): (Vec<Article>, Vec<Article>) =
        recent.iter().cloned().partition(Article::has_image);

    if with_image.is_empty() {
        return chain(recent, older);
    }

    let hero = with_image[0].clone();
    let remaining = &with_image[1..];
    let offset = rotation_seed(seed_date) % remaining.len().max(1);

    let mut first_page: Vec<Article> = Vec::with_capacity(PAGE_SIZE);
    first_page.push(hero);
    first_page.extend(
        remaining[offset..]
            .iter()
            .chain(remaining[..offset].iter())
            .take(ROTATED_SLOTS)
            .cloned(),
    );
    first_page.extend(without_image.iter().take(TEXT_SLOTS).cloned());
    first_page.truncate(PAGE_SIZE);

    // Rotation only touches the first page; everything it did not use goes
    // back to recency order for predictable deeper pages.
    let mut rest: Vec<Article> = recent
        .into_iter()
        .filter(|a| !first_page.iter().any(|p| p.id == a.id))
        .collect();
    rest.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    chain(chain(first_page, rest), older)
}

fn chain(mut head: Vec<Article>, tail: Vec<Article>) -> Vec<Article> {
    head.extend(tail);
    head
}
