//! HTML parser for github.com trending listings.
//!
//! Each `article.Box-row` on the page becomes one [`Repository`]. Entries are
//! processed independently: a malformed row is reported and skipped, it never
//! aborts the rest of the page.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, warn};

use crate::text::{clean_text, extract_stars_today, parse_number};
use crate::types::{Contributor, Repository};

/// Maximum number of "built by" contributors kept per repository.
pub const MAX_CONTRIBUTORS: usize = 5;

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|error| panic!("invalid selector `{css}`: {error}"))
}

static ENTRY: Lazy<Selector> = Lazy::new(|| selector("article.Box-row"));
static REPO_LINK: Lazy<Selector> = Lazy::new(|| selector("h2 a"));
static DESCRIPTION: Lazy<Selector> = Lazy::new(|| selector("p.col-9"));
static LANGUAGE: Lazy<Selector> =
    Lazy::new(|| selector(r#"span[itemprop="programmingLanguage"]"#));
static STARGAZERS: Lazy<Selector> = Lazy::new(|| selector(r#"a[href*="/stargazers"]"#));
static FORKS: Lazy<Selector> = Lazy::new(|| selector(r#"a[href*="/forks"]"#));
static STARS_TODAY: Lazy<Selector> = Lazy::new(|| selector(".float-sm-right"));
static AVATARS: Lazy<Selector> =
    Lazy::new(|| selector(r#"a[data-hovercard-type="user"] img.avatar"#));

/// Why a single trending entry was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("repository link `{href}` points outside {base}")]
    ForeignLink { href: String, base: String },
    #[error("repository link is missing an href")]
    MissingHref,
}

/// Entry-level failure with its position on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub index: usize,
    pub error: EntryError,
}

/// Result of walking one trending page.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub repositories: Vec<Repository>,
    pub skipped: Vec<SkippedEntry>,
    /// Entries dropped because the link did not name both an owner and a repository.
    pub incomplete: usize,
}

/// Parse a trending page and return the repositories found, in page order.
///
/// `language` is used for entries that carry no language tag of their own;
/// `base` is the origin relative links are resolved against.
///
/// Descriptions are trimmed and runs of whitespace inside them, including the
/// line breaks GitHub's markup puts there, collapse to single spaces.
pub fn parse_trending_html(html: &str, language: &str, base: &str) -> Vec<Repository> {
    extract_repositories(html, language, base).repositories
}

/// Like [`parse_trending_html`] but keeps the per-entry diagnostics.
pub fn extract_repositories(html: &str, language: &str, base: &str) -> Extraction {
    let document = Html::parse_document(html);
    let base = base.trim_end_matches('/');

    let extraction = document.select(&ENTRY).enumerate().fold(
        Extraction::default(),
        |mut acc, (index, entry)| {
            match parse_entry(&entry, language, base) {
                Ok(Some(repository)) => acc.repositories.push(repository),
                Ok(None) => {
                    debug!(index, "trending entry without owner/name; skipping");
                    acc.incomplete += 1;
                }
                Err(error) => {
                    warn!(index, error = %error, "failed to parse trending entry");
                    acc.skipped.push(SkippedEntry { index, error });
                }
            }
            acc
        },
    );

    debug!(
        parsed = extraction.repositories.len(),
        skipped = extraction.skipped.len(),
        incomplete = extraction.incomplete,
        "trending page parsed"
    );

    extraction
}

fn parse_entry(
    entry: &ElementRef,
    language: &str,
    base: &str,
) -> Result<Option<Repository>, EntryError> {
    let Some(link) = entry.select(&REPO_LINK).next() else {
        return Ok(None);
    };
    let href = link.value().attr("href").ok_or(EntryError::MissingHref)?;
    let path = site_path(href.trim(), base)?;

    let mut segments = path.split('/').skip(1);
    let owner = segments.next().unwrap_or_default().trim();
    let name = segments.next().unwrap_or_default().trim();
    if owner.is_empty() || name.is_empty() {
        return Ok(None);
    }

    let description = first_text(entry, &DESCRIPTION).unwrap_or_default();
    let repo_language = first_text(entry, &LANGUAGE)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| language.to_string());
    let stars = first_text(entry, &STARGAZERS).map_or(0, |text| parse_number(&text));
    let forks = first_text(entry, &FORKS).map_or(0, |text| parse_number(&text));

    let stats: String = entry
        .select(&STARS_TODAY)
        .flat_map(|element| element.text())
        .collect();
    let stars_today = extract_stars_today(&stats);

    Ok(Some(Repository {
        owner: owner.to_string(),
        name: name.to_string(),
        description,
        url: format!("{base}{path}"),
        language: repo_language,
        stars,
        forks,
        stars_today,
        built_by: extract_contributors(entry, base),
    }))
}

fn extract_contributors(entry: &ElementRef, base: &str) -> Vec<Contributor> {
    entry
        .select(&AVATARS)
        .filter_map(|img| {
            let username = img
                .value()
                .attr("alt")
                .unwrap_or_default()
                .trim()
                .trim_start_matches('@')
                .to_string();
            let avatar = strip_query(img.value().attr("src").unwrap_or_default().trim());
            if username.is_empty() || avatar.is_empty() {
                return None;
            }

            let user_href = img
                .ancestors()
                .filter_map(ElementRef::wrap)
                .find(|element| element.value().name() == "a")
                .and_then(|anchor| anchor.value().attr("href"))
                .unwrap_or_default();

            Some(Contributor {
                username,
                avatar: avatar.to_string(),
                url: resolve_href(base, user_href),
            })
        })
        .take(MAX_CONTRIBUTORS)
        .collect()
}

fn first_text(entry: &ElementRef, selector: &Selector) -> Option<String> {
    entry
        .select(selector)
        .next()
        .map(|element| clean_text(&element.text().collect::<String>()))
}

/// Reduce a repository href to its site-relative path (`/owner/name`).
fn site_path<'a>(href: &'a str, base: &str) -> Result<&'a str, EntryError> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href
            .strip_prefix(base)
            .filter(|rest| rest.starts_with('/'))
            .ok_or_else(|| EntryError::ForeignLink {
                href: href.to_string(),
                base: base.to_string(),
            });
    }

    if href.starts_with('/') {
        Ok(href)
    } else {
        Err(EntryError::ForeignLink {
            href: href.to_string(),
            base: base.to_string(),
        })
    }
}

fn resolve_href(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if href.is_empty() || href.starts_with('/') {
        format!("{base}{href}")
    } else {
        format!("{base}/{href}")
    }
}

fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(head, _)| head)
}
