//! AllMusic web lookup — last-resort genre source.
//!
//! No API: fetch the search-results page, pick the result whose text
//! contains the query, follow its link and read the genre/style link
//! containers on the detail page. Markup changes break this silently, so
//! the resolver only reaches for it after every real catalog has failed.

use std::time::Duration;

use scraper::{Html, Selector};

use crate::catalog::WebLookup;
use crate::error::ScoutError;
use crate::rate_limiter::RateLimiter;
use crate::text::normalize;

const SEARCH_BASE: &str = "https://www.allmusic.com/search/all";

// The site serves full markup to browsers only.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub struct AllMusicScraper {
    limiter: RateLimiter,
}

impl AllMusicScraper {
    pub fn new() -> Self {
        AllMusicScraper {
            limiter: RateLimiter::from_millis("AllMusic", 1000),
        }
    }

    fn fetch(&mut self, url: &str) -> Result<String, ScoutError> {
        self.limiter.wait_if_needed();

        let response = ureq::get(url)
            .set("User-Agent", BROWSER_USER_AGENT)
            .timeout(Duration::from_secs(10))
            .call()?;

        Ok(response.into_string()?)
    }
}

impl Default for AllMusicScraper {
    fn default() -> Self {
        Self::new()
    }
}

fn selector(css: &str) -> Result<Selector, ScoutError> {
    Selector::parse(css).map_err(|_| ScoutError::Parse(format!("bad selector: {}", css)))
}

/// Href of the most relevant search result: the first `.search-result`
/// whose normalized text contains the normalized query.
fn best_result_href(body: &str, query: &str) -> Result<Option<String>, ScoutError> {
    let doc = Html::parse_document(body);
    let result_sel = selector(".search-result")?;
    let anchor_sel = selector("a")?;
    let wanted = normalize(query);

    for result in doc.select(&result_sel) {
        let text = normalize(&result.text().collect::<String>());
        if !text.is_empty() && text.contains(&wanted) {
            if let Some(href) = result
                .select(&anchor_sel)
                .next()
                .and_then(|link| link.value().attr("href"))
            {
                return Ok(Some(href.to_string()));
            }
        }
    }

    Ok(None)
}

/// Text of every link inside the first element matching `container_css`.
fn link_texts(body: &str, container_css: &str) -> Result<Vec<String>, ScoutError> {
    let doc = Html::parse_document(body);
    let container_sel = selector(container_css)?;
    let anchor_sel = selector("a")?;

    let mut out = Vec::new();
    if let Some(container) = doc.select(&container_sel).next() {
        for link in container.select(&anchor_sel) {
            let text = link.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                out.push(text);
            }
        }
    }

    Ok(out)
}

impl WebLookup for AllMusicScraper {
    fn genres_for(
        &mut self,
        title: &str,
        artist: Option<&str>,
    ) -> Result<(Vec<String>, Vec<String>), ScoutError> {
        let query = match artist {
            Some(artist) => format!("{} {}", artist, title),
            None => title.to_string(),
        };

        let search_url = format!("{}/{}", SEARCH_BASE, urlencoding::encode(&query));
        let search_body = self.fetch(&search_url)?;

        let detail_url = best_result_href(&search_body, &query)?
            .ok_or_else(|| ScoutError::NotFound(format!("no result for '{}'", query)))?;

        let detail_body = self.fetch(&detail_url)?;
        let genres = link_texts(&detail_body, "div.genre")?;
        let styles = link_texts(&detail_body, "div.styles")?;

        Ok((genres, styles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_PAGE: &str = r#"
        <html><body>
            <div class="search-result">
                <span>Unrelated Band — Some Record</span>
                <a href="https://www.allmusic.com/album/wrong">wrong</a>
            </div>
            <div class="search-result">
                <span>DJ Shadow — Endtroducing</span>
                <a href="https://www.allmusic.com/album/endtroducing">right</a>
            </div>
        </body></html>"#;

    const DETAIL_PAGE: &str = r#"
        <html><body>
            <div class="genre">
                <a href="/genre/electronic">Electronic</a>
                <a href="/genre/hip-hop">Hip-Hop</a>
            </div>
            <div class="styles">
                <a href="/style/trip-hop">Trip-Hop</a>
                <a href="/style/instrumental">Instrumental Hip-Hop</a>
            </div>
        </body></html>"#;

    #[test]
    fn test_best_result_matches_on_normalized_text() {
        let href = best_result_href(SEARCH_PAGE, "DJ Shadow Endtroducing")
            .unwrap()
            .unwrap();
        assert_eq!(href, "https://www.allmusic.com/album/endtroducing");
    }

    #[test]
    fn test_best_result_none_when_nothing_matches() {
        let href = best_result_href(SEARCH_PAGE, "Aphex Twin Drukqs").unwrap();
        assert!(href.is_none());
    }

    #[test]
    fn test_link_texts_reads_genre_and_style_containers() {
        assert_eq!(
            link_texts(DETAIL_PAGE, "div.genre").unwrap(),
            vec!["Electronic", "Hip-Hop"]
        );
        assert_eq!(
            link_texts(DETAIL_PAGE, "div.styles").unwrap(),
            vec!["Trip-Hop", "Instrumental Hip-Hop"]
        );
    }

    #[test]
    fn test_link_texts_missing_container_is_empty() {
        assert!(link_texts(DETAIL_PAGE, "div.moods").unwrap().is_empty());
    }
}
