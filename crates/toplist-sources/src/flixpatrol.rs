use anyhow::{bail, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use toplist_models::{ScrapedTitles, StreamingService};
use tracing::debug;

/// Ranking page URL for one service. The per-service path segment is the
/// service slug; all pages use the worldwide chart.
pub fn service_url(base_url: &str, service: StreamingService) -> String {
    let base = base_url.trim_end_matches('/');
    format!("{}/{}/world/", base, service.slug())
}

/// Fetch and parse the ranking page for one service. A non-200 response
/// ends the run; there is no retry at this layer.
pub async fn fetch_top10(
    client: &Client,
    base_url: &str,
    service: StreamingService,
) -> Result<ScrapedTitles> {
    let url = service_url(base_url, service);
    debug!("Fetching ranking page {}", url);

    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        bail!(
            "Failed to fetch ranking page {}: HTTP {}",
            url,
            response.status()
        );
    }

    let body = response.text().await?;
    let titles = parse_top10(&body, service);
    debug!(
        "Scraped {} movies and {} shows for {}",
        titles.movies.len(),
        titles.shows.len(),
        service
    );
    Ok(titles)
}

/// Extract the two title lists from the page body. The movie section has
/// element id `<slug>-1`, the show section `<slug>-2`; a missing section
/// (layout change, or no chart for that category) yields an empty list.
pub fn parse_top10(html: &str, service: StreamingService) -> ScrapedTitles {
    let document = Html::parse_document(html);
    ScrapedTitles {
        movies: extract_section(&document, service.slug(), 1),
        shows: extract_section(&document, service.slug(), 2),
    }
}

fn extract_section(document: &Html, slug: &str, index: u8) -> Vec<String> {
    let Ok(section) = Selector::parse(&format!("div#{}-{}", slug, index)) else {
        return Vec::new();
    };
    let Ok(rows) = Selector::parse("tr.table-group") else {
        return Vec::new();
    };
    // The title cell carries classes "table-td w-1/2"; the slash needs a
    // CSS escape.
    let Ok(title_link) = Selector::parse(r"td.table-td.w-1\/2 a") else {
        return Vec::new();
    };

    let mut titles = Vec::new();
    if let Some(section_el) = document.select(&section).next() {
        for row in section_el.select(&rows) {
            if let Some(link) = row.select(&title_link).next() {
                let title = link.text().collect::<String>().trim().to_string();
                if !title.is_empty() {
                    titles.push(title);
                }
            }
        }
    }
    titles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, titles: &[&str]) -> String {
        let rows: String = titles
            .iter()
            .map(|title| {
                format!(
                    r#"<tr class="table-group"><td class="table-td w-8">1.</td><td class="table-td w-1/2"><a href="/title/x">{}</a></td></tr>"#,
                    title
                )
            })
            .collect();
        format!(r#"<div id="{}"><table><tbody>{}</tbody></table></div>"#, id, rows)
    }

    #[test]
    fn parses_both_sections_in_page_order() {
        let html = format!(
            "<html><body>{}{}</body></html>",
            section("netflix-1", &["Movie A", "Movie B"]),
            section("netflix-2", &["Show A"]),
        );
        let titles = parse_top10(&html, StreamingService::Netflix);
        assert_eq!(titles.movies, vec!["Movie A", "Movie B"]);
        assert_eq!(titles.shows, vec!["Show A"]);
        assert_eq!(titles.combined(), vec!["Movie A", "Movie B", "Show A"]);
    }

    #[test]
    fn missing_section_yields_empty_list() {
        let html = format!("<html><body>{}</body></html>", section("hbo-1", &["Movie A"]));
        let titles = parse_top10(&html, StreamingService::Hbo);
        assert_eq!(titles.movies, vec!["Movie A"]);
        assert!(titles.shows.is_empty());
    }

    #[test]
    fn sections_of_other_services_are_ignored() {
        let html = format!(
            "<html><body>{}</body></html>",
            section("netflix-1", &["Movie A"]),
        );
        let titles = parse_top10(&html, StreamingService::Disney);
        assert!(titles.is_empty());
    }

    #[test]
    fn rows_without_a_title_link_are_skipped() {
        let html = r#"<html><body><div id="netflix-1"><table><tbody>
            <tr class="table-group"><td class="table-td w-1/2">no link here</td></tr>
            <tr class="table-group"><td class="table-td w-1/2"><a>  Movie A  </a></td></tr>
            </tbody></table></div></body></html>"#;
        let titles = parse_top10(html, StreamingService::Netflix);
        assert_eq!(titles.movies, vec!["Movie A"]);
    }

    #[test]
    fn builds_service_urls_from_base() {
        assert_eq!(
            service_url("https://flixpatrol.com/top10/", StreamingService::AppleTv),
            "https://flixpatrol.com/top10/apple-tv/world/"
        );
        assert_eq!(
            service_url("https://flixpatrol.com/top10", StreamingService::Netflix),
            "https://flixpatrol.com/top10/netflix/world/"
        );
    }
}
