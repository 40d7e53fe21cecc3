//! Parser for Fever movie-theater listing pages.
//! Each `li.showtime-list__item` is one movie; inside it every
//! `div.movie-showtime-times` is one format with its showtime buttons.

use scraper::{ElementRef, Html, Selector};

use crate::PartialShowing;
use crate::error::ParseError;

const DEFAULT_FORMAT: &str = "Standard";
const DISABLED_CLASS: &str = "showtimes-tile--is-disabled";

struct ListingSelectors {
    entry: Selector,
    title: Selector,
    format_block: Selector,
    format_label: Selector,
    button: Selector,
}

impl ListingSelectors {
    fn new() -> Result<Self, ParseError> {
        let sel = |css: &str| Selector::parse(css).map_err(|e| ParseError::Selector(e.to_string()));
        Ok(Self {
            entry: sel("li.showtime-list__item")?,
            title: sel("h3.movie-card-info__title")?,
            format_block: sel("div.movie-showtime-times")?,
            format_label: sel("p.movie-showtime-times__title")?,
            button: sel("button.showtimes-tile")?,
        })
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Extract every (movie, format) group with at least one bookable showtime.
///
/// Entries without a title node are skipped, unlabeled format blocks are "Standard",
/// disabled buttons (sold out or already started) are dropped. A page with no
/// entries yields an empty list.
pub fn parse_listing(html: &str) -> Result<Vec<PartialShowing>, ParseError> {
    let sel = ListingSelectors::new()?;
    let doc = Html::parse_document(html);

    let mut showings = Vec::new();
    for entry in doc.select(&sel.entry) {
        let movie = match entry.select(&sel.title).next() {
            Some(h3) => element_text(h3),
            None => continue,
        };

        for block in entry.select(&sel.format_block) {
            let format = block
                .select(&sel.format_label)
                .next()
                .map(element_text)
                .unwrap_or_else(|| DEFAULT_FORMAT.to_string());

            let showtimes: Vec<String> = block
                .select(&sel.button)
                .filter(|btn| !btn.value().classes().any(|c| c == DISABLED_CLASS))
                .map(element_text)
                .collect();

            if showtimes.is_empty() {
                continue;
            }

            showings.push(PartialShowing {
                movie: movie.clone(),
                format,
                showtimes,
            });
        }
    }
    Ok(showings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(items: &str) -> String {
        format!(
            r#"<!DOCTYPE html><html><body><main><ul class="showtime-list">{}</ul></main></body></html>"#,
            items
        )
    }

    #[test]
    fn unlabeled_block_drops_disabled_button() {
        let html = page(
            r#"
            <li class="showtime-list__item">
              <div class="movie-card-info"><h3 class="movie-card-info__title"> Dune: Part Two </h3></div>
              <div class="movie-showtime-times">
                <button class="showtimes-tile showtimes-tile--is-disabled">4:00 PM</button>
                <button class="showtimes-tile">7:00 PM</button>
                <button class="showtimes-tile">
                  9:30 PM
                </button>
              </div>
            </li>"#,
        );

        let showings = parse_listing(&html).unwrap();
        assert_eq!(
            showings,
            vec![PartialShowing {
                movie: "Dune: Part Two".to_string(),
                format: "Standard".to_string(),
                showtimes: vec!["7:00 PM".to_string(), "9:30 PM".to_string()],
            }]
        );
    }

    #[test]
    fn one_showing_per_labeled_format() {
        let html = page(
            r#"
            <li class="showtime-list__item">
              <h3 class="movie-card-info__title">Wicked</h3>
              <div class="movie-showtime-times">
                <p class="movie-showtime-times__title">IMAX</p>
                <button class="showtimes-tile">1:15 PM</button>
              </div>
              <div class="movie-showtime-times">
                <p class="movie-showtime-times__title"> Dolby Cinema </p>
                <button class="showtimes-tile">2:00 PM</button>
                <button class="showtimes-tile">5:45 PM</button>
              </div>
            </li>"#,
        );

        let showings = parse_listing(&html).unwrap();
        let formats: Vec<&str> = showings.iter().map(|s| s.format.as_str()).collect();
        assert_eq!(formats, ["IMAX", "Dolby Cinema"]);
        assert_eq!(showings[1].showtimes, ["2:00 PM", "5:45 PM"]);
    }

    #[test]
    fn all_disabled_block_is_not_emitted() {
        let html = page(
            r#"
            <li class="showtime-list__item">
              <h3 class="movie-card-info__title">Anora</h3>
              <div class="movie-showtime-times">
                <p class="movie-showtime-times__title">3D</p>
                <button class="showtimes-tile showtimes-tile--is-disabled">11:00 AM</button>
              </div>
              <div class="movie-showtime-times"></div>
            </li>"#,
        );

        assert!(parse_listing(&html).unwrap().is_empty());
    }

    #[test]
    fn entry_without_title_is_skipped() {
        let html = page(
            r#"
            <li class="showtime-list__item">
              <div class="movie-showtime-times">
                <button class="showtimes-tile">8:00 PM</button>
              </div>
            </li>
            <li class="showtime-list__item">
              <h3 class="movie-card-info__title">Conclave</h3>
              <div class="movie-showtime-times">
                <button class="showtimes-tile">6:20 PM</button>
              </div>
            </li>"#,
        );

        let showings = parse_listing(&html).unwrap();
        assert_eq!(showings.len(), 1);
        assert_eq!(showings[0].movie, "Conclave");
    }

    #[test]
    fn blank_title_node_still_counts_as_titled() {
        let html = page(
            r#"
            <li class="showtime-list__item">
              <h3 class="movie-card-info__title">   </h3>
              <div class="movie-showtime-times">
                <button class="showtimes-tile">8:10 PM</button>
              </div>
            </li>"#,
        );

        let showings = parse_listing(&html).unwrap();
        assert_eq!(showings.len(), 1);
        assert_eq!(showings[0].movie, "");
        assert_eq!(showings[0].showtimes, ["8:10 PM"]);
    }

    #[test]
    fn page_without_entries_is_empty() {
        let html = page("<li class=\"other\">Nothing playing</li>");
        assert!(parse_listing(&html).unwrap().is_empty());
        assert!(parse_listing("").unwrap().is_empty());
    }

    #[test]
    fn repeated_blocks_are_kept() {
        let item = r#"
            <li class="showtime-list__item">
              <h3 class="movie-card-info__title">Nosferatu</h3>
              <div class="movie-showtime-times"><button class="showtimes-tile">10:00 PM</button></div>
            </li>"#;
        let html = page(&format!("{}{}", item, item));

        let showings = parse_listing(&html).unwrap();
        assert_eq!(showings.len(), 2);
        assert_eq!(showings[0], showings[1]);
    }

    #[test]
    fn emitted_showtimes_are_never_empty() {
        let html = page(
            r#"
            <li class="showtime-list__item">
              <h3 class="movie-card-info__title">A</h3>
              <div class="movie-showtime-times"></div>
              <div class="movie-showtime-times"><button class="showtimes-tile">1:00 PM</button></div>
            </li>
            <li class="showtime-list__item">
              <h3 class="movie-card-info__title">B</h3>
              <div class="movie-showtime-times">
                <button class="showtimes-tile showtimes-tile--is-disabled">2:00 PM</button>
              </div>
            </li>"#,
        );

        let showings = parse_listing(&html).unwrap();
        assert_eq!(showings.len(), 1);
        assert!(showings.iter().all(|s| !s.showtimes.is_empty()));
        assert!(showings.iter().all(|s| !s.showtimes.contains(&"2:00 PM".to_string())));
    }
}
