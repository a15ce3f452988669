//! Best-effort guess of a property's name and city from a listing URL.
//!
//! Only the URL text is inspected; nothing is fetched.

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use url::Url;

pub const AIRBNB: &str = "Airbnb";
pub const BOOKING_COM: &str = "Booking.com";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingGuess {
    pub platform: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
}

impl ListingGuess {
    pub fn is_empty(&self) -> bool {
        self.platform.is_none() && self.name.is_none() && self.city.is_none()
    }
}

/// Never fails: anything unparseable or unrecognised yields an empty guess.
pub fn infer_listing(input: &str) -> ListingGuess {
    let Some(url) = parse_lenient(input) else {
        return ListingGuess::default();
    };
    let Some(host) = url.host_str().map(str::to_ascii_lowercase) else {
        return ListingGuess::default();
    };

    let segments: Vec<String> = url
        .path_segments()
        .map(|parts| {
            parts
                .filter(|s| !s.is_empty())
                .map(|s| percent_decode_str(s).decode_utf8_lossy().to_lowercase())
                .collect()
        })
        .unwrap_or_default();

    let guess = if host.contains("airbnb") {
        from_airbnb(&segments)
    } else if host.contains("booking.com") {
        from_booking_com(&segments)
    } else {
        ListingGuess::default()
    };

    tracing::debug!(host = %host, platform = ?guess.platform, "Inferred listing");
    guess
}

fn parse_lenient(input: &str) -> Option<Url> {
    let trimmed = input.trim();
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url);
    }
    // Pastes like `airbnb.com/rooms/...` lack a scheme
    if trimmed.is_empty() || trimmed.contains(char::is_whitespace) || !trimmed.contains('.') {
        return None;
    }
    Url::parse(&format!("https://{trimmed}")).ok()
}

fn from_airbnb(segments: &[String]) -> ListingGuess {
    let name = segments
        .last()
        .map(|slug| title_case(&slug_to_words(strip_listing_id(slug))))
        .filter(|n| !n.is_empty());

    ListingGuess {
        platform: Some(AIRBNB.to_string()),
        name,
        city: None,
    }
}

fn from_booking_com(segments: &[String]) -> ListingGuess {
    let mut guess = ListingGuess {
        platform: Some(BOOKING_COM.to_string()),
        ..Default::default()
    };

    let Some(pos) = segments.iter().position(|s| s == "hotel") else {
        return guess;
    };
    if let [city, slug, ..] = &segments[pos + 1..] {
        // `le-grand-paris.en-gb.html` -> `le-grand-paris`
        let slug = slug.split('.').next().unwrap_or_default();
        guess.city = Some(title_case(city)).filter(|c| !c.is_empty());
        guess.name = Some(title_case(&slug_to_words(slug))).filter(|n| !n.is_empty());
    }
    guess
}

/// Drops a trailing numeric listing id, with or without its leading hyphen.
fn strip_listing_id(slug: &str) -> &str {
    let trimmed = slug.trim_end_matches(|c: char| c.is_ascii_digit());
    if trimmed.len() == slug.len() {
        return slug;
    }
    trimmed.strip_suffix('-').unwrap_or(trimmed)
}

fn slug_to_words(slug: &str) -> String {
    slug.replace('-', " ")
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
