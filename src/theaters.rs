//! Theater registry.
//! Built-in list: New York AMC/Regal locations, listing pages on https://feverup.com/movies/

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const FEVER_BASE: &str = "https://feverup.com/movies/en/united-states/movie-theaters";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theater {
    pub name: String,
    pub address: String,
    /// Listing page for today; later days add `?date=YYYY-MM-DD`.
    #[serde(rename = "url")]
    pub listing_url: String,
}

impl Theater {
    pub fn new(name: &str, address: &str, listing_url: &str) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
            listing_url: listing_url.to_string(),
        }
    }
}

/// (name, address, Fever slug)
static NYC: [(&str, &str, &str); 15] = [
    ("AMC Empire 25", "234 W 42nd St, New York, NY 10036", "amc-empire-25"),
    ("AMC 84th Street 6", "2310 Broadway, New York, NY 10024", "amc-84th-street-6"),
    ("AMC Orpheum 7", "1538 Third Ave, New York, NY 10028", "amc-orpheum-7"),
    ("AMC Village 7", "66 Third Ave, New York, NY 10003", "amc-village-7"),
    ("AMC 19th St. East 6", "890 Broadway, New York, NY 10003", "amc-19th-st-east-6"),
    ("AMC Lincoln Square 13", "1998 Broadway, New York, NY 10023", "amc-lincoln-square-13"),
    ("AMC 34th Street 14", "312 W 34th St, New York, NY 10001", "amc-34th-street-14"),
    ("AMC Kips Bay 15", "570 Second Ave, New York, NY 10016", "amc-kips-bay-15"),
    (
        "AMC Magic Johnson Harlem 9",
        "2309 Frederick Douglass Blvd, New York, NY 10027",
        "amc-magic-johnson-harlem-9",
    ),
    ("Regal Union Square", "850 Broadway, New York, NY 10003", "regal-union-square"),
    ("Regal Essex Crossing", "129 Delancey St, New York, NY 10002", "regal-essex-crossing"),
    ("Regal Times Square", "247 W 42nd St, New York, NY 10036", "regal-e-walk"),
    (
        "Regal Battery Park",
        "102 North End Ave, New York, NY 10282",
        "regal-cinemas-battery-park",
    ),
    (
        "Regal UA Sheepshead Bay",
        "3907 Shore Pkwy, Brooklyn, NY 11235",
        "regal-ua-sheepshead-bay",
    ),
    (
        "Regal UA Kaufman Astoria",
        "35-30 38th St, Astoria, NY 11101",
        "regal-ua-kaufman-astoria",
    ),
];

/// The built-in New York registry.
pub fn nyc_theaters() -> Vec<Theater> {
    NYC.iter()
        .map(|(name, address, slug)| {
            Theater::new(name, address, &format!("{}/{}", FEVER_BASE, slug))
        })
        .collect()
}

/// Load a registry from a JSON array of `{name, address, url}` objects.
pub fn load_theaters(path: &Path) -> Result<Vec<Theater>, ConfigError> {
    let body = std::fs::read_to_string(path).map_err(|source| ConfigError::TheatersIo {
        path: path.to_path_buf(),
        source,
    })?;
    let theaters: Vec<Theater> =
        serde_json::from_str(&body).map_err(|source| ConfigError::TheatersJson {
            path: path.to_path_buf(),
            source,
        })?;
    if theaters.is_empty() {
        return Err(ConfigError::NoTheaters(path.to_path_buf()));
    }
    Ok(theaters)
}
