//! Region and subregion catalog. Region codes double as the site subdomain;
//! subregions narrow the search within a region.

pub struct Region {
    pub code: &'static str,
    pub name: &'static str,
}

pub const REGIONS: &[Region] = &[
    Region { code: "sfbay", name: "SF Bay Area, CA" },
    Region { code: "sandiego", name: "San Diego, CA" },
    Region { code: "losangeles", name: "Los Angeles, CA" },
    Region { code: "seattle", name: "Seattle, WA" },
    Region { code: "portland", name: "Portland, OR" },
    Region { code: "chicago", name: "Chicago, IL" },
    Region { code: "boston", name: "Boston, MA" },
    Region { code: "newyork", name: "New York City, NY" },
    Region { code: "washingtondc", name: "Washington, D.C." },
    Region { code: "denver", name: "Denver, CO" },
    Region { code: "phoenix", name: "Phoenix, AZ" },
    Region { code: "austin", name: "Austin, TX" },
];

/// Subregions of the SF Bay Area, the region the crawler was built around.
/// Other regions search region-wide with the `search/{category}` form.
pub const SFBAY_SUBREGIONS: &[(&str, &str)] = &[
    ("sfc", "San Francisco"),
    ("sby", "South Bay"),
    ("eby", "East Bay"),
    ("pen", "Peninsula"),
    ("nby", "North Bay"),
    ("scz", "Santa Cruz"),
];

pub fn region_by_code(code: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.code == code)
}

pub fn sfbay_subregion_name(code: &str) -> Option<&'static str> {
    SFBAY_SUBREGIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// The parameterized search URL a crawl starts from.
pub fn search_url(
    region: &str,
    subregion: &str,
    category: &str,
    min_price: u32,
    max_price: u32,
    rent_period: u32,
    sale_date: &str,
) -> String {
    format!(
        "https://{region}.craigslist.org/search/{subregion}/{category}\
         ?min_price={min_price}&max_price={max_price}\
         &availabilityMode=0&rent_period={rent_period}&sale_date={sale_date}"
    )
}
