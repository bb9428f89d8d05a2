//! Category suggestion scoring.
//!
//! Free-text descriptions are matched against a fixed keyword table; each
//! keyword found as a substring contributes its own length to the row's
//! category, so longer (more specific) matches dominate shorter ones.

use once_cell::sync::Lazy;

/// Suggestions are capped at this many categories.
const MAX_SUGGESTIONS: usize = 11;

pub struct CategoryMapping {
    pub keywords: Vec<&'static str>,
    pub category: &'static str,
}

fn mapping(keywords: &[&'static str], category: &'static str) -> CategoryMapping {
    CategoryMapping {
        keywords: keywords.to_vec(),
        category,
    }
}

/// Keyword table, in priority order. A category may appear in several rows;
/// its scores accumulate. Keywords are lowercase; several locales are mixed
/// in because descriptions arrive in whatever language the bank exports.
pub static CATEGORY_KEYWORD_MAPPINGS: Lazy<Vec<CategoryMapping>> = Lazy::new(|| {
    vec![
        // Housing
        mapping(&["rent", "aluguer", "loyer", "huur", "renda"], "RENT"),
        mapping(
            &["property tax", "imi", "taxe foncière", "imposto"],
            "PROPERTY_TAXES",
        ),
        mapping(
            &[
                "repair",
                "maintenance",
                "plumber",
                "electrician",
                "reparação",
                "caldeira",
                "manutenção",
                "revisão",
                "aquecimento",
                "canalização",
                "electricista",
            ],
            "HOME_MAINTENANCE_REPAIRS",
        ),
        mapping(
            &["home insurance", "house insurance", "seguro casa", "seguro"],
            "HOME_INSURANCE",
        ),
        mapping(
            &["furniture", "ikea", "sofa", "bed", "table", "chair"],
            "HOUSEHOLD_SUPPLIES_FURNITURE",
        ),
        // Transportation
        mapping(
            &["fuel", "gas", "petrol", "gasolina", "gasoleo", "essence", "benzine"],
            "FUEL",
        ),
        mapping(
            &["metro", "bus", "tram", "train", "stib", "mivb", "transport public"],
            "PUBLIC_TRANSPORT",
        ),
        mapping(&["uber", "lyft", "taxi", "cabify"], "UBER"),
        mapping(
            &["car repair", "mechanic", "oil change", "tire", "pneu", "mecânico"],
            "CAR_MAINTENANCE",
        ),
        mapping(&["parking", "estacionamento", "parkeren"], "PARKING"),
        mapping(
            &["car insurance", "auto insurance", "seguro auto"],
            "VEHICLE_INSURANCE",
        ),
        mapping(&["toll", "portagem", "péage", "tol"], "TOLLS"),
        // Shopping
        mapping(&["shopping", "mall", "store", "loja", "magasin"], "SHOPPING"),
        mapping(
            &["clothes", "clothing", "zara", "h&m", "hm", "fashion", "roupa"],
            "CLOTHING",
        ),
        mapping(
            &[
                "phone",
                "laptop",
                "computer",
                "tablet",
                "electronics",
                "fnac",
                "worten",
                "apple",
            ],
            "ELECTRONICS",
        ),
        mapping(
            &["gift", "presente", "cadeau", "birthday", "aniversário"],
            "GIFTS",
        ),
        mapping(
            &["beauty", "cosmetics", "makeup", "perfume", "sephora"],
            "BEAUTY_COSMETICS",
        ),
        // Food & Dining
        mapping(
            &[
                "grocery",
                "supermarket",
                "auchan",
                "carrefour",
                "lidl",
                "aldi",
                "continente",
                "pingo doce",
                "delhaize",
                "colruyt",
            ],
            "GROCERIES",
        ),
        mapping(
            &["restaurant", "dinner", "lunch", "restaurante", "jantar"],
            "RESTAURANTS",
        ),
        mapping(
            &["mcdonalds", "burger king", "kfc", "fast food", "quick"],
            "FAST_FOOD",
        ),
        mapping(&["coffee", "starbucks", "café", "cafe"], "COFFEE_SHOPS"),
        mapping(
            &["bar", "pub", "beer", "wine", "alcohol", "cerveja", "vinho"],
            "ALCOHOL_BARS",
        ),
        mapping(&["food", "meal", "comida", "refeição"], "FOOD_DRINKS"),
        // Entertainment
        mapping(&["cinema", "movie", "theater", "filme"], "MOVIES"),
        mapping(
            &["concert", "festival", "event", "ticket", "show"],
            "EVENTS",
        ),
        mapping(
            &["game", "playstation", "xbox", "nintendo", "steam", "gaming"],
            "GAMES",
        ),
        mapping(&["club", "nightclub", "disco", "nightlife"], "NIGHTLIFE"),
        mapping(&["hobby", "craft", "art supplies"], "HOBBIES"),
        mapping(
            &["gym", "fitness", "sport", "academia", "basic fit", "jims"],
            "GYM",
        ),
        // Technology & Services
        mapping(
            &["software", "app", "subscription", "adobe", "microsoft"],
            "SOFTWARE_SUBSCRIPTIONS",
        ),
        mapping(
            &["internet", "wifi", "broadband", "scarlet", "proximus"],
            "INTERNET_SERVICES",
        ),
        mapping(
            &["mobile", "phone plan", "vodafone", "orange", "meo", "nos", "telemovel"],
            "MOBILE_PHONE_PLANS",
        ),
        // Utilities
        mapping(&["water", "água", "eau"], "WATER"),
        mapping(
            &["electricity", "eletricidade", "électricité", "edp"],
            "ELECTRICITY",
        ),
        mapping(&["gas", "gás", "heating"], "GAS"),
        // Business
        mapping(
            &["office", "supplies", "stationery", "printer"],
            "OFFICE_SUPPLIES",
        ),
        mapping(
            &["business travel", "conference", "hotel work"],
            "BUSINESS_TRAVEL",
        ),
        mapping(
            &["lawyer", "accountant", "consultant", "professional"],
            "PROFESSIONAL_SERVICES",
        ),
        // Education
        mapping(
            &["course", "class", "school", "university", "tuition", "aula"],
            "EDUCATION",
        ),
        mapping(
            &["udemy", "coursera", "online course", "learning"],
            "ONLINE_COURSES",
        ),
        // Insurance
        mapping(
            &["health insurance", "seguro saúde", "mutuelle"],
            "HEALTH_INSURANCE",
        ),
        mapping(&["life insurance", "seguro vida"], "LIFE_INSURANCE"),
        mapping(&["travel insurance", "seguro viagem"], "TRAVEL_INSURANCE"),
        // Health & Medical
        mapping(
            &["pharmacy", "medicine", "farmácia", "medication"],
            "PHARMACY",
        ),
        mapping(
            &["doctor", "hospital", "medical", "clinic", "médico"],
            "MEDICAL",
        ),
        mapping(
            &["therapy", "therapist", "psychologist", "terapeuta"],
            "THERAPY",
        ),
        // Pets
        mapping(&["pet food", "dog food", "cat food", "ração"], "PET_FOOD"),
        mapping(&["vet", "veterinary", "veterinário"], "VET_VISITS"),
        mapping(
            &["pet shop", "pet store", "pet accessories"],
            "PET_ACCESSORIES",
        ),
        mapping(&["grooming", "pet groomer"], "PET_GROOMING"),
        // Banking & Investments
        mapping(&["bank fee", "commission", "taxa bancária"], "BANK_FEES"),
        mapping(
            &["investment", "stock", "etf", "crypto", "bitcoin"],
            "INVESTMENTS",
        ),
        // Streaming & Subscriptions
        mapping(
            &["netflix", "hbo", "disney", "video streaming", "iptv"],
            "VIDEO_STREAMING",
        ),
        mapping(
            &["spotify", "apple music", "music streaming"],
            "MUSIC_STREAMING",
        ),
        mapping(
            &["cloud", "dropbox", "google drive", "icloud", "google"],
            "CLOUD_STORAGE",
        ),
        mapping(
            &["magazine", "news", "newspaper", "jornal"],
            "NEWS_SUBSCRIPTIONS",
        ),
        // Travel
        mapping(
            &["hotel", "booking", "airbnb", "accommodation"],
            "HOTELS",
        ),
        mapping(
            &["flight", "plane", "airline", "ryanair", "tap", "voo"],
            "FLIGHTS",
        ),
        mapping(
            &["car rental", "rent a car", "hertz", "sixt"],
            "CAR_RENTAL",
        ),
        mapping(&["tour", "excursion", "tourist", "turismo"], "TOURS"),
        // Income
        mapping(&["salary", "salário", "wage", "paycheck"], "SALARY"),
        mapping(
            &["freelance", "freelancing", "consulting"],
            "FREELANCING",
        ),
        mapping(
            &["dividend", "investment income", "interest"],
            "INVESTMENT_INCOME",
        ),
        mapping(&["refund", "reembolso", "return"], "REFUNDS"),
        mapping(
            &["rental income", "rent income", "aluguer"],
            "RENTAL_INCOME",
        ),
    ]
});

/// Scores the description against the keyword table and returns the most
/// relevant categories, best first, capped at eleven. A description that
/// hits no keyword yields an empty list.
pub fn suggest_categories(description: &str) -> Vec<&'static str> {
    let normalized = description.trim().to_lowercase();
    if normalized.is_empty() {
        return Vec::new();
    }

    // Insertion order doubles as the tie-break, so scores live in a Vec
    // rather than a map.
    let mut scores: Vec<(&'static str, usize)> = Vec::new();
    for mapping in CATEGORY_KEYWORD_MAPPINGS.iter() {
        let score: usize = mapping
            .keywords
            .iter()
            .filter(|keyword| normalized.contains(*keyword))
            .map(|keyword| keyword.len())
            .sum();
        if score == 0 {
            continue;
        }
        match scores.iter_mut().find(|(c, _)| *c == mapping.category) {
            Some(entry) => entry.1 += score,
            None => scores.push((mapping.category, score)),
        }
    }

    // Stable sort keeps table order for equal scores.
    scores.sort_by(|a, b| b.1.cmp(&a.1));
    scores
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(category, _)| category)
        .collect()
}

/// The full category list, as offered behind the UI's "More" option.
pub fn all_categories() -> Vec<&'static str> {
    vec![
        "RENT",
        "PROPERTY_TAXES",
        "HOME_MAINTENANCE_REPAIRS",
        "HOME_INSURANCE",
        "HOUSEHOLD_SUPPLIES_FURNITURE",
        "FUEL",
        "PUBLIC_TRANSPORT",
        "UBER",
        "CAR_MAINTENANCE",
        "PARKING",
        "VEHICLE_INSURANCE",
        "TOLLS",
        "SHOPPING",
        "CLOTHING",
        "ELECTRONICS",
        "GIFTS",
        "BEAUTY_COSMETICS",
        "GROCERIES",
        "RESTAURANTS",
        "FAST_FOOD",
        "COFFEE_SHOPS",
        "ALCOHOL_BARS",
        "FOOD_DRINKS",
        "ENTERTAINMENT",
        "MOVIES",
        "EVENTS",
        "GAMES",
        "NIGHTLIFE",
        "HOBBIES",
        "GYM",
        "TECH",
        "SOFTWARE_SUBSCRIPTIONS",
        "INTERNET_SERVICES",
        "MOBILE_PHONE_PLANS",
        "NET",
        "UTILITIES",
        "WATER",
        "ELECTRICITY",
        "GAS",
        "OFFICE_SUPPLIES",
        "BUSINESS_TRAVEL",
        "PROFESSIONAL_SERVICES",
        "EDUCATION",
        "ONLINE_COURSES",
        "CLASSES",
        "HEALTH_INSURANCE",
        "CAR_INSURANCE",
        "LIFE_INSURANCE",
        "TRAVEL_INSURANCE",
        "HEALTH",
        "PHARMACY",
        "MEDICAL",
        "THERAPY",
        "PET_FOOD",
        "VET_VISITS",
        "PET_ACCESSORIES",
        "PET_GROOMING",
        "BANK_FEES",
        "INVESTMENTS",
        "STREAMING_SERVICES",
        "VIDEO_STREAMING",
        "MUSIC_STREAMING",
        "CLOUD_STORAGE",
        "DIGITAL_MAGAZINES",
        "NEWS_SUBSCRIPTIONS",
        "HOTELS",
        "FLIGHTS",
        "CAR_RENTAL",
        "TOURS",
        "SALARY",
        "FREELANCING",
        "INVESTMENT_INCOME",
        "REFUNDS",
        "RENTAL_INCOME",
        "OTHER",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_description_yields_nothing() {
        assert!(suggest_categories("zzzzqqq").is_empty());
        assert!(suggest_categories("").is_empty());
        assert!(suggest_categories("   ").is_empty());
    }

    #[test]
    fn best_match_comes_first() {
        let suggestions = suggest_categories("Netflix monthly charge");
        assert_eq!(suggestions.first(), Some(&"VIDEO_STREAMING"));
    }

    #[test]
    fn matching_is_case_insensitive_and_trimmed() {
        let suggestions = suggest_categories("  STARBUCKS downtown  ");
        assert!(suggestions.contains(&"COFFEE_SHOPS"));
    }

    #[test]
    fn longer_keywords_outrank_shorter_ones() {
        // "health insurance" (16) must beat the lone "seguro" row hit and
        // any other short keyword the text brushes against.
        let suggestions = suggest_categories("health insurance premium");
        assert_eq!(suggestions.first(), Some(&"HEALTH_INSURANCE"));
    }

    #[test]
    fn scores_accumulate_across_keywords_in_a_row() {
        // Both "grocery" and "lidl" hit the GROCERIES row.
        let with_two = suggest_categories("grocery run at lidl");
        assert_eq!(with_two.first(), Some(&"GROCERIES"));
    }

    #[test]
    fn result_is_capped_at_eleven() {
        // A description stuffed with keywords from many rows.
        let text = "rent fuel uber parking shopping clothes phone gift coffee \
                    bar food cinema game gym water gas hotel flight salary refund";
        let suggestions = suggest_categories(text);
        assert!(suggestions.len() <= 11);
        assert!(!suggestions.is_empty());
    }

    #[test]
    fn category_hit_from_multiple_rows_accumulates() {
        // "aluguer" appears in both RENT and RENTAL_INCOME rows; both
        // categories surface, each scored independently.
        let suggestions = suggest_categories("aluguer");
        assert!(suggestions.contains(&"RENT"));
        assert!(suggestions.contains(&"RENTAL_INCOME"));
    }

    #[test]
    fn all_categories_is_nonempty_and_has_other() {
        let all = all_categories();
        assert!(all.contains(&"OTHER"));
        assert!(all.len() > 50);
    }
}
