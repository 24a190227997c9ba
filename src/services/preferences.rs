/// Dietary restriction that narrows the restaurant catalog, highest precedence first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietaryRestriction {
    Vegan,
    Vegetarian,
    GlutenFree,
    Halal,
    Organic,
}

impl DietaryRestriction {
    /// Tag fragments a candidate must carry at least one of
    pub fn accepted_tags(&self) -> &'static [&'static str] {
        match self {
            DietaryRestriction::Vegan => &["vegan"],
            DietaryRestriction::Vegetarian => &["vegan", "vegetarian"],
            DietaryRestriction::GlutenFree => &["gluten-free"],
            DietaryRestriction::Halal => &["halal"],
            DietaryRestriction::Organic => &["organic", "farm"],
        }
    }

    /// True when any of the candidate's tags contains an accepted fragment
    pub fn accepts(&self, tags: &[&str]) -> bool {
        tags.iter()
            .any(|tag| self.accepted_tags().iter().any(|accepted| tag.contains(accepted)))
    }
}

/// Flags extracted from dining and location preference text
///
/// Matching is a case-insensitive substring search. Unmatched or empty text
/// sets nothing, which callers treat as "no constraint".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreferenceFlags {
    pub vegan: bool,
    pub vegetarian: bool,
    pub gluten_free: bool,
    pub halal: bool,
    pub kosher: bool,
    pub organic: bool,
    pub wants_clean: bool,
    pub near_hotel: bool,
    pub casual: bool,
    pub fine_dining: bool,
    pub quick: bool,
    pub near_airport: bool,
    pub near_restaurants: bool,
    pub near_tourist: bool,
    pub downtown: bool,
}

const VEGAN: &[&str] = &["vegan"];
const VEGETARIAN: &[&str] = &["vegetarian"];
const GLUTEN_FREE: &[&str] = &["gluten", "celiac"];
const HALAL: &[&str] = &["halal"];
const KOSHER: &[&str] = &["kosher"];
const ORGANIC: &[&str] = &["organic", "farm to table", "local"];
const CLEAN: &[&str] = &["clean", "hygienic", "sanitized"];
const NEAR_HOTEL: &[&str] = &["near hotel", "close", "walking distance"];
const CASUAL: &[&str] = &["casual", "relaxed"];
const FINE_DINING: &[&str] = &["fine dining", "upscale", "fancy"];
const QUICK: &[&str] = &["quick", "fast"];
const AIRPORT: &[&str] = &["airport"];
const RESTAURANTS: &[&str] = &["restaurant", "dining", "food"];
const TOURIST: &[&str] = &["tourist", "attraction", "sightseeing"];
const DOWNTOWN: &[&str] = &["downtown", "city center", "central"];

fn mentions(text: &str, vocabulary: &[&str]) -> bool {
    vocabulary.iter().any(|word| text.contains(word))
}

impl PreferenceFlags {
    pub fn parse(text: &str) -> Self {
        let text = text.to_lowercase();
        let vegan = mentions(&text, VEGAN);

        Self {
            vegan,
            vegetarian: vegan || mentions(&text, VEGETARIAN),
            gluten_free: mentions(&text, GLUTEN_FREE),
            halal: mentions(&text, HALAL),
            kosher: mentions(&text, KOSHER),
            organic: mentions(&text, ORGANIC),
            wants_clean: mentions(&text, CLEAN),
            near_hotel: mentions(&text, NEAR_HOTEL),
            casual: mentions(&text, CASUAL),
            fine_dining: mentions(&text, FINE_DINING),
            quick: mentions(&text, QUICK),
            near_airport: mentions(&text, AIRPORT),
            near_restaurants: mentions(&text, RESTAURANTS),
            near_tourist: mentions(&text, TOURIST),
            downtown: mentions(&text, DOWNTOWN),
        }
    }

    /// The restriction that wins under vegan > vegetarian > gluten-free > halal > organic
    pub fn dietary_restriction(&self) -> Option<DietaryRestriction> {
        [
            (self.vegan, DietaryRestriction::Vegan),
            (self.vegetarian, DietaryRestriction::Vegetarian),
            (self.gluten_free, DietaryRestriction::GlutenFree),
            (self.halal, DietaryRestriction::Halal),
            (self.organic, DietaryRestriction::Organic),
        ]
        .into_iter()
        .find_map(|(set, restriction)| set.then_some(restriction))
    }
}

/// Splits comma or semicolon separated restrictions into trimmed items
pub fn split_restrictions(text: &str) -> Vec<String> {
    text.split([',', ';'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
