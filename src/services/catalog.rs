use crate::services::preferences::PreferenceFlags;

/// Substituted with the destination when a candidate is rendered
pub const CITY_PLACEHOLDER: &str = "{city}";

pub const HOTEL_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1578683010236-d716f9a3f461?fit=max&fm=jpg&q=80&w=1080",
    "https://images.unsplash.com/photo-1682221568203-16f33b35e57d?fit=max&fm=jpg&q=80&w=1080",
    "https://images.unsplash.com/photo-1694595437436-2ccf5a95591f?fit=max&fm=jpg&q=80&w=1080",
];

pub const RESTAURANT_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1759419038843-29749ac4cd2d?fit=max&fm=jpg&q=80&w=1080",
    "https://images.unsplash.com/photo-1757358957218-67e771ec07bb?fit=max&fm=jpg&q=80&w=1080",
];

pub const ACTIVITY_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1647946411130-b6b35df52974?fit=max&fm=jpg&q=80&w=1080",
    "https://images.unsplash.com/photo-1562064729-6c3f058785fd?fit=max&fm=jpg&q=80&w=1080",
];

/// Substitutes the destination into a templated name
pub fn render(template: &str, city: &str) -> String {
    template.replace(CITY_PLACEHOLDER, city)
}

/// Image for the candidate at `index`, cycling through the pool
pub fn image_for(pool: &[&str], index: usize) -> String {
    pool.get(index % pool.len().max(1))
        .map(|url| url.to_string())
        .unwrap_or_default()
}

#[derive(Clone, Copy)]
pub struct HotelTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub amenities: &'static [&'static str],
    /// Neighborhood shown for this hotel given the user's location flags
    pub location: fn(&PreferenceFlags) -> &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct RestaurantTemplate {
    pub name: &'static str,
    pub cuisine: &'static str,
    pub description: &'static str,
    pub price_level: &'static str,
    pub dietary: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct ActivityTemplate {
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub price: &'static str,
    pub duration: &'static str,
}

fn grand_location(f: &PreferenceFlags) -> &'static str {
    if f.downtown || f.near_tourist {
        "City Center"
    } else if f.near_airport {
        "Near Airport District"
    } else if f.near_restaurants {
        "Culinary District"
    } else {
        "City Center"
    }
}

fn boutique_location(f: &PreferenceFlags) -> &'static str {
    if f.near_restaurants {
        "Restaurant Row"
    } else if f.near_tourist {
        "Arts District"
    } else if f.near_airport {
        "Airport Area"
    } else {
        "Arts District"
    }
}

fn riverside_location(f: &PreferenceFlags) -> &'static str {
    if f.near_restaurants {
        "Waterfront Dining Area"
    } else if f.near_tourist {
        "Waterfront Tourism Hub"
    } else {
        "Waterfront"
    }
}

fn plaza_location(f: &PreferenceFlags) -> &'static str {
    if f.downtown || f.near_tourist {
        "Downtown"
    } else if f.near_airport {
        "Airport District"
    } else if f.near_restaurants {
        "Entertainment District"
    } else {
        "Downtown"
    }
}

pub const HOTELS: &[HotelTemplate] = &[
    HotelTemplate {
        name: "The Grand {city}",
        description: "Elegant historic hotel in the heart of downtown with stunning city views and world-class service.",
        amenities: &["Spa", "Fitness Center", "Rooftop Pool", "Fine Dining", "Concierge"],
        location: grand_location,
    },
    HotelTemplate {
        name: "{city} Boutique Suites",
        description: "Modern boutique hotel featuring contemporary design, local art, and personalized service.",
        amenities: &["Free WiFi", "Breakfast Included", "Bar & Lounge", "24/7 Front Desk"],
        location: boutique_location,
    },
    HotelTemplate {
        name: "Riverside {city} Hotel",
        description: "Waterfront property with panoramic views, spacious rooms, and exceptional dining options.",
        amenities: &["River Views", "Restaurant", "Gym", "Business Center", "Valet Parking"],
        location: riverside_location,
    },
    HotelTemplate {
        name: "{city} Plaza Hotel",
        description: "Contemporary hotel with sleek design, rooftop bar, and easy access to major attractions.",
        amenities: &["Rooftop Bar", "Pool", "Spa Services", "Meeting Rooms"],
        location: plaza_location,
    },
];

pub const RESTAURANTS: &[RestaurantTemplate] = &[
    RestaurantTemplate {
        name: "Le Petit {city}",
        cuisine: "French",
        description: "Intimate bistro serving authentic French cuisine with seasonal ingredients.",
        price_level: "$$",
        dietary: &["vegetarian options", "gluten-free options"],
    },
    RestaurantTemplate {
        name: "Sakura Garden",
        cuisine: "Japanese",
        description: "Contemporary Japanese restaurant featuring fresh sushi and traditional dishes.",
        price_level: "$$$",
        dietary: &["gluten-free options", "vegetarian options"],
    },
    RestaurantTemplate {
        name: "{city} Trattoria",
        cuisine: "Italian",
        description: "Family-owned Italian restaurant with homemade pasta and wood-fired pizzas.",
        price_level: "$$",
        dietary: &["vegetarian options", "vegan options"],
    },
    RestaurantTemplate {
        name: "The Steakhouse",
        cuisine: "American",
        description: "Classic steakhouse with premium cuts, craft cocktails, and elegant ambiance.",
        price_level: "$$$",
        dietary: &["gluten-free options"],
    },
    RestaurantTemplate {
        name: "Spice Market",
        cuisine: "Asian Fusion",
        description: "Modern Asian fusion with creative cocktails and shareable plates.",
        price_level: "$$",
        dietary: &["vegan options", "vegetarian options", "gluten-free options"],
    },
    RestaurantTemplate {
        name: "{city} Seafood Co.",
        cuisine: "Seafood",
        description: "Fresh seafood daily with waterfront views and extensive wine list.",
        price_level: "$$$",
        dietary: &["gluten-free options"],
    },
    RestaurantTemplate {
        name: "Green Leaf Cafe",
        cuisine: "Vegan",
        description: "Plant-based eatery with creative vegan dishes and organic ingredients.",
        price_level: "$",
        dietary: &["vegan", "vegetarian", "gluten-free options", "organic"],
    },
    RestaurantTemplate {
        name: "Mediterranean Table",
        cuisine: "Mediterranean",
        description: "Fresh Mediterranean cuisine with healthy options and vibrant flavors.",
        price_level: "$$",
        dietary: &["halal", "vegetarian options", "vegan options", "gluten-free options"],
    },
    RestaurantTemplate {
        name: "The Garden Kitchen",
        cuisine: "Farm-to-Table",
        description: "Seasonal farm-to-table dining with locally sourced organic ingredients.",
        price_level: "$$$",
        dietary: &["organic", "vegetarian options", "vegan options", "gluten-free options"],
    },
];

pub const ACTIVITIES: &[ActivityTemplate] = &[
    ActivityTemplate {
        name: "{city} Museum of Art",
        category: "Culture",
        description: "World-renowned art museum featuring classical and contemporary collections.",
        price: "$25",
        duration: "2-3 hours",
    },
    ActivityTemplate {
        name: "Historic Walking Tour",
        category: "Sightseeing",
        description: "Guided tour through historic landmarks and hidden gems of the city.",
        price: "$35",
        duration: "3 hours",
    },
    ActivityTemplate {
        name: "{city} Food Market",
        category: "Food & Drink",
        description: "Vibrant local market with artisan foods, fresh produce, and street food vendors.",
        price: "Free",
        duration: "1-2 hours",
    },
    ActivityTemplate {
        name: "Sunset Harbor Cruise",
        category: "Outdoor",
        description: "Scenic cruise with stunning sunset views and complimentary drinks.",
        price: "$45",
        duration: "2 hours",
    },
    ActivityTemplate {
        name: "Cooking Class Experience",
        category: "Culinary",
        description: "Hands-on cooking class learning local cuisine from expert chefs.",
        price: "$80",
        duration: "3 hours",
    },
    ActivityTemplate {
        name: "{city} Observation Deck",
        category: "Attraction",
        description: "360-degree panoramic views from the tallest building in the city.",
        price: "$30",
        duration: "1 hour",
    },
];
