//! Bundled IAB content taxonomy names.
//!
//! The tier-1 list follows the labels advertisers see in campaign tooling.
//! The tier-2 subset covers the buckets that actually show up in ad-campaign
//! traffic, for callers who want finer matches without carrying the full
//! several-hundred-entry tree.

/// Tier-1 IAB content categories.
pub const IAB_TIER1: [&str; 26] = [
    "Arts & Entertainment",
    "Automotive",
    "Business",
    "Careers",
    "Education",
    "Family & Parenting",
    "Health & Fitness",
    "Food & Drink",
    "Hobbies & Interests",
    "Home & Garden",
    "Law, Gov't & Politics",
    "News",
    "Personal Finance",
    "Society",
    "Science",
    "Pets",
    "Sports",
    "Style & Fashion",
    "Technology & Computing",
    "Travel",
    "Real Estate",
    "Shopping",
    "Religion & Spirituality",
    "Uncategorized",
    "Non-Standard Content",
    "Illegal Content",
];

/// Commonly matched tier-2 IAB categories.
pub const IAB_TIER2_SUBSET: [&str; 24] = [
    "Auto Parts",
    "Buying/Selling Cars",
    "Advertising",
    "Marketing",
    "Career Advice",
    "Distance Learning",
    "Language Learning",
    "Exercise",
    "Weight Loss",
    "Coffee/Tea",
    "Video & Computer Games",
    "Appliances",
    "Gardening",
    "Interior Decorating",
    "Investing",
    "Cats",
    "Dogs",
    "Running/Jogging",
    "Beauty",
    "Clothing",
    "Cell Phones",
    "Computer Peripherals",
    "Adventure Travel",
    "Hotels",
];
