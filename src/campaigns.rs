//! Sample ad campaigns used by the demo binary.

/// An ad campaign as fed to the matching strategies: the keywords are the
/// input, the name and description are display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Campaign {
    pub name: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
}

impl Campaign {
    /// The keyword list joined into the single text every strategy consumes.
    pub fn keyword_text(&self) -> String {
        self.keywords.join(", ")
    }
}

pub const CAMPAIGNS: &[Campaign] = &[
    Campaign {
        name: "Premium Laptops Sale",
        description: "This campaign advertises premium and latest model laptops for technology enthusiasts and professionals.",
        keywords: &[
            "buy laptops",
            "premium laptops",
            "best laptops",
            "new laptops",
            "high performance laptops",
            "gaming laptops",
            "ultrabooks",
            "laptop deals",
            "laptop online",
            "business laptops",
        ],
    },
    Campaign {
        name: "Organic Skincare Products",
        description: "This campaign promotes organic, chemical-free skincare products targeting health-conscious customers.",
        keywords: &[
            "organic skincare",
            "natural face cream",
            "organic moisturizer",
            "chemical free skincare",
            "herbal face mask",
            "natural body lotion",
            "vegan skincare",
            "eco friendly cosmetics",
            "organic sunscreen",
        ],
    },
    Campaign {
        name: "Home Fitness Equipment",
        description: "This campaign advertises a range of fitness equipment for home workouts.",
        keywords: &[
            "home gym equipment",
            "buy treadmill",
            "workout dumbbells",
            "resistance bands",
            "fitness equipment online",
            "exercise bike",
            "pull up bar",
            "yoga mats",
            "fitness accessories",
        ],
    },
    Campaign {
        name: "Pet Food and Accessories",
        description: "This campaign promotes high-quality pet food, toys, and accessories for dogs and cats.",
        keywords: &[
            "dog food",
            "cat food",
            "pet toys",
            "pet accessories",
            "healthy pet treats",
            "dog collars",
            "cat litter",
            "pet grooming",
            "pet supplies online",
            "pet beds",
        ],
    },
    Campaign {
        name: "Custom T-Shirt Printing",
        description: "This campaign advertises custom t-shirt printing services for events and personal use.",
        keywords: &[
            "custom t shirts",
            "t shirt printing",
            "personalized shirts",
            "print your design",
            "event t shirts",
            "company t shirts",
            "design your shirt",
            "bulk t shirt printing",
            "custom apparel",
        ],
    },
    Campaign {
        name: "Premium Noise Cancelling Headphones",
        description: "Advertising the latest wireless noise-cancelling headphones for audiophiles and tech enthusiasts.",
        keywords: &[
            "wireless headphones",
            "noise cancelling",
            "Bluetooth headphones",
            "over ear headphones",
            "best headphones",
            "music headphones",
            "headphone deals",
            "active noise cancelling",
            "premium headphones",
            "headphone sale",
        ],
    },
    Campaign {
        name: "Organic Skincare Essentials",
        description: "Promoting a range of natural and organic skincare products for all skin types.",
        keywords: &[
            "organic skincare",
            "natural face cream",
            "herbal moisturizer",
            "eco friendly skincare",
            "vegan beauty products",
            "cruelty free lotion",
            "best organic face wash",
            "natural serum",
            "plant based skincare",
            "organic body butter",
            "skincare for sensitive skin",
        ],
    },
    Campaign {
        name: "Digital Marketing Online Courses",
        description: "Targeting professionals interested in learning digital marketing skills through online courses.",
        keywords: &[
            "digital marketing course",
            "SEO training",
            "learn Google Ads",
            "social media marketing",
            "online marketing classes",
            "PPC course",
            "content marketing course",
            "email marketing training",
            "marketing certification online",
            "internet marketing course",
        ],
    },
    Campaign {
        name: "EcoSmart Home Appliances",
        description: "Showcasing energy efficient and environmentally friendly home appliances.",
        keywords: &[
            "energy efficient fridge",
            "eco smart washing machine",
            "low energy dishwasher",
            "green home appliances",
            "smart thermostat",
            "solar water heater",
            "appliance energy rating",
            "environmentally friendly oven",
            "sustainable appliances",
        ],
    },
    Campaign {
        name: "Summer Adventure Travel Packages",
        description: "Promoting all-inclusive summer travel and adventure packages for families and thrill seekers.",
        keywords: &[
            "summer travel deals",
            "adventure vacation",
            "family holiday package",
            "beach getaway",
            "all inclusive travel",
            "rafting trips",
            "guided hiking tours",
            "adventure travel 2024",
            "outdoor adventure holiday",
            "summer flight deals",
            "travel package discounts",
            "vacation tours",
        ],
    },
    Campaign {
        name: "Eco-Friendly Kitchen Products",
        description: "Promotes sustainable and environmentally-friendly kitchenware such as bamboo utensils, reusable food wraps, and compostable dish sponges.",
        keywords: &[
            "eco kitchenware",
            "bamboo utensils",
            "sustainable kitchen",
            "compostable sponges",
            "reusable food wraps",
            "green cookware",
            "zero waste kitchen",
            "environmentally friendly utensils",
            "plastic free kitchen",
        ],
    },
    Campaign {
        name: "Online Coding Bootcamp",
        description: "Advertises a virtual coding bootcamp offering intensive programming courses in web development, data science, and app development.",
        keywords: &[
            "coding bootcamp",
            "learn programming",
            "web development course",
            "online coding classes",
            "data science bootcamp",
            "python classes",
            "java programming",
            "front end development",
            "full stack bootcamp",
            "javascript course",
            "app development course",
            "virtual coding bootcamp",
            "software engineering course",
        ],
    },
    Campaign {
        name: "Luxury Dog Beds",
        description: "Showcases high-end, comfortable, and stylish dog beds for pet owners seeking premium products for their dogs.",
        keywords: &[
            "luxury dog beds",
            "premium dog bed",
            "orthopedic pet bed",
            "stylish dog beds",
            "best dog beds",
            "memory foam dog bed",
        ],
    },
];
