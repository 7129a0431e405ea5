// ---------------------------------------------------------------------------
// Keyword tagging of listing descriptions
// ---------------------------------------------------------------------------

/// Colour class of a tag chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagCategory {
    Positive,
    Warning,
    Info,
    Accent,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Renovated,
    OriginalCondition,
    NewConstruction,
    Brick,
    PanelBuilding,
    Balcony,
    Loggia,
    Terrace,
    Garden,
    Cellar,
    Elevator,
    Parking,
}

impl Tag {
    pub fn label(self) -> &'static str {
        match self {
            Tag::Renovated => "renovated",
            Tag::OriginalCondition => "original condition",
            Tag::NewConstruction => "new construction",
            Tag::Brick => "brick",
            Tag::PanelBuilding => "panel building",
            Tag::Balcony => "balcony",
            Tag::Loggia => "loggia",
            Tag::Terrace => "terrace",
            Tag::Garden => "garden",
            Tag::Cellar => "cellar",
            Tag::Elevator => "elevator",
            Tag::Parking => "parking",
        }
    }

    pub fn category(self) -> TagCategory {
        match self {
            Tag::Renovated | Tag::Garden => TagCategory::Positive,
            Tag::OriginalCondition => TagCategory::Warning,
            Tag::NewConstruction
            | Tag::Balcony
            | Tag::Loggia
            | Tag::Terrace
            | Tag::Parking => TagCategory::Info,
            Tag::Brick => TagCategory::Accent,
            Tag::PanelBuilding | Tag::Cellar | Tag::Elevator => TagCategory::Neutral,
        }
    }
}

/// A tag fires when the lowercased text contains any of its keywords.
struct Rule {
    keywords: &'static [&'static str],
    tag: Tag,
}

impl Rule {
    fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k))
    }
}

/// Renovation state: the first matching rule wins.
const STATE_RULES: &[Rule] = &[
    Rule {
        keywords: &["rekonstruk"],
        tag: Tag::Renovated,
    },
    Rule {
        keywords: &["původní", "k rekonstrukci"],
        tag: Tag::OriginalCondition,
    },
    Rule {
        keywords: &["novostavb", "projekt"],
        tag: Tag::NewConstruction,
    },
];

/// Material and amenities: every matching rule contributes.
const ADDITIVE_RULES: &[Rule] = &[
    Rule {
        keywords: &["cihla", "cihlov"],
        tag: Tag::Brick,
    },
    Rule {
        keywords: &["panel"],
        tag: Tag::PanelBuilding,
    },
    Rule {
        keywords: &["balkon", "balkón"],
        tag: Tag::Balcony,
    },
    Rule {
        keywords: &["lodži"],
        tag: Tag::Loggia,
    },
    Rule {
        keywords: &["teras"],
        tag: Tag::Terrace,
    },
    Rule {
        keywords: &["zahrada", "předzahrád"],
        tag: Tag::Garden,
    },
    Rule {
        keywords: &["sklep"],
        tag: Tag::Cellar,
    },
    Rule {
        keywords: &["výtah"],
        tag: Tag::Elevator,
    },
    Rule {
        keywords: &["parkování", "garáž"],
        tag: Tag::Parking,
    },
];

/// Tags for a free-text description: state first, then material, then
/// amenities, each group in rule order.
pub fn classify(description: &str) -> Vec<Tag> {
    let text = description.to_lowercase();

    STATE_RULES
        .iter()
        .find(|rule| rule.matches(&text))
        .into_iter()
        .chain(ADDITIVE_RULES.iter().filter(|rule| rule.matches(&text)))
        .map(|rule| rule.tag)
        .collect()
}
