/// Character classes a spell can belong to. Only these get a class banner and
/// appear in a card's class list.
pub const CLASSES: [&str; 13] = [
    "Artificer",
    "Barbarian",
    "Bard",
    "Cleric",
    "Druid",
    "Fighter",
    "Monk",
    "Paladin",
    "Ranger",
    "Rogue",
    "Sorcerer",
    "Warlock",
    "Wizard",
];

/// One spell, as printed on a card
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spell {
    pub name: String,
    /// `Cantrip`, `1st`, `2nd`, ...
    pub level: String,
    pub casting_time: String,
    pub duration: String,
    pub range: String,
    /// e.g. `V, S, M (a pinch of sulfur)`
    pub components: String,
    pub classes: Vec<String>,
    pub description: String,
    pub at_higher_levels: Option<String>,
}

impl Spell {
    pub fn new<S: Into<String>>(name: S) -> Spell {
        Spell {
            name: name.into(),
            ..Spell::default()
        }
    }

    /// Parse a comma separated class list such as `"Bard, Wizard"`
    pub fn with_classes(mut self, classes: &str) -> Spell {
        self.classes = classes
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        self
    }

    /// The components without their material list: `V, S, M (bat guano)` → `V, S, M`
    pub fn components_short(&self) -> &str {
        match self.components.split_once('(') {
            Some((short, rest)) if rest.contains(')') => short.trim(),
            _ => &self.components,
        }
    }

    /// The level as a bare number: `Cantrip` → `0`, `3rd` → `3`
    pub fn level_numeric(&self) -> &str {
        if self.level == "Cantrip" {
            return "0";
        }
        ["st", "nd", "rd", "th"]
            .iter()
            .find_map(|suffix| self.level.strip_suffix(suffix))
            .unwrap_or(&self.level)
    }

    /// The classes that are known, in the order given
    pub fn known_classes(&self) -> impl Iterator<Item = &str> + '_ {
        self.classes
            .iter()
            .map(String::as_str)
            .filter(|c| CLASSES.contains(c))
    }

    /// The stat block printed on the back of the card
    pub fn info_text(&self) -> String {
        let classes: Vec<&str> = self.known_classes().collect();
        format!(
            "Level:        {}\n\
             Casting Time: {}\n\
             Duration:     {}\n\
             Range:        {}\n\
             Components:   {}\n\
             Classes:      {}",
            self.level,
            self.casting_time,
            self.duration,
            self.range,
            self.components,
            classes.join(", ")
        )
    }

    /// The rules text printed on the back of the card
    pub fn description_text(&self) -> String {
        match self.at_higher_levels.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(higher) => format!(
                "Description:\n{}\n\n\nAt Higher Levels:\n{}",
                self.description, higher
            ),
            None => format!("Description:\n{}", self.description),
        }
    }
}
