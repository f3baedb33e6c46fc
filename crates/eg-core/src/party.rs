use serde::{Deserialize, Serialize};

use crate::template::{FeatureList, FixedFeature, TemplateId};

/// A template taking part in a party, with a dice formula for how many
/// of it show up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyMember {
    /// The member template.
    pub template: TemplateId,
    /// Dice formula for how many show up.
    #[serde(default = "default_amount")]
    pub amount: String,
}

/// A feature list rolled once for the whole party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyFeatureBinding {
    /// The list to draw from.
    pub list: FeatureList,
    /// Flat percentage chance (0-100).
    #[serde(default = "default_party_probability")]
    pub probability: u32,
}

/// A stored group of templates generated together as one encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    /// Unique party name.
    pub name: String,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// Member templates with their amounts.
    #[serde(default)]
    pub members: Vec<PartyMember>,
    /// Feature lists rolled once per generation.
    #[serde(default)]
    pub feature_lists: Vec<PartyFeatureBinding>,
    /// Features always present.
    #[serde(default)]
    pub fixed_features: Vec<FixedFeature>,
}

impl Party {
    /// Create an empty party.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            notes: String::new(),
            members: Vec::new(),
            feature_lists: Vec::new(),
            fixed_features: Vec::new(),
        }
    }

    /// Add a template with an amount formula. A template already in the
    /// party is left untouched.
    pub fn add(&mut self, template: TemplateId, amount: impl Into<String>) {
        if self.members.iter().any(|m| m.template == template) {
            return;
        }
        self.members.push(PartyMember {
            template,
            amount: amount.into(),
        });
    }
}

fn default_amount() -> String {
    "1".to_string()
}

fn default_party_probability() -> u32 {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_ignores_duplicates() {
        let mut party = Party::new("Bandits");
        party.add(TemplateId(1), "1d3");
        party.add(TemplateId(1), "5");
        party.add(TemplateId(2), "1");
        assert_eq!(party.members.len(), 2);
        assert_eq!(party.members[0].amount, "1d3");
    }

    #[test]
    fn deserialize_defaults() {
        let json = r#"{
            "name": "Ambush",
            "members": [{"template": 3}],
            "feature_lists": [{"list": {"name": "Weather", "items": ["Rain"]}}]
        }"#;
        let party: Party = serde_json::from_str(json).unwrap();
        assert_eq!(party.members[0].amount, "1");
        assert_eq!(party.feature_lists[0].probability, 50);
        assert!(party.fixed_features.is_empty());
    }
}
