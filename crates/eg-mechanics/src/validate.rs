//! Validation of formulas, templates and whole libraries.
//!
//! Stored formulas are checked by parsing them and evaluating them with
//! every symbol set to 0. Templates are additionally checked for hit
//! location coverage and for links that do not resolve.

use eg_core::{Template, TemplateKind, TemplateLibrary, TemplateSource, WeaponSlot};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::dice::{self, DiceError, DiceExpr, NoSymbols};

/// A warning or error found during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The template or party where the issue was found.
    pub entity: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.entity, self.message)
    }
}

/// Returns true if `text` parses and evaluates with every symbol at 0.
pub fn validate_expression(text: &str) -> bool {
    match DiceExpr::parse(text) {
        Ok(expr) => {
            let mut rng = StdRng::seed_from_u64(0);
            expr.evaluate(&NoSymbols, &mut rng);
            true
        }
        Err(_) => false,
    }
}

/// Validate a formula before storing it and return its canonical form.
pub fn check_formula(text: &str) -> Result<String, DiceError> {
    dice::canonicalize(text)
}

/// Validate every formula and link of a template.
pub fn validate_template(
    template: &Template,
    source: &(impl TemplateSource + ?Sized),
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let entity = format!("template '{}'", template.name);
    let mut formula = |field: String, text: &str| {
        if let Err(e) = DiceExpr::parse(text) {
            issues.push(ValidationIssue {
                entity: entity.clone(),
                message: format!("{field}: {e}"),
                is_error: true,
            });
        }
    };

    for stat in &template.stats {
        formula(format!("stat {}", stat.name), &stat.formula);
    }
    for skill in &template.skills {
        formula(format!("skill {}", skill.name), &skill.formula);
    }
    for magic in eg_core::MagicType::ALL {
        formula(format!("{magic} amount"), template.spell_amounts.for_type(magic));
    }
    for location in &template.hit_locations {
        formula(format!("hit points of {}", location.name), &location.hp_modifier);
        formula(format!("armor of {}", location.name), &location.armor);
    }
    for style in &template.combat_styles {
        formula(format!("combat style {}", style.name), &style.formula);
        for slot in WeaponSlot::ALL {
            formula(
                format!("{slot} amount of {}", style.name),
                style.amounts.for_slot(slot),
            );
        }
    }
    for binding in &template.feature_lists {
        formula(
            format!("probability of {}", binding.list.name),
            &binding.probability,
        );
    }
    formula("spirit amount".to_string(), &template.spirit_amount);
    formula("cult amount".to_string(), &template.cult_amount);

    check_hit_location_coverage(template, &entity, &mut issues);
    check_links(template, source, &entity, &mut issues);
    issues
}

/// Validate every template and party of a library.
pub fn validate_library(library: &TemplateLibrary) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for template in library.templates() {
        issues.extend(validate_template(template, library));
    }
    for party in library.parties() {
        let entity = format!("party '{}'", party.name);
        if party.members.is_empty() {
            issues.push(ValidationIssue {
                entity: entity.clone(),
                message: "no members".to_string(),
                is_error: false,
            });
        }
        for member in &party.members {
            if library.get(member.template).is_none() {
                issues.push(ValidationIssue {
                    entity: entity.clone(),
                    message: format!("unknown template {}", member.template),
                    is_error: true,
                });
            }
            if let Err(e) = DiceExpr::parse(&member.amount) {
                issues.push(ValidationIssue {
                    entity: entity.clone(),
                    message: format!("amount of {}: {e}", member.template),
                    is_error: true,
                });
            }
        }
        for binding in &party.feature_lists {
            if binding.probability > 100 {
                issues.push(ValidationIssue {
                    entity: entity.clone(),
                    message: format!(
                        "feature list '{}' has probability {} above 100",
                        binding.list.name, binding.probability
                    ),
                    is_error: false,
                });
            }
        }
    }
    issues
}

/// Corporeal templates must cover every d20 result with a hit location.
fn check_hit_location_coverage(
    template: &Template,
    entity: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    if matches!(template.kind(), TemplateKind::Spirit | TemplateKind::Cult) {
        return;
    }
    let mut hits = [0u32; 21];
    for location in &template.hit_locations {
        if location.range_start > location.range_end {
            issues.push(ValidationIssue {
                entity: entity.to_string(),
                message: format!(
                    "hit location '{}' has an empty range {}",
                    location.name,
                    location.range_label()
                ),
                is_error: true,
            });
            continue;
        }
        for n in location.range_start..=location.range_end.min(20) {
            hits[n as usize] += 1;
        }
    }

    let missing: Vec<String> = (1..=20)
        .filter(|&n| hits[n] == 0)
        .map(|n| n.to_string())
        .collect();
    if !missing.is_empty() {
        issues.push(ValidationIssue {
            entity: entity.to_string(),
            message: format!("hit locations do not cover d20 results {}", missing.join(", ")),
            is_error: true,
        });
    }
    let overlapping: Vec<String> = (1..=20)
        .filter(|&n| hits[n] > 1)
        .map(|n| n.to_string())
        .collect();
    if !overlapping.is_empty() {
        issues.push(ValidationIssue {
            entity: entity.to_string(),
            message: format!("hit locations overlap on {}", overlapping.join(", ")),
            is_error: false,
        });
    }
}

/// Links must resolve; spirits should link spirits and cults should link
/// cults.
fn check_links(
    template: &Template,
    source: &(impl TemplateSource + ?Sized),
    entity: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let groups = [
        ("spirit", &template.spirits, TemplateKind::Spirit),
        ("cult", &template.cults, TemplateKind::Cult),
    ];
    for (label, links, expected) in groups {
        for link in links {
            match source.template(link.template) {
                None => issues.push(ValidationIssue {
                    entity: entity.to_string(),
                    message: format!("linked {label} {} does not exist", link.template),
                    is_error: true,
                }),
                Some(linked) if linked.kind() != expected => issues.push(ValidationIssue {
                    entity: entity.to_string(),
                    message: format!(
                        "linked {label} '{}' is a {} template",
                        linked.name,
                        linked.kind()
                    ),
                    is_error: false,
                }),
                Some(_) => {}
            }
        }
    }
}
