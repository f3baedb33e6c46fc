//! The generation pipeline: templates in, rolled instances out.
//!
//! A [`Generator`] owns the RNG and configuration and reads templates from
//! any [`TemplateSource`]. Each call runs the variant-specific sequence of
//! steps (see [`Variant`]) and recursively generates bound spirits and
//! cults through the same source.

mod attributes;
mod combat;
mod features;
mod magic;
mod stats;
mod variant;

pub use variant::Variant;

use eg_core::{
    GeneratedInstance, GeneratedParty, Party, Template, TemplateId, TemplateSource,
};
use rand::rngs::StdRng;
use tracing::{debug, debug_span, warn};

use crate::config::GenerateConfig;
use crate::dice::{DiceExpr, SymbolTable};
use crate::error::{MechError, MechResult};

/// Generates instances, batches, encounters and parties from a template
/// source.
pub struct Generator<'a, S: TemplateSource + ?Sized> {
    source: &'a S,
    config: GenerateConfig,
    rng: StdRng,
}

impl<'a, S: TemplateSource + ?Sized> Generator<'a, S> {
    /// Create a generator. The RNG is seeded from the configuration.
    pub fn new(source: &'a S, config: GenerateConfig) -> Self {
        let rng = config.rng();
        Self {
            source,
            config,
            rng,
        }
    }

    /// Generate one instance of a template.
    ///
    /// With `increment_usage` the source is asked to record one generated
    /// instance.
    pub fn generate(
        &mut self,
        id: TemplateId,
        suffix: Option<u32>,
        increment_usage: bool,
    ) -> MechResult<GeneratedInstance> {
        let template = self.template(id)?;
        let instance = self.pipeline().run(template, suffix, 0)?;
        if increment_usage {
            self.source.record_usage(id, 1);
        }
        Ok(instance)
    }

    /// Generate `count` instances suffixed `1..=count`, capped at the
    /// configured batch size. Usage is recorded once for the whole batch.
    pub fn batch(&mut self, id: TemplateId, count: u32) -> MechResult<Vec<GeneratedInstance>> {
        let template = self.template(id)?;
        let count = if count > self.config.max_batch {
            warn!(
                template = %template.name,
                requested = count,
                max = self.config.max_batch,
                "batch size clamped"
            );
            self.config.max_batch
        } else {
            count
        };

        let mut pipeline = self.pipeline();
        let instances = (1..=count)
            .map(|n| pipeline.run(template, Some(n), 0))
            .collect::<MechResult<Vec<_>>>()?;
        if count > 0 {
            self.source.record_usage(id, u64::from(count));
        }
        Ok(instances)
    }

    /// Generate several batches, highest template rank first. Each batch
    /// succeeds or fails on its own.
    pub fn encounter(
        &mut self,
        specs: &[(TemplateId, u32)],
    ) -> Vec<MechResult<Vec<GeneratedInstance>>> {
        let mut ordered: Vec<(TemplateId, u32)> =
            specs.iter().copied().filter(|(_, n)| *n > 0).collect();
        ordered.sort_by_key(|(id, _)| {
            std::cmp::Reverse(self.source.template(*id).map_or(0, |t| t.rank))
        });
        ordered
            .into_iter()
            .map(|(id, count)| self.batch(id, count))
            .collect()
    }

    /// Generate a stored party: roll each member's amount, generate the
    /// encounter, then roll party-level features.
    ///
    /// A member whose amount or template fails is logged and recorded in
    /// [`GeneratedParty::failures`]; the other members are still generated.
    pub fn party(&mut self, party: &Party) -> GeneratedParty {
        let _span = debug_span!("party", party = %party.name).entered();
        let mut failures = Vec::new();
        let mut specs = Vec::with_capacity(party.members.len());
        for member in &party.members {
            match DiceExpr::parse(&member.amount) {
                Ok(expr) => {
                    let amount = expr.evaluate(&crate::dice::NoSymbols, &mut self.rng).max(0);
                    debug!(template = %member.template, amount, "party member amount");
                    specs.push((member.template, amount.unsigned_abs()));
                }
                Err(source) => {
                    let err = MechError::InvalidDiceExpression {
                        template: party.name.clone(),
                        field: format!("amount of {}", member.template),
                        source,
                    };
                    warn!(error = %err, "skipping party member");
                    failures.push(err.to_string());
                }
            }
        }

        let mut members = Vec::new();
        for batch in self.encounter(&specs) {
            match batch {
                Ok(instances) => members.extend(instances),
                Err(err) => {
                    warn!(error = %err, "skipping party member");
                    failures.push(err.to_string());
                }
            }
        }
        let features = features::party_features(party, &mut self.rng);
        GeneratedParty {
            name: party.name.clone(),
            notes: party.notes.clone(),
            members,
            features,
            failures,
        }
    }

    fn template(&self, id: TemplateId) -> MechResult<&'a Template> {
        self.source.template(id).ok_or(MechError::UnknownTemplate(id))
    }

    fn pipeline(&mut self) -> Pipeline<'_, S> {
        Pipeline {
            source: self.source,
            rng: &mut self.rng,
            max_depth: self.config.max_depth,
        }
    }
}

/// Run the pipeline on an already fetched template.
///
/// Linked spirits and cults are still fetched from `source`. Nesting is
/// limited to the default depth of [`GenerateConfig`].
pub fn generate<S: TemplateSource + ?Sized>(
    source: &S,
    template: &Template,
    suffix: Option<u32>,
    rng: &mut StdRng,
) -> MechResult<GeneratedInstance> {
    Pipeline {
        source,
        rng,
        max_depth: GenerateConfig::default().max_depth,
    }
    .run(template, suffix, 0)
}

/// State shared by the steps of one generation call and its recursive
/// spawns.
pub(crate) struct Pipeline<'a, S: TemplateSource + ?Sized> {
    source: &'a S,
    rng: &'a mut StdRng,
    max_depth: u32,
}

impl<'a, S: TemplateSource + ?Sized> Pipeline<'a, S> {
    /// Generate one instance of `template` at the given nesting depth.
    fn run(
        &mut self,
        template: &Template,
        suffix: Option<u32>,
        depth: u32,
    ) -> MechResult<GeneratedInstance> {
        if depth > self.max_depth {
            return Err(MechError::RecursionLimit {
                template: template.name.clone(),
                depth: self.max_depth,
            });
        }
        let variant = Variant::of(template);
        let _span = debug_span!("generate", template = %template.name, %variant, depth).entered();

        let mut inst = GeneratedInstance::new(template.name.clone(), template.kind());
        inst.rank = template.rank;
        inst.cult_rank = crate::tables::cult_rank_title(template.cult_rank, template.is_theist())
            .to_string();
        inst.movement = template.movement.clone();
        inst.notes = template.notes.clone();
        inst.name = self.roll_name(template, suffix);

        if variant.rolls_body() {
            self.roll_stats(template, variant, &mut inst)?;
            self.roll_skills(template, &mut inst)?;
        }
        self.roll_spells(template, &mut inst)?;
        if variant == Variant::Cult {
            self.spawn_cult_spirits(template, &mut inst, depth)?;
            return Ok(inst);
        }

        self.roll_features(template, &mut inst)?;
        if variant.has_hit_locations() {
            self.roll_hit_locations(template, variant, &mut inst)?;
        }
        self.derive_attributes(template, variant, &mut inst);
        if variant.binds_spirits() && attributes::is_binder(&inst) {
            self.spawn_bound_spirits(template, &mut inst, depth)?;
        }
        self.spawn_cults(template, &mut inst, depth)?;
        if variant.has_hit_locations() {
            self.roll_combat_styles(template, &mut inst)?;
        }
        inst.natural_armor = template.natural_armor;
        Ok(inst)
    }

    /// Evaluate a stored formula, naming the template and field on failure.
    fn roll(
        &mut self,
        template: &Template,
        field: impl FnOnce() -> String,
        formula: &str,
        symbols: &(impl SymbolTable + ?Sized),
    ) -> MechResult<i32> {
        let expr = DiceExpr::parse(formula).map_err(|source| MechError::InvalidDiceExpression {
            template: template.name.clone(),
            field: field(),
            source,
        })?;
        Ok(expr.evaluate(symbols, self.rng))
    }

    /// Evaluate an amount formula and clamp it to `0..=available`.
    fn roll_amount(
        &mut self,
        template: &Template,
        field: impl FnOnce() -> String,
        formula: &str,
        available: usize,
    ) -> MechResult<usize> {
        let amount = self.roll(template, field, formula, &crate::dice::NoSymbols)?;
        Ok(usize::try_from(amount).unwrap_or(0).min(available))
    }

    fn linked(&self, id: TemplateId) -> MechResult<&'a Template> {
        self.source.template(id).ok_or(MechError::UnknownTemplate(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eg_core::{StatDef, TemplateLibrary};
    use rand::SeedableRng;

    fn stat(name: &str, formula: &str) -> StatDef {
        StatDef {
            name: name.to_string(),
            formula: formula.to_string(),
        }
    }

    fn library() -> TemplateLibrary {
        let mut lib = TemplateLibrary::new();
        let mut orc = Template::new(TemplateId(1), "Orc");
        orc.rank = 2;
        orc.stats = vec![stat("STR", "3d6"), stat("SIZ", "2d6+6")];
        lib.add_template(orc).unwrap();
        let mut chief = Template::new(TemplateId(2), "Orc Chief");
        chief.rank = 4;
        chief.stats = vec![stat("STR", "3d6+6")];
        lib.add_template(chief).unwrap();
        lib
    }

    #[test]
    fn batch_names_and_usage() {
        let lib = library();
        let mut generator = Generator::new(&lib, GenerateConfig::default().with_seed(1));
        let batch = generator.batch(TemplateId(1), 3).unwrap();
        let names: Vec<&str> = batch.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Orc 1", "Orc 2", "Orc 3"]);
        let usage = lib.usage(TemplateId(1));
        assert_eq!((usage.used, usage.generated), (1, 3));
    }

    #[test]
    fn batch_is_capped() {
        let lib = library();
        let config = GenerateConfig::default().with_seed(1).with_max_batch(5);
        let mut generator = Generator::new(&lib, config);
        assert_eq!(generator.batch(TemplateId(1), 50).unwrap().len(), 5);
        assert_eq!(lib.usage(TemplateId(1)).generated, 5);
    }

    #[test]
    fn generate_increments_on_request() {
        let lib = library();
        let mut generator = Generator::new(&lib, GenerateConfig::default().with_seed(4));
        let orc = generator.generate(TemplateId(1), None, false).unwrap();
        assert_eq!(orc.name, "Orc");
        assert_eq!(lib.usage(TemplateId(1)).used, 0);
        generator.generate(TemplateId(1), Some(7), true).unwrap();
        assert_eq!(lib.usage(TemplateId(1)).generated, 1);
    }

    #[test]
    fn unknown_template() {
        let lib = library();
        let mut generator = Generator::new(&lib, GenerateConfig::default());
        assert!(matches!(
            generator.generate(TemplateId(99), None, false),
            Err(MechError::UnknownTemplate(TemplateId(99)))
        ));
    }

    #[test]
    fn encounter_orders_by_rank() {
        let lib = library();
        let mut generator = Generator::new(&lib, GenerateConfig::default().with_seed(2));
        let batches = generator.encounter(&[(TemplateId(1), 2), (TemplateId(99), 1), (TemplateId(2), 1)]);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].as_ref().unwrap()[0].template, "Orc Chief");
        assert_eq!(batches[1].as_ref().unwrap().len(), 2);
        assert!(batches[2].is_err());
    }

    #[test]
    fn same_seed_same_output() {
        let lib = library();
        let mut a = Generator::new(&lib, GenerateConfig::default().with_seed(77));
        let mut b = Generator::new(&lib, GenerateConfig::default().with_seed(77));
        assert_eq!(
            a.batch(TemplateId(1), 4).unwrap(),
            b.batch(TemplateId(1), 4).unwrap()
        );
    }

    #[test]
    fn free_function_runs_on_fetched_template() {
        let lib = library();
        let mut rng = StdRng::seed_from_u64(3);
        let orc = lib.get(TemplateId(1)).unwrap();
        let inst = generate(&lib, orc, Some(2), &mut rng).unwrap();
        assert_eq!(inst.name, "Orc 2");
        assert!((3..=18).contains(&inst.stat("STR")));
    }

    #[test]
    fn malformed_stat_formula_names_the_field() {
        let mut lib = TemplateLibrary::new();
        let mut bad = Template::new(TemplateId(5), "Broken");
        bad.stats = vec![stat("STR", "3d6+")];
        lib.add_template(bad).unwrap();
        let mut generator = Generator::new(&lib, GenerateConfig::default());
        let err = generator.generate(TemplateId(5), None, false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "template \"Broken\": invalid stat STR: malformed dice expression \"3d6+\": sign without an operand"
        );
    }
}
