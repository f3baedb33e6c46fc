//! End-to-end generation against an in-memory library.

use eg_core::{
    FeatureList, HitLocationDef, LinkedTemplate, MagicType, Party, PartyFeatureBinding, SkillDef,
    SpellOption, StatDef, Template, TemplateId, TemplateLibrary,
};
use eg_mechanics::{GenerateConfig, Generator, MechError, generate, tables};
use rand::{RngCore, SeedableRng, rngs::StdRng};

fn stat(name: &str, formula: &str) -> StatDef {
    StatDef {
        name: name.to_string(),
        formula: formula.to_string(),
    }
}

fn skill(name: &str, formula: &str) -> SkillDef {
    SkillDef {
        name: name.to_string(),
        formula: formula.to_string(),
        include: true,
        custom: false,
    }
}

fn spell(name: &str, magic: MagicType, detail: Option<&str>) -> SpellOption {
    SpellOption {
        name: name.to_string(),
        magic,
        probability: 1,
        custom: false,
        detail: detail.map(str::to_string),
    }
}

fn link(id: u32) -> LinkedTemplate {
    LinkedTemplate {
        template: TemplateId(id),
        probability: 1,
    }
}

fn whole_body() -> HitLocationDef {
    HitLocationDef {
        name: "Body".to_string(),
        range_start: 1,
        range_end: 20,
        hp_modifier: "0".to_string(),
        armor: "0".to_string(),
        natural_armor: 0,
    }
}

fn seven_stats() -> Vec<StatDef> {
    vec![
        stat("STR", "3d6"),
        stat("CON", "3d6"),
        stat("SIZ", "2d6+6"),
        stat("DEX", "3d6"),
        stat("INT", "2d6+6"),
        stat("POW", "3d6"),
        stat("CHA", "3d6"),
    ]
}

fn spirit(id: u32, name: &str, pow: &str) -> Template {
    let mut t = Template::new(TemplateId(id), name);
    t.spirit = true;
    t.stats = vec![stat("INT", "2d6"), stat("POW", pow), stat("CHA", "2d6")];
    t
}

#[test]
fn standard_creature_end_to_end() {
    let mut lib = TemplateLibrary::new();
    let mut orc = Template::new(TemplateId(1), "Orc");
    orc.stats = seven_stats();
    orc.skills = vec![skill("Dodge", "DEX+DEX")];
    orc.hit_locations = vec![whole_body()];
    lib.add_template(orc).unwrap();

    let mut seen_plus_zero = false;
    for seed in 0..200 {
        let mut generator = Generator::new(&lib, GenerateConfig::default().with_seed(seed));
        let inst = generator.generate(TemplateId(1), None, false).unwrap();
        let (str, siz) = (inst.stat("STR"), inst.stat("SIZ"));

        assert_eq!(inst.skill("Dodge"), Some(2 * inst.stat("DEX")));
        assert_eq!(inst.hit_locations.len(), 1);
        assert_eq!(inst.hit_locations[0].range, "1-20");
        assert_eq!(
            inst.hit_locations[0].hp,
            tables::base_hit_points(inst.stat("CON"), siz).max(1)
        );
        assert_eq!(
            inst.attributes.action_points,
            tables::action_points(inst.stat("DEX") + inst.stat("INT"))
        );
        let damage = inst.attributes.damage_modifier.as_deref().unwrap();
        assert_eq!(damage, tables::damage_modifier(str, siz));
        if (21..=25).contains(&(str + siz)) {
            assert_eq!(damage, "+0");
            seen_plus_zero = true;
        }
        let sr = inst.attributes.strike_rank.unwrap();
        assert_eq!(sr.penalty, Some(0));
        assert_eq!(sr.value, sr.natural);
    }
    assert!(seen_plus_zero);
}

#[test]
fn spirit_stats_collapse_and_skip_the_body() {
    let mut lib = TemplateLibrary::new();
    let mut ghost = spirit(1, "Ghost", "2d6+6");
    ghost.stats.push(stat("STR", "3d6"));
    ghost.hit_locations = vec![whole_body()];
    lib.add_template(ghost).unwrap();

    let mut generator = Generator::new(&lib, GenerateConfig::default().with_seed(5));
    for inst in generator.batch(TemplateId(1), 10).unwrap() {
        let pow = inst.stat("POW");
        assert_eq!(inst.stat("STR"), pow);
        assert_eq!(inst.stat("CON"), pow);
        assert_eq!(inst.stat("SIZ"), pow);
        assert_eq!(inst.stat("DEX"), inst.stat("INT"));
        assert!(inst.hit_locations.is_empty());
        assert!(inst.combat_styles.is_empty());
        assert!(inst.attributes.spirit_damage.is_some());
        assert!(inst.attributes.damage_modifier.is_none());
    }
}

#[test]
fn bound_spirit_retries_are_bounded() {
    let mut lib = TemplateLibrary::new();
    let mut shaman = Template::new(TemplateId(1), "Shaman");
    shaman.stats = vec![stat("POW", "12"), stat("CHA", "12")];
    // Binding 10 caps bound POW at 3; both spirits always have POW 20.
    shaman.skills = vec![skill("Binding", "10")];
    shaman.spirits = vec![link(10), link(11)];
    shaman.spirit_amount = "2".to_string();
    lib.add_template(shaman).unwrap();
    lib.add_template(spirit(10, "Wisp", "20")).unwrap();
    lib.add_template(spirit(11, "Shade", "20")).unwrap();

    let mut generator = Generator::new(&lib, GenerateConfig::default().with_seed(9));
    let inst = generator.generate(TemplateId(1), None, false).unwrap();
    assert_eq!(inst.attributes.max_pow, Some(3));
    let names: Vec<&str> = inst.spirits.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Shade", "Wisp"]);
    assert!(inst.spirits.iter().all(|s| s.stat("POW") == 20));
}

#[test]
fn capped_spirit_keeps_the_fifth_attempt() {
    let mut lib = TemplateLibrary::new();
    let shaman = |id: u32, binding: &str| {
        let mut t = Template::new(TemplateId(id), "Shaman");
        t.stats = vec![stat("POW", "12"), stat("CHA", "12")];
        t.skills = vec![skill("Binding", binding)];
        t.spirits = vec![link(10)];
        t.spirit_amount = "1".to_string();
        t
    };
    // Binding 10 caps POW at 3, Binding 100 at 30; the wisp always has 20.
    lib.add_template(shaman(1, "10")).unwrap();
    let mut easy = shaman(2, "100");
    easy.name = "Easy Shaman".to_string();
    lib.add_template(easy).unwrap();
    lib.add_template(spirit(10, "Wisp", "20")).unwrap();
    let wisp = lib.get(TemplateId(10)).unwrap();

    let mut capped_rng = StdRng::seed_from_u64(21);
    let capped = generate(&lib, lib.get(TemplateId(1)).unwrap(), None, &mut capped_rng).unwrap();

    // The easy binder accepts its first wisp; four more wisps replay the
    // rejected attempts of the capped binder.
    let mut replay_rng = StdRng::seed_from_u64(21);
    let easy = generate(&lib, lib.get(TemplateId(2)).unwrap(), None, &mut replay_rng).unwrap();
    assert_eq!(easy.spirits.len(), 1);
    let mut attempts = vec![easy.spirits[0].clone()];
    for _ in 0..4 {
        attempts.push(generate(&lib, wisp, None, &mut replay_rng).unwrap());
    }

    assert_eq!(capped.attributes.max_pow, Some(3));
    assert_eq!(capped.spirits.len(), 1);
    assert_eq!(capped.spirits[0], attempts[4]);
    assert_eq!(capped_rng.next_u64(), replay_rng.next_u64());
}

#[test]
fn non_binders_spawn_no_spirits() {
    let mut lib = TemplateLibrary::new();
    let mut hunter = Template::new(TemplateId(1), "Hunter");
    hunter.skills = vec![skill("Binding", "0")];
    hunter.spirits = vec![link(10)];
    hunter.spirit_amount = "1".to_string();
    lib.add_template(hunter).unwrap();
    lib.add_template(spirit(10, "Wisp", "5")).unwrap();

    let mut generator = Generator::new(&lib, GenerateConfig::default().with_seed(1));
    let inst = generator.generate(TemplateId(1), None, false).unwrap();
    assert!(inst.spirits.is_empty());
    assert_eq!(inst.attributes.max_pow, None);
}

#[test]
fn cults_merge_spells_and_spirits() {
    let mut lib = TemplateLibrary::new();
    let mut acolyte = Template::new(TemplateId(1), "Acolyte");
    acolyte.spells = vec![spell("Heal", MagicType::Theism, None)];
    acolyte.spell_amounts.theism = "1".to_string();
    acolyte.cults = vec![link(2)];
    acolyte.cult_amount = "1".to_string();
    lib.add_template(acolyte).unwrap();

    let mut sun = Template::new(TemplateId(2), "Sun Cult");
    sun.cult = true;
    sun.spells = vec![
        spell("Smite", MagicType::Theism, None),
        spell("Heal", MagicType::Theism, Some("from the cult")),
    ];
    sun.spell_amounts.theism = "2".to_string();
    sun.spirits = vec![link(3)];
    sun.spirit_amount = "1".to_string();
    lib.add_template(sun).unwrap();
    lib.add_template(spirit(3, "Sun Wisp", "2d6")).unwrap();

    let mut generator = Generator::new(&lib, GenerateConfig::default().with_seed(3));
    let inst = generator.generate(TemplateId(1), None, false).unwrap();

    let theism = inst.spells.get(MagicType::Theism);
    let names: Vec<&str> = theism.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Heal", "Smite"]);
    assert_eq!(theism[0].detail, None);

    assert_eq!(inst.cults.len(), 1);
    assert_eq!(inst.cults[0].name, "Sun Cult");
    assert!(inst.cults[0].stats.is_empty());
    let spirits: Vec<&str> = inst.spirits.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(spirits, vec!["Sun Wisp"]);
    assert_eq!(inst.cults[0].spirits, inst.spirits);
}

#[test]
fn elemental_hit_points_pool() {
    let mut lib = TemplateLibrary::new();
    let mut gnome = Template::new(TemplateId(1), "Gnome");
    gnome.elemental = true;
    gnome.stats = vec![stat("STR", "3d6"), stat("POW", "1d6+6")];
    gnome.hit_locations = vec![whole_body()];
    lib.add_template(gnome).unwrap();

    let mut generator = Generator::new(&lib, GenerateConfig::default().with_seed(12));
    for inst in generator.batch(TemplateId(1), 20).unwrap() {
        let hp = inst.hit_locations[0].hp;
        assert!((13..=18).contains(&hp), "hp {hp}");
        assert_eq!(inst.stat("SIZ"), inst.stat("STR"));
        assert_eq!(inst.stat("CON"), inst.stat("STR"));
        assert_eq!(inst.stat("CHA"), inst.stat("POW"));
    }
}

#[test]
fn cyclic_links_hit_the_recursion_limit() {
    let mut lib = TemplateLibrary::new();
    let mut ouroboros = Template::new(TemplateId(1), "Ouroboros");
    ouroboros.cults = vec![link(1)];
    ouroboros.cult_amount = "1".to_string();
    lib.add_template(ouroboros).unwrap();

    let config = GenerateConfig::default().with_seed(1).with_max_depth(3);
    let mut generator = Generator::new(&lib, config);
    let err = generator.generate(TemplateId(1), None, false).unwrap_err();
    assert!(matches!(err, MechError::RecursionLimit { depth: 3, .. }));
}

#[test]
fn missing_link_is_reported() {
    let mut lib = TemplateLibrary::new();
    let mut acolyte = Template::new(TemplateId(1), "Acolyte");
    acolyte.cults = vec![link(42)];
    acolyte.cult_amount = "1".to_string();
    lib.add_template(acolyte).unwrap();

    let mut generator = Generator::new(&lib, GenerateConfig::default());
    let err = generator.generate(TemplateId(1), None, false).unwrap_err();
    assert!(matches!(err, MechError::UnknownTemplate(TemplateId(42))));
}

#[test]
fn party_generation() {
    let mut lib = TemplateLibrary::new();
    let mut orc = Template::new(TemplateId(1), "Orc");
    orc.stats = seven_stats();
    lib.add_template(orc).unwrap();
    let mut boss = Template::new(TemplateId(2), "Warlord");
    boss.rank = 5;
    boss.stats = seven_stats();
    lib.add_template(boss).unwrap();
    lib.add_template(Template::new(TemplateId(3), "Goblin")).unwrap();

    let mut party = Party::new("Warband");
    party.add(TemplateId(1), "3");
    party.add(TemplateId(2), "1");
    party.add(TemplateId(3), "0-2");
    party.feature_lists.push(PartyFeatureBinding {
        list: FeatureList {
            name: "Banner".to_string(),
            items: vec!["Red Hand".to_string()],
        },
        probability: 100,
    });

    let mut generator = Generator::new(&lib, GenerateConfig::default().with_seed(8));
    let generated = generator.party(&party);
    assert!(generated.failures.is_empty());
    let names: Vec<&str> = generated.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Warlord 1", "Orc 1", "Orc 2", "Orc 3"]);
    assert_eq!(generated.features.len(), 1);
    assert_eq!(generated.features[0].to_string(), "Banner: Red Hand");
    assert_eq!(lib.usage(TemplateId(1)).generated, 3);
    assert_eq!(lib.usage(TemplateId(2)).used, 1);
    assert_eq!(lib.usage(TemplateId(3)).used, 0);
}

#[test]
fn broken_party_members_do_not_block_the_rest() {
    let mut lib = TemplateLibrary::new();
    let mut orc = Template::new(TemplateId(1), "Orc");
    orc.stats = seven_stats();
    lib.add_template(orc).unwrap();
    let mut broken = Template::new(TemplateId(2), "Broken");
    broken.rank = 5;
    broken.stats = vec![stat("STR", "3d6+")];
    lib.add_template(broken).unwrap();
    lib.add_template(Template::new(TemplateId(3), "Goblin")).unwrap();

    let mut party = Party::new("Warband");
    party.add(TemplateId(1), "2");
    party.add(TemplateId(2), "1");
    party.add(TemplateId(3), "2d6+");

    let mut generator = Generator::new(&lib, GenerateConfig::default().with_seed(4));
    let generated = generator.party(&party);
    let names: Vec<&str> = generated.members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Orc 1", "Orc 2"]);
    assert_eq!(generated.failures.len(), 2);
    assert!(generated.failures.iter().any(|f| f.contains("\"Broken\"")));
    assert!(generated.failures.iter().any(|f| f.contains("amount of #3")));
    assert_eq!(lib.usage(TemplateId(1)).generated, 2);
    assert_eq!(lib.usage(TemplateId(2)).generated, 0);
}

#[test]
fn huge_constant_stats_saturate() {
    let mut lib = TemplateLibrary::new();
    let mut titan = Template::new(TemplateId(1), "Titan");
    titan.stats = ["STR", "CON", "SIZ", "DEX", "INT", "POW", "CHA"]
        .into_iter()
        .map(|name| stat(name, "2000000000"))
        .collect();
    titan.skills = vec![skill("Dodge", "DEX+DEX"), skill("Devotion", "POW")];
    titan.cult_rank = 5;
    titan.hit_locations = vec![whole_body()];
    lib.add_template(titan).unwrap();

    let mut storm = Template::new(TemplateId(2), "Storm");
    storm.elemental = true;
    storm.stats = vec![stat("STR", "2000000000"), stat("POW", "1d6+1500000000")];
    storm.hit_locations = vec![whole_body()];
    lib.add_template(storm).unwrap();

    let mut generator = Generator::new(&lib, GenerateConfig::default().with_seed(2));
    let titan = generator.generate(TemplateId(1), None, false).unwrap();
    assert_eq!(titan.skill("Dodge"), Some(i32::MAX));
    assert_eq!(titan.hit_locations[0].hp, tables::base_hit_points(i32::MAX, 0));
    assert_eq!(titan.attributes.action_points, 4);
    assert_eq!(titan.attributes.damage_modifier.as_deref(), Some("+5d10+1d8"));
    assert_eq!(titan.attributes.devotional_pool, Some(i32::MAX / 4 + 1));

    let storm = generator.generate(TemplateId(2), None, false).unwrap();
    assert_eq!(storm.hit_locations[0].hp, i32::MAX);
}
